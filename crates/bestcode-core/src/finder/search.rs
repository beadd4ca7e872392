use std::mem;

use tracing::trace;

use super::{Encoding, FinderError, Segment};
use crate::dict::{CodeCost, WordCodeTrie};
use crate::linker::Linker;

/// Keys kept live at the convergence point; Jd6 inspects and may rewrite
/// the last two keys of the prior code.
const LIVE_TAIL: usize = 2;

/// The live DP window over the unconsumed part of the text.
///
/// Index `k` in `text`/`best` is absolute position `base + k`.
pub(super) struct Search<'a> {
    trie: &'a WordCodeTrie,
    linker: Linker<'a>,
    text: Vec<char>,
    /// best[k] = cheapest code for text up to absolute position `base + k`
    best: Vec<Option<CodeCost>>,
    base: usize,
    /// next position to relax
    cur: usize,
    /// rightmost position with a defined `best`
    furthest: usize,
    /// output keys that no later link can revise
    committed: String,
    /// path[j] = last segment of the best path to absolute position `j`
    path: Option<Vec<Option<Segment>>>,
    candidates: Vec<Option<&'a CodeCost>>,
}

impl<'a> Search<'a> {
    pub(super) fn new(trie: &'a WordCodeTrie, linker: Linker<'a>, record_path: bool) -> Self {
        Self {
            trie,
            linker,
            text: Vec::new(),
            best: vec![Some(CodeCost::empty())],
            base: 0,
            cur: 0,
            furthest: 0,
            committed: String::new(),
            path: record_path.then(|| vec![None]),
            candidates: Vec::with_capacity(trie.max_word_len()),
        }
    }

    pub(super) fn window_len(&self) -> usize {
        self.text.len()
    }

    /// Append a chunk and relax every position whose candidates are final.
    pub(super) fn feed(&mut self, chunk: &[char]) -> Result<(), FinderError> {
        self.text.drain(..self.cur);
        self.best.drain(..self.cur);
        self.base += self.cur;
        self.furthest -= self.cur;
        self.cur = 0;

        self.text.extend_from_slice(chunk);
        self.best.resize(self.text.len() + 1, None);
        if let Some(path) = &mut self.path {
            path.resize(self.base + self.text.len() + 1, None);
        }
        self.advance(false)
    }

    /// Relax the remaining positions and return the final encoding, plus the
    /// optimal path when it was recorded.
    pub(super) fn finish(mut self) -> Result<(Encoding, Vec<Segment>), FinderError> {
        self.advance(true)?;
        let text_len = self.base + self.text.len();
        if text_len == 0 {
            return Err(FinderError::EmptyInput);
        }
        let last = self.best[self.text.len()]
            .take()
            .ok_or(FinderError::Stalled { position: text_len })?;
        let segments = match self.path.take() {
            Some(mut path) => backtrace(&mut path, text_len)?,
            None => Vec::new(),
        };
        self.committed.push_str(&last.code);
        Ok((
            Encoding {
                code: self.committed,
                cost: last.cost,
                text_len,
            },
            segments,
        ))
    }

    fn advance(&mut self, is_final: bool) -> Result<(), FinderError> {
        while self.cur < self.text.len() {
            if !self.step(is_final)? {
                break;
            }
            self.cur += 1;
        }
        Ok(())
    }

    /// Relax position `cur`. Returns `false` when a longer dictionary word
    /// could still match once more text arrives.
    fn step(&mut self, is_final: bool) -> Result<bool, FinderError> {
        let cur = self.cur;
        if cur == self.furthest {
            self.commit(cur);
        }

        let end = (cur + self.trie.max_word_len()).min(self.text.len());
        let mut candidates = mem::take(&mut self.candidates);
        let truncated = self.trie.candidates(&self.text[cur..end], &mut candidates);
        if truncated && !is_final {
            self.candidates = candidates;
            return Ok(false);
        }
        let result = candidates
            .iter()
            .enumerate()
            .filter_map(|(depth, cc)| cc.map(|cc| (cur + depth + 1, cc)))
            .try_for_each(|(to, cc)| self.relax(cur, to, cc, false));
        self.candidates = candidates;
        result?;

        if self.best[cur + 1].is_none() {
            let fallback = CodeCost::new(self.text[cur].to_string(), 0.0);
            self.relax(cur, cur + 1, &fallback, true)?;
        }
        Ok(true)
    }

    /// Link `next` onto `best[from]` and keep it at `best[to]` if strictly cheaper.
    fn relax(
        &mut self,
        from: usize,
        to: usize,
        next: &CodeCost,
        fallback: bool,
    ) -> Result<(), FinderError> {
        let (head, tail) = self.best.split_at_mut(to);
        let prior = head[from].as_ref().ok_or(FinderError::Stalled {
            position: self.base + from,
        })?;
        let join = self.linker.join(prior, next)?;
        let slot = &mut tail[0];
        if slot.as_ref().is_some_and(|held| held.cost <= join.cost) {
            return Ok(());
        }
        *slot = Some(CodeCost {
            code: join.apply(&prior.code, &next.code),
            cost: join.cost,
        });
        self.furthest = self.furthest.max(to);
        if let Some(path) = &mut self.path {
            path[self.base + to] = Some(Segment {
                start: self.base + from,
                end: self.base + to,
                code: next.code.clone(),
                fallback,
            });
        }
        Ok(())
    }

    /// Move all but the last `LIVE_TAIL` keys of `best[at]` to the output.
    fn commit(&mut self, at: usize) {
        let Some(held) = self.best[at].as_mut() else {
            return;
        };
        let len = held.code.chars().count();
        if len <= LIVE_TAIL {
            return;
        }
        let split = held
            .code
            .char_indices()
            .nth(len - LIVE_TAIL)
            .map_or(held.code.len(), |(i, _)| i);
        self.committed.push_str(&held.code[..split]);
        held.code.drain(..split);
        trace!(
            position = self.base + at,
            committed = self.committed.len(),
            "committed"
        );
    }
}

fn backtrace(path: &mut [Option<Segment>], end: usize) -> Result<Vec<Segment>, FinderError> {
    let mut segments = Vec::new();
    let mut pos = end;
    while pos > 0 {
        let segment = path[pos]
            .take()
            .ok_or(FinderError::Stalled { position: pos })?;
        pos = segment.start;
        segments.push(segment);
    }
    segments.reverse();
    Ok(segments)
}
