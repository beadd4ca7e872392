//! Typing ergonomics of an encoding on a physical keyboard layout.
//!
//! `Report::build` walks the output code once and counts row and finger
//! usage, hand alternation, same-finger leaps across rows and same-key runs.
//! Every windowed count comes with its percentage of the windows of that
//! width in the code.

mod layout;

pub use layout::{Hand, Layout, GROUP_LEN};

use std::io;

use serde::Serialize;

use crate::finder::Encoding;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("{group} must list 5 key strings, found {found}")]
    RowCount { group: &'static str, found: usize },

    #[error("key '{key}' appears in more than one of the {group}")]
    DuplicateKey { key: char, group: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("cannot review an empty code")]
    EmptyCode,
}

/// Same-key runs are tracked up to this length.
const MAX_RUN: usize = 5;

/// Highest row a same-finger leap is measured on (bottom row).
const LEAP_ROWS: usize = 3;

/// A count and its share of the windows it was counted over, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Ratio {
    pub count: usize,
    pub percent: f64,
}

impl Ratio {
    fn over_windows(count: usize, code_len: usize, width: usize) -> Self {
        let windows = (code_len + 1).saturating_sub(width);
        Self {
            count,
            percent: percent(count as f64, windows as f64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandUsage {
    pub total: Ratio,
    /// Thumb, index, middle, ring, pinky.
    pub fingers: [Ratio; GROUP_LEN],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub text_len: usize,
    pub code_len: usize,
    pub cost: f64,
    pub code_len_per_char: f64,
    pub cost_per_char: f64,
    pub cost_per_key: f64,
    /// Left/right imbalance in percent of all keys typed by either hand.
    pub bias_percent: f64,
    /// L-R-L and R-L-R triples.
    pub alternations: Ratio,
    /// Number, top, home, bottom, thumb.
    pub rows: [Ratio; GROUP_LEN],
    pub left: HandUsage,
    pub right: HandUsage,
    /// Same finger moving across 1, 2 and 3 rows.
    pub leaps: [Ratio; 3],
    /// Runs of the same key at least 2, 3 and 4 long.
    pub repeats: [Ratio; 3],
    /// Key pairs that had no cost and were charged the mean.
    pub missing_pairs: Vec<String>,
    pub code: String,
}

#[derive(Default)]
struct Counts {
    rows: [usize; GROUP_LEN],
    left: [usize; GROUP_LEN],
    right: [usize; GROUP_LEN],
    leaps: [usize; 3],
    /// runs[n] = windows of n + 2 identical keys
    runs: [usize; MAX_RUN - 1],
    alternations: usize,
}

impl Report {
    pub fn build(encoding: &Encoding, layout: &Layout) -> Result<Self, ReportError> {
        let code: Vec<char> = encoding.code.chars().collect();
        if code.is_empty() {
            return Err(ReportError::EmptyCode);
        }
        let counts = count(&code, layout);
        let code_len = code.len();
        let text_len = encoding.text_len;

        let left_sum: usize = counts.left.iter().sum();
        let right_sum: usize = counts.right.iter().sum();
        let bias_percent = percent(
            left_sum.abs_diff(right_sum) as f64,
            (left_sum + right_sum) as f64,
        );
        let singles = |n: usize| Ratio::over_windows(n, code_len, 1);
        let hand = |fingers: &[usize; GROUP_LEN], total: usize| HandUsage {
            total: singles(total),
            fingers: fingers.map(singles),
        };
        let repeats = [2, 3, 4].map(|n| {
            let runs = counts.runs[n - 2] - counts.runs[n - 1];
            Ratio::over_windows(runs, code_len, n)
        });

        Ok(Self {
            text_len,
            code_len,
            cost: encoding.cost,
            code_len_per_char: ratio(code_len as f64, text_len as f64),
            cost_per_char: ratio(encoding.cost, text_len as f64),
            cost_per_key: ratio(encoding.cost, code_len as f64),
            bias_percent,
            alternations: Ratio::over_windows(counts.alternations, code_len, 3),
            rows: counts.rows.map(singles),
            left: hand(&counts.left, left_sum),
            right: hand(&counts.right, right_sum),
            leaps: counts.leaps.map(|n| Ratio::over_windows(n, code_len, 2)),
            repeats,
            missing_pairs: Vec::new(),
            code: encoding.code.clone(),
        })
    }

    /// Attach the key pairs the search had to charge at the mean cost.
    pub fn with_missing_pairs(mut self, pairs: impl IntoIterator<Item = (char, char)>) -> Self {
        self.missing_pairs = pairs
            .into_iter()
            .map(|(c1, c2)| [c1, c2].iter().collect())
            .collect();
        self
    }

    /// Render the tab-separated text report, ending with the code itself.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "------ data ------".to_string(),
            format!("chars\t{}", self.text_len),
            format!("keys\t{}", self.code_len),
            format!("cost\t{}", num(self.cost)),
            format!("keys per char\t{}", num(self.code_len_per_char)),
            format!("cost per char\t{}", num(self.cost_per_char)),
            format!("cost per key\t{}", num(self.cost_per_key)),
            format!("bias\t{} %", num(self.bias_percent)),
            format!("alternation\t{}", cell(self.alternations)),
            SEPARATOR.to_string(),
        ];
        let rows = ["number row", "top row", "home row", "bottom row", "thumb row"];
        lines.extend(rows.iter().zip(&self.rows).map(|(l, r)| format!("{l}\t{}", cell(*r))));
        for (name, usage) in [("left hand", &self.left), ("right hand", &self.right)] {
            lines.push(SEPARATOR.to_string());
            lines.push(format!("{name}\t{}", cell(usage.total)));
            lines.extend(
                FINGERS
                    .iter()
                    .zip(&usage.fingers)
                    .map(|(f, r)| format!("{f}\t{}", cell(*r))),
            );
        }
        lines.push(SEPARATOR.to_string());
        lines.extend(
            self.leaps
                .iter()
                .enumerate()
                .map(|(i, r)| format!("same finger {} row\t{}", i + 1, cell(*r))),
        );
        lines.push(SEPARATOR.to_string());
        lines.extend(
            self.repeats
                .iter()
                .enumerate()
                .map(|(i, r)| format!("same key x{}\t{}", i + 2, cell(*r))),
        );
        if !self.missing_pairs.is_empty() {
            lines.push("------ missing_pairs ------".to_string());
            lines.extend(self.missing_pairs.iter().cloned());
        }
        lines.push("------ code ------".to_string());
        lines.push(self.code.clone());
        lines
    }
}

const SEPARATOR: &str = "------------------";

const FINGERS: [&str; GROUP_LEN] = ["thumb", "index", "middle", "ring", "pinky"];

fn count(code: &[char], layout: &Layout) -> Counts {
    let mut counts = Counts::default();
    for (i, &c) in code.iter().enumerate() {
        if let Some(row) = layout.row(c) {
            counts.rows[row] += 1;
        }
        match layout.finger(c) {
            Some((Hand::Left, f)) => counts.left[f] += 1,
            Some((Hand::Right, f)) => counts.right[f] += 1,
            None => {}
        }

        for len in 2..=MAX_RUN {
            if i + 1 >= len && code[i + 1 - len..i].iter().all(|&p| p == c) {
                counts.runs[len - 2] += 1;
            } else {
                break;
            }
        }

        if i >= 1 && code[i - 1] != c {
            if let Some(rows) = leap(layout, code[i - 1], c) {
                counts.leaps[rows - 1] += 1;
            }
        }
        if i >= 2 {
            let hands = [code[i - 2], code[i - 1], c].map(|k| layout.hand(k));
            if let [Some(h1), Some(h2), Some(h3)] = hands {
                if h1 == h3 && h1 != h2 {
                    counts.alternations += 1;
                }
            }
        }
    }
    counts
}

/// Rows crossed when `c2` follows `c1` on the same finger, within the
/// number..bottom rows.
fn leap(layout: &Layout, c1: char, c2: char) -> Option<usize> {
    let finger = layout.finger(c1)?;
    if layout.finger(c2)? != finger {
        return None;
    }
    let (r1, r2) = (layout.row(c1)?, layout.row(c2)?);
    if r1 > LEAP_ROWS || r2 > LEAP_ROWS || r1 == r2 {
        return None;
    }
    Some(r1.abs_diff(r2))
}

fn ratio(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        0.0
    } else {
        a / b
    }
}

fn percent(a: f64, b: f64) -> f64 {
    100.0 * ratio(a, b)
}

/// At most four decimals, trailing zeros dropped.
fn num(x: f64) -> String {
    let s = format!("{x:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn cell(r: Ratio) -> String {
    format!("{}\t{} %", r.count, num(r.percent))
}
