use std::io::{self, ErrorKind, Read};
use std::str;

const READ_BYTES: usize = 64 * 1024;

const BOM: char = '\u{FEFF}';

/// Splits a UTF-8 byte stream into chunks of at most `chunk_chars` chars.
///
/// Multi-byte sequences cut by a read boundary are carried over to the next
/// read. A leading byte-order mark is dropped.
pub(super) struct CharChunks<R> {
    reader: R,
    chunk_chars: usize,
    bytes: Vec<u8>,
    eof: bool,
    at_start: bool,
}

impl<R: Read> CharChunks<R> {
    pub(super) fn new(reader: R, chunk_chars: usize) -> Self {
        Self {
            reader,
            chunk_chars: chunk_chars.max(1),
            bytes: Vec::new(),
            eof: false,
            at_start: true,
        }
    }

    /// The next chunk, or `None` once the stream is exhausted.
    pub(super) fn next_chunk(&mut self) -> io::Result<Option<Vec<char>>> {
        let mut chars = Vec::with_capacity(self.chunk_chars.min(READ_BYTES));
        loop {
            self.decode_into(&mut chars)?;
            if chars.len() == self.chunk_chars {
                return Ok(Some(chars));
            }
            if self.eof {
                if !self.bytes.is_empty() {
                    return Err(invalid_data("stream ends inside a UTF-8 sequence"));
                }
                return Ok((!chars.is_empty()).then_some(chars));
            }
            self.fill()?;
        }
    }

    /// Move decoded chars from the byte buffer into `chars` until it is full
    /// or only an incomplete sequence remains.
    fn decode_into(&mut self, chars: &mut Vec<char>) -> io::Result<()> {
        let valid = match str::from_utf8(&self.bytes) {
            Ok(s) => s.len(),
            Err(e) if e.valid_up_to() == 0 && e.error_len().is_some() => {
                return Err(invalid_data("input is not valid UTF-8"));
            }
            Err(e) => e.valid_up_to(),
        };
        let text = str::from_utf8(&self.bytes[..valid])
            .map_err(|_| invalid_data("input is not valid UTF-8"))?;

        let mut consumed = 0;
        for (i, c) in text.char_indices() {
            if chars.len() == self.chunk_chars {
                break;
            }
            consumed = i + c.len_utf8();
            if self.at_start {
                self.at_start = false;
                if c == BOM {
                    continue;
                }
            }
            chars.push(c);
        }
        self.bytes.drain(..consumed);
        Ok(())
    }

    fn fill(&mut self) -> io::Result<()> {
        let mut buf = [0u8; READ_BYTES];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.bytes.extend_from_slice(&buf[..n]);
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

fn invalid_data(msg: &str) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, msg.to_string())
}
