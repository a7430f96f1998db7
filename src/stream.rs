//! Lazy multi-form reading from an incremental byte source.
//!
//! edn has no enclosing top-level container, so a source is simply a run of
//! forms separated by trivia. [`Reader`] pulls bytes on demand, keeps just
//! enough buffered text to finish the current form, and yields one
//! [`Value`] per call through its [`Iterator`] impl.
//!
//! Incremental input raises two edge cases a plain string parser never
//! sees, both handled here:
//!
//! - A form can fail with "unexpected end of input" merely because the rest
//!   of it has not arrived yet; the reader pulls more bytes and retries.
//! - A token-like form (`123`, `foo`) can parse successfully yet end exactly
//!   at the buffer edge, where the next chunk might extend it (`1234`); the
//!   reader refuses to commit such a form until the source is exhausted or
//!   the buffer reaches past it.
//!
//! Chunks may split multi-byte UTF-8 sequences; incomplete trailing bytes
//! are held back until the rest arrives. The iterator ends cleanly at end
//! of source between forms, fails with the parser's error mid-form, and is
//! fused after any error. A `Reader` owns its cursor exclusively and is not
//! meant to be shared.
//!
//! ## Examples
//!
//! ```rust
//! use edn_codec::{read_stream, Value};
//!
//! let source = "1 2 #{4 5} \"foo\"".as_bytes();
//! let values: Vec<_> = read_stream(source).collect::<Result<_, _>>().unwrap();
//! assert_eq!(values.len(), 4);
//! assert_eq!(values[0], Value::int(1));
//! assert_eq!(values[3], Value::string("foo"));
//! ```

use std::io;

use crate::parser::Parser;
use crate::value::Value;
use crate::{Error, Result};

const CHUNK_SIZE: usize = 8 * 1024;

/// Creates a lazy reader yielding one [`Value`] per top-level form.
///
/// The source must be UTF-8 text. Nothing is read until the first call to
/// `next`.
pub fn read_stream<R: io::Read>(source: R) -> Reader<R> {
    Reader {
        source,
        buf: String::new(),
        pending: Vec::new(),
        pos: 0,
        line: 1,
        col: 1,
        source_done: false,
        failed: false,
    }
}

/// A pull-based reader over an [`io::Read`] source of edn text.
///
/// Created by [`read_stream`].
pub struct Reader<R> {
    source: R,
    /// Decoded text accumulated so far; `pos` marks the committed prefix.
    buf: String,
    /// Raw bytes held back because they end mid-way through a UTF-8
    /// sequence.
    pending: Vec<u8>,
    pos: usize,
    line: usize,
    col: usize,
    source_done: bool,
    failed: bool,
}

impl<R: io::Read> Reader<R> {
    /// Pulls one chunk from the source into the text buffer.
    ///
    /// Returns `Ok(true)` if any decoded text was added. Sets `source_done`
    /// once the source reports end of input.
    fn fill(&mut self) -> Result<bool> {
        if self.source_done {
            return Ok(false);
        }
        let mut chunk = [0u8; CHUNK_SIZE];
        let n = self
            .source
            .read(&mut chunk)
            .map_err(|e| Error::io(&e.to_string()))?;
        if n == 0 {
            self.source_done = true;
            if !self.pending.is_empty() {
                return Err(Error::custom("stream ended inside a UTF-8 sequence"));
            }
            return Ok(false);
        }
        self.pending.extend_from_slice(&chunk[..n]);
        let (valid_up_to, invalid) = match std::str::from_utf8(&self.pending) {
            Ok(_) => (self.pending.len(), false),
            Err(e) => (e.valid_up_to(), e.error_len().is_some()),
        };
        if invalid {
            return Err(Error::custom("stream is not valid UTF-8"));
        }
        let grew = valid_up_to > 0;
        // The prefix was just validated; re-checking it would be wasted
        // work, but from_utf8 on the split keeps this unsafe-free.
        if grew {
            self.buf
                .push_str(std::str::from_utf8(&self.pending[..valid_up_to]).unwrap_or_default());
            self.pending.drain(..valid_up_to);
        }
        Ok(grew)
    }

    fn commit(&mut self, state: (usize, usize, usize)) {
        let (pos, line, col) = state;
        self.pos = pos;
        self.line = line;
        self.col = col;
    }
}

impl<R: io::Read> Iterator for Reader<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            // Restart from the last committed position each attempt; a
            // failed attempt consumes nothing.
            let mut parser = Parser::resume(&self.buf, self.pos, self.line, self.col);
            let skipped = parser.skip_trivia();

            match skipped {
                Err(e) if e.is_incomplete() && !self.source_done => match self.fill() {
                    Ok(_) => continue,
                    Err(io_err) => {
                        self.failed = true;
                        return Some(Err(io_err));
                    }
                },
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
                Ok(()) => {}
            }

            if parser.at_end() {
                if self.source_done {
                    return None;
                }
                match self.fill() {
                    // Take another pass either way: fill() flags
                    // end-of-source, so the next pass can end cleanly.
                    Ok(_) => continue,
                    Err(io_err) => {
                        self.failed = true;
                        return Some(Err(io_err));
                    }
                }
            }

            match parser.parse_form() {
                Ok(value) => {
                    if parser.at_end() && !self.source_done {
                        // The form may be a truncated token; wait for more
                        // input before committing it.
                        match self.fill() {
                            Ok(_) => continue,
                            Err(io_err) => {
                                self.failed = true;
                                return Some(Err(io_err));
                            }
                        }
                    }
                    let state = parser.state();
                    self.commit(state);
                    return Some(Ok(value));
                }
                Err(e) if e.is_incomplete() && !self.source_done => match self.fill() {
                    Ok(_) => continue,
                    Err(io_err) => {
                        self.failed = true;
                        return Some(Err(io_err));
                    }
                },
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feeds the reader a fixed number of bytes per read call, forcing
    /// forms and UTF-8 sequences to straddle chunk boundaries.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl io::Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(self.data.len()).min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_iterator() {
        let mut stream = read_stream("1 2 #{4 5} \"foo\" [bar qux]".as_bytes());
        assert_eq!(stream.next().unwrap().unwrap(), Value::int(1));
        assert_eq!(stream.next().unwrap().unwrap(), Value::int(2));
        assert_eq!(
            stream.next().unwrap().unwrap(),
            Value::set(vec![Value::int(4), Value::int(5)]),
        );
        assert_eq!(stream.next().unwrap().unwrap(), Value::string("foo"));
        assert_eq!(
            stream.next().unwrap().unwrap(),
            Value::vector(vec![Value::symbol("bar"), Value::symbol("qux")]),
        );
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_empty_and_trivia_only() {
        assert!(read_stream("".as_bytes()).next().is_none());
        assert!(read_stream("  ; nothing here\n , ".as_bytes()).next().is_none());
    }

    #[test]
    fn test_trickled_chunks() {
        // Chunk boundaries land inside tokens, keywords, floats, namespaced
        // symbols, and the middle of a multi-byte UTF-8 sequence.
        let text = "[1 2 3] {:snowman \"\u{2603}\"} 12345 foo 1.5e2 :my/kw a/b";
        for step in 1..=7 {
            let source = Trickle {
                data: text.as_bytes(),
                step,
            };
            let values: Vec<Value> = read_stream(source).collect::<Result<Vec<_>>>().unwrap();
            assert_eq!(values.len(), 7, "step {}", step);
            assert_eq!(values[2], Value::int(12345));
            assert_eq!(values[3], Value::symbol("foo"));
            assert_eq!(values[4], Value::Float(150.0));
            assert_eq!(
                values[5],
                Value::Keyword(crate::value::Keyword::namespaced("my", "kw")),
            );
            assert_eq!(
                values[6],
                Value::Symbol(crate::value::Symbol::namespaced("a", "b")),
            );
        }
    }

    #[test]
    fn test_token_split_across_chunks() {
        // "12" then "34" must come out as 1234, not 12.
        let source = Trickle {
            data: b"1234",
            step: 2,
        };
        let values: Vec<Value> = read_stream(source).collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(values, vec![Value::int(1234)]);
    }

    #[test]
    fn test_eof_mid_form_is_an_error() {
        let mut stream = read_stream("[1 2".as_bytes());
        let err = stream.next().unwrap().unwrap_err();
        assert!(err.is_incomplete());
        // Fused after the error.
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_error_between_forms_is_fatal() {
        let mut stream = read_stream("1 ^ 2".as_bytes());
        assert_eq!(stream.next().unwrap().unwrap(), Value::int(1));
        assert!(stream.next().unwrap().is_err());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_trailing_discard_ends_cleanly() {
        let mut stream = read_stream("1 #_2".as_bytes());
        assert_eq!(stream.next().unwrap().unwrap(), Value::int(1));
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_line_numbers_span_forms() {
        let mut stream = read_stream("1\n[\n".as_bytes());
        assert_eq!(stream.next().unwrap().unwrap(), Value::int(1));
        match stream.next().unwrap().unwrap_err() {
            Error::UnexpectedEof { line, .. } => assert_eq!(line, 3),
            other => panic!("expected eof error, got {:?}", other),
        }
    }
}
