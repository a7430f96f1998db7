//! Error types for edn parsing, printing, and conversion.
//!
//! All fallible operations in this crate return [`Result`], with a single
//! [`Error`] enum covering the whole pipeline:
//!
//! - **Syntax errors**: a grammar rule ran out of alternatives. Carries the
//!   line/column where parsing stopped and what was being parsed.
//! - **Unexpected end of input**: the input ended inside a form. This is a
//!   separate variant so the streaming reader can distinguish "feed me more
//!   bytes" from "this text is malformed".
//! - **Encoding errors**: a native value matched no writer rule and no
//!   default handler was supplied; the message names the value's type.
//! - **I/O errors**: reading from or writing to a stream failed.
//!
//! Unknown tags are *not* an error anywhere in this crate: `decode` degrades
//! them to a generic tagged value (see [`crate::decode`]).
//!
//! ## Examples
//!
//! ```rust
//! use edn_codec::parse;
//!
//! let err = parse("[1 2").unwrap_err();
//! assert!(err.is_incomplete());
//!
//! let err = parse("04M").unwrap_err();
//! assert!(err.to_string().contains("line 1"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Grammar rule exhausted all alternatives at a position
    #[error("syntax error at line {line}, column {col}: {msg}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
    },

    /// Input ended in the middle of a form
    #[error("unexpected end of input at line {line}, column {col}: expected {expected}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
    },

    /// A native value matched no writer rule and no default was supplied
    #[error("cannot encode value: {0}")]
    Encoding(String),

    /// Custom error, typically raised by a caller-supplied handler
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use edn_codec::Error;
    ///
    /// let err = Error::syntax(10, 5, "unexpected character '^'");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.into(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, col: usize, expected: impl Into<String>) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.into(),
        }
    }

    /// Creates an encoding error naming the unencodable value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Error::Encoding(msg.into())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use edn_codec::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` if this error means the input ended mid-form.
    ///
    /// The streaming reader uses this to decide whether pulling more bytes
    /// from the source could complete the current form.
    #[must_use]
    pub const fn is_incomplete(&self) -> bool {
        matches!(self, Error::UnexpectedEof { .. })
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
