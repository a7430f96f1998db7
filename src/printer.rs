//! Canonical text rendering for [`Value`].
//!
//! Printing is a total, pure function driven by a `match` over the variant;
//! [`print`] is a thin wrapper around the [`std::fmt::Display`] impl. The
//! output is canonical up to the element order of sets and maps, which is
//! whatever order the value holds (insertion order after parsing) and
//! carries no meaning.
//!
//! Two asymmetries with the parser are intentional:
//!
//! - A string read with a literal newline prints back with an escaped `\n`,
//!   so printing is not the textual identity on such inputs (the parsed
//!   *values* still compare equal).
//! - Named character literals (`\newline`, `\tab`, ...) are parse-only
//!   aliases; the printer always emits the backslash plus the literal
//!   character.
//!
//! ## Examples
//!
//! ```rust
//! use edn_codec::{parse, print};
//!
//! let v = parse("{:a [1 2] :b #{3}}").unwrap();
//! assert_eq!(parse(&print(&v)).unwrap(), v);
//! assert_eq!(print(&parse("\"a\nb\"").unwrap()), "\"a\\nb\"");
//! ```

use std::fmt;
use std::io;

use crate::value::Value;
use crate::{Error, Result};

/// Renders a value as canonical edn text.
#[must_use]
pub fn print(value: &Value) -> String {
    value.to_string()
}

/// Writes a sequence of values to a sink, one per line.
///
/// Each value is followed by a single LF, matching the streaming reader's
/// expectation that top-level forms are separated by whitespace.
///
/// # Examples
///
/// ```rust
/// use edn_codec::{print_stream, Value};
///
/// let mut out = Vec::new();
/// print_stream([&Value::symbol("foo"), &Value::string("bar")], &mut out).unwrap();
/// assert_eq!(out, b"foo\n\"bar\"\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if writing to the sink fails.
pub fn print_stream<'a, I, W>(values: I, mut sink: W) -> Result<()>
where
    I: IntoIterator<Item = &'a Value>,
    W: io::Write,
{
    for value in values {
        writeln!(sink, "{}", value).map_err(|e| Error::io(&e.to_string()))?;
    }
    Ok(())
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{0008}' => f.write_str("\\b")?,
            '\u{000C}' => f.write_str("\\f")?,
            _ => f.write_fmt(format_args!("{}", c))?,
        }
    }
    f.write_str("\"")
}

/// Floats must never re-read as integers, so a rendering with no decimal
/// point or exponent gets `.0` appended. Non-finite floats have no edn
/// representation and fall through to the host rendering.
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let rendered = value.to_string();
    if value.is_finite() && !rendered.contains(['.', 'e', 'E']) {
        write!(f, "{}.0", rendered)
    } else {
        f.write_str(&rendered)
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(true) => f.write_str("true"),
            Value::Bool(false) => f.write_str("false"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write_float(f, *x),
            Value::Decimal(d) => write!(f, "{}M", d),
            Value::Character(c) => write!(f, "\\{}", c),
            Value::String(s) => write_string(f, s),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Keyword(k) => write!(f, "{}", k),
            Value::List(items) => write_seq(f, "(", items, ")"),
            Value::Vector(items) => write_seq(f, "[", items, "]"),
            Value::Set(items) => write_seq(f, "#{", items, "}"),
            Value::Map(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{} {}", k, v)?;
                }
                f.write_str("}")
            }
            Value::Tagged(tag, value) => write!(f, "#{} {}", tag, value),
        }
    }
}
