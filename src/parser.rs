//! The edn grammar and parser.
//!
//! This module turns text into [`Value`] trees. Alternatives are tried in a
//! fixed order per rule and a failed alternative consumes no input, so the
//! grammar behaves like ordered choice with backtracking; the one genuinely
//! ambiguous spot, a leading digit or sign-then-digit starting a numeric
//! literal, is settled by scanning the maximal token first and classifying
//! it afterwards.
//!
//! ## Overview
//!
//! - **Trivia**: whitespace, commas, `;` line comments, and `#_ form`
//!   discards are all skipped between forms. A discarded form must still be
//!   syntactically valid.
//! - **Tokens**: `nil`, `true`, `false`, symbols, and numbers are scanned as
//!   one maximal run of constituent characters, then classified.
//! - **Numbers**: strict literal shapes: no leading zeros, `N` only on
//!   integers, `M` turning a literal into an exact decimal.
//! - **Failure**: exhausting a rule's alternatives is a hard error carrying
//!   the position reached; nothing is recovered mid-form.
//!
//! ## Usage
//!
//! ```rust
//! use edn_codec::{parse, Value};
//!
//! let v = parse("[1 2 #_3 4]").unwrap();
//! assert_eq!(v, Value::vector(vec![Value::int(1), Value::int(2), Value::int(4)]));
//! ```

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::str::FromStr;

use crate::value::{Int, Keyword, Symbol, Value};
use crate::{Error, Result};

/// Parses exactly one top-level form.
///
/// Leading and trailing whitespace, commas, comments, and discards are
/// allowed; any other trailing content is a syntax error. Use
/// [`crate::read_stream`] to read several forms from one source.
///
/// # Errors
///
/// Returns [`Error::Syntax`] for malformed input and
/// [`Error::UnexpectedEof`] if the input ends mid-form.
pub fn parse(input: &str) -> Result<Value> {
    let mut parser = Parser::new(input);
    let value = parser.parse_form()?;
    parser.skip_trivia()?;
    match parser.peek() {
        None => Ok(value),
        Some(c) => Err(parser.err_syntax(format!("trailing content starting at '{}'", c))),
    }
}

/// Validates a full string against the symbol grammar.
pub(crate) fn parse_symbol(s: &str) -> Result<Symbol> {
    validate_symbol(s).map_err(|msg| Error::custom(format!("invalid symbol '{}': {}", s, msg)))
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | ',')
}

/// Characters a symbol or numeric token may be built from. `/` is included
/// so namespaced symbols scan as one token; its placement rules are
/// enforced during validation.
fn is_constituent(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '.' | '*'
                | '+'
                | '!'
                | '-'
                | '_'
                | '?'
                | '$'
                | '%'
                | '&'
                | '='
                | '<'
                | '>'
                | ':'
                | '#'
                | '/'
        )
}

/// A cursor over a text buffer.
///
/// Tracks byte position plus line/column for error reporting. The streaming
/// reader re-creates a parser from a saved `(pos, line, col)` after each
/// completed form, which is why those travel together.
pub struct Parser<'de> {
    input: &'de str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'de> Parser<'de> {
    /// Creates a parser at the start of `input`.
    #[must_use]
    pub fn new(input: &'de str) -> Self {
        Parser {
            input,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    pub(crate) fn resume(input: &'de str, pos: usize, line: usize, col: usize) -> Self {
        Parser {
            input,
            pos,
            line,
            col,
        }
    }

    pub(crate) fn state(&self) -> (usize, usize, usize) {
        (self.pos, self.line, self.col)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn err_syntax(&self, msg: impl Into<String>) -> Error {
        Error::syntax(self.line, self.col, msg)
    }

    fn err_eof(&self, expected: impl Into<String>) -> Error {
        Error::unexpected_eof(self.line, self.col, expected)
    }

    /// Skips whitespace, commas, comments, and `#_ form` discards.
    ///
    /// Discarded forms are parsed in full (they must be well-formed) and
    /// dropped, so `#_` may sit before any form or closing delimiter.
    pub(crate) fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(c) if is_whitespace(c) => {
                    self.bump();
                }
                Some(';') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some('#') if self.peek_second() == Some('_') => {
                    self.bump();
                    self.bump();
                    let _ = self.parse_form()?;
                }
                _ => return Ok(()),
            }
        }
    }

    /// Parses the next form, skipping any leading trivia.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] on malformed input, [`Error::UnexpectedEof`] if the
    /// buffer ends before the form does.
    pub fn parse_form(&mut self) -> Result<Value> {
        self.skip_trivia()?;
        match self.peek() {
            None => Err(self.err_eof("a form")),
            Some('(') => {
                let items = self.parse_seq(')', "list")?;
                Ok(Value::List(items))
            }
            Some('[') => {
                let items = self.parse_seq(']', "vector")?;
                Ok(Value::Vector(items))
            }
            Some('{') => self.parse_map(),
            Some('#') => self.parse_dispatch(),
            Some('"') => self.parse_string(),
            Some('\\') => self.parse_character(),
            Some(':') => self.parse_keyword(),
            Some(c @ (')' | ']' | '}')) => {
                Err(self.err_syntax(format!("unmatched delimiter '{}'", c)))
            }
            Some(c) if is_constituent(c) => self.parse_token(),
            Some(c) => Err(self.err_syntax(format!("unexpected character '{}'", c))),
        }
    }

    /// Parses forms up to `close`, consuming the opening delimiter first.
    fn parse_seq(&mut self, close: char, what: &str) -> Result<Vec<Value>> {
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                None => return Err(self.err_eof(format!("'{}' to close the {}", close, what))),
                Some(c) if c == close => {
                    self.bump();
                    return Ok(items);
                }
                _ => items.push(self.parse_form()?),
            }
        }
    }

    fn parse_map(&mut self) -> Result<Value> {
        let items = self.parse_seq('}', "map")?;
        if items.len() % 2 != 0 {
            return Err(self.err_syntax("map literal requires an even number of forms"));
        }
        let mut pairs = Vec::with_capacity(items.len() / 2);
        let mut iter = items.into_iter();
        while let (Some(k), Some(v)) = (iter.next(), iter.next()) {
            pairs.push((k, v));
        }
        Ok(Value::map(pairs))
    }

    /// `#{` sets and `#tag form` tagged values. `#_` never reaches here; it
    /// is consumed as trivia.
    fn parse_dispatch(&mut self) -> Result<Value> {
        match self.peek_second() {
            Some('{') => {
                self.bump();
                let items = self.parse_seq('}', "set")?;
                Ok(Value::set(items))
            }
            None => {
                self.bump();
                Err(self.err_eof("a set or a tag symbol after '#'"))
            }
            Some(_) => {
                self.bump();
                let (line, col) = (self.line, self.col);
                let token = self.take_token();
                if token.is_empty() {
                    return Err(self.err_syntax("'#' must begin a set, a discard, or a tag"));
                }
                let tag = validate_symbol(token).map_err(|msg| {
                    self.maybe_truncated(
                        token,
                        Error::syntax(line, col, format!("invalid tag symbol: {}", msg)),
                    )
                })?;
                match self.peek() {
                    None => Err(self.err_eof(format!("a form after tag '#{}'", tag))),
                    Some(c) if is_whitespace(c) || c == ';' => {
                        let payload = self.parse_form()?;
                        Ok(Value::tagged(tag, payload))
                    }
                    Some(_) => {
                        Err(self.err_syntax(format!("expected whitespace after tag '#{}'", tag)))
                    }
                }
            }
        }
    }

    fn parse_string(&mut self) -> Result<Value> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.err_eof("'\"' to close the string")),
                Some('"') => {
                    self.bump();
                    return Ok(Value::String(out));
                }
                Some('\\') => {
                    self.bump();
                    let escape = match self.peek() {
                        None => return Err(self.err_eof("an escape character")),
                        Some(c) => c,
                    };
                    self.bump();
                    out.push(match escape {
                        '"' => '"',
                        '\\' => '\\',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        'b' => '\u{0008}',
                        'f' => '\u{000C}',
                        other => {
                            return Err(
                                self.err_syntax(format!("unknown escape '\\{}' in string", other))
                            )
                        }
                    });
                }
                // Everything else, literal newlines and multi-byte
                // sequences included, passes through verbatim.
                Some(c) => {
                    self.bump();
                    out.push(c);
                }
            }
        }
    }

    fn parse_character(&mut self) -> Result<Value> {
        self.bump();
        match self.peek() {
            None => Err(self.err_eof("a character")),
            Some(first) if first.is_ascii_alphabetic() => {
                let (line, col) = (self.line, self.col);
                let start = self.pos;
                while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
                    self.bump();
                }
                let name = &self.input[start..self.pos];
                if name.len() == 1 {
                    return Ok(Value::Character(first));
                }
                match name {
                    "newline" => Ok(Value::Character('\n')),
                    "tab" => Ok(Value::Character('\t')),
                    "return" => Ok(Value::Character('\r')),
                    "space" => Ok(Value::Character(' ')),
                    _ => Err(Error::syntax(
                        line,
                        col,
                        format!("unrecognized character name '\\{}'", name),
                    )),
                }
            }
            Some(c) => {
                self.bump();
                Ok(Value::Character(c))
            }
        }
    }

    fn parse_keyword(&mut self) -> Result<Value> {
        self.bump();
        let (line, col) = (self.line, self.col);
        let token = self.take_token();
        if token.is_empty() {
            // An empty token at the end of the buffer may just be a
            // truncated keyword; mid-buffer it is malformed.
            return Err(if self.at_end() {
                self.err_eof("a symbol after ':'")
            } else {
                self.err_syntax("':' must be followed by a symbol")
            });
        }
        if token == "/" || token.starts_with('/') {
            return Err(Error::syntax(line, col, "keyword may not begin with '/'"));
        }
        let symbol = validate_symbol(token).map_err(|msg| {
            self.maybe_truncated(
                token,
                Error::syntax(line, col, format!("invalid keyword: {}", msg)),
            )
        })?;
        Ok(Value::Keyword(Keyword::from_symbol(symbol)))
    }

    /// `nil`, booleans, numbers, and symbols: scan one maximal token, then
    /// classify it.
    fn parse_token(&mut self) -> Result<Value> {
        let (line, col) = (self.line, self.col);
        let token = self.take_token();
        match token {
            "nil" => return Ok(Value::Nil),
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            _ => {}
        }
        let mut chars = token.chars();
        let first = chars.next().unwrap_or_default();
        let second = chars.next();
        let numeric = first.is_ascii_digit()
            || (matches!(first, '+' | '-') && second.is_some_and(|c| c.is_ascii_digit()));
        let result = if numeric {
            parse_number(token).map_err(|msg| Error::syntax(line, col, msg))
        } else {
            validate_symbol(token)
                .map(Value::Symbol)
                .map_err(|msg| Error::syntax(line, col, format!("invalid symbol: {}", msg)))
        };
        result.map_err(|err| self.maybe_truncated(token, err))
    }

    /// A malformed token ending flush with the buffer may only be cut off
    /// mid-way; report it as incomplete when extending it could still make
    /// it valid (`1.`, `1e-`, `foo/`), so the streaming reader retries.
    fn maybe_truncated(&self, token: &str, err: Error) -> Error {
        let extendable = token.ends_with(|c| matches!(c, '.' | 'e' | 'E' | '+' | '-' | '/'));
        if self.at_end() && extendable {
            self.err_eof("the rest of the token")
        } else {
            err
        }
    }

    fn take_token(&mut self) -> &'de str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_constituent(c)) {
            self.bump();
        }
        &self.input[start..self.pos]
    }
}

/// Validates a token against the symbol grammar.
fn validate_symbol(token: &str) -> std::result::Result<Symbol, String> {
    if token == "/" {
        return Ok(Symbol::new("/"));
    }
    if token.starts_with('/') || token.ends_with('/') {
        return Err("symbol may not begin or end with '/'".to_string());
    }
    let mut parts = token.splitn(3, '/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, None) => {
            validate_symbol_part(name)?;
            Ok(Symbol::new(name))
        }
        (Some(prefix), Some(name), None) => {
            validate_symbol_part(prefix)?;
            validate_symbol_part(name)?;
            Ok(Symbol::namespaced(prefix, name))
        }
        _ => Err("symbol may contain at most one '/'".to_string()),
    }
}

fn validate_symbol_part(part: &str) -> std::result::Result<(), String> {
    let mut chars = part.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return Err("symbol part may not be empty".to_string()),
    };
    if first.is_ascii_digit() {
        return Err("symbol may not begin with a digit".to_string());
    }
    if matches!(first, ':' | '#') {
        return Err(format!("symbol may not begin with '{}'", first));
    }
    if matches!(first, '+' | '-' | '.') && chars.clone().next().is_some_and(|c| c.is_ascii_digit())
    {
        return Err(format!(
            "symbol may not begin with '{}' followed by a digit",
            first
        ));
    }
    for c in part.chars() {
        if c == '/' || !is_constituent(c) {
            return Err(format!("invalid character '{}' in symbol", c));
        }
    }
    Ok(())
}

/// Classifies a token already known to start numerically, enforcing the
/// strict literal shapes: `sign? int ('.' digits)? (exp)? (N|M)?` with no
/// leading zero and `N` only on plain integers.
fn parse_number(token: &str) -> std::result::Result<Value, String> {
    let bytes = token.as_bytes();
    let mut idx = usize::from(matches!(bytes[0], b'+' | b'-'));

    let int_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    let int_digits = &token[int_start..idx];
    if int_digits.is_empty() {
        return Err(format!("invalid numeric literal '{}'", token));
    }
    if int_digits.len() > 1 && int_digits.starts_with('0') {
        return Err(format!("leading zero in numeric literal '{}'", token));
    }

    let mut fractional = false;
    if idx < bytes.len() && bytes[idx] == b'.' {
        idx += 1;
        let frac_start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }
        if idx == frac_start {
            return Err(format!(
                "expected digits after the decimal point in '{}'",
                token
            ));
        }
        fractional = true;
    }

    let mut exponent = false;
    if idx < bytes.len() && matches!(bytes[idx], b'e' | b'E') {
        idx += 1;
        if idx < bytes.len() && matches!(bytes[idx], b'+' | b'-') {
            idx += 1;
        }
        let exp_start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }
        if idx == exp_start {
            return Err(format!("expected digits in the exponent of '{}'", token));
        }
        exponent = true;
    }

    let suffix = if idx < bytes.len() && matches!(bytes[idx], b'N' | b'M') {
        idx += 1;
        Some(bytes[idx - 1])
    } else {
        None
    };
    if idx != bytes.len() {
        return Err(format!("invalid numeric literal '{}'", token));
    }

    let body = &token[..token.len() - usize::from(suffix.is_some())];
    let unsigned = body.strip_prefix('+').unwrap_or(body);
    let float_shaped = fractional || exponent;
    match (float_shaped, suffix) {
        (false, None) => BigInt::from_str(unsigned)
            .map(|i| Value::Integer(Int::new(i)))
            .map_err(|_| format!("invalid integer literal '{}'", token)),
        (false, Some(b'N')) => BigInt::from_str(unsigned)
            .map(|i| Value::Integer(Int::big(i)))
            .map_err(|_| format!("invalid integer literal '{}'", token)),
        (true, Some(b'N')) => Err(format!(
            "'N' suffix is only valid on integer literals: '{}'",
            token
        )),
        (_, Some(_)) => BigDecimal::from_str(unsigned)
            .map(Value::Decimal)
            .map_err(|_| format!("invalid decimal literal '{}'", token)),
        (true, None) => f64::from_str(body)
            .map(Value::Float)
            .map_err(|_| format!("invalid float literal '{}'", token)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Value {
        Value::symbol(name)
    }

    fn assert_invalid(inputs: &[&str]) {
        for input in inputs {
            assert!(parse(input).is_err(), "expected {:?} to fail", input);
        }
    }

    #[test]
    fn test_nil() {
        assert_eq!(parse("nil").unwrap(), Value::Nil);
    }

    #[test]
    fn test_boolean() {
        assert_eq!(parse("true").unwrap(), Value::Bool(true));
        assert_eq!(parse("false").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_string() {
        assert_eq!(parse("\"foo\"").unwrap(), Value::string("foo"));
        // Raw newlines are legal inside strings.
        assert_eq!(
            parse("\"\nfoo\nbar\nbaz\"").unwrap(),
            Value::string("\nfoo\nbar\nbaz"),
        );
        assert_eq!(
            parse(r#""foo\n\t\"bar\"\\""#).unwrap(),
            Value::string("foo\n\t\"bar\"\\"),
        );
    }

    #[test]
    fn test_unicode_string() {
        assert_eq!(parse("\"\u{2603}\"").unwrap(), Value::string("\u{2603}"));
    }

    #[test]
    fn test_unknown_escape_rejected() {
        assert_invalid(&["\"\\q\""]);
    }

    #[test]
    fn test_character() {
        assert_eq!(parse(r"\c").unwrap(), Value::Character('c'));
        assert_eq!(parse(r"\newline").unwrap(), Value::Character('\n'));
        assert_eq!(parse(r"\tab").unwrap(), Value::Character('\t'));
        assert_eq!(parse(r"\return").unwrap(), Value::Character('\r'));
        assert_eq!(parse(r"\space").unwrap(), Value::Character(' '));
        assert_eq!(parse(r"\[").unwrap(), Value::Character('['));
        assert_invalid(&[r"\banana"]);
    }

    #[test]
    fn test_symbols() {
        let valid = [
            ("foo", Symbol::new("foo")),
            (".foo", Symbol::new(".foo")),
            ("/", Symbol::new("/")),
            ("foo/bar", Symbol::namespaced("foo", "bar")),
            ("a", Symbol::new("a")),
            ("predicate?", Symbol::new("predicate?")),
            ("+foo", Symbol::new("+foo")),
            ("a1", Symbol::new("a1")),
            ("!foo", Symbol::new("!foo")),
            ("-$foo", Symbol::new("-$foo")),
            ("foo:bar", Symbol::new("foo:bar")),
            ("foo#bar", Symbol::new("foo#bar")),
            ("+:foo", Symbol::new("+:foo")),
        ];
        for (input, expected) in valid {
            assert_eq!(parse(input).unwrap(), Value::Symbol(expected), "{}", input);
        }
    }

    #[test]
    fn test_invalid_symbols() {
        assert_invalid(&["9aeuoeu", "-9aou", "foo^bar", "/foo", "foo/", "a/b/c"]);
    }

    #[test]
    fn test_keyword() {
        assert_eq!(parse(":foo").unwrap(), Value::keyword("foo"));
        assert_eq!(
            parse(":foo/bar").unwrap(),
            Value::Keyword(Keyword::namespaced("foo", "bar")),
        );
        assert_ne!(parse("foo").unwrap(), parse(":foo").unwrap());
        assert_invalid(&[":", "::foo", ":/", ":/foo", ":9"]);
    }

    #[test]
    fn test_integer() {
        let cases = [("-0", 0), ("-10", -10), ("10", 10), ("+10", 10), ("4", 4)];
        for (input, expected) in cases {
            assert_eq!(parse(input).unwrap(), Value::int(expected), "{}", input);
        }
        assert_eq!(parse("10000N").unwrap(), Value::big_int(10000));
        assert_eq!(
            parse("123456789012345678901234567890").unwrap(),
            Value::int("123456789012345678901234567890".parse::<BigInt>().unwrap()),
        );
    }

    #[test]
    fn test_float() {
        assert_eq!(parse("3.2").unwrap(), Value::Float(3.2));
        assert_eq!(parse("+4.7").unwrap(), Value::Float(4.7));
        assert_eq!(parse("-11.8").unwrap(), Value::Float(-11.8));
        assert_eq!(parse("-11.8e2").unwrap(), Value::Float(-1180.0));
        assert_eq!(parse("97.4E-02").unwrap(), Value::Float(0.974));
        assert_eq!(parse("5e3").unwrap(), Value::Float(5000.0));
    }

    #[test]
    fn test_exact_decimal() {
        let decimal = |s: &str| Value::Decimal(s.parse::<BigDecimal>().unwrap());
        assert_eq!(parse("+4.7M").unwrap(), decimal("4.7"));
        assert_eq!(parse("97.4E-02M").unwrap(), decimal("0.974"));
        assert_eq!(parse("32M").unwrap(), decimal("32"));
        assert_eq!(parse("4.122e2M").unwrap(), decimal("412.2"));
    }

    #[test]
    fn test_bad_numbers() {
        assert_invalid(&["04M", "04.51", "-023.0", "1.", "1.e5", "1e", "1e+", "1.5N"]);
    }

    #[test]
    fn test_list() {
        assert_eq!(parse("()").unwrap(), Value::list(vec![]));
        assert_eq!(parse("(1)").unwrap(), Value::list(vec![Value::int(1)]));
        assert_eq!(
            parse("(\"foo\" 1 foo :bar)").unwrap(),
            Value::list(vec![
                Value::string("foo"),
                Value::int(1),
                sym("foo"),
                Value::keyword("bar"),
            ]),
        );
        assert_eq!(
            parse("(((foo) bar)\n\t baz)").unwrap(),
            Value::list(vec![
                Value::list(vec![Value::list(vec![sym("foo")]), sym("bar")]),
                sym("baz"),
            ]),
        );
    }

    #[test]
    fn test_vector() {
        assert_eq!(parse("[]").unwrap(), Value::vector(vec![]));
        assert_eq!(parse("[foo]").unwrap(), Value::vector(vec![sym("foo")]));
        assert_eq!(
            parse("[[foo] [bar]]").unwrap(),
            Value::vector(vec![
                Value::vector(vec![sym("foo")]),
                Value::vector(vec![sym("bar")]),
            ]),
        );
    }

    #[test]
    fn test_map() {
        assert_eq!(parse("{}").unwrap(), Value::map(vec![]));
        assert_eq!(
            parse("{1 2}").unwrap(),
            Value::map(vec![(Value::int(1), Value::int(2))]),
        );
        assert_eq!(
            parse("{[1] {2 3}, (4 5 6), 7}").unwrap(),
            Value::map(vec![
                (
                    Value::vector(vec![Value::int(1)]),
                    Value::map(vec![(Value::int(2), Value::int(3))]),
                ),
                (
                    Value::list(vec![Value::int(4), Value::int(5), Value::int(6)]),
                    Value::int(7),
                ),
            ]),
        );
        assert_invalid(&["{1}", "{1 2 3}"]);
    }

    #[test]
    fn test_set() {
        assert_eq!(parse("#{}").unwrap(), Value::set(vec![]));
        assert_eq!(
            parse("#{1 2 3 4 :foo}").unwrap(),
            Value::set(vec![
                Value::int(1),
                Value::int(2),
                Value::int(3),
                Value::int(4),
                Value::keyword("foo"),
            ]),
        );
        assert_eq!(
            parse("#{#{1 2} 3}").unwrap(),
            Value::set(vec![
                Value::set(vec![Value::int(1), Value::int(2)]),
                Value::int(3),
            ]),
        );
        assert_eq!(parse("#{1 2 3}").unwrap(), parse("#{3 2 1}").unwrap());
    }

    #[test]
    fn test_tagged() {
        assert_eq!(
            parse("#foo/bar baz").unwrap(),
            Value::tagged(Symbol::namespaced("foo", "bar"), sym("baz")),
        );
        assert_eq!(
            parse("#foo     baz").unwrap(),
            Value::tagged(Symbol::new("foo"), sym("baz")),
        );
        assert_eq!(
            parse("#foo\n  baz").unwrap(),
            Value::tagged(Symbol::new("foo"), sym("baz")),
        );
        assert_eq!(
            parse("#foo ; comment\nbar").unwrap(),
            Value::tagged(Symbol::new("foo"), sym("bar")),
        );
        assert_eq!(
            parse("#a #b c").unwrap(),
            Value::tagged(
                Symbol::new("a"),
                Value::tagged(Symbol::new("b"), sym("c")),
            ),
        );
        assert_invalid(&["#foo", "#", "#9 x"]);
    }

    #[test]
    fn test_comment() {
        assert_eq!(
            parse("; foo bar baz bax\nbar ; this is bar\n").unwrap(),
            sym("bar"),
        );
    }

    #[test]
    fn test_discard() {
        assert_eq!(
            parse("[1 2 #_foo 3]").unwrap(),
            Value::vector(vec![Value::int(1), Value::int(2), Value::int(3)]),
        );
        assert_eq!(
            parse("[1 2 #_3 4]").unwrap(),
            Value::vector(vec![Value::int(1), Value::int(2), Value::int(4)]),
        );
        assert_eq!(
            parse("[1 #_[2 3]]").unwrap(),
            Value::vector(vec![Value::int(1)]),
        );
        // The discarded form must itself be well-formed.
        assert_invalid(&["[1 #_]", "#_1"]);
    }

    #[test]
    fn test_trailing_content() {
        assert_invalid(&["1 2", "foo^bar", "[] []"]);
        assert_eq!(parse(" [1] ; done\n").unwrap(), Value::vector(vec![Value::int(1)]));
    }

    #[test]
    fn test_incomplete_input() {
        for input in ["", "[1 2", "\"abc", "{:a", "#foo", "(1 (2)"] {
            let err = parse(input).unwrap_err();
            assert!(err.is_incomplete(), "expected eof error for {:?}", input);
        }
    }

    #[test]
    fn test_error_positions() {
        match parse("[1\n 2 ^]").unwrap_err() {
            Error::Syntax { line, col, .. } => {
                assert_eq!(line, 2);
                assert_eq!(col, 4);
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }
}
