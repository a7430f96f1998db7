//! The abstract syntax value model.
//!
//! Every edn form parses to exactly one [`Value`]. The enum is a closed sum
//! type: consumers can (and do) match it exhaustively, and nothing outside
//! this module can add variants. The parser is the only producer from text;
//! [`crate::encode`] is the only producer from native values.
//!
//! Two shapes deserve a note up front:
//!
//! - [`Int`] pairs an arbitrary-precision integer with the literal's `N`
//!   marker. The marker is provenance, not value: `10N` and `10` compare
//!   equal, and only the printer looks at the flag.
//! - Maps and sets are insertion-ordered vectors deduplicated under
//!   structural equality rather than hashed containers, because keys may be
//!   floats (not `Eq`/`Hash`). Their equality is membership-based, so
//!   `{1 2, 3 4}` equals `{3 4, 1 2}`.
//!
//! ## Examples
//!
//! ```rust
//! use edn_codec::{parse, Value};
//!
//! let v = parse("{:a [1 2] :b #{3}}").unwrap();
//! assert!(v.is_map());
//! assert_eq!(parse("#{1 2 3}").unwrap(), parse("#{3 2 1}").unwrap());
//! assert_ne!(parse("foo").unwrap(), parse(":foo").unwrap());
//! ```

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// An abstract edn value.
///
/// Produced by [`crate::parse`] and consumed by [`crate::print`] and
/// [`crate::decode`]. Values are immutable once constructed; composite
/// variants own their children outright.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Integer(Int),
    Float(f64),
    Decimal(BigDecimal),
    Character(char),
    String(String),
    Symbol(Symbol),
    Keyword(Keyword),
    List(Vec<Value>),
    Vector(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Set(Vec<Value>),
    Tagged(Symbol, Box<Value>),
}

/// An arbitrary-precision integer plus the literal `N` suffix marker.
///
/// The marker records that the source literal explicitly asked for a big
/// integer (`10000N`). It changes nothing about the numeric value and is
/// ignored by equality; the printer re-emits it so provenance survives a
/// parse/print cycle.
///
/// # Examples
///
/// ```rust
/// use edn_codec::{parse, print, Int, Value};
///
/// assert_eq!(parse("10000N").unwrap(), Value::Integer(Int::from(10000)));
/// assert_eq!(print(&parse("10000N").unwrap()), "10000N");
/// ```
#[derive(Clone, Debug)]
pub struct Int {
    value: BigInt,
    big: bool,
}

impl Int {
    /// Wraps an integer without the `N` marker.
    pub fn new(value: impl Into<BigInt>) -> Self {
        Int {
            value: value.into(),
            big: false,
        }
    }

    /// Wraps an integer carrying the explicit `N` marker.
    pub fn big(value: impl Into<BigInt>) -> Self {
        Int {
            value: value.into(),
            big: true,
        }
    }

    /// The numeric value.
    #[must_use]
    pub fn value(&self) -> &BigInt {
        &self.value
    }

    /// Whether the source literal carried the `N` suffix.
    #[must_use]
    pub const fn is_big(&self) -> bool {
        self.big
    }

    /// The value as `i64`, if it fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        i64::try_from(&self.value).ok()
    }

    pub(crate) fn into_bigint(self) -> BigInt {
        self.value
    }
}

// Equality and ordering ignore the literal marker: 10N == 10.
impl PartialEq for Int {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Int {}

impl From<i64> for Int {
    fn from(value: i64) -> Self {
        Int::new(value)
    }
}

impl From<i32> for Int {
    fn from(value: i32) -> Self {
        Int::new(value)
    }
}

impl From<BigInt> for Int {
    fn from(value: BigInt) -> Self {
        Int::new(value)
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.big {
            write!(f, "{}N", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// A symbolic identifier, optionally namespaced: `foo` or `my/foo`.
///
/// The name is never empty except for the special literal symbol `/`.
/// Construction through [`Symbol::new`]/[`Symbol::namespaced`] trusts the
/// caller; [`Symbol::from_str`] validates against the full symbol grammar.
///
/// # Examples
///
/// ```rust
/// use edn_codec::Symbol;
///
/// let plain: Symbol = "foo".parse().unwrap();
/// let namespaced: Symbol = "my/foo".parse().unwrap();
/// assert_eq!(namespaced.prefix(), Some("my"));
/// assert_eq!(namespaced.name(), "foo");
/// assert!("9foo".parse::<Symbol>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    prefix: Option<String>,
    name: String,
}

impl Symbol {
    /// Creates a symbol with no namespace prefix.
    pub fn new(name: impl Into<String>) -> Self {
        Symbol {
            prefix: None,
            name: name.into(),
        }
    }

    /// Creates a namespaced symbol (`prefix/name`).
    pub fn namespaced(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Symbol {
            prefix: Some(prefix.into()),
            name: name.into(),
        }
    }

    /// The name part (after the `/`, or the whole symbol).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

impl FromStr for Symbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::parse_symbol(s)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}/{}", prefix, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A keyword: a [`Symbol`] read with a leading `:`.
///
/// Keywords and symbols are distinct values even with identical names:
/// `foo` never equals `:foo`. The wrapped symbol never itself carries the
/// colon.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Keyword(Symbol);

impl Keyword {
    /// Wraps a symbol as a keyword.
    #[must_use]
    pub fn from_symbol(symbol: Symbol) -> Self {
        Keyword(symbol)
    }

    /// Creates a keyword with no namespace prefix.
    pub fn new(name: impl Into<String>) -> Self {
        Keyword(Symbol::new(name))
    }

    /// Creates a namespaced keyword (`:prefix/name`).
    pub fn namespaced(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Keyword(Symbol::namespaced(prefix, name))
    }

    /// The underlying symbol, without the colon.
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.0
    }

    /// The name part of the underlying symbol.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// The namespace prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.0.prefix()
    }
}

impl FromStr for Keyword {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.strip_prefix(':').unwrap_or(s);
        if name.starts_with('/') {
            return Err(Error::custom(format!("invalid keyword: ':{}'", name)));
        }
        crate::parser::parse_symbol(name).map(Keyword)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl Value {
    /// Creates an integer value without the `N` marker.
    pub fn int(value: impl Into<BigInt>) -> Self {
        Value::Integer(Int::new(value))
    }

    /// Creates an integer value carrying the `N` marker.
    pub fn big_int(value: impl Into<BigInt>) -> Self {
        Value::Integer(Int::big(value))
    }

    /// Creates an unprefixed symbol value.
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(Symbol::new(name))
    }

    /// Creates an unprefixed keyword value.
    pub fn keyword(name: impl Into<String>) -> Self {
        Value::Keyword(Keyword::new(name))
    }

    /// Creates a string value.
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Creates a list value.
    #[must_use]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(items)
    }

    /// Creates a vector value.
    #[must_use]
    pub fn vector(items: Vec<Value>) -> Self {
        Value::Vector(items)
    }

    /// Creates a set, deduplicating under structural equality.
    ///
    /// The first occurrence of each element wins; insertion order is
    /// otherwise preserved (though it carries no meaning).
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let mut out: Vec<Value> = Vec::new();
        for item in items {
            if !out.contains(&item) {
                out.push(item);
            }
        }
        Value::Set(out)
    }

    /// Creates a map, deduplicating keys under structural equality.
    ///
    /// The first occurrence of each key wins.
    pub fn map(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut out: Vec<(Value, Value)> = Vec::new();
        for (k, v) in pairs {
            if !out.iter().any(|(existing, _)| *existing == k) {
                out.push((k, v));
            }
        }
        Value::Map(out)
    }

    /// Creates a tagged value: `#tag payload`.
    #[must_use]
    pub fn tagged(tag: Symbol, value: Value) -> Self {
        Value::Tagged(tag, Box::new(value))
    }

    /// Returns `true` if the value is `nil`.
    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns `true` if the value is a map.
    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns `true` if the value is a set.
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Value::Set(_))
    }

    /// Returns `true` if the value is a tagged value.
    #[inline]
    #[must_use]
    pub const fn is_tagged(&self) -> bool {
        matches!(self, Value::Tagged(..))
    }

    /// If the value is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer that fits `i64`, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => i.as_i64(),
            _ => None,
        }
    }

    /// If the value is a list or vector, returns its elements.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Vector(items) => Some(items),
            _ => None,
        }
    }

    /// A short name for the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Character(_) => "character",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Keyword(_) => "keyword",
            Value::List(_) => "list",
            Value::Vector(_) => "vector",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
            Value::Tagged(..) => "tagged value",
        }
    }
}

/// Structural equality.
///
/// Same variant, recursively equal payloads. List and Vector never compare
/// equal to each other even with identical elements. Map and Set compare as
/// unordered collections; their keys/elements are unique by construction,
/// so equal length plus one-sided containment suffices.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Character(a), Value::Character(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Keyword(a), Value::Keyword(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|item| b.contains(item))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.iter().any(|(bk, bv)| bk == k && bv == v))
            }
            (Value::Tagged(atag, avalue), Value::Tagged(btag, bvalue)) => {
                atag == btag && avalue == bvalue
            }
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::int(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<BigDecimal> for Value {
    fn from(value: BigDecimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Character(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Value::Symbol(value)
    }
}

impl From<Keyword> for Value {
    fn from(value: Keyword) -> Self {
        Value::Keyword(value)
    }
}
