//! The native value model.
//!
//! [`Edn`] is what [`crate::decode`] produces and [`crate::encode`]
//! consumes: the host-side twin of the abstract [`crate::Value`] tree. The
//! two differ exactly where reading resolves meaning:
//!
//! - Tags handled by a reader become real values here (the built-ins give
//!   [`Edn::Instant`] and [`Edn::Uuid`]), while unresolved tags survive as
//!   the generic [`Edn::Tagged`] carrier holding the *decoded* payload.
//! - Literal provenance disappears: `10N` and `10` both decode to
//!   [`Edn::Int`].
//!
//! Symbols and keywords remain opaque identifier values; lists, vectors,
//! sets, and maps become the corresponding native collections (sets and
//! maps keep the insertion-ordered, structurally-deduplicated
//! representation, since floats rule out hashing).
//!
//! ## Creating Values
//!
//! ```rust
//! use edn_codec::{edn, Edn};
//!
//! let value = edn!({
//!     "name" => "Alice",
//!     "tags" => ["admin", "user"],
//!     "age" => 30,
//! });
//! assert!(value.is_map());
//! ```
//!
//! ## serde interop
//!
//! `Edn` implements `Serialize` and `Deserialize` so native values can
//! cross into other serde formats. The mapping is lossy where those
//! formats lack edn's vocabulary: instants serialize as RFC 3339 strings,
//! characters as one-character strings, keywords with their leading colon.
//!
//! ```rust
//! use edn_codec::edn;
//!
//! let json = serde_json::to_string(&edn!([1, 2, 3])).unwrap();
//! assert_eq!(json, "[1,2,3]");
//! ```

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset};
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

use crate::value::{Keyword, Symbol};

/// A native edn value.
///
/// # Examples
///
/// ```rust
/// use edn_codec::{loads, Edn};
///
/// let value = loads("{:a 1}").unwrap();
/// assert!(value.is_map());
///
/// let inst = loads("#inst \"1985-04-12T23:20:50.52Z\"").unwrap();
/// assert!(inst.is_instant());
/// ```
#[derive(Clone, Debug, Default)]
pub enum Edn {
    #[default]
    Nil,
    Bool(bool),
    Int(BigInt),
    Float(f64),
    Decimal(BigDecimal),
    Char(char),
    String(String),
    Symbol(Symbol),
    Keyword(Keyword),
    List(Vec<Edn>),
    Vector(Vec<Edn>),
    Set(Vec<Edn>),
    Map(Vec<(Edn, Edn)>),
    Instant(DateTime<FixedOffset>),
    Uuid(Uuid),
    Tagged(Symbol, Box<Edn>),
}

impl Edn {
    /// Creates a set, deduplicating under structural equality.
    pub fn set(items: impl IntoIterator<Item = Edn>) -> Self {
        let mut out: Vec<Edn> = Vec::new();
        for item in items {
            if !out.contains(&item) {
                out.push(item);
            }
        }
        Edn::Set(out)
    }

    /// Creates a map, deduplicating keys under structural equality.
    ///
    /// The first occurrence of each key wins.
    pub fn map(pairs: impl IntoIterator<Item = (Edn, Edn)>) -> Self {
        let mut out: Vec<(Edn, Edn)> = Vec::new();
        for (k, v) in pairs {
            if !out.iter().any(|(existing, _)| *existing == k) {
                out.push((k, v));
            }
        }
        Edn::Map(out)
    }

    /// Creates an unprefixed symbol value.
    pub fn symbol(name: impl Into<String>) -> Self {
        Edn::Symbol(Symbol::new(name))
    }

    /// Creates an unprefixed keyword value.
    pub fn keyword(name: impl Into<String>) -> Self {
        Edn::Keyword(Keyword::new(name))
    }

    /// Creates a tagged value carrier.
    #[must_use]
    pub fn tagged(tag: Symbol, value: Edn) -> Self {
        Edn::Tagged(tag, Box::new(value))
    }

    /// Returns `true` if the value is nil.
    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Edn::Nil)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Edn::Bool(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Edn::Int(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Edn::String(_))
    }

    /// Returns `true` if the value is a map.
    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Edn::Map(_))
    }

    /// Returns `true` if the value is a set.
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Edn::Set(_))
    }

    /// Returns `true` if the value is a timestamp.
    #[inline]
    #[must_use]
    pub const fn is_instant(&self) -> bool {
        matches!(self, Edn::Instant(_))
    }

    /// Returns `true` if the value is a UUID.
    #[inline]
    #[must_use]
    pub const fn is_uuid(&self) -> bool {
        matches!(self, Edn::Uuid(_))
    }

    /// Returns `true` if the value is an unresolved tagged value.
    #[inline]
    #[must_use]
    pub const fn is_tagged(&self) -> bool {
        matches!(self, Edn::Tagged(..))
    }

    /// If the value is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Edn::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer that fits `i64`, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Edn::Int(i) => i64::try_from(i).ok(),
            _ => None,
        }
    }

    /// If the value is a float, returns it.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Edn::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a string, returns it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Edn::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a list or vector, returns its elements.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> Option<&[Edn]> {
        match self {
            Edn::List(items) | Edn::Vector(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is a map, looks up `key` by structural equality.
    #[must_use]
    pub fn get(&self, key: &Edn) -> Option<&Edn> {
        match self {
            Edn::Map(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// If the value is a timestamp, returns it.
    #[inline]
    #[must_use]
    pub fn as_instant(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Edn::Instant(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the value is a UUID, returns it.
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Edn::Uuid(u) => Some(u),
            _ => None,
        }
    }

    /// A short name for the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Edn::Nil => "nil",
            Edn::Bool(_) => "boolean",
            Edn::Int(_) => "integer",
            Edn::Float(_) => "float",
            Edn::Decimal(_) => "decimal",
            Edn::Char(_) => "character",
            Edn::String(_) => "string",
            Edn::Symbol(_) => "symbol",
            Edn::Keyword(_) => "keyword",
            Edn::List(_) => "list",
            Edn::Vector(_) => "vector",
            Edn::Set(_) => "set",
            Edn::Map(_) => "map",
            Edn::Instant(_) => "instant",
            Edn::Uuid(_) => "uuid",
            Edn::Tagged(..) => "tagged value",
        }
    }
}

/// Structural equality, mirroring [`crate::Value`]: sets and maps compare
/// as unordered collections, List and Vector stay distinct.
impl PartialEq for Edn {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Edn::Nil, Edn::Nil) => true,
            (Edn::Bool(a), Edn::Bool(b)) => a == b,
            (Edn::Int(a), Edn::Int(b)) => a == b,
            (Edn::Float(a), Edn::Float(b)) => a == b,
            (Edn::Decimal(a), Edn::Decimal(b)) => a == b,
            (Edn::Char(a), Edn::Char(b)) => a == b,
            (Edn::String(a), Edn::String(b)) => a == b,
            (Edn::Symbol(a), Edn::Symbol(b)) => a == b,
            (Edn::Keyword(a), Edn::Keyword(b)) => a == b,
            (Edn::List(a), Edn::List(b)) | (Edn::Vector(a), Edn::Vector(b)) => a == b,
            (Edn::Set(a), Edn::Set(b)) => {
                a.len() == b.len() && a.iter().all(|item| b.contains(item))
            }
            (Edn::Map(a), Edn::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.iter().any(|(bk, bv)| bk == k && bv == v))
            }
            (Edn::Instant(a), Edn::Instant(b)) => a == b,
            (Edn::Uuid(a), Edn::Uuid(b)) => a == b,
            (Edn::Tagged(atag, avalue), Edn::Tagged(btag, bvalue)) => {
                atag == btag && avalue == bvalue
            }
            _ => false,
        }
    }
}

/// Diagnostic rendering in edn-like notation. For canonical output go
/// through [`crate::dumps`]; this skips the writer tables and renders
/// instants and UUIDs with their built-in tags directly.
impl fmt::Display for Edn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Edn], close: &str) -> fmt::Result {
            f.write_str(open)?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", item)?;
            }
            f.write_str(close)
        }

        match self {
            Edn::Nil => f.write_str("nil"),
            Edn::Bool(b) => write!(f, "{}", b),
            Edn::Int(i) => write!(f, "{}", i),
            Edn::Float(x) => write!(f, "{}", x),
            Edn::Decimal(d) => write!(f, "{}M", d),
            Edn::Char(c) => write!(f, "\\{}", c),
            Edn::String(s) => write!(f, "{:?}", s),
            Edn::Symbol(s) => write!(f, "{}", s),
            Edn::Keyword(k) => write!(f, "{}", k),
            Edn::List(items) => seq(f, "(", items, ")"),
            Edn::Vector(items) => seq(f, "[", items, "]"),
            Edn::Set(items) => seq(f, "#{", items, "}"),
            Edn::Map(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{} {}", k, v)?;
                }
                f.write_str("}")
            }
            Edn::Instant(dt) => write!(f, "#inst \"{}\"", dt.to_rfc3339()),
            Edn::Uuid(u) => write!(f, "#uuid \"{}\"", u),
            Edn::Tagged(tag, value) => write!(f, "#{} {}", tag, value),
        }
    }
}

impl From<bool> for Edn {
    fn from(value: bool) -> Self {
        Edn::Bool(value)
    }
}

impl From<i32> for Edn {
    fn from(value: i32) -> Self {
        Edn::Int(BigInt::from(value))
    }
}

impl From<i64> for Edn {
    fn from(value: i64) -> Self {
        Edn::Int(BigInt::from(value))
    }
}

impl From<u64> for Edn {
    fn from(value: u64) -> Self {
        Edn::Int(BigInt::from(value))
    }
}

impl From<BigInt> for Edn {
    fn from(value: BigInt) -> Self {
        Edn::Int(value)
    }
}

impl From<f64> for Edn {
    fn from(value: f64) -> Self {
        Edn::Float(value)
    }
}

impl From<BigDecimal> for Edn {
    fn from(value: BigDecimal) -> Self {
        Edn::Decimal(value)
    }
}

impl From<char> for Edn {
    fn from(value: char) -> Self {
        Edn::Char(value)
    }
}

impl From<&str> for Edn {
    fn from(value: &str) -> Self {
        Edn::String(value.to_string())
    }
}

impl From<String> for Edn {
    fn from(value: String) -> Self {
        Edn::String(value)
    }
}

impl From<Symbol> for Edn {
    fn from(value: Symbol) -> Self {
        Edn::Symbol(value)
    }
}

impl From<Keyword> for Edn {
    fn from(value: Keyword) -> Self {
        Edn::Keyword(value)
    }
}

impl From<Vec<Edn>> for Edn {
    fn from(value: Vec<Edn>) -> Self {
        Edn::Vector(value)
    }
}

impl From<DateTime<FixedOffset>> for Edn {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Edn::Instant(value)
    }
}

impl From<Uuid> for Edn {
    fn from(value: Uuid) -> Self {
        Edn::Uuid(value)
    }
}

// TryFrom extractors for pulling scalars back out of a decoded tree.
impl TryFrom<Edn> for i64 {
    type Error = crate::Error;

    fn try_from(value: Edn) -> crate::Result<Self> {
        match &value {
            Edn::Int(i) => i64::try_from(i)
                .map_err(|_| crate::Error::custom("integer does not fit in i64")),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                value.type_name()
            ))),
        }
    }
}

impl TryFrom<Edn> for f64 {
    type Error = crate::Error;

    fn try_from(value: Edn) -> crate::Result<Self> {
        match value {
            Edn::Float(f) => Ok(f),
            other => Err(crate::Error::custom(format!(
                "expected float, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Edn> for bool {
    type Error = crate::Error;

    fn try_from(value: Edn) -> crate::Result<Self> {
        match value {
            Edn::Bool(b) => Ok(b),
            other => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Edn> for String {
    type Error = crate::Error;

    fn try_from(value: Edn) -> crate::Result<Self> {
        match value {
            Edn::String(s) => Ok(s),
            other => Err(crate::Error::custom(format!(
                "expected string, found {}",
                other.type_name()
            ))),
        }
    }
}

impl Serialize for Edn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Edn::Nil => serializer.serialize_unit(),
            Edn::Bool(b) => serializer.serialize_bool(*b),
            Edn::Int(i) => match i64::try_from(i) {
                Ok(small) => serializer.serialize_i64(small),
                Err(_) => serializer.serialize_str(&i.to_string()),
            },
            Edn::Float(f) => serializer.serialize_f64(*f),
            Edn::Decimal(d) => serializer.serialize_str(&d.to_string()),
            Edn::Char(c) => serializer.serialize_str(&c.to_string()),
            Edn::String(s) => serializer.serialize_str(s),
            Edn::Symbol(s) => serializer.serialize_str(&s.to_string()),
            Edn::Keyword(k) => serializer.serialize_str(&k.to_string()),
            Edn::List(items) | Edn::Vector(items) | Edn::Set(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Edn::Map(pairs) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (k, v) in pairs {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Edn::Instant(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Edn::Uuid(u) => serializer.serialize_str(&u.to_string()),
            Edn::Tagged(tag, value) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(&format!("#{}", tag), value)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Edn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct EdnVisitor;

        impl<'de> Visitor<'de> for EdnVisitor {
            type Value = Edn;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any edn-representable value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Edn::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Edn::Int(BigInt::from(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Edn::Int(BigInt::from(value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Edn::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Edn::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Edn::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Edn::Nil)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Edn::Nil)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Edn::Vector(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut pairs: Vec<(Edn, Edn)> = Vec::new();
                while let Some((key, value)) = map.next_entry::<Edn, Edn>()? {
                    pairs.push((key, value));
                }
                Ok(Edn::map(pairs))
            }
        }

        deserializer.deserialize_any(EdnVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_equality_ignores_order() {
        let a = Edn::set(vec![Edn::from(1), Edn::from(2)]);
        let b = Edn::set(vec![Edn::from(2), Edn::from(1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_map_get() {
        let m = Edn::map(vec![(Edn::keyword("a"), Edn::from(1))]);
        assert_eq!(m.get(&Edn::keyword("a")), Some(&Edn::from(1)));
        assert_eq!(m.get(&Edn::keyword("b")), None);
    }

    #[test]
    fn test_list_vector_distinct() {
        assert_ne!(
            Edn::List(vec![Edn::from(1)]),
            Edn::Vector(vec![Edn::from(1)]),
        );
    }

    #[test]
    fn test_tryfrom_scalars() {
        assert_eq!(i64::try_from(Edn::from(42)).unwrap(), 42);
        assert!(i64::try_from(Edn::from("x")).is_err());
        assert_eq!(f64::try_from(Edn::from(3.5)).unwrap(), 3.5);
        assert!(bool::try_from(Edn::from(1)).is_err());
        assert_eq!(String::try_from(Edn::from("hi")).unwrap(), "hi");
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let value = Edn::map(vec![
            (Edn::String("a".to_string()), Edn::from(1)),
            (Edn::String("b".to_string()), Edn::Vector(vec![Edn::from(true), Edn::Nil])),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        let back: Edn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_serde_lossy_scalars() {
        let json = serde_json::to_string(&Edn::keyword("foo")).unwrap();
        assert_eq!(json, "\":foo\"");
        let json = serde_json::to_string(&Edn::Char('x')).unwrap();
        assert_eq!(json, "\"x\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(Edn::Nil.to_string(), "nil");
        assert_eq!(
            Edn::Vector(vec![Edn::from(1), Edn::keyword("a")]).to_string(),
            "[1 :a]",
        );
        let u = Uuid::parse_str("f81d4fae-7dec-11d0-a765-00a0c91e6bf6").unwrap();
        assert_eq!(
            Edn::Uuid(u).to_string(),
            "#uuid \"f81d4fae-7dec-11d0-a765-00a0c91e6bf6\"",
        );
    }
}
