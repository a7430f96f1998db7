//! Bidirectional conversion between [`Value`] trees and native [`Edn`]
//! values, plus the string- and stream-level conveniences built on it.
//!
//! ## Dispatch contracts
//!
//! [`encode`] tries, in order: symbol/keyword identity pass-through, the
//! writer table (first matching predicate wins; the transform's result is
//! re-encoded and wrapped in the rule's tag), the structural rules for
//! nil/booleans/numbers/strings/characters/collections, and finally the
//! caller's `default`, whose replacement value is re-encoded. A value that
//! falls through everything is an [`Error::Encoding`] naming its type.
//!
//! [`decode`] never fails on its own: scalars and collections map to their
//! native counterparts, and a tagged value resolves through the reader
//! table, then the caller's `default`, then the generic [`Edn::Tagged`]
//! carrier; unknown tags are valid, opaque data, not errors. Only a
//! registered handler (or the caller's own default) can fail.
//!
//! Both conversions are strict depth-first recursions with no visited-set:
//! the grammar cannot produce cycles and native trees own their children,
//! so the recursion always terminates (stack depth permitting).
//!
//! ## Examples
//!
//! ```rust
//! use edn_codec::{dumps, loads, Edn};
//!
//! let value = loads("{:a [1 2] :b #{3}}").unwrap();
//! let text = dumps(&value).unwrap();
//! assert_eq!(loads(&text).unwrap(), value);
//! ```

use std::io;

use crate::native::Edn;
use crate::parser::parse;
use crate::registry::{Readers, Writers};
use crate::stream::read_stream;
use crate::value::{Int, Symbol, Value};
use crate::{Error, Result};

/// Fallback for unresolved tags: gets the tag and the decoded payload.
pub type TagDefault = dyn Fn(Symbol, Edn) -> Result<Edn> + Send + Sync;

/// Fallback for unencodable values: returns a replacement to re-encode.
pub type EncodeDefault = dyn Fn(&Edn) -> Result<Edn> + Send + Sync;

/// Converts an abstract [`Value`] into a native [`Edn`] value.
///
/// See the [module docs](self) for the dispatch order. `readers` resolves
/// tags; `default` handles tags absent from the table. Pass
/// [`Readers::defaults`] for the standard `#inst`/`#uuid` behavior or
/// [`Readers::new`] to keep every tag opaque.
///
/// # Errors
///
/// Only a reader or the caller's `default` can fail; unresolved tags
/// degrade to [`Edn::Tagged`].
pub fn decode(value: Value, readers: &Readers, default: Option<&TagDefault>) -> Result<Edn> {
    match value {
        Value::Nil => Ok(Edn::Nil),
        Value::Bool(b) => Ok(Edn::Bool(b)),
        Value::Integer(i) => Ok(Edn::Int(i.into_bigint())),
        Value::Float(f) => Ok(Edn::Float(f)),
        Value::Decimal(d) => Ok(Edn::Decimal(d)),
        Value::Character(c) => Ok(Edn::Char(c)),
        Value::String(s) => Ok(Edn::String(s)),
        Value::Symbol(s) => Ok(Edn::Symbol(s)),
        Value::Keyword(k) => Ok(Edn::Keyword(k)),
        Value::List(items) => Ok(Edn::List(decode_all(items, readers, default)?)),
        Value::Vector(items) => Ok(Edn::Vector(decode_all(items, readers, default)?)),
        // Resolving tags can merge formerly-distinct elements, so sets and
        // maps re-deduplicate on the way through.
        Value::Set(items) => Ok(Edn::set(decode_all(items, readers, default)?)),
        Value::Map(pairs) => {
            let mut out = Vec::with_capacity(pairs.len());
            for (k, v) in pairs {
                out.push((decode(k, readers, default)?, decode(v, readers, default)?));
            }
            Ok(Edn::map(out))
        }
        Value::Tagged(tag, inner) => {
            let inner = decode(*inner, readers, default)?;
            match readers.get(&tag) {
                Some(handler) => handler(inner),
                None => match default {
                    Some(fallback) => fallback(tag, inner),
                    None => Ok(Edn::tagged(tag, inner)),
                },
            }
        }
    }
}

fn decode_all(
    items: Vec<Value>,
    readers: &Readers,
    default: Option<&TagDefault>,
) -> Result<Vec<Edn>> {
    items
        .into_iter()
        .map(|item| decode(item, readers, default))
        .collect()
}

/// Converts a native [`Edn`] value into an abstract [`Value`].
///
/// See the [module docs](self) for the dispatch order. Integers that do
/// not fit `i64` are marked as explicit big-integer literals and print
/// with a trailing `N`.
///
/// # Errors
///
/// [`Error::Encoding`] when no writer rule, structural rule, or `default`
/// covers the value; whatever a writer transform or `default` raises.
pub fn encode(value: &Edn, writers: &Writers, default: Option<&EncodeDefault>) -> Result<Value> {
    // Identity pass-through comes before the writer table: symbols and
    // keywords are already edn identity, never writer input.
    if let Edn::Symbol(s) = value {
        return Ok(Value::Symbol(s.clone()));
    }
    if let Edn::Keyword(k) = value {
        return Ok(Value::Keyword(k.clone()));
    }

    if let Some(rule) = writers.find(value) {
        let payload = (rule.transform)(value)?;
        let encoded = encode(&payload, writers, default)?;
        return Ok(Value::tagged(rule.tag.clone(), encoded));
    }

    match value {
        Edn::Nil => Ok(Value::Nil),
        Edn::Bool(b) => Ok(Value::Bool(*b)),
        Edn::Int(i) => {
            let int = if i64::try_from(i).is_ok() {
                Int::new(i.clone())
            } else {
                Int::big(i.clone())
            };
            Ok(Value::Integer(int))
        }
        Edn::Float(f) => Ok(Value::Float(*f)),
        Edn::Decimal(d) => Ok(Value::Decimal(d.clone())),
        Edn::Char(c) => Ok(Value::Character(*c)),
        Edn::String(s) => Ok(Value::String(s.clone())),
        Edn::Symbol(s) => Ok(Value::Symbol(s.clone())),
        Edn::Keyword(k) => Ok(Value::Keyword(k.clone())),
        Edn::List(items) => Ok(Value::List(encode_all(items, writers, default)?)),
        Edn::Vector(items) => Ok(Value::Vector(encode_all(items, writers, default)?)),
        Edn::Set(items) => Ok(Value::set(encode_all(items, writers, default)?)),
        Edn::Map(pairs) => {
            let mut out = Vec::with_capacity(pairs.len());
            for (k, v) in pairs {
                out.push((encode(k, writers, default)?, encode(v, writers, default)?));
            }
            Ok(Value::map(out))
        }
        Edn::Tagged(tag, inner) => Ok(Value::tagged(
            tag.clone(),
            encode(inner, writers, default)?,
        )),
        other @ (Edn::Instant(_) | Edn::Uuid(_)) => match default {
            Some(fallback) => {
                let replacement = fallback(other)?;
                encode(&replacement, writers, default)
            }
            None => Err(Error::encoding(format!(
                "no writer rule for {} {}",
                other.type_name(),
                other
            ))),
        },
    }
}

fn encode_all(
    items: &[Edn],
    writers: &Writers,
    default: Option<&EncodeDefault>,
) -> Result<Vec<Value>> {
    items
        .iter()
        .map(|item| encode(item, writers, default))
        .collect()
}

/// Reads one edn form into a native value, with the default readers.
///
/// # Examples
///
/// ```rust
/// use edn_codec::{loads, Edn};
///
/// assert_eq!(loads("nil").unwrap(), Edn::Nil);
/// assert_eq!(
///     loads("#{1 2 3}").unwrap(),
///     Edn::set(vec![Edn::from(1), Edn::from(2), Edn::from(3)]),
/// );
/// ```
///
/// # Errors
///
/// Fails on malformed input or a failing built-in reader.
pub fn loads(text: &str) -> Result<Edn> {
    loads_with(text, &Readers::defaults(), None)
}

/// Reads one edn form into a native value with explicit tables.
///
/// # Errors
///
/// Fails on malformed input or a failing reader/`default`.
pub fn loads_with(text: &str, readers: &Readers, default: Option<&TagDefault>) -> Result<Edn> {
    decode(parse(text)?, readers, default)
}

/// Writes a native value as edn text, with the default writers.
///
/// # Examples
///
/// ```rust
/// use edn_codec::{dumps, edn};
///
/// assert_eq!(dumps(&edn!({"foo" => 42})).unwrap(), "{\"foo\" 42}");
/// ```
///
/// # Errors
///
/// Fails if the value (or any child) has no writer or structural rule.
pub fn dumps(value: &Edn) -> Result<String> {
    dumps_with(value, &Writers::defaults(), None)
}

/// Writes a native value as edn text with explicit tables.
///
/// # Errors
///
/// Fails if the value (or any child) has no writer, structural rule, or
/// `default`.
pub fn dumps_with(
    value: &Edn,
    writers: &Writers,
    default: Option<&EncodeDefault>,
) -> Result<String> {
    Ok(crate::printer::print(&encode(value, writers, default)?))
}

/// Lazily reads every form in `source` as native values, with the default
/// readers.
///
/// # Examples
///
/// ```rust
/// use edn_codec::{load, Edn};
///
/// let values: Vec<_> = load("1 2".as_bytes()).collect::<Result<_, _>>().unwrap();
/// assert_eq!(values, vec![Edn::from(1), Edn::from(2)]);
/// ```
pub fn load<R: io::Read>(source: R) -> impl Iterator<Item = Result<Edn>> {
    let readers = Readers::defaults();
    read_stream(source).map(move |form| form.and_then(|value| decode(value, &readers, None)))
}

/// Lazily reads every form in `source` with explicit tables.
pub fn load_with<'a, R: io::Read + 'a>(
    source: R,
    readers: &'a Readers,
    default: Option<&'a TagDefault>,
) -> impl Iterator<Item = Result<Edn>> + 'a {
    read_stream(source).map(move |form| form.and_then(|value| decode(value, readers, default)))
}

/// Writes a sequence of native values to a sink, one per line, with the
/// default writers.
///
/// # Errors
///
/// Fails on the first unencodable value or I/O error.
pub fn dump<'a, I, W>(values: I, sink: W) -> Result<()>
where
    I: IntoIterator<Item = &'a Edn>,
    W: io::Write,
{
    dump_with(values, sink, &Writers::defaults(), None)
}

/// Writes a sequence of native values to a sink with explicit tables.
///
/// # Errors
///
/// Fails on the first unencodable value or I/O error.
pub fn dump_with<'a, I, W>(
    values: I,
    mut sink: W,
    writers: &Writers,
    default: Option<&EncodeDefault>,
) -> Result<()>
where
    I: IntoIterator<Item = &'a Edn>,
    W: io::Write,
{
    for value in values {
        let encoded = encode(value, writers, default)?;
        writeln!(sink, "{}", encoded).map_err(|e| Error::io(&e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use num_bigint::BigInt;
    use std::str::FromStr;

    fn decode_plain(value: Value) -> Edn {
        decode(value, &Readers::defaults(), None).unwrap()
    }

    fn encode_plain(value: &Edn) -> Value {
        encode(value, &Writers::defaults(), None).unwrap()
    }

    #[test]
    fn test_decode_scalars() {
        assert_eq!(decode_plain(Value::Nil), Edn::Nil);
        assert_eq!(decode_plain(Value::Bool(true)), Edn::Bool(true));
        assert_eq!(decode_plain(Value::int(42)), Edn::from(42));
        assert_eq!(decode_plain(Value::Float(-42.3)), Edn::Float(-42.3));
        assert_eq!(decode_plain(Value::string("foo")), Edn::from("foo"));
        assert_eq!(decode_plain(Value::Character('f')), Edn::Char('f'));
    }

    #[test]
    fn test_decode_collections() {
        assert_eq!(
            decode_plain(Value::vector(vec![Value::int(1), Value::int(2)])),
            Edn::Vector(vec![Edn::from(1), Edn::from(2)]),
        );
        assert_eq!(
            decode_plain(Value::list(vec![Value::int(1)])),
            Edn::List(vec![Edn::from(1)]),
        );
        assert_eq!(
            decode_plain(Value::set(vec![Value::int(1), Value::int(2)])),
            Edn::set(vec![Edn::from(1), Edn::from(2)]),
        );
        assert_eq!(
            decode_plain(Value::map(vec![(Value::int(1), Value::int(2))])),
            Edn::map(vec![(Edn::from(1), Edn::from(2))]),
        );
    }

    #[test]
    fn test_decode_identity_values() {
        assert_eq!(
            decode_plain(Value::symbol("foo")),
            Edn::symbol("foo"),
        );
        assert_eq!(decode_plain(Value::keyword("foo")), Edn::keyword("foo"));
    }

    #[test]
    fn test_decode_unknown_tag_degrades() {
        let tagged = Value::tagged(Symbol::new("foo"), Value::string("bar"));
        assert_eq!(
            decode_plain(tagged),
            Edn::tagged(Symbol::new("foo"), Edn::from("bar")),
        );
    }

    #[test]
    fn test_decode_reader_gets_decoded_payload() {
        let readers = Readers::new().with(Symbol::new("foo"), |value| match value {
            Edn::Vector(mut items) => {
                items.reverse();
                Ok(Edn::Vector(items))
            }
            other => Ok(other),
        });
        let tagged = Value::tagged(
            Symbol::new("foo"),
            Value::vector(vec![Value::int(1), Value::int(2)]),
        );
        assert_eq!(
            decode(tagged, &readers, None).unwrap(),
            Edn::Vector(vec![Edn::from(2), Edn::from(1)]),
        );
    }

    #[test]
    fn test_decode_default_handler() {
        let tagged = Value::tagged(Symbol::new("foo"), Value::string("bar"));
        let result = decode(
            tagged,
            &Readers::new(),
            Some(&|tag, value| Ok(Edn::Vector(vec![Edn::Symbol(tag), value]))),
        )
        .unwrap();
        assert_eq!(
            result,
            Edn::Vector(vec![Edn::symbol("foo"), Edn::from("bar")]),
        );
    }

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode_plain(&Edn::Nil), Value::Nil);
        assert_eq!(encode_plain(&Edn::Bool(false)), Value::Bool(false));
        assert_eq!(encode_plain(&Edn::from(4.2)), Value::Float(4.2));
        assert_eq!(
            encode_plain(&Edn::Decimal(BigDecimal::from_str("4.2").unwrap())),
            Value::Decimal(BigDecimal::from_str("4.2").unwrap()),
        );
        assert_eq!(encode_plain(&Edn::from("foo")), Value::string("foo"));
    }

    #[test]
    fn test_encode_big_integers_get_the_marker() {
        let small = encode_plain(&Edn::from(42));
        assert_eq!(crate::printer::print(&small), "42");
        let huge = BigInt::from_str("123456789012345678901234567890").unwrap();
        let big = encode_plain(&Edn::Int(huge));
        assert_eq!(
            crate::printer::print(&big),
            "123456789012345678901234567890N",
        );
    }

    #[test]
    fn test_encode_nested_collections() {
        let value = Edn::map(vec![(
            Edn::from("foo"),
            Edn::Vector(vec![Edn::from(1), Edn::Nil]),
        )]);
        assert_eq!(
            encode_plain(&value),
            Value::map(vec![(
                Value::string("foo"),
                Value::vector(vec![Value::int(1), Value::Nil]),
            )]),
        );
    }

    #[test]
    fn test_encode_custom_writer() {
        let writers = Writers::defaults().with(
            |v| matches!(v, Edn::Vector(items) if items.len() == 2 && items.iter().all(Edn::is_int)),
            Symbol::new("point"),
            |v| Ok(Edn::List(v.as_slice().unwrap_or_default().to_vec())),
        );
        // A two-int vector becomes #point (x y); the transform result is a
        // list, which the predicate no longer matches.
        let encoded = encode(
            &Edn::Vector(vec![Edn::from(2), Edn::from(3)]),
            &writers,
            None,
        )
        .unwrap();
        assert_eq!(crate::printer::print(&encoded), "#point (2 3)");
    }

    #[test]
    fn test_encode_unknown_type_errors() {
        let inst = chrono::DateTime::parse_from_rfc3339("2013-12-25T19:32:55+00:00").unwrap();
        let err = encode(&Edn::Instant(inst), &Writers::new(), None).unwrap_err();
        match err {
            Error::Encoding(msg) => assert!(msg.contains("instant")),
            other => panic!("expected encoding error, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_default_replacement_is_reencoded() {
        let inst = chrono::DateTime::parse_from_rfc3339("2013-12-25T19:32:55+00:00").unwrap();
        let encoded = encode(
            &Edn::Instant(inst),
            &Writers::new(),
            Some(&|value| Ok(Edn::String(value.to_string()))),
        )
        .unwrap();
        match encoded {
            Value::String(s) => assert!(s.contains("2013-12-25")),
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_encode_fixpoint() {
        let value = Edn::map(vec![
            (
                Edn::keyword("xs"),
                Edn::Vector(vec![Edn::from(1), Edn::from(2.5), Edn::Nil]),
            ),
            (Edn::keyword("s"), Edn::set(vec![Edn::from("a")])),
        ]);
        let roundtripped = decode_plain(encode_plain(&value));
        assert_eq!(roundtripped, value);
    }
}
