//! Property-based tests - pragmatic roundtrip guarantees over generated
//! native trees.
//!
//! Generated values stick to what the grammar can express (finite floats,
//! valid symbol names); within that space, `loads(dumps(v))` must be the
//! identity up to structural equality, for scalars and for arbitrarily
//! nested collections.

use bigdecimal::BigDecimal;
use chrono::{FixedOffset, TimeZone};
use edn_codec::{dumps, loads, parse, print, Edn};
use num_bigint::BigInt;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use uuid::Uuid;

fn roundtrips(value: &Edn) -> Result<(), TestCaseError> {
    let text = dumps(value).map_err(|e| TestCaseError::fail(e.to_string()))?;
    let back = loads(&text).map_err(|e| {
        TestCaseError::fail(format!("reparse failed: {} (text was {:?})", e, text))
    })?;
    prop_assert_eq!(&back, value, "text was {:?}", text);
    Ok(())
}

fn symbol_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9*!_?-]{0,8}"
        .prop_filter("reserved words are not symbols", |s| {
            !matches!(s.as_str(), "nil" | "true" | "false")
        })
}

fn scalar() -> impl Strategy<Value = Edn> {
    prop_oneof![
        Just(Edn::Nil),
        any::<bool>().prop_map(Edn::from),
        any::<i64>().prop_map(Edn::from),
        any::<i128>().prop_map(|i| Edn::Int(BigInt::from(i))),
        (-1.0e12f64..1.0e12).prop_map(Edn::from),
        (any::<i64>(), 0u32..12).prop_map(|(mantissa, scale)| {
            Edn::Decimal(BigDecimal::new(BigInt::from(mantissa), i64::from(scale)))
        }),
        any::<char>().prop_map(Edn::Char),
        ".*".prop_map(Edn::String),
        symbol_name().prop_map(Edn::symbol),
        symbol_name().prop_map(Edn::keyword),
        any::<u128>().prop_map(|bits| Edn::Uuid(Uuid::from_u128(bits))),
    ]
}

fn value() -> impl Strategy<Value = Edn> {
    scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Edn::Vector),
            prop::collection::vec(inner.clone(), 0..6).prop_map(Edn::List),
            prop::collection::vec(inner.clone(), 0..6).prop_map(Edn::set),
            prop::collection::vec((inner.clone(), inner), 0..4).prop_map(Edn::map),
        ]
    })
}

proptest! {
    #[test]
    fn prop_scalar_roundtrip(v in scalar()) {
        roundtrips(&v)?;
    }

    #[test]
    fn prop_tree_roundtrip(v in value()) {
        roundtrips(&v)?;
    }

    #[test]
    fn prop_integer_roundtrip(n in any::<i128>()) {
        roundtrips(&Edn::Int(BigInt::from(n)))?;
    }

    #[test]
    fn prop_finite_float_roundtrip(f in proptest::num::f64::NORMAL | proptest::num::f64::ZERO | proptest::num::f64::SUBNORMAL) {
        roundtrips(&Edn::Float(f))?;
    }

    #[test]
    fn prop_string_roundtrip(s in ".*") {
        roundtrips(&Edn::String(s))?;
    }

    #[test]
    fn prop_instant_roundtrip(secs in 0i64..4_000_000_000, offset_hours in -12i32..=12) {
        let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        let dt = offset.timestamp_opt(secs, 0).unwrap();
        roundtrips(&Edn::Instant(dt))?;
    }

    #[test]
    fn prop_parse_print_parse_is_stable(v in value()) {
        // print ∘ parse may reorder nothing and re-escape strings, but a
        // second trip through is always the identity on the value.
        let text = dumps(&v).unwrap();
        let ast = parse(&text).unwrap();
        let printed = print(&ast);
        prop_assert_eq!(parse(&printed).unwrap(), ast);
    }
}
