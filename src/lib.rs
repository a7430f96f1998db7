//! # edn_codec
//!
//! A reader and writer for [edn](https://github.com/edn-format/edn), the
//! extensible data notation: a human-readable text format for nested
//! collections, symbolic identifiers, arbitrary-precision numbers, and
//! user-extensible tagged values.
//!
//! ## What you get
//!
//! - **Exact grammar fidelity**: comments, commas-as-whitespace, `#_`
//!   discards, namespaced symbols and keywords, character literals, `N`
//!   big-integer and `M` exact-decimal suffixes, with precise line/column
//!   errors on malformed input.
//! - **A closed value model**: every form parses to one [`Value`] variant;
//!   printing is a pure function back to canonical text.
//! - **Streaming**: edn has no top-level container, so [`read_stream`]
//!   lazily yields one value per form from any [`std::io::Read`] source.
//! - **Extensible tags**: `#inst` and `#uuid` work out of the box, and any
//!   tag can be given meaning (or taken over) through per-call
//!   [`Readers`]/[`Writers`] tables. Unknown tags are data, not errors.
//! - **Arbitrary precision**: integers are [`num_bigint::BigInt`], exact
//!   decimals are [`bigdecimal::BigDecimal`]; nothing silently narrows.
//! - **No unsafe code.**
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! edn-codec = "0.1"
//! ```
//!
//! ### Reading and writing native values
//!
//! ```rust
//! use edn_codec::{dumps, loads, Edn};
//!
//! let value = loads("{:name \"Alice\" :scores [1 2 3]}").unwrap();
//! assert_eq!(
//!     value.get(&Edn::keyword("name")),
//!     Some(&Edn::String("Alice".to_string())),
//! );
//!
//! let text = dumps(&value).unwrap();
//! assert_eq!(loads(&text).unwrap(), value);
//! ```
//!
//! ### Giving a tag meaning
//!
//! ```rust
//! use edn_codec::{loads, loads_with, Edn, Readers, Symbol};
//!
//! let readers = Readers::defaults().with(Symbol::new("celsius"), |v| {
//!     match v {
//!         Edn::Int(n) => {
//!             let celsius = i64::try_from(&n).unwrap_or(0);
//!             Ok(Edn::Float(celsius as f64 + 273.15))
//!         }
//!         other => Ok(other),
//!     }
//! });
//!
//! let kelvin = loads_with("#celsius 20", &readers, None).unwrap();
//! assert_eq!(kelvin, Edn::Float(293.15));
//!
//! // Without the reader the tag stays opaque, and that is not an error.
//! assert!(loads("#celsius 20").unwrap().is_tagged());
//! ```
//!
//! ### Working at the syntax level
//!
//! ```rust
//! use edn_codec::{parse, print, read_stream};
//!
//! let ast = parse("[1 2 #_3 4]").unwrap();
//! assert_eq!(print(&ast), "[1 2 4]");
//!
//! let forms: Vec<_> = read_stream("1 2 #{4 5}".as_bytes())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(forms.len(), 3);
//! ```
//!
//! ## The two layers
//!
//! Text flows through two distinct representations:
//!
//! ```text
//! text ── parse ──▶ Value ── decode ──▶ Edn
//! text ◀─ print ─── Value ◀─ encode ─── Edn
//! ```
//!
//! [`Value`] is the abstract syntax: tags are unresolved, literal
//! provenance (the `N` suffix) is preserved. [`Edn`] is the native side:
//! tags with registered readers become real values ([`Edn::Instant`],
//! [`Edn::Uuid`], or whatever a caller's reader returns), everything else
//! maps to the closest host shape. [`loads`] and [`dumps`] compose the two
//! steps.
//!
//! ## Concurrency
//!
//! Parsing, printing, and conversion are pure functions over immutable
//! data, safe to call from any number of threads as long as the
//! reader/writer tables passed in are not mutated concurrently (they are
//! plain values; build them once and share read-only). A
//! [`stream::Reader`] owns its input cursor and must not be shared.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics in the public API on malformed input; everything is a
//!   [`Result`]
//! - Errors carry line/column context for parse failures

#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod ext;
pub mod macros;
pub mod native;
pub mod parser;
pub mod printer;
pub mod registry;
pub mod stream;
pub mod value;

pub use codec::{
    decode, dump, dump_with, dumps, dumps_with, encode, load, load_with, loads, loads_with,
    EncodeDefault, TagDefault,
};
pub use error::{Error, Result};
pub use native::Edn;
pub use parser::parse;
pub use printer::{print, print_stream};
pub use registry::{Readers, Writers};
pub use stream::read_stream;
pub use value::{Int, Keyword, Symbol, Value};
