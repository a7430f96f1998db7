//! The extension registry: reader and writer tables.
//!
//! Tag handling is deliberately *data*, not global state: both tables are
//! plain values, built once, passed explicitly into [`crate::decode`] and
//! [`crate::encode`], and never mutated by a call. Treat them as immutable
//! snapshots: construct per call or share read-only across threads.
//!
//! - [`Readers`] maps a tag [`Symbol`] to a function from the *decoded*
//!   payload to a native value. Used by `decode`.
//! - [`Writers`] is an ordered list of `(predicate, tag, transform)` rules.
//!   `encode` applies the first rule whose predicate matches, re-encodes
//!   the transform's result, and wraps it in the tag.
//!
//! The built-in `#inst` and `#uuid` handlers are ordinary entries created
//! by [`Readers::defaults`]/[`Writers::defaults`] through the same `with`
//! API callers use; nothing in the codec knows about them. Entries added
//! with `with` take priority over the built-ins: a reader for an existing
//! tag replaces it, and writer rules are consulted in the order added,
//! ahead of the built-in rules.
//!
//! ## Examples
//!
//! ```rust
//! use edn_codec::{loads_with, Edn, Readers, Symbol};
//!
//! let readers = Readers::defaults().with(Symbol::new("foo"), |value| {
//!     let mut items = match value {
//!         Edn::Vector(items) => items,
//!         other => return Ok(other),
//!     };
//!     items.reverse();
//!     Ok(Edn::Vector(items))
//! });
//!
//! let value = loads_with("#foo [1 2]", &readers, None).unwrap();
//! assert_eq!(value, Edn::Vector(vec![Edn::from(2), Edn::from(1)]));
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::ext;
use crate::native::Edn;
use crate::value::Symbol;
use crate::Result;

/// A tag handler: decoded payload in, native value out.
pub type ReaderFn = Box<dyn Fn(Edn) -> Result<Edn> + Send + Sync>;

/// A writer predicate: does this rule apply to the native value?
pub type WriterPredicate = Box<dyn Fn(&Edn) -> bool + Send + Sync>;

/// A writer transform: rewrite the native value into the tag's payload.
pub type WriterFn = Box<dyn Fn(&Edn) -> Result<Edn> + Send + Sync>;

/// The reader table: tag symbol → handler.
///
/// See the [module docs](self) for semantics and an example.
#[derive(Default)]
pub struct Readers {
    handlers: HashMap<Symbol, ReaderFn>,
}

impl Readers {
    /// An empty table. Tags decode to generic tagged values until entries
    /// are added.
    #[must_use]
    pub fn new() -> Self {
        Readers {
            handlers: HashMap::new(),
        }
    }

    /// The built-in table: `#inst` and `#uuid`.
    #[must_use]
    pub fn defaults() -> Self {
        Readers::new()
            .with(ext::instant_tag(), ext::read_instant)
            .with(ext::uuid_tag(), ext::read_uuid)
    }

    /// Adds a handler for `tag`, replacing any existing entry.
    #[must_use]
    pub fn with<F>(mut self, tag: Symbol, handler: F) -> Self
    where
        F: Fn(Edn) -> Result<Edn> + Send + Sync + 'static,
    {
        let _ = self.handlers.insert(tag, Box::new(handler));
        self
    }

    /// Looks up the handler for `tag`.
    #[must_use]
    pub fn get(&self, tag: &Symbol) -> Option<&ReaderFn> {
        self.handlers.get(tag)
    }

    /// Returns the number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no tags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for Readers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Readers")
            .field("tags", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

pub(crate) struct WriteRule {
    pub(crate) predicate: WriterPredicate,
    pub(crate) tag: Symbol,
    pub(crate) transform: WriterFn,
}

/// The writer table: an ordered list of `(predicate, tag, transform)`
/// rules, first match wins.
///
/// Rules added with [`Writers::with`] keep their insertion order and are
/// consulted before the built-in rules, so callers can override how
/// instants or UUIDs are written.
#[derive(Default)]
pub struct Writers {
    rules: Vec<WriteRule>,
    /// Rules below this index were added by the caller; built-ins follow.
    user_rules: usize,
}

impl Writers {
    /// An empty table. Only the structural encoding rules apply.
    #[must_use]
    pub fn new() -> Self {
        Writers {
            rules: Vec::new(),
            user_rules: 0,
        }
    }

    /// The built-in table: instants as `#inst`, UUIDs as `#uuid`.
    #[must_use]
    pub fn defaults() -> Self {
        let mut writers = Writers::new();
        writers.rules.push(WriteRule {
            predicate: Box::new(|value| matches!(value, Edn::Instant(_))),
            tag: ext::instant_tag(),
            transform: Box::new(ext::write_instant),
        });
        writers.rules.push(WriteRule {
            predicate: Box::new(|value| matches!(value, Edn::Uuid(_))),
            tag: ext::uuid_tag(),
            transform: Box::new(ext::write_uuid),
        });
        writers
    }

    /// Adds a rule ahead of the built-ins, after any rules already added.
    #[must_use]
    pub fn with<P, F>(mut self, predicate: P, tag: Symbol, transform: F) -> Self
    where
        P: Fn(&Edn) -> bool + Send + Sync + 'static,
        F: Fn(&Edn) -> Result<Edn> + Send + Sync + 'static,
    {
        self.rules.insert(
            self.user_rules,
            WriteRule {
                predicate: Box::new(predicate),
                tag,
                transform: Box::new(transform),
            },
        );
        self.user_rules += 1;
        self
    }

    /// Finds the first rule whose predicate matches `value`.
    pub(crate) fn find(&self, value: &Edn) -> Option<&WriteRule> {
        self.rules.iter().find(|rule| (rule.predicate)(value))
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the table holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for Writers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writers")
            .field("tags", &self.rules.iter().map(|r| &r.tag).collect::<Vec<_>>())
            .finish()
    }
}
