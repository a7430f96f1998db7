//! Built-in extension handlers for `#inst` and `#uuid`.
//!
//! These are ordinary reader/writer functions registered through the same
//! [`crate::Readers`]/[`crate::Writers`] API available to any caller; the
//! codec core has no knowledge of them. They are public so callers can
//! re-register them under other tags, wrap them, or rebuild the default
//! tables from scratch.
//!
//! - `#inst` carries an RFC 3339 timestamp string and resolves to
//!   [`Edn::Instant`]; the offset in the text is preserved.
//! - `#uuid` carries the canonical hyphenated form and resolves to
//!   [`Edn::Uuid`].
//!
//! ## Examples
//!
//! ```rust
//! use edn_codec::{dumps, loads, Edn};
//!
//! let inst = loads("#inst \"2012-05-12T14:30:00+01:00\"").unwrap();
//! assert!(inst.is_instant());
//! assert_eq!(dumps(&inst).unwrap(), "#inst \"2012-05-12T14:30:00+01:00\"");
//! ```

use chrono::DateTime;
use uuid::Uuid;

use crate::native::Edn;
use crate::value::Symbol;
use crate::{Error, Result};

/// The tag symbol for timestamps: `inst`.
#[must_use]
pub fn instant_tag() -> Symbol {
    Symbol::new("inst")
}

/// The tag symbol for unique identifiers: `uuid`.
#[must_use]
pub fn uuid_tag() -> Symbol {
    Symbol::new("uuid")
}

/// Reader for `#inst`: RFC 3339 string → [`Edn::Instant`].
///
/// # Errors
///
/// Fails if the payload is not a string or does not parse as an RFC 3339
/// timestamp.
pub fn read_instant(value: Edn) -> Result<Edn> {
    match value {
        Edn::String(s) => DateTime::parse_from_rfc3339(&s)
            .map(Edn::Instant)
            .map_err(|e| Error::custom(format!("invalid #inst timestamp \"{}\": {}", s, e))),
        other => Err(Error::custom(format!(
            "#inst expects a string, found {}",
            other.type_name()
        ))),
    }
}

/// Writer transform for instants: [`Edn::Instant`] → RFC 3339 string.
///
/// # Errors
///
/// Fails if applied to anything but an instant.
pub fn write_instant(value: &Edn) -> Result<Edn> {
    match value {
        Edn::Instant(dt) => Ok(Edn::String(dt.to_rfc3339())),
        other => Err(Error::custom(format!(
            "instant writer applied to {}",
            other.type_name()
        ))),
    }
}

/// Reader for `#uuid`: hyphenated string → [`Edn::Uuid`].
///
/// # Errors
///
/// Fails if the payload is not a string or does not parse as a UUID.
pub fn read_uuid(value: Edn) -> Result<Edn> {
    match value {
        Edn::String(s) => Uuid::parse_str(&s)
            .map(Edn::Uuid)
            .map_err(|e| Error::custom(format!("invalid #uuid \"{}\": {}", s, e))),
        other => Err(Error::custom(format!(
            "#uuid expects a string, found {}",
            other.type_name()
        ))),
    }
}

/// Writer transform for UUIDs: [`Edn::Uuid`] → canonical string.
///
/// # Errors
///
/// Fails if applied to anything but a UUID.
pub fn write_uuid(value: &Edn) -> Result<Edn> {
    match value {
        Edn::Uuid(u) => Ok(Edn::String(u.to_string())),
        other => Err(Error::custom(format!(
            "uuid writer applied to {}",
            other.type_name()
        ))),
    }
}
