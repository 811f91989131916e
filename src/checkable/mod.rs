/*!
 * Checkable Objects
 * Immutable value objects describing intercepted operations
 *
 * Each interception hook packages the identifying attributes of the call it
 * observed into one of these objects, then hands it to the check dispatcher.
 * Objects live for exactly one check: they are built on the hook path,
 * consumed synchronously, and discarded. Only the derived lookup key may be
 * retained (by the verdict cache).
 *
 * All fields are owned strings copied out of the intercepted call frame; the
 * object never participates in releasing caller-owned buffers.
 */

mod command;
mod mongo;
mod sql;
mod ssrf;

pub use command::CommandObject;
pub use mongo::MongoObject;
pub use sql::SqlObject;
pub use ssrf::SsrfObject;

use crate::core::types::LookupKey;
use crate::params::{ParamResult, ParamSink};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy domain an intercepted operation is evaluated against
///
/// Fixed per concrete object type, independent of field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    Mongo,
    Sql,
    Command,
    Ssrf,
}

impl CheckCategory {
    /// All known categories
    pub const ALL: [CheckCategory; 4] = [
        CheckCategory::Mongo,
        CheckCategory::Sql,
        CheckCategory::Command,
        CheckCategory::Ssrf,
    ];

    /// Stable name, used in lookup keys and rule documents
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckCategory::Mongo => "mongo",
            CheckCategory::Sql => "sql",
            CheckCategory::Command => "command",
            CheckCategory::Ssrf => "ssrf",
        }
    }
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability interface every intercepted-operation object implements
///
/// The dispatcher consults `is_well_formed` before spending cycles on the
/// policy engine, deduplicates identical checks via `lookup_key`, and
/// materializes fields for the evaluator via `populate_params`.
pub trait Checkable: Send + Sync {
    /// Deterministic cache key over exactly the fields that decide the verdict
    ///
    /// Pure and side-effect-free; identical field values always produce
    /// identical keys and differing values produce differing keys.
    fn lookup_key(&self) -> LookupKey;

    /// Policy domain this object is checked against
    fn category(&self) -> CheckCategory;

    /// Whether the object carries enough information to be worth checking
    ///
    /// Degenerate objects are still constructible (for tracing), but the
    /// dispatcher short-circuits them without invoking the engine.
    fn is_well_formed(&self) -> bool;

    /// Write this object's fields as named entries into the evaluator's
    /// parameter collection
    ///
    /// Key names are stable and documented per type so policy rules can
    /// reference them. Fails only if the sink is unusable; the error is
    /// propagated unmodified.
    fn populate_params(&self, params: &mut dyn ParamSink) -> ParamResult<()>;
}

/// Encode a lookup key from a category tag and ordered fields.
///
/// Fields are length-prefixed so the encoding is injective:
/// ("a", "b") encodes as `...|1:a|1:b` while ("ab", "") encodes as
/// `...|2:ab|0:`, regardless of separator characters inside the values.
pub(crate) fn encode_lookup_key(category: CheckCategory, fields: &[&str]) -> LookupKey {
    let mut key = String::with_capacity(
        category.as_str().len() + fields.iter().map(|f| f.len() + 8).sum::<usize>(),
    );
    key.push_str(category.as_str());
    for field in fields {
        key.push('|');
        key.push_str(&field.len().to_string());
        key.push(':');
        key.push_str(field);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names() {
        for category in CheckCategory::ALL {
            assert!(!category.as_str().is_empty());
            assert_eq!(category.to_string(), category.as_str());
        }
    }

    #[test]
    fn test_lookup_key_separator_ambiguity() {
        // ("a", "b") must not collide with ("ab", "")
        let k1 = encode_lookup_key(CheckCategory::Mongo, &["a", "b"]);
        let k2 = encode_lookup_key(CheckCategory::Mongo, &["ab", ""]);
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_lookup_key_embedded_separators() {
        let k1 = encode_lookup_key(CheckCategory::Sql, &["a|1:b", ""]);
        let k2 = encode_lookup_key(CheckCategory::Sql, &["a", "1:b|"]);
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_lookup_key_category_tag() {
        let k1 = encode_lookup_key(CheckCategory::Mongo, &["x"]);
        let k2 = encode_lookup_key(CheckCategory::Sql, &["x"]);
        assert_ne!(k1, k2);
    }
}
