//! Row identity key

use std::fmt;

/// Stable identity of one record, used for selection tracking and lookups.
///
/// Keys come from a configured record field (or resolver function) as text or
/// integers; records without a usable key fall back to their position in the
/// flattened data. The positional variant is deliberately distinct from
/// [`RowKey::Int`] so a fallback for row 5 never collides with a record whose
/// key field holds the integer 5.
///
/// Positional keys are unstable across reorderings; callers that sort,
/// filter, or mutate their data should supply a real key field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowKey {
    /// Key derived from a string field or resolver.
    Text(String),
    /// Key derived from an integer field or resolver.
    Int(i64),
    /// Positional fallback (index into the flattened data).
    Index(usize),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Text(s) => write!(f, "{s}"),
            RowKey::Int(n) => write!(f, "{n}"),
            RowKey::Index(i) => write!(f, "#{i}"),
        }
    }
}

impl From<&str> for RowKey {
    fn from(v: &str) -> Self {
        RowKey::Text(v.to_string())
    }
}

impl From<String> for RowKey {
    fn from(v: String) -> Self {
        RowKey::Text(v)
    }
}

impl From<i64> for RowKey {
    fn from(v: i64) -> Self {
        RowKey::Int(v)
    }
}
