//! Explicit internal/external authority tag.

/// A state axis value tagged by who owns it.
///
/// `Internal` values belong to the engine and yield to user actions.
/// `External` values are pinned by configuration: user actions still fire
/// their notifications with the attempted value, but never commit. The tag
/// replaces ad hoc "is the key present in the configuration" checks with a
/// type-checked variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority<T> {
    Internal(T),
    External(T),
}

impl<T> Authority<T> {
    /// Shared access to the value, regardless of the tag.
    pub fn get(&self) -> &T {
        match self {
            Authority::Internal(v) | Authority::External(v) => v,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Authority::External(_))
    }

    /// Commit `value` when internally owned. Returns whether it committed.
    pub fn set_if_internal(&mut self, value: T) -> bool {
        match self {
            Authority::Internal(v) => {
                *v = value;
                true
            }
            Authority::External(_) => false,
        }
    }
}

impl<T: Clone> Authority<T> {
    /// Re-tag as internal, keeping the value.
    ///
    /// Reconciliation demotes an axis this way when the configuration stops
    /// pinning it: the last authoritative value stays in place and user
    /// actions commit again.
    pub fn demote(&mut self) {
        if let Authority::External(v) = self {
            *self = Authority::Internal(v.clone());
        }
    }
}
