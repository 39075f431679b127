//! Selection axis: selected identities, dirty flag, props cache.

use std::collections::{BTreeSet, HashMap};

use super::authority::Authority;
use crate::config::{CheckboxProps, RowSelection};
use crate::model::RowKey;

/// Selection state behind its authority tag.
///
/// While `dirty` is false the user has not overridden selection yet, and
/// default-checked identities count as selected in addition to the tracked
/// set. The first user toggle marks the axis dirty; replacing the record
/// set, changing page, or applying a filter resets it.
#[derive(Debug, Clone)]
pub struct SelectionState {
    selected: Authority<BTreeSet<RowKey>>,
    dirty: bool,
}

impl SelectionState {
    pub fn init_from(selection: Option<&RowSelection>) -> Self {
        let selected = match selection.and_then(|s| s.selected_keys.as_ref()) {
            Some(keys) => Authority::External(keys.iter().cloned().collect()),
            None => Authority::Internal(BTreeSet::new()),
        };
        Self {
            selected,
            dirty: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn reset_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn is_external(&self) -> bool {
        self.selected.is_external()
    }

    /// The tracked set, without the default-checked baseline.
    pub fn keys(&self) -> &BTreeSet<RowKey> {
        self.selected.get()
    }

    /// Working set for an action: the tracked set, seeded with the
    /// default-checked identities unless dirty.
    pub fn seeded(&self, defaults: &[RowKey]) -> BTreeSet<RowKey> {
        let mut set = self.keys().clone();
        if !self.dirty {
            set.extend(defaults.iter().cloned());
        }
        set
    }

    /// Whether a row reads as selected, honoring the dirty/default rule.
    pub fn is_selected(&self, key: &RowKey, defaults: &[RowKey]) -> bool {
        self.keys().contains(key) || (!self.dirty && defaults.contains(key))
    }

    /// Commit an action result through the authority tag; the axis is dirty
    /// either way. Returns whether it committed.
    pub fn commit(&mut self, next: BTreeSet<RowKey>) -> bool {
        self.dirty = true;
        self.selected.set_if_internal(next)
    }

    /// Re-derive on reconcile: a configured key list replaces the axis as
    /// external; its absence demotes the axis, keeping the value.
    pub fn reconcile(&mut self, selection: Option<&RowSelection>) {
        match selection.and_then(|s| s.selected_keys.as_ref()) {
            Some(keys) => self.selected = Authority::External(keys.iter().cloned().collect()),
            None => self.selected.demote(),
        }
    }

    /// Header checkbox summary `(checked, indeterminate)` over the page's
    /// selectable rows, given as `(key, default_checked)` pairs.
    ///
    /// Clean state also reads fully/partially default-checked pages as
    /// checked/indeterminate; dirty state goes by membership alone. An empty
    /// selectable set is neither.
    pub fn summary(&self, selectable: &[(RowKey, bool)]) -> (bool, bool) {
        if selectable.is_empty() {
            return (false, false);
        }
        let every = selectable.iter().all(|(k, _)| self.keys().contains(k));
        let some = selectable.iter().any(|(k, _)| self.keys().contains(k));
        if self.dirty {
            return (every, some && !every);
        }
        let every_default = selectable.iter().all(|(_, d)| *d);
        let some_default = selectable.iter().any(|(_, d)| *d);
        (
            every || every_default,
            (some && !every) || (some_default && !every_default),
        )
    }
}

/// Per-identity checkbox property cache, keyed by record-set generation.
///
/// The engine bumps its generation counter when the record set is replaced
/// or the property function changes; the next lookup against a newer
/// generation drops every stale entry. At most one property-function call
/// per identity per generation.
#[derive(Debug, Default)]
pub struct PropsCache {
    generation: u64,
    entries: HashMap<RowKey, CheckboxProps>,
}

impl PropsCache {
    /// Fetch the cached props for `key`, computing them on first sight.
    pub fn fetch(
        &mut self,
        generation: u64,
        key: RowKey,
        compute: impl FnOnce() -> CheckboxProps,
    ) -> CheckboxProps {
        if self.generation != generation {
            self.entries.clear();
            self.generation = generation;
        }
        *self.entries.entry(key).or_insert_with(compute)
    }
}
