//! Filter axis: accepted values per column.

use std::collections::{BTreeMap, BTreeSet};

use super::authority::Authority;
use crate::columns::{Column, ColumnKey};
use crate::model::Value;

/// Filter state: one authority-tagged entry per filtered column.
///
/// Entries for columns with a forced filter value are external and always
/// mirror the configuration. An ordered map keeps notification payloads and
/// view filtering deterministic.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    entries: BTreeMap<ColumnKey, Authority<Vec<Value>>>,
}

impl FilterState {
    /// Collect forced filter values from column configuration.
    pub fn init_from(columns: &[Column]) -> Self {
        let entries = columns
            .iter()
            .enumerate()
            .filter_map(|(i, c)| {
                c.forced_filter
                    .as_ref()
                    .map(|values| (c.resolved_key(i), Authority::External(values.clone())))
            })
            .collect();
        Self { entries }
    }

    /// Snapshot of all accepted values, forced entries included.
    pub fn map(&self) -> BTreeMap<ColumnKey, Vec<Value>> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.get().clone()))
            .collect()
    }

    /// Accepted values for one column, if any.
    pub fn get(&self, key: &ColumnKey) -> Option<&Vec<Value>> {
        self.entries.get(key).map(Authority::get)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply a user filter pick.
    ///
    /// Merges `values` over a working copy of every entry, prunes keys no
    /// longer derivable from `columns`, and retains the non-forced remainder
    /// as internal state (forced columns stay pinned to their configured
    /// values). Returns the full merged map, which is what the outward change
    /// notification carries (forced entries and the user's attempt on a
    /// forced column included).
    pub fn apply(
        &mut self,
        key: ColumnKey,
        values: Vec<Value>,
        columns: &[Column],
    ) -> BTreeMap<ColumnKey, Vec<Value>> {
        let mut working = self.map();
        working.insert(key, values);

        let known: BTreeSet<ColumnKey> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| c.resolved_key(i))
            .collect();
        working.retain(|k, _| known.contains(k));

        let mut entries = BTreeMap::new();
        for (i, column) in columns.iter().enumerate() {
            if let Some(forced) = &column.forced_filter {
                entries.insert(column.resolved_key(i), Authority::External(forced.clone()));
            }
        }
        for (k, v) in &working {
            entries
                .entry(k.clone())
                .or_insert_with(|| Authority::Internal(v.clone()));
        }
        self.entries = entries;

        working
    }

    /// Re-derive on reconcile: forced columns become (or refresh) external
    /// entries, previously forced columns demote keeping their value, and
    /// entries for unknown columns are pruned.
    pub fn reconcile(&mut self, columns: &[Column]) {
        let known: BTreeSet<ColumnKey> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| c.resolved_key(i))
            .collect();

        let mut entries: BTreeMap<ColumnKey, Authority<Vec<Value>>> = self
            .entries
            .iter()
            .filter(|(k, _)| known.contains(*k))
            .map(|(k, v)| (k.clone(), Authority::Internal(v.get().clone())))
            .collect();
        for (i, column) in columns.iter().enumerate() {
            if let Some(forced) = &column.forced_filter {
                entries.insert(column.resolved_key(i), Authority::External(forced.clone()));
            }
        }
        self.entries = entries;
    }
}
