//! Outward notifications emitted by engine actions.
//!
//! Every user action runs as two phases: the state transition commits first,
//! then the notifications describing it are built, dispatched to the
//! configured callbacks, and returned to the caller. Observers therefore
//! always see consistent post-transition state.

use std::collections::BTreeMap;

use crate::columns::{Column, ColumnKey, SortOrder};
use crate::model::{Record, RowKey, Value};

/// The active sort, as reported to collaborators.
#[derive(Debug, Clone)]
pub struct SortDescriptor {
    /// The sorted column's configuration.
    pub column: Column,
    pub order: SortOrder,
    /// The column's data field, when it has one.
    pub field: Option<String>,
    pub key: ColumnKey,
}

/// Pagination state carried by [`ChangeParams`].
///
/// `current` is the attempted value of the triggering action, unclamped.
/// Remote handlers receive what the user asked for, not what the local data
/// could satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub current: usize,
    pub page_size: usize,
    /// Configured remote total, if any.
    pub total: Option<usize>,
}

/// Parameters of the combined change notification: everything an external
/// data source needs to re-fetch.
#[derive(Debug, Clone)]
pub struct ChangeParams {
    /// `None` when pagination is disabled.
    pub pagination: Option<PageSnapshot>,
    /// Full merged filter map, forced entries included.
    pub filters: BTreeMap<ColumnKey, Vec<Value>>,
    /// `None` when unsorted.
    pub sorter: Option<SortDescriptor>,
}

/// One outward notification.
#[derive(Debug, Clone)]
pub enum Notification {
    /// Combined pagination/filter/sort change.
    Change(ChangeParams),
    /// The pagination widget's own page-change callback.
    PageChange { current: usize },
    /// The pagination widget's page-size callback.
    PageSizeChange { current: usize, page_size: usize },
    /// Selection changed; carries keys and materialized rows.
    SelectionChange { keys: Vec<RowKey>, rows: Vec<Record> },
    /// A single row was toggled.
    RowSelect {
        record: Record,
        selected: bool,
        rows: Vec<Record>,
    },
    /// Select-all / deselect-all over the current page.
    SelectAll {
        selected: bool,
        rows: Vec<Record>,
        /// Rows actually flipped by this action.
        changed: Vec<Record>,
    },
}
