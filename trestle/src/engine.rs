//! The table engine: owned state axes, user actions, derived views.
//!
//! [`TableEngine`] owns the four state axes and the record set. Actions run
//! in two phases: the pure transition commits through each axis's
//! authority tag, then the notifications describing the attempt are built,
//! dispatched to the configured callbacks, and returned. Derived views
//! (`current_page`, `decorated_columns`, `pagination_view`) are pure reads
//! and can be recomputed at any time.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::columns::{ColumnKey, SortOrder, find_column};
use crate::config::{CheckboxProps, CheckboxPropsFn, Locale, Pagination, SelectionMode, TableConfig};
use crate::decorate::{self, DecoratedColumn, SelectionCell, SelectionHeader};
use crate::events::{ChangeParams, Notification, SortDescriptor};
use crate::model::{Record, RowKey, Value};
use crate::state::{
    ActiveSort, FilterState, PageState, PageView, PropsCache, SelectionState, SortState,
};
use crate::view;

/// Headless state engine for one table.
///
/// # Example
///
/// ```
/// use trestle::columns::{Column, SortOrder};
/// use trestle::config::TableConfig;
/// use trestle::engine::TableEngine;
/// use trestle::model::Record;
///
/// let config = TableConfig::new().columns(vec![
///     Column::new("Name").data_index("name").sort_by(|a, b| {
///         a.get_str("name").ok().flatten().cmp(&b.get_str("name").ok().flatten())
///     }),
/// ]);
/// let records = vec![
///     Record::new().set("key", "b").set("name", "Beryl"),
///     Record::new().set("key", "a").set("name", "Agate"),
/// ];
///
/// let mut engine = TableEngine::new(config, records);
/// engine.toggle_sort("name", SortOrder::Ascend);
/// let page = engine.current_page();
/// assert_eq!(page[0].get_str("name").unwrap(), Some("Agate"));
/// ```
#[derive(Debug)]
pub struct TableEngine {
    config: TableConfig,
    records: Vec<Record>,
    sort: SortState,
    filters: FilterState,
    page: PageState,
    selection: SelectionState,
    generation: u64,
    props_cache: RefCell<PropsCache>,
}

impl TableEngine {
    /// Build an engine from a configuration and the initial record set.
    pub fn new(config: TableConfig, records: Vec<Record>) -> Self {
        if config.columns_page_range.is_some() || config.columns_page_size.is_some() {
            log::warn!(
                "`columns_page_range` and `columns_page_size` are removed, use fixed columns instead"
            );
        }
        Self {
            sort: SortState::init_from(&config.columns),
            filters: FilterState::init_from(&config.columns),
            page: PageState::init_from(&config.pagination),
            selection: SelectionState::init_from(config.row_selection.as_ref()),
            config,
            records,
            generation: 0,
            props_cache: RefCell::new(PropsCache::default()),
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The raw record set, as supplied.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn locale(&self) -> &Locale {
        &self.config.locale
    }

    // ====== reconciliation ======

    /// Replace the record set.
    ///
    /// Clears the selection dirty flag (defaults apply again) and retires
    /// cached per-record properties. Selection keys survive; keys no longer
    /// present simply stop matching rows.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.selection.reset_dirty();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Reconcile state against a new configuration.
    ///
    /// Each axis re-derives its authority from the configuration: present
    /// external values replace state, absent ones demote the axis in place.
    /// Reconciliation describes no user action and fires no notifications.
    pub fn apply_config(&mut self, config: TableConfig) {
        self.sort.reconcile(&config.columns);
        self.filters.reconcile(&config.columns);
        self.page.reconcile(&config.pagination);
        self.selection.reconcile(config.row_selection.as_ref());

        let same_props_fn = match (self.checkbox_props_fn(), checkbox_props_fn_of(&config)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if !same_props_fn {
            self.generation = self.generation.wrapping_add(1);
        }
        self.config = config;
    }

    // ====== actions ======

    /// Toggle a column's sort direction.
    ///
    /// A fresh column becomes active with `order`, the active column with
    /// the same order clears, the active column with the opposite flips.
    /// Unknown keys are ignored. On an externally forced axis the toggle
    /// does not commit, but the notification still carries the attempt.
    pub fn toggle_sort(
        &mut self,
        key: impl Into<ColumnKey>,
        order: SortOrder,
    ) -> Vec<Notification> {
        let key = key.into();
        if find_column(&self.config.columns, &key).is_none() {
            log::debug!("sort toggle ignored for unknown column {key}");
            return Vec::new();
        }

        let next = self.sort.toggled(key, order);
        self.sort.commit(next.clone());

        let sorter = next.as_ref().and_then(|active| self.sort_descriptor(active));
        let notifications = vec![Notification::Change(ChangeParams {
            pagination: self.page.snapshot(),
            filters: self.filters.map(),
            sorter,
        })];
        self.dispatch(&notifications);
        notifications
    }

    /// Apply a user filter pick for one column.
    ///
    /// The pick merges over the other columns' accepted values; an empty
    /// `values` clears the column. Jumps back to the first page, clears the
    /// selection dirty flag, and notifies with the full merged filter map.
    /// Forced columns stay pinned to their configured values, but the
    /// attempt is still reported.
    pub fn apply_filter(
        &mut self,
        key: impl Into<ColumnKey>,
        values: Vec<Value>,
    ) -> Vec<Notification> {
        let working = self.filters.apply(key.into(), values, &self.config.columns);

        let mut notifications = Vec::new();
        if self.page.enabled() {
            self.page.reset_to_first();
            notifications.push(Notification::PageChange { current: 1 });
        }
        self.selection.reset_dirty();

        notifications.push(Notification::Change(ChangeParams {
            pagination: self.page.snapshot_with(1),
            filters: working,
            sorter: self.current_sort_descriptor(),
        }));
        self.dispatch(&notifications);
        notifications
    }

    /// Change the current page.
    ///
    /// Zero keeps the prior page. The attempted page commits through the
    /// authority tag and is echoed to observers unclamped; reads clamp it
    /// against the data. Clears the selection dirty flag.
    pub fn set_page(&mut self, current: usize) -> Vec<Notification> {
        let attempted = self.page.set_page(current);
        self.selection.reset_dirty();

        let notifications = vec![
            Notification::PageChange { current: attempted },
            Notification::Change(ChangeParams {
                pagination: self.page.snapshot_with(attempted),
                filters: self.filters.map(),
                sorter: self.current_sort_descriptor(),
            }),
        ];
        self.dispatch(&notifications);
        notifications
    }

    /// Change the page size, jumping to `current`.
    ///
    /// The size always commits; `current` commits through the authority
    /// tag.
    pub fn set_page_size(&mut self, current: usize, page_size: usize) -> Vec<Notification> {
        let (current, page_size) = self.page.set_page_size(current, page_size);

        let notifications = vec![
            Notification::PageSizeChange { current, page_size },
            Notification::Change(ChangeParams {
                pagination: self.page.snapshot_with(current),
                filters: self.filters.map(),
                sorter: self.current_sort_descriptor(),
            }),
        ];
        self.dispatch(&notifications);
        notifications
    }

    /// Toggle one row's selection.
    ///
    /// `index` is the record's flattened position, consulted only when key
    /// derivation falls back to positions. Checkbox mode edits the working
    /// set (seeded with default-checked rows until dirty); radio mode
    /// replaces the selection outright. Marks the axis dirty either way.
    pub fn toggle_row(&mut self, record: &Record, index: usize, checked: bool) -> Vec<Notification> {
        let Some(mode) = self.config.row_selection.as_ref().map(|s| s.mode) else {
            log::debug!("row toggle ignored, row selection is off");
            return Vec::new();
        };
        let key = self.record_key(record, index);

        let next: BTreeSet<RowKey> = match mode {
            SelectionMode::Radio => [key].into_iter().collect(),
            SelectionMode::Checkbox => {
                let mut set = self.selection.seeded(&self.default_selection());
                if checked {
                    set.insert(key);
                } else {
                    set.remove(&key);
                }
                set
            }
        };
        self.selection.commit(next.clone());

        let (keys, rows) = self.materialize(&next);
        let notifications = vec![
            Notification::SelectionChange {
                keys,
                rows: rows.clone(),
            },
            Notification::RowSelect {
                record: record.clone(),
                selected: checked,
                rows,
            },
        ];
        self.dispatch(&notifications);
        notifications
    }

    /// Select or deselect every selectable row on the current page.
    ///
    /// Disabled rows are skipped; rows on other pages keep their state. The
    /// select-all notification reports which rows this action actually
    /// flipped.
    pub fn toggle_all(&mut self, checked: bool) -> Vec<Notification> {
        if self.config.row_selection.is_none() {
            log::debug!("select-all ignored, row selection is off");
            return Vec::new();
        }
        let page_rows = self.flat_current_page();
        let selectable: Vec<RowKey> = page_rows
            .iter()
            .enumerate()
            .filter(|(i, record)| !self.checkbox_props_for(record, *i).disabled)
            .map(|(i, record)| self.record_key(record, i))
            .collect();

        let mut next = self.selection.seeded(&self.default_selection());
        let mut changed_keys = Vec::new();
        for key in selectable {
            let flipped = if checked {
                next.insert(key.clone())
            } else {
                next.remove(&key)
            };
            if flipped {
                changed_keys.push(key);
            }
        }
        self.selection.commit(next.clone());

        let (keys, rows) = self.materialize(&next);
        // Flipped keys carry page-local positions and resolve against the
        // page rows.
        let changed = page_rows
            .into_iter()
            .enumerate()
            .filter(|(i, record)| changed_keys.contains(&self.record_key(record, *i)))
            .map(|(_, record)| record)
            .collect();
        let notifications = vec![
            Notification::SelectionChange {
                keys,
                rows: rows.clone(),
            },
            Notification::SelectAll {
                selected: checked,
                rows,
                changed,
            },
        ];
        self.dispatch(&notifications);
        notifications
    }

    // ====== derived views ======

    /// Record identity at a flattened position.
    pub fn record_key(&self, record: &Record, index: usize) -> RowKey {
        self.config.row_key.resolve(record, index)
    }

    /// The sorted and filtered top-level records.
    pub fn local_data(&self) -> Vec<Record> {
        let comparator = self.sort.comparator(&self.config.columns);
        view::local_data(
            &self.records,
            &self.config.columns,
            comparator.as_deref(),
            &self.filters.map(),
            &self.config.children_field,
        )
    }

    /// The current page of top-level records.
    pub fn current_page(&self) -> Vec<Record> {
        view::current_page(self.local_data(), &self.page)
    }

    /// The local data flattened depth-first, children after their parent.
    pub fn flat_data(&self) -> Vec<Record> {
        view::flatten(&self.local_data(), &self.config.children_field)
    }

    /// The current page flattened depth-first.
    pub fn flat_current_page(&self) -> Vec<Record> {
        view::flatten(&self.current_page(), &self.config.children_field)
    }

    /// The decorated column list for rendering collaborators.
    pub fn decorated_columns(&self) -> Vec<DecoratedColumn> {
        decorate::decorate(
            &self.config.columns,
            self.selection_header(),
            self.sort.active(),
            &self.filters,
        )
    }

    /// Selection input state for the row at a flattened position; `None`
    /// when row selection is off.
    pub fn selection_cell(&self, record: &Record, index: usize) -> Option<SelectionCell> {
        let selection = self.config.row_selection.as_ref()?;
        let props = self.checkbox_props_for(record, index);
        let key = self.record_key(record, index);
        Some(SelectionCell {
            checked: self.selection.is_selected(&key, &self.default_selection()),
            disabled: props.disabled,
            mode: selection.mode,
        })
    }

    /// Display state for the pagination widget; `None` when pagination is
    /// off or there is nothing to page.
    pub fn pagination_view(&self) -> Option<PageView> {
        self.page.view(self.local_data().len())
    }

    /// The active sort, if any.
    pub fn active_sort(&self) -> Option<&ActiveSort> {
        self.sort.active()
    }

    /// Snapshot of accepted filter values per column, forced entries
    /// included.
    pub fn filters(&self) -> BTreeMap<ColumnKey, Vec<Value>> {
        self.filters.map()
    }

    /// Identities currently reading as selected, sorted: the tracked set,
    /// plus the default-checked baseline until the user's first toggle.
    pub fn selected_keys(&self) -> Vec<RowKey> {
        self.selection
            .seeded(&self.default_selection())
            .into_iter()
            .collect()
    }

    // ====== internals ======

    fn checkbox_props_fn(&self) -> Option<&CheckboxPropsFn> {
        checkbox_props_fn_of(&self.config)
    }

    /// Memoized per-record input properties.
    fn checkbox_props_for(&self, record: &Record, index: usize) -> CheckboxProps {
        let Some(props_fn) = self.checkbox_props_fn() else {
            return CheckboxProps::default();
        };
        let key = self.record_key(record, index);
        self.props_cache
            .borrow_mut()
            .fetch(self.generation, key, || props_fn(record))
    }

    /// Identities of default-checked rows at their flattened positions.
    /// Empty without a property function.
    fn default_selection(&self) -> Vec<RowKey> {
        if self.checkbox_props_fn().is_none() {
            return Vec::new();
        }
        self.flat_data()
            .iter()
            .enumerate()
            .filter(|(i, record)| self.checkbox_props_for(record, *i).default_checked)
            .map(|(i, record)| self.record_key(record, i))
            .collect()
    }

    /// Selected keys (sorted) and their rows from the flattened data, in
    /// data order. Keys without a matching row stay in the key list.
    fn materialize(&self, selected: &BTreeSet<RowKey>) -> (Vec<RowKey>, Vec<Record>) {
        let keys = selected.iter().cloned().collect();
        let rows = self
            .flat_data()
            .into_iter()
            .enumerate()
            .filter(|(i, record)| selected.contains(&self.record_key(record, *i)))
            .map(|(_, record)| record)
            .collect();
        (keys, rows)
    }

    fn selection_header(&self) -> Option<SelectionHeader> {
        let selection = self.config.row_selection.as_ref()?;
        Some(match selection.mode {
            SelectionMode::Radio => SelectionHeader::Radio,
            SelectionMode::Checkbox => {
                let selectable: Vec<(RowKey, bool)> = self
                    .flat_current_page()
                    .iter()
                    .enumerate()
                    .filter(|(i, record)| !self.checkbox_props_for(record, *i).disabled)
                    .map(|(i, record)| {
                        let props = self.checkbox_props_for(record, i);
                        (self.record_key(record, i), props.default_checked)
                    })
                    .collect();
                let (checked, indeterminate) = self.selection.summary(&selectable);
                SelectionHeader::Checkbox {
                    checked,
                    indeterminate,
                    // Nothing selectable on the page.
                    disabled: selectable.is_empty(),
                }
            }
        })
    }

    fn sort_descriptor(&self, active: &ActiveSort) -> Option<SortDescriptor> {
        let column = find_column(&self.config.columns, &active.key)?;
        Some(SortDescriptor {
            column: column.clone(),
            order: active.order,
            field: column.data_index.clone(),
            key: active.key.clone(),
        })
    }

    fn current_sort_descriptor(&self) -> Option<SortDescriptor> {
        self.sort
            .active()
            .and_then(|active| self.sort_descriptor(active))
    }

    /// Hand each notification to its configured callback, in order.
    fn dispatch(&self, notifications: &[Notification]) {
        let selection = self.config.row_selection.as_ref();
        let page_config = match &self.config.pagination {
            Pagination::On(config) => Some(config),
            Pagination::Off => None,
        };
        for notification in notifications {
            match notification {
                Notification::Change(params) => {
                    if let Some(f) = &self.config.on_change {
                        f(params);
                    }
                }
                Notification::PageChange { current } => {
                    if let Some(f) = page_config.and_then(|c| c.on_page_change.as_ref()) {
                        f(*current);
                    }
                }
                Notification::PageSizeChange { current, page_size } => {
                    if let Some(f) = page_config.and_then(|c| c.on_size_change.as_ref()) {
                        f(*current, *page_size);
                    }
                }
                Notification::SelectionChange { keys, rows } => {
                    if let Some(f) = selection.and_then(|s| s.on_change.as_ref()) {
                        f(keys, rows);
                    }
                }
                Notification::RowSelect {
                    record,
                    selected,
                    rows,
                } => {
                    if let Some(f) = selection.and_then(|s| s.on_select.as_ref()) {
                        f(record, *selected, rows);
                    }
                }
                Notification::SelectAll {
                    selected,
                    rows,
                    changed,
                } => {
                    if let Some(f) = selection.and_then(|s| s.on_select_all.as_ref()) {
                        f(*selected, rows, changed);
                    }
                }
            }
        }
    }
}

fn checkbox_props_fn_of(config: &TableConfig) -> Option<&CheckboxPropsFn> {
    config
        .row_selection
        .as_ref()
        .and_then(|s| s.checkbox_props.as_ref())
}
