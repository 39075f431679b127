//! Decoration pass: presentational columns from configuration and state.
//!
//! Produces new column objects; the configured columns are never mutated.

use crate::columns::{Column, ColumnKey, FilterOption, FixedSide, SortOrder};
use crate::config::SelectionMode;
use crate::model::Value;
use crate::state::{ActiveSort, FilterState};

/// Key of the synthesized selection column.
pub const SELECTION_COLUMN_KEY: &str = "selection-column";

/// Sort control state on a decorated column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortAffordance {
    /// Direction currently active for this column; inert when `None`.
    pub active: Option<SortOrder>,
}

/// Filter menu state on a decorated column.
#[derive(Debug, Clone)]
pub struct FilterAffordance {
    /// Configured menu entries.
    pub options: Vec<FilterOption>,
    /// Currently accepted values.
    pub selected: Vec<Value>,
    /// Whether the menu allows multiple accepted values.
    pub multiple: bool,
    /// Caller renders its own filter UI for this column.
    pub custom: bool,
}

/// Header control of the selection column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionHeader {
    Checkbox {
        checked: bool,
        indeterminate: bool,
        disabled: bool,
    },
    /// Radio mode has no header control.
    Radio,
}

/// Per-row selection input state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCell {
    pub checked: bool,
    pub disabled: bool,
    pub mode: SelectionMode,
}

/// A configured column augmented with interactive affordances.
#[derive(Debug, Clone)]
pub struct DecoratedColumn {
    /// The underlying configuration; synthesized for the selection column.
    pub column: Column,
    pub key: ColumnKey,
    /// Present when the column is sortable.
    pub sort: Option<SortAffordance>,
    /// Present when the column declares filter options or a custom filter.
    pub filter: Option<FilterAffordance>,
    /// Present only on the selection column.
    pub selection_header: Option<SelectionHeader>,
    pub fixed: Option<FixedSide>,
}

/// Build the decorated column list.
///
/// With row selection enabled, the selection column goes first (replacing
/// an existing first column carrying its key) and inherits fixed-left
/// positioning when any configured column is fixed. Column keys are derived
/// against configuration positions, so a decorated column's key always
/// matches its filter/sort state key.
pub(crate) fn decorate(
    columns: &[Column],
    selection_header: Option<SelectionHeader>,
    active_sort: Option<&ActiveSort>,
    filters: &FilterState,
) -> Vec<DecoratedColumn> {
    let mut out = Vec::new();
    let mut skip_first = false;

    if let Some(header) = selection_header {
        let fixed = columns
            .iter()
            .any(|c| c.fixed.is_some())
            .then_some(FixedSide::Left);
        out.push(DecoratedColumn {
            column: Column::new("").key(SELECTION_COLUMN_KEY),
            key: ColumnKey::Name(SELECTION_COLUMN_KEY.to_string()),
            sort: None,
            filter: None,
            selection_header: Some(header),
            fixed,
        });
        skip_first = columns
            .first()
            .is_some_and(|c| c.key.as_deref() == Some(SELECTION_COLUMN_KEY));
    }

    for (index, column) in columns.iter().enumerate() {
        if index == 0 && skip_first {
            continue;
        }
        let key = column.resolved_key(index);

        let sort = column.sorter.as_ref().map(|_| SortAffordance {
            active: active_sort
                .filter(|a| a.key == key)
                .map(|a| a.order),
        });

        let filter = (!column.filter_options.is_empty() || column.custom_filter).then(|| {
            FilterAffordance {
                options: column.filter_options.clone(),
                selected: filters.get(&key).cloned().unwrap_or_default(),
                multiple: column.filter_multiple,
                custom: column.custom_filter,
            }
        });

        out.push(DecoratedColumn {
            column: column.clone(),
            key,
            sort,
            filter,
            selection_header: None,
            fixed: column.fixed,
        });
    }

    out
}
