//! Table configuration: the engine's input surface.
//!
//! Everything here is supplied by the caller and treated as declarative:
//! the engine never mutates a configuration, it reconciles its own state
//! against whichever configuration is currently applied.

use std::fmt;
use std::sync::Arc;

use crate::columns::Column;
use crate::events::ChangeParams;
use crate::model::{Record, RowKey, Value};

/// Per-record checkbox/radio input properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckboxProps {
    /// Row cannot be (de)selected by the user.
    pub disabled: bool,
    /// Row counts as selected until the user overrides selection.
    pub default_checked: bool,
}

/// Per-record property function, memoized per identity per record-set
/// generation.
pub type CheckboxPropsFn = Arc<dyn Fn(&Record) -> CheckboxProps>;

/// Selection input mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Independent per-row checkboxes plus a select-all header control.
    #[default]
    Checkbox,
    /// Single choice; selecting a row replaces the selection.
    Radio,
}

/// Row selection descriptor.
#[derive(Clone, Default)]
pub struct RowSelection {
    pub mode: SelectionMode,
    /// Externally controlled selection. When present, the selection axis is
    /// external-authority: user actions notify but do not commit.
    pub selected_keys: Option<Vec<RowKey>>,
    /// Per-record input properties (disabled / default-checked).
    pub checkbox_props: Option<CheckboxPropsFn>,
    /// Fired on every selection change with the selected keys and rows.
    pub on_change: Option<Arc<dyn Fn(&[RowKey], &[Record])>>,
    /// Fired on a single-row toggle with the row, its new state, and the
    /// selected rows.
    pub on_select: Option<Arc<dyn Fn(&Record, bool, &[Record])>>,
    /// Fired on select-all/deselect-all with the direction, the selected
    /// rows, and the rows actually flipped.
    pub on_select_all: Option<Arc<dyn Fn(bool, &[Record], &[Record])>>,
}

impl RowSelection {
    /// Checkbox-mode selection with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Radio-mode selection with no callbacks.
    pub fn radio() -> Self {
        Self {
            mode: SelectionMode::Radio,
            ..Self::default()
        }
    }

    /// Control the selection externally.
    pub fn selected_keys(mut self, keys: Vec<RowKey>) -> Self {
        self.selected_keys = Some(keys);
        self
    }

    /// Set the per-record property function.
    pub fn checkbox_props(mut self, f: impl Fn(&Record) -> CheckboxProps + 'static) -> Self {
        self.checkbox_props = Some(Arc::new(f));
        self
    }

    /// Set the selection-changed callback.
    pub fn on_change(mut self, f: impl Fn(&[RowKey], &[Record]) + 'static) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }

    /// Set the single-row toggle callback.
    pub fn on_select(mut self, f: impl Fn(&Record, bool, &[Record]) + 'static) -> Self {
        self.on_select = Some(Arc::new(f));
        self
    }

    /// Set the select-all callback.
    pub fn on_select_all(mut self, f: impl Fn(bool, &[Record], &[Record]) + 'static) -> Self {
        self.on_select_all = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for RowSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowSelection")
            .field("mode", &self.mode)
            .field("selected_keys", &self.selected_keys)
            .field("checkbox_props", &self.checkbox_props.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

/// Pagination configuration.
///
/// Optional fields merge over the engine's pagination state on reconcile;
/// a present [`current`](PageConfig::current) makes the page axis
/// external-authority.
#[derive(Clone)]
pub struct PageConfig {
    /// Externally controlled page.
    pub current: Option<usize>,
    /// Initial page (construction only).
    pub default_current: Option<usize>,
    pub page_size: Option<usize>,
    /// Initial page size (construction only).
    pub default_page_size: Option<usize>,
    /// Remote row count; enables paging data the engine never sees.
    pub total: Option<usize>,
    /// Show the page-size selector (pass-through for the pagination widget).
    pub show_size_changer: bool,
    /// Page-size choices (pass-through for the pagination widget).
    pub page_size_options: Vec<usize>,
    /// Fired when the user changes page, before the combined change
    /// notification.
    pub on_page_change: Option<Arc<dyn Fn(usize)>>,
    /// Fired when the user changes page size: `(current, page_size)`.
    pub on_size_change: Option<Arc<dyn Fn(usize, usize)>>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            current: None,
            default_current: None,
            page_size: None,
            default_page_size: None,
            total: None,
            show_size_changer: false,
            page_size_options: vec![10, 20, 30, 40],
            on_page_change: None,
            on_size_change: None,
        }
    }
}

impl PageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Control the page externally.
    pub fn current(mut self, current: usize) -> Self {
        self.current = Some(current);
        self
    }

    pub fn default_current(mut self, current: usize) -> Self {
        self.default_current = Some(current);
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = Some(page_size);
        self
    }

    /// Set the remote row count.
    pub fn total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    pub fn show_size_changer(mut self) -> Self {
        self.show_size_changer = true;
        self
    }

    pub fn page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    pub fn on_page_change(mut self, f: impl Fn(usize) + 'static) -> Self {
        self.on_page_change = Some(Arc::new(f));
        self
    }

    pub fn on_size_change(mut self, f: impl Fn(usize, usize) + 'static) -> Self {
        self.on_size_change = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for PageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageConfig")
            .field("current", &self.current)
            .field("default_current", &self.default_current)
            .field("page_size", &self.page_size)
            .field("default_page_size", &self.default_page_size)
            .field("total", &self.total)
            .field("show_size_changer", &self.show_size_changer)
            .field("page_size_options", &self.page_size_options)
            .finish_non_exhaustive()
    }
}

/// Pagination switch: enabled with a configuration, or off entirely
/// (a single implicit page holding all records).
#[derive(Debug, Clone)]
pub enum Pagination {
    On(PageConfig),
    Off,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::On(PageConfig::default())
    }
}

impl From<PageConfig> for Pagination {
    fn from(config: PageConfig) -> Self {
        Pagination::On(config)
    }
}

/// How record identities are derived.
#[derive(Clone)]
pub enum RowKeys {
    /// Read a record field; string and integer values become keys, anything
    /// else falls back to the record's position in the flattened data.
    Field(String),
    /// Caller-supplied resolver `(record, index) -> key`.
    Func(Arc<dyn Fn(&Record, usize) -> RowKey>),
}

impl RowKeys {
    /// Derive the identity of `record` at flattened position `index`.
    ///
    /// Never fails; the positional fallback is silent. A positional key is
    /// unstable across reorderings, so data that sorts or filters should
    /// carry a real key field.
    pub fn resolve(&self, record: &Record, index: usize) -> RowKey {
        match self {
            RowKeys::Func(f) => f(record, index),
            RowKeys::Field(field) => match record.get(field) {
                Some(Value::String(s)) => RowKey::Text(s.clone()),
                Some(Value::Int(n)) => RowKey::Int(*n),
                _ => RowKey::Index(index),
            },
        }
    }
}

impl Default for RowKeys {
    fn default() -> Self {
        RowKeys::Field("key".to_string())
    }
}

impl From<&str> for RowKeys {
    fn from(field: &str) -> Self {
        RowKeys::Field(field.to_string())
    }
}

impl From<String> for RowKeys {
    fn from(field: String) -> Self {
        RowKeys::Field(field)
    }
}

impl fmt::Debug for RowKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKeys::Field(field) => f.debug_tuple("Field").field(field).finish(),
            RowKeys::Func(_) => write!(f, "Func(..)"),
        }
    }
}

/// Localized strings handed to the rendering collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub filter_title: String,
    pub filter_confirm: String,
    pub filter_reset: String,
    pub empty_text: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            filter_title: "Filter".to_string(),
            filter_confirm: "OK".to_string(),
            filter_reset: "Reset".to_string(),
            empty_text: "No data".to_string(),
        }
    }
}

/// Complete table configuration.
///
/// # Example
///
/// ```
/// use trestle::config::{PageConfig, RowSelection, TableConfig};
/// use trestle::columns::Column;
///
/// let config = TableConfig::new()
///     .columns(vec![Column::new("Name").data_index("name")])
///     .row_key("name")
///     .pagination(PageConfig::new().page_size(5))
///     .row_selection(RowSelection::new());
/// ```
#[derive(Clone)]
pub struct TableConfig {
    pub columns: Vec<Column>,
    pub row_key: RowKeys,
    /// Field holding a row's child records.
    pub children_field: String,
    pub pagination: Pagination,
    pub row_selection: Option<RowSelection>,
    pub locale: Locale,
    /// Combined pagination/filter/sort change notification.
    pub on_change: Option<Arc<dyn Fn(&ChangeParams)>>,
    /// Removed option; ignored apart from a construction warning.
    pub columns_page_range: Option<(usize, usize)>,
    /// Removed option; ignored apart from a construction warning.
    pub columns_page_size: Option<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            row_key: RowKeys::default(),
            children_field: "children".to_string(),
            pagination: Pagination::default(),
            row_selection: None,
            locale: Locale::default(),
            on_change: None,
            columns_page_range: None,
            columns_page_size: None,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Set key derivation: a field name, or use [`row_key_fn`](Self::row_key_fn).
    pub fn row_key(mut self, keys: impl Into<RowKeys>) -> Self {
        self.row_key = keys.into();
        self
    }

    /// Derive keys with a resolver function.
    pub fn row_key_fn(mut self, f: impl Fn(&Record, usize) -> RowKey + 'static) -> Self {
        self.row_key = RowKeys::Func(Arc::new(f));
        self
    }

    /// Set the field holding child records.
    pub fn children_field(mut self, field: impl Into<String>) -> Self {
        self.children_field = field.into();
        self
    }

    pub fn pagination(mut self, pagination: impl Into<Pagination>) -> Self {
        self.pagination = pagination.into();
        self
    }

    pub fn row_selection(mut self, selection: RowSelection) -> Self {
        self.row_selection = Some(selection);
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn on_change(mut self, f: impl Fn(&ChangeParams) + 'static) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for TableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableConfig")
            .field("columns", &self.columns)
            .field("row_key", &self.row_key)
            .field("children_field", &self.children_field)
            .field("pagination", &self.pagination)
            .field("row_selection", &self.row_selection)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys_resolve_scalars() {
        let keys = RowKeys::Field("id".to_string());
        let by_text = Record::new().set("id", "a1");
        let by_int = Record::new().set("id", 7i64);

        assert_eq!(keys.resolve(&by_text, 0), RowKey::Text("a1".into()));
        assert_eq!(keys.resolve(&by_int, 0), RowKey::Int(7));
    }

    #[test]
    fn test_field_keys_fall_back_to_position() {
        let keys = RowKeys::Field("id".to_string());
        let missing = Record::new().set("name", "x");
        let null = Record::new().set("id", Value::Null);
        let wrong_type = Record::new().set("id", true);

        assert_eq!(keys.resolve(&missing, 3), RowKey::Index(3));
        assert_eq!(keys.resolve(&null, 4), RowKey::Index(4));
        assert_eq!(keys.resolve(&wrong_type, 5), RowKey::Index(5));
    }

    #[test]
    fn test_empty_and_zero_are_valid_keys() {
        let keys = RowKeys::Field("id".to_string());
        let empty = Record::new().set("id", "");
        let zero = Record::new().set("id", 0i64);

        assert_eq!(keys.resolve(&empty, 1), RowKey::Text(String::new()));
        assert_eq!(keys.resolve(&zero, 2), RowKey::Int(0));
    }

    #[test]
    fn test_func_keys() {
        let keys = RowKeys::Func(Arc::new(|record, index| {
            match record.get_str("code").ok().flatten() {
                Some(code) => RowKey::Text(format!("c-{code}")),
                None => RowKey::Index(index),
            }
        }));
        let record = Record::new().set("code", "x9");
        assert_eq!(keys.resolve(&record, 0), RowKey::Text("c-x9".into()));
    }
}
