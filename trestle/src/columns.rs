//! Column configuration and identity.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::model::{Record, Value};

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascend,
    Descend,
}

impl SortOrder {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascend => SortOrder::Descend,
            SortOrder::Descend => SortOrder::Ascend,
        }
    }
}

/// Externally forced sort marker on a column.
///
/// Its mere presence on any column makes the whole sort axis
/// external-authority: user toggles still notify but no longer commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedSort {
    /// Sort axis is externally controlled and currently unsorted.
    Unsorted,
    /// Sort axis is externally pinned to this direction.
    Ordered(SortOrder),
}

/// How a column sorts.
#[derive(Clone)]
pub enum Sorter {
    /// Sortable, but ordering is executed elsewhere (e.g. by a server);
    /// the view performs no local reordering.
    Remote,
    /// Local comparator over two records.
    Local(Arc<dyn Fn(&Record, &Record) -> Ordering>),
}

impl fmt::Debug for Sorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sorter::Remote => write!(f, "Remote"),
            Sorter::Local(_) => write!(f, "Local(..)"),
        }
    }
}

/// Which edge a column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedSide {
    Left,
    Right,
}

/// One entry of a column's filter menu.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOption {
    /// Menu label shown to the user.
    pub label: String,
    /// Value handed to the filter predicate when accepted.
    pub value: Value,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Filter predicate: does `record` match the accepted `value`?
pub type FilterPredicate = Arc<dyn Fn(&Value, &Record) -> bool>;

/// Stable identity of one column, used as the filter/sort state map key.
///
/// Derived as the explicit key, else the data field reference, else the
/// column's position in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnKey {
    Name(String),
    Index(usize),
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Name(s) => write!(f, "{s}"),
            ColumnKey::Index(i) => write!(f, "#{i}"),
        }
    }
}

impl From<&str> for ColumnKey {
    fn from(v: &str) -> Self {
        ColumnKey::Name(v.to_string())
    }
}

impl From<String> for ColumnKey {
    fn from(v: String) -> Self {
        ColumnKey::Name(v)
    }
}

/// Column configuration.
///
/// Columns declare what a column shows (`title`, `data_index`) and how it
/// behaves: sortable with or without a local comparator, filterable through
/// a menu of options or a caller-rendered filter UI, pinned to an edge, or
/// externally forced to a sort order / filter value set.
///
/// # Examples
///
/// ```
/// use trestle::columns::{Column, FilterOption, SortOrder};
///
/// let columns = vec![
///     Column::new("Name").data_index("name"),
///     Column::new("Age").data_index("age").sort_by(|a, b| {
///         a.get_int("age").ok().flatten().cmp(&b.get_int("age").ok().flatten())
///     }),
///     Column::new("City")
///         .data_index("city")
///         .filter_options(vec![
///             FilterOption::new("London", "London"),
///             FilterOption::new("New York", "New York"),
///         ])
///         .filter_by(|value, record| record.get("city") == Some(value)),
/// ];
/// # let _ = (columns, SortOrder::Ascend);
/// ```
#[derive(Clone)]
pub struct Column {
    /// Column header text.
    pub title: String,
    /// Explicit identity; wins over `data_index` when deriving the key.
    pub key: Option<String>,
    /// Record field this column displays.
    pub data_index: Option<String>,
    /// Filter menu entries; non-empty makes the column filterable.
    pub filter_options: Vec<FilterOption>,
    /// Predicate applied per accepted value; without it, accepted values
    /// never drop rows locally.
    pub filter: Option<FilterPredicate>,
    /// Whether the filter menu allows multiple accepted values.
    pub filter_multiple: bool,
    /// Caller renders its own filter UI for this column.
    pub custom_filter: bool,
    /// Sortable behavior, if any.
    pub sorter: Option<Sorter>,
    /// Pin the column to an edge.
    pub fixed: Option<FixedSide>,
    /// Externally forced sort marker.
    pub forced_sort: Option<ForcedSort>,
    /// Externally forced accepted filter values.
    pub forced_filter: Option<Vec<Value>>,
}

impl Column {
    /// Create a new column with the given header title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key: None,
            data_index: None,
            filter_options: Vec::new(),
            filter: None,
            filter_multiple: true,
            custom_filter: false,
            sorter: None,
            fixed: None,
            forced_sort: None,
            forced_filter: None,
        }
    }

    /// Set an explicit column key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the record field this column displays.
    pub fn data_index(mut self, field: impl Into<String>) -> Self {
        self.data_index = Some(field.into());
        self
    }

    /// Set the filter menu entries.
    pub fn filter_options(mut self, options: Vec<FilterOption>) -> Self {
        self.filter_options = options;
        self
    }

    /// Set the filter predicate.
    pub fn filter_by(mut self, predicate: impl Fn(&Value, &Record) -> bool + 'static) -> Self {
        self.filter = Some(Arc::new(predicate));
        self
    }

    /// Restrict the filter menu to a single accepted value.
    pub fn filter_single(mut self) -> Self {
        self.filter_multiple = false;
        self
    }

    /// Mark the column as carrying a caller-rendered filter UI.
    pub fn custom_filter(mut self) -> Self {
        self.custom_filter = true;
        self
    }

    /// Make the column sortable without a local comparator.
    ///
    /// Toggling still updates direction state and fires notifications, for
    /// ordering executed elsewhere.
    pub fn sortable(mut self) -> Self {
        self.sorter = Some(Sorter::Remote);
        self
    }

    /// Make the column sortable with a local comparator.
    pub fn sort_by(mut self, comparator: impl Fn(&Record, &Record) -> Ordering + 'static) -> Self {
        self.sorter = Some(Sorter::Local(Arc::new(comparator)));
        self
    }

    /// Pin the column to an edge.
    pub fn fixed(mut self, side: FixedSide) -> Self {
        self.fixed = Some(side);
        self
    }

    /// Force the sort axis to this direction (external authority).
    pub fn forced_sort(mut self, order: SortOrder) -> Self {
        self.forced_sort = Some(ForcedSort::Ordered(order));
        self
    }

    /// Mark the sort axis externally controlled without an active order.
    pub fn forced_unsorted(mut self) -> Self {
        self.forced_sort = Some(ForcedSort::Unsorted);
        self
    }

    /// Force this column's accepted filter values (external authority).
    pub fn forced_filter(mut self, values: Vec<Value>) -> Self {
        self.forced_filter = Some(values);
        self
    }

    /// Derive this column's identity, falling back to its position.
    pub fn resolved_key(&self, index: usize) -> ColumnKey {
        if let Some(key) = &self.key {
            ColumnKey::Name(key.clone())
        } else if let Some(field) = &self.data_index {
            ColumnKey::Name(field.clone())
        } else {
            ColumnKey::Index(index)
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("title", &self.title)
            .field("key", &self.key)
            .field("data_index", &self.data_index)
            .field("filter_options", &self.filter_options)
            .field("filter", &self.filter.as_ref().map(|_| ".."))
            .field("filter_multiple", &self.filter_multiple)
            .field("custom_filter", &self.custom_filter)
            .field("sorter", &self.sorter)
            .field("fixed", &self.fixed)
            .field("forced_sort", &self.forced_sort)
            .field("forced_filter", &self.forced_filter)
            .finish()
    }
}

/// Find a column by its derived key.
pub(crate) fn find_column<'a>(columns: &'a [Column], key: &ColumnKey) -> Option<&'a Column> {
    columns
        .iter()
        .enumerate()
        .find(|(i, c)| &c.resolved_key(*i) == key)
        .map(|(_, c)| c)
}
