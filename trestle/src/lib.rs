//! Headless table state engine
//!
//! Sorting, filtering, pagination, and row selection for tabular data,
//! without any rendering. [`TableEngine`] owns the state axes and compiles
//! derived views; rendering collaborators consume the views and feed user
//! intent back in as actions.

pub mod columns;
pub mod config;
pub mod decorate;
pub mod engine;
pub mod error;
pub mod events;
pub mod model;
pub mod state;

mod view;

pub use engine::TableEngine;

pub mod prelude {
    pub use crate::columns::{Column, ColumnKey, FilterOption, FixedSide, SortOrder};
    pub use crate::config::{
        CheckboxProps, Locale, PageConfig, Pagination, RowSelection, SelectionMode, TableConfig,
    };
    pub use crate::decorate::{DecoratedColumn, SelectionCell, SelectionHeader};
    pub use crate::engine::TableEngine;
    pub use crate::error::FieldError;
    pub use crate::events::{ChangeParams, Notification, PageSnapshot, SortDescriptor};
    pub use crate::model::{Record, RowKey, Value};
    pub use crate::state::PageView;
}
