//! Sort axis: at most one active column and direction.

use std::cmp::Ordering;
use std::sync::Arc;

use super::authority::Authority;
use crate::columns::{Column, ColumnKey, ForcedSort, SortOrder, Sorter, find_column};
use crate::model::Record;

/// The currently sorted column and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSort {
    pub key: ColumnKey,
    pub order: SortOrder,
}

/// Sort state behind its authority tag.
///
/// The axis is external as soon as any column carries a forced sort marker,
/// including the markers that pin it to "unsorted".
#[derive(Debug, Clone)]
pub struct SortState {
    axis: Authority<Option<ActiveSort>>,
}

impl SortState {
    /// Derive the axis from column configuration.
    ///
    /// The first column with a forced order wins; forced markers without an
    /// order leave the axis externally unsorted.
    pub fn init_from(columns: &[Column]) -> Self {
        let forced = columns.iter().any(|c| c.forced_sort.is_some());
        let active = columns
            .iter()
            .enumerate()
            .find_map(|(i, c)| match c.forced_sort {
                Some(ForcedSort::Ordered(order)) => Some(ActiveSort {
                    key: c.resolved_key(i),
                    order,
                }),
                _ => None,
            });
        let axis = if forced {
            Authority::External(active)
        } else {
            Authority::Internal(None)
        };
        Self { axis }
    }

    /// The active sort, regardless of authority.
    pub fn active(&self) -> Option<&ActiveSort> {
        self.axis.get().as_ref()
    }

    pub fn is_external(&self) -> bool {
        self.axis.is_external()
    }

    /// Compute the toggled state without committing.
    ///
    /// A fresh column becomes active with `order`; the active column with
    /// the same `order` clears; the active column with the opposite flips.
    pub fn toggled(&self, key: ColumnKey, order: SortOrder) -> Option<ActiveSort> {
        match self.active() {
            Some(current) if current.key == key => {
                if current.order == order {
                    None
                } else {
                    Some(ActiveSort { key, order })
                }
            }
            _ => Some(ActiveSort { key, order }),
        }
    }

    /// Commit through the authority tag. Returns whether it committed.
    pub fn commit(&mut self, next: Option<ActiveSort>) -> bool {
        self.axis.set_if_internal(next)
    }

    /// Re-derive on reconcile: any forced marker replaces the axis
    /// wholesale; losing the last marker demotes the axis, keeping its
    /// value.
    pub fn reconcile(&mut self, columns: &[Column]) {
        if columns.iter().any(|c| c.forced_sort.is_some()) {
            *self = Self::init_from(columns);
        } else {
            self.axis.demote();
        }
    }

    /// The local comparator for the active column, wrapped for direction.
    ///
    /// `None` without an active sort, for unknown columns, and for columns
    /// sorted remotely; the view then performs no local reordering.
    pub fn comparator(
        &self,
        columns: &[Column],
    ) -> Option<Box<dyn Fn(&Record, &Record) -> Ordering>> {
        let active = self.active()?;
        let column = find_column(columns, &active.key)?;
        let Some(Sorter::Local(cmp)) = &column.sorter else {
            return None;
        };
        let cmp = Arc::clone(cmp);
        let descending = active.order == SortOrder::Descend;
        Some(Box::new(move |a, b| {
            let result = cmp(a, b);
            if descending { result.reverse() } else { result }
        }))
    }
}
