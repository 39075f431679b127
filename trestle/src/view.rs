//! Pure view compilation: sort, filter, page slice, flatten.
//!
//! Everything here is referentially transparent given the current state;
//! caller data is cloned, never mutated.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::columns::{Column, ColumnKey, find_column};
use crate::model::{Record, Value};
use crate::state::PageState;

/// The sorted and filtered top-level record list ("local data").
///
/// Filter entries apply OR across their accepted values and AND across
/// distinct columns; entries with no values, an unknown column, or a
/// predicate-less column leave the data unchanged.
pub(crate) fn local_data(
    records: &[Record],
    columns: &[Column],
    comparator: Option<&dyn Fn(&Record, &Record) -> Ordering>,
    filters: &BTreeMap<ColumnKey, Vec<Value>>,
    children_field: &str,
) -> Vec<Record> {
    let mut data: Vec<Record> = records.to_vec();
    if let Some(cmp) = comparator {
        data = recursive_sort(data, cmp, children_field);
    }
    for (key, values) in filters {
        if values.is_empty() {
            continue;
        }
        let Some(column) = find_column(columns, key) else {
            continue;
        };
        let Some(predicate) = &column.filter else {
            continue;
        };
        data.retain(|record| values.iter().any(|value| predicate(value, record)));
    }
    data
}

/// Stable sort of a record tree.
///
/// Sorts each level and rebuilds parents with their sorted child vectors,
/// bottom-up; child vectors are cloned, never reordered in place.
fn recursive_sort(
    mut data: Vec<Record>,
    cmp: &dyn Fn(&Record, &Record) -> Ordering,
    children_field: &str,
) -> Vec<Record> {
    data.sort_by(|a, b| cmp(a, b));
    data.into_iter()
        .map(|record| match record.children(children_field).cloned() {
            Some(children) => {
                record.with_children(children_field, recursive_sort(children, cmp, children_field))
            }
            None => record,
        })
        .collect()
}

/// Slice the local data down to the current page.
///
/// At most one page of rows is handed over unsliced. Locally that is
/// indistinguishable from slicing; with a remote total it is what keeps a
/// freshly fetched page visible regardless of the requested page number.
pub(crate) fn current_page(data: Vec<Record>, page: &PageState) -> Vec<Record> {
    if !page.enabled() {
        return data;
    }
    let page_size = page.page_size();
    if data.len() <= page_size {
        return data;
    }
    let current = page.clamped_current(page.effective_total(data.len()));
    let start = (current - 1) * page_size;
    if start >= data.len() {
        return Vec::new();
    }
    let end = (start + page_size).min(data.len());
    data[start..end].to_vec()
}

/// Depth-first flattening of a record tree, parents before children.
///
/// Emitted rows have the children field stripped so cross-page lookups and
/// notification payloads do not drag subtrees along. Applies no filtering
/// or sorting of its own.
pub(crate) fn flatten(records: &[Record], children_field: &str) -> Vec<Record> {
    fn walk(records: &[Record], children_field: &str, out: &mut Vec<Record>) {
        for record in records {
            let mut flat = record.clone();
            flat.remove(children_field);
            out.push(flat);
            if let Some(children) = record.children(children_field) {
                walk(children, children_field, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(records, children_field, &mut out);
    out
}
