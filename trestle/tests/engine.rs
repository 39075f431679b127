use std::cell::RefCell;
use std::rc::Rc;

use trestle::columns::{Column, ColumnKey, FilterOption, FixedSide, SortOrder};
use trestle::config::{PageConfig, Pagination, RowSelection, TableConfig};
use trestle::engine::TableEngine;
use trestle::events::{ChangeParams, Notification};
use trestle::model::{Record, RowKey, Value};

fn order_row(i: i64) -> Record {
    let city = if i % 2 == 0 { "London" } else { "Oslo" };
    Record::new()
        .set("key", format!("r{i:02}"))
        .set("name", format!("Order {i:02}"))
        .set("city", city)
}

fn name_column() -> Column {
    Column::new("Name").data_index("name").sort_by(|a, b| {
        a.get_str("name")
            .ok()
            .flatten()
            .cmp(&b.get_str("name").ok().flatten())
    })
}

fn city_column() -> Column {
    Column::new("City")
        .data_index("city")
        .filter_options(vec![
            FilterOption::new("London", "London"),
            FilterOption::new("Oslo", "Oslo"),
        ])
        .filter_by(|value, record| record.get("city") == Some(value))
}

fn columns() -> Vec<Column> {
    vec![name_column(), city_column()]
}

#[test]
fn test_full_session() {
    let mut engine = TableEngine::new(
        TableConfig::new()
            .columns(columns())
            .pagination(PageConfig::new().page_size(10))
            .row_selection(RowSelection::new()),
        (0..25).map(order_row).collect(),
    );
    assert_eq!(engine.current_page().len(), 10);

    // Filter down to the 13 London orders
    engine.apply_filter("city", vec!["London".into()]);
    assert_eq!(engine.current_page().len(), 10);
    assert_eq!(engine.pagination_view().unwrap().total, 13);

    // Sort descending by name
    engine.toggle_sort("name", SortOrder::Descend);
    let page = engine.current_page();
    assert_eq!(page[0].get_str("name").unwrap(), Some("Order 24"));

    // Select the whole first page
    engine.toggle_all(true);
    assert_eq!(engine.selected_keys().len(), 10);

    // The second page holds the remaining three, selection intact
    engine.set_page(2);
    let page = engine.current_page();
    assert_eq!(page.len(), 3);
    assert_eq!(page[0].get_str("name").unwrap(), Some("Order 04"));
    assert_eq!(engine.selected_keys().len(), 10);

    // Pick one more
    let target = page[0].clone();
    let notifications = engine.toggle_row(&target, 0, true);
    assert_eq!(engine.selected_keys().len(), 11);
    let Notification::SelectionChange { rows, .. } = &notifications[0] else {
        panic!("expected a selection change");
    };
    // Materialized rows follow the filtered view
    assert_eq!(rows.len(), 11);
}

#[test]
fn test_reconcile_pagination_merges_fields() {
    let mut engine = TableEngine::new(
        TableConfig::new().pagination(PageConfig::new().page_size(10)),
        (0..25).map(order_row).collect(),
    );
    engine.set_page(2);

    // A config that only sets the size keeps the committed page
    engine.apply_config(TableConfig::new().pagination(PageConfig::new().page_size(5)));
    let view = engine.pagination_view().unwrap();
    assert_eq!(view.page_size, 5);
    assert_eq!(view.current, 2);

    // A config with a current page takes the axis over
    engine.apply_config(TableConfig::new().pagination(PageConfig::new().current(4)));
    assert_eq!(engine.pagination_view().unwrap().current, 4);
    engine.set_page(1);
    assert_eq!(engine.pagination_view().unwrap().current, 4);
}

#[test]
fn test_reconcile_demotes_sort_axis() {
    let mut engine = TableEngine::new(
        TableConfig::new()
            .columns(vec![name_column().forced_sort(SortOrder::Descend)])
            .pagination(Pagination::Off),
        (0..3).map(order_row).collect(),
    );
    assert_eq!(engine.active_sort().unwrap().order, SortOrder::Descend);
    engine.toggle_sort("name", SortOrder::Ascend);
    assert_eq!(engine.active_sort().unwrap().order, SortOrder::Descend);

    // Losing the marker keeps the order but frees the axis
    engine.apply_config(
        TableConfig::new()
            .columns(vec![name_column()])
            .pagination(Pagination::Off),
    );
    assert_eq!(engine.active_sort().unwrap().order, SortOrder::Descend);
    engine.toggle_sort("name", SortOrder::Ascend);
    assert_eq!(engine.active_sort().unwrap().order, SortOrder::Ascend);
}

#[test]
fn test_reconcile_prunes_unknown_filters() {
    let mut engine = TableEngine::new(
        TableConfig::new()
            .columns(columns())
            .pagination(Pagination::Off),
        (0..6).map(order_row).collect(),
    );
    engine.apply_filter("city", vec!["London".into()]);
    assert_eq!(engine.current_page().len(), 3);

    engine.apply_config(
        TableConfig::new()
            .columns(vec![name_column()])
            .pagination(Pagination::Off),
    );
    assert!(engine.filters().is_empty());
    assert_eq!(engine.current_page().len(), 6);
}

#[test]
fn test_reconcile_selection_axis() {
    let mut engine = TableEngine::new(
        TableConfig::new()
            .pagination(Pagination::Off)
            .row_selection(RowSelection::new()),
        (0..5).map(order_row).collect(),
    );
    let target = engine.current_page()[0].clone();
    engine.toggle_row(&target, 0, true);
    assert_eq!(engine.selected_keys().len(), 1);

    // A configured key list replaces the axis
    engine.apply_config(
        TableConfig::new().pagination(Pagination::Off).row_selection(
            RowSelection::new()
                .selected_keys(vec![RowKey::Text("r02".into()), RowKey::Text("r03".into())]),
        ),
    );
    assert_eq!(
        engine.selected_keys(),
        vec![RowKey::Text("r02".into()), RowKey::Text("r03".into())]
    );

    // Dropping the list frees the axis but keeps the value
    engine.apply_config(
        TableConfig::new()
            .pagination(Pagination::Off)
            .row_selection(RowSelection::new()),
    );
    assert_eq!(engine.selected_keys().len(), 2);
    let target = engine.current_page()[0].clone();
    engine.toggle_row(&target, 0, true);
    assert_eq!(engine.selected_keys().len(), 3);
}

#[test]
fn test_set_records_keeps_selection_keys() {
    let mut engine = TableEngine::new(
        TableConfig::new()
            .pagination(Pagination::Off)
            .row_selection(RowSelection::new()),
        (0..5).map(order_row).collect(),
    );
    engine.toggle_all(true);
    assert_eq!(engine.selected_keys().len(), 5);

    engine.set_records((0..3).map(order_row).collect());
    // Keys survive the swap; rows materialize only for present records
    assert_eq!(engine.selected_keys().len(), 5);
    let target = engine.current_page()[2].clone();
    let notifications = engine.toggle_row(&target, 2, false);
    let Notification::SelectionChange { keys, rows } = &notifications[0] else {
        panic!("expected a selection change");
    };
    assert_eq!(keys.len(), 4);
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_apply_config_is_silent() {
    let count = Rc::new(RefCell::new(0));
    let config = TableConfig::new().columns(columns()).on_change({
        let count = Rc::clone(&count);
        move |_| *count.borrow_mut() += 1
    });
    let mut engine = TableEngine::new(config, (0..5).map(order_row).collect());

    engine.toggle_sort("name", SortOrder::Ascend);
    assert_eq!(*count.borrow(), 1);

    engine.apply_config(
        TableConfig::new()
            .columns(columns())
            .pagination(PageConfig::new().page_size(5)),
    );
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_decorated_affordances() {
    let custom = Column::new("Notes").data_index("notes").custom_filter();
    let mut engine = TableEngine::new(
        TableConfig::new()
            .columns(vec![name_column(), city_column(), custom])
            .pagination(Pagination::Off),
        (0..4).map(order_row).collect(),
    );
    engine.toggle_sort("name", SortOrder::Ascend);
    engine.apply_filter("city", vec!["Oslo".into()]);

    let decorated = engine.decorated_columns();
    assert_eq!(decorated.len(), 3);

    let name = &decorated[0];
    assert_eq!(name.key, ColumnKey::Name("name".into()));
    assert_eq!(name.sort.as_ref().unwrap().active, Some(SortOrder::Ascend));
    assert!(name.filter.is_none());

    let city = &decorated[1];
    assert!(city.sort.is_none());
    let filter = city.filter.as_ref().unwrap();
    assert_eq!(filter.options.len(), 2);
    assert_eq!(filter.selected, vec![Value::from("Oslo")]);
    assert!(filter.multiple);
    assert!(!filter.custom);

    let notes = &decorated[2];
    let filter = notes.filter.as_ref().unwrap();
    assert!(filter.custom);
    assert!(filter.options.is_empty());
}

#[test]
fn test_inactive_sort_affordance() {
    let engine = TableEngine::new(
        TableConfig::new()
            .columns(columns())
            .pagination(Pagination::Off),
        (0..3).map(order_row).collect(),
    );
    let decorated = engine.decorated_columns();
    // Sortable but inert until toggled
    assert_eq!(decorated[0].sort.as_ref().unwrap().active, None);
}

#[test]
fn test_selection_column_placement() {
    let fixed = TableConfig::new()
        .columns(vec![name_column().fixed(FixedSide::Left), city_column()])
        .row_selection(RowSelection::new());
    let engine = TableEngine::new(fixed, (0..3).map(order_row).collect());
    let decorated = engine.decorated_columns();
    assert_eq!(decorated.len(), 3);
    assert_eq!(decorated[0].key, ColumnKey::Name("selection-column".into()));
    assert_eq!(decorated[0].fixed, Some(FixedSide::Left));
    assert!(decorated[0].selection_header.is_some());

    // Without fixed columns the selection column floats
    let floating = TableConfig::new()
        .columns(vec![name_column()])
        .row_selection(RowSelection::new());
    let engine = TableEngine::new(floating, (0..3).map(order_row).collect());
    assert_eq!(engine.decorated_columns()[0].fixed, None);
}

#[test]
fn test_selection_column_replaces_placeholder() {
    let config = TableConfig::new()
        .columns(vec![Column::new("").key("selection-column"), name_column()])
        .row_selection(RowSelection::new());
    let engine = TableEngine::new(config, (0..3).map(order_row).collect());

    let decorated = engine.decorated_columns();
    assert_eq!(decorated.len(), 2);
    assert!(decorated[0].selection_header.is_some());
    assert_eq!(decorated[1].key, ColumnKey::Name("name".into()));
}

#[test]
fn test_change_callback_sees_combined_state() {
    let last: Rc<RefCell<Option<ChangeParams>>> = Rc::new(RefCell::new(None));
    let config = TableConfig::new()
        .columns(columns())
        .pagination(PageConfig::new().page_size(10))
        .on_change({
            let last = Rc::clone(&last);
            move |params| *last.borrow_mut() = Some(params.clone())
        });
    let mut engine = TableEngine::new(config, (0..25).map(order_row).collect());

    engine.toggle_sort("name", SortOrder::Descend);
    {
        let params = last.borrow();
        let params = params.as_ref().unwrap();
        assert_eq!(params.sorter.as_ref().unwrap().order, SortOrder::Descend);
        assert_eq!(params.pagination.as_ref().unwrap().current, 1);
    }

    engine.apply_filter("city", vec!["London".into()]);
    {
        let params = last.borrow();
        let params = params.as_ref().unwrap();
        // Filtering keeps the sorter and resets the page
        assert_eq!(params.sorter.as_ref().unwrap().order, SortOrder::Descend);
        assert_eq!(params.pagination.as_ref().unwrap().current, 1);
        assert_eq!(params.filters.len(), 1);
    }
}

#[test]
fn test_locale_defaults() {
    let engine = TableEngine::new(TableConfig::new(), Vec::new());
    assert_eq!(engine.locale().empty_text, "No data");
    assert_eq!(engine.locale().filter_confirm, "OK");
}
