use std::cmp::Ordering;

use trestle::columns::{Column, ColumnKey, SortOrder};
use trestle::config::{Pagination, TableConfig};
use trestle::engine::TableEngine;
use trestle::events::Notification;
use trestle::model::Record;

fn row(key: &str, name: &str, age: i64) -> Record {
    Record::new()
        .set("key", key)
        .set("name", name)
        .set("age", age)
}

fn by_age(a: &Record, b: &Record) -> Ordering {
    a.get_int("age").unwrap().cmp(&b.get_int("age").unwrap())
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("Name").data_index("name"),
        Column::new("Age").data_index("age").sort_by(by_age),
    ]
}

fn sample() -> Vec<Record> {
    vec![
        row("a", "Ada", 32),
        row("b", "Brin", 28),
        row("c", "Curie", 40),
        row("d", "Dijkstra", 28),
    ]
}

fn engine() -> TableEngine {
    TableEngine::new(
        TableConfig::new()
            .columns(columns())
            .pagination(Pagination::Off),
        sample(),
    )
}

fn names(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.get_str("name").unwrap().unwrap().to_string())
        .collect()
}

#[test]
fn test_toggle_sets_then_clears_then_flips() {
    let mut engine = engine();

    engine.toggle_sort("age", SortOrder::Ascend);
    assert_eq!(
        names(&engine.current_page()),
        ["Brin", "Dijkstra", "Ada", "Curie"]
    );

    // Same direction again clears the sort
    engine.toggle_sort("age", SortOrder::Ascend);
    assert!(engine.active_sort().is_none());
    assert_eq!(
        names(&engine.current_page()),
        ["Ada", "Brin", "Curie", "Dijkstra"]
    );

    // Opposite direction on the active column flips it
    engine.toggle_sort("age", SortOrder::Ascend);
    engine.toggle_sort("age", SortOrder::Descend);
    assert_eq!(engine.active_sort().unwrap().order, SortOrder::Descend);
    assert_eq!(
        names(&engine.current_page()),
        ["Curie", "Ada", "Brin", "Dijkstra"]
    );
}

#[test]
fn test_ties_keep_input_order() {
    let mut engine = engine();

    engine.toggle_sort("age", SortOrder::Ascend);
    let page = names(&engine.current_page());
    assert_eq!(page[..2], ["Brin", "Dijkstra"]);

    // Descending reverses comparisons, not the result, so ties stay stable
    engine.toggle_sort("age", SortOrder::Descend);
    let page = names(&engine.current_page());
    assert_eq!(page[2..], ["Brin", "Dijkstra"]);
}

#[test]
fn test_sort_leaves_records_untouched() {
    let mut engine = engine();
    engine.toggle_sort("age", SortOrder::Descend);
    assert_eq!(
        names(engine.records()),
        ["Ada", "Brin", "Curie", "Dijkstra"]
    );
}

#[test]
fn test_unknown_column_ignored() {
    let mut engine = engine();
    let notifications = engine.toggle_sort("ghost", SortOrder::Ascend);
    assert!(notifications.is_empty());
    assert!(engine.active_sort().is_none());
}

#[test]
fn test_remote_sorter_updates_state_only() {
    let config = TableConfig::new()
        .columns(vec![
            Column::new("Name").data_index("name"),
            Column::new("Age").data_index("age").sortable(),
        ])
        .pagination(Pagination::Off);
    let mut engine = TableEngine::new(config, sample());

    let notifications = engine.toggle_sort("age", SortOrder::Descend);
    assert_eq!(notifications.len(), 1);
    assert_eq!(engine.active_sort().unwrap().order, SortOrder::Descend);
    // No local comparator, so the view keeps input order
    assert_eq!(
        names(&engine.current_page()),
        ["Ada", "Brin", "Curie", "Dijkstra"]
    );
}

#[test]
fn test_forced_order_refuses_user_toggle() {
    let config = TableConfig::new()
        .columns(vec![
            Column::new("Name").data_index("name"),
            Column::new("Age")
                .data_index("age")
                .sort_by(by_age)
                .forced_sort(SortOrder::Descend),
        ])
        .pagination(Pagination::Off);
    let mut engine = TableEngine::new(config, sample());
    assert_eq!(engine.active_sort().unwrap().order, SortOrder::Descend);

    let notifications = engine.toggle_sort("age", SortOrder::Ascend);
    // The attempt is reported...
    let Notification::Change(params) = &notifications[0] else {
        panic!("expected a change notification");
    };
    assert_eq!(params.sorter.as_ref().unwrap().order, SortOrder::Ascend);
    // ...but not committed
    assert_eq!(engine.active_sort().unwrap().order, SortOrder::Descend);
    assert_eq!(
        names(&engine.current_page()),
        ["Curie", "Ada", "Brin", "Dijkstra"]
    );
}

#[test]
fn test_forced_unsorted_pins_axis() {
    let config = TableConfig::new()
        .columns(vec![
            Column::new("Name").data_index("name"),
            Column::new("Age")
                .data_index("age")
                .sort_by(by_age)
                .forced_unsorted(),
        ])
        .pagination(Pagination::Off);
    let mut engine = TableEngine::new(config, sample());
    assert!(engine.active_sort().is_none());

    engine.toggle_sort("age", SortOrder::Ascend);
    assert!(engine.active_sort().is_none());
    assert_eq!(
        names(&engine.current_page()),
        ["Ada", "Brin", "Curie", "Dijkstra"]
    );
}

#[test]
fn test_change_notification_payload() {
    let mut engine = TableEngine::new(TableConfig::new().columns(columns()), sample());
    let notifications = engine.toggle_sort("age", SortOrder::Ascend);

    let Notification::Change(params) = &notifications[0] else {
        panic!("expected a change notification");
    };
    let sorter = params.sorter.as_ref().unwrap();
    assert_eq!(sorter.key, ColumnKey::Name("age".into()));
    assert_eq!(sorter.field.as_deref(), Some("age"));
    assert!(params.filters.is_empty());
    let pagination = params.pagination.as_ref().unwrap();
    assert_eq!(pagination.current, 1);
    assert_eq!(pagination.page_size, 10);
}

#[test]
fn test_sort_orders_children_within_parent() {
    let records = vec![
        row("p", "Parent", 50).with_children(
            "children",
            vec![row("c2", "Young", 8), row("c1", "Old", 12)],
        ),
        row("q", "Solo", 30),
    ];
    let mut engine = TableEngine::new(
        TableConfig::new()
            .columns(columns())
            .pagination(Pagination::Off),
        records,
    );
    engine.toggle_sort("age", SortOrder::Ascend);

    let page = engine.current_page();
    assert_eq!(names(&page), ["Solo", "Parent"]);
    let children = page[1].children("children").unwrap();
    assert_eq!(names(children), ["Young", "Old"]);
}
