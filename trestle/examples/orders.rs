//! Orders Example
//!
//! Drives a headless table session over a small order book: sorting,
//! filtering, pagination, and row selection, printing the derived view
//! after each interaction.

use log::LevelFilter;
use simplelog::{Config, SimpleLogger};
use trestle::prelude::*;

const CUSTOMERS: [&str; 6] = ["Akira", "Bruno", "Chiara", "Dmitri", "Elena", "Farid"];

fn sample_order(i: i64) -> Record {
    let status = match i % 3 {
        0 => "cancelled",
        1 => "shipped",
        _ => "pending",
    };
    Record::new()
        .set("key", i)
        .set("customer", CUSTOMERS[(i as usize - 1) % CUSTOMERS.len()])
        .set("status", status)
        .set("total", i * 137 % 900 + 100)
}

fn customer_column() -> Column {
    Column::new("Customer").data_index("customer").sort_by(|a, b| {
        a.get_str("customer")
            .ok()
            .flatten()
            .cmp(&b.get_str("customer").ok().flatten())
    })
}

fn status_column() -> Column {
    Column::new("Status")
        .data_index("status")
        .filter_options(vec![
            FilterOption::new("Shipped", "shipped"),
            FilterOption::new("Pending", "pending"),
            FilterOption::new("Cancelled", "cancelled"),
        ])
        .filter_by(|value, record| record.get("status") == Some(value))
}

fn total_column() -> Column {
    Column::new("Total").data_index("total").sort_by(|a, b| {
        a.get_int("total")
            .ok()
            .flatten()
            .cmp(&b.get_int("total").ok().flatten())
    })
}

fn header_label(column: &DecoratedColumn) -> String {
    if let Some(header) = column.selection_header {
        return match header {
            SelectionHeader::Checkbox {
                checked: true, ..
            } => "[x]".to_string(),
            SelectionHeader::Checkbox {
                indeterminate: true,
                ..
            } => "[~]".to_string(),
            SelectionHeader::Checkbox { .. } => "[ ]".to_string(),
            SelectionHeader::Radio => "   ".to_string(),
        };
    }
    let mut label = column.column.title.clone();
    if let Some(sort) = &column.sort {
        label.push_str(match sort.active {
            Some(SortOrder::Ascend) => " ^",
            Some(SortOrder::Descend) => " v",
            None => "",
        });
    }
    if let Some(filter) = &column.filter {
        if !filter.selected.is_empty() {
            label.push_str(" *");
        }
    }
    label
}

fn print_page(engine: &TableEngine) {
    let labels: Vec<String> = engine.decorated_columns().iter().map(header_label).collect();
    println!("  {}", labels.join(" | "));

    let page = engine.current_page();
    if page.is_empty() {
        println!("  {}", engine.locale().empty_text);
    }
    for (index, record) in page.into_iter().enumerate() {
        let mark = match engine.selection_cell(&record, index) {
            Some(cell) if cell.checked => "[x]",
            Some(_) => "[ ]",
            None => "   ",
        };
        println!(
            "  {mark} {:<8} {:<9} {:>4}",
            record.get_str("customer").ok().flatten().unwrap_or("-"),
            record.get_str("status").ok().flatten().unwrap_or("-"),
            record.get_int("total").ok().flatten().unwrap_or(0),
        );
    }

    match engine.pagination_view() {
        Some(view) => {
            let pages = view.total.div_ceil(view.page_size).max(1);
            println!("  page {}/{pages}, {} rows\n", view.current, view.total);
        }
        None => println!("  (pagination hidden)\n"),
    }
}

fn main() {
    let _ = SimpleLogger::init(LevelFilter::Debug, Config::default());

    let config = TableConfig::new()
        .columns(vec![customer_column(), status_column(), total_column()])
        .pagination(PageConfig::new().page_size(5))
        .row_selection(RowSelection::new().on_change(|keys, rows| {
            println!("-> selection: {} keys, {} rows on hand", keys.len(), rows.len());
        }))
        .on_change(|params| {
            let page = params.pagination.as_ref().map_or(0, |p| p.current);
            let sorter = params
                .sorter
                .as_ref()
                .map_or_else(|| "none".to_string(), |s| format!("{} {:?}", s.key, s.order));
            println!(
                "-> change: page {page}, {} filter(s), sort {sorter}",
                params.filters.len()
            );
        });

    let mut engine = TableEngine::new(config, (1..=12).map(sample_order).collect());

    println!("initial view");
    print_page(&engine);

    println!("sort by total, descending");
    engine.toggle_sort("total", SortOrder::Descend);
    print_page(&engine);

    println!("keep shipped orders");
    engine.apply_filter("status", vec!["shipped".into()]);
    print_page(&engine);

    println!("select the visible page");
    engine.toggle_all(true);
    print_page(&engine);

    println!("drop the first row again");
    let first = engine.current_page()[0].clone();
    engine.toggle_row(&first, 0, false);
    print_page(&engine);

    println!("selected keys: {:?}", engine.selected_keys());
}
