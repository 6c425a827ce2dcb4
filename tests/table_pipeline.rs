mod common;

use dealbook::core::services::BalanceService;
use dealbook::core::{
    run_pipeline, DealRow, FieldValue, FilterValue, SortSpec, TableDefinition, TableFilter,
    TableQuery, Tabular,
};
use dealbook::domain::{Car, Order};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[derive(Debug, PartialEq)]
struct Item {
    n: u32,
    label: &'static str,
}

fn items(count: u32) -> Vec<Item> {
    (1..=count)
        .map(|n| Item {
            n,
            label: if n % 2 == 0 { "even" } else { "odd" },
        })
        .collect()
}

fn item_definition() -> TableDefinition<Item> {
    TableDefinition::new()
        .filter(TableFilter::exact("label", |item: &Item| FieldValue::text(item.label)))
        .filter(TableFilter::range("n", |item: &Item| {
            FieldValue::Number(Decimal::from(item.n))
        }))
        .sort_by("n", |item: &Item| FieldValue::Number(Decimal::from(item.n)))
}

#[test]
fn third_page_of_twenty_five_holds_five_rows() {
    let records = items(25);
    let mut query = TableQuery::new(10);
    query.set_page(3);
    let page = run_pipeline(&records, &item_definition(), &query);
    assert_eq!(page.total_records, 25);
    assert_eq!(page.page_count(), 3);
    assert_eq!(page.rows.len(), 5);
    assert_eq!(page.rows[0].n, 21);
    assert!(page.has_previous());
    assert!(!page.has_next());

    query.set_page(4);
    let beyond = run_pipeline(&records, &item_definition(), &query);
    assert!(beyond.is_empty());
    assert_eq!(beyond.total_records, 25);
}

#[test]
fn no_filters_and_no_sort_is_identity() {
    let records = items(7);
    let query = TableQuery::new(100);
    let page = run_pipeline(&records, &item_definition(), &query);
    assert_eq!(page.rows.len(), records.len());
    for (row, record) in page.rows.iter().zip(&records) {
        assert!(std::ptr::eq(*row, record));
    }
}

#[test]
fn rerunning_the_same_query_yields_the_same_page() {
    let records = items(40);
    let definition = item_definition();
    let mut query = TableQuery::new(3);
    query.set_filter("label", FilterValue::Exact("even".into()));
    query.set_filter(
        "n",
        FilterValue::Range {
            min: Some(dec!(4)),
            max: Some(dec!(36)),
        },
    );
    query.set_sort(Some(SortSpec::descending("n")));
    query.set_page(2);

    let first = run_pipeline(&records, &definition, &query);
    let second = run_pipeline(&records, &definition, &query);

    assert_eq!(first.total_records, 17);
    assert_eq!(first.total_records, second.total_records);
    assert_eq!(first.page, second.page);
    assert_eq!(first.page_count(), second.page_count());
    let numbers: Vec<u32> = first.rows.iter().map(|item| item.n).collect();
    assert_eq!(numbers, vec![30, 28, 26]);
    assert_eq!(first.rows.len(), second.rows.len());
    for (a, b) in first.rows.iter().zip(&second.rows) {
        assert!(std::ptr::eq(*a, *b));
    }
}

#[test]
fn filters_combine_with_and() {
    let records = items(20);
    let mut query = TableQuery::new(50);
    query.set_filter("label", FilterValue::Text("even".into()));
    query.set_filter(
        "n",
        FilterValue::Range {
            min: Some(dec!(5)),
            max: Some(dec!(12)),
        },
    );
    let page = run_pipeline(&records, &item_definition(), &query);
    let numbers: Vec<u32> = page.rows.iter().map(|item| item.n).collect();
    assert_eq!(numbers, vec![6, 8, 10, 12]);
}

#[test]
fn query_changes_reset_the_page() {
    let mut query = TableQuery::new(10);
    query.set_page(3);
    query.set_filter("label", FilterValue::Text("odd".into()));
    assert_eq!(query.page(), 1);

    query.set_page(2);
    query.set_sort(Some(SortSpec::descending("n")));
    assert_eq!(query.page(), 1);

    query.set_page(2);
    query.set_page_size(5);
    assert_eq!(query.page(), 1);

    query.set_page(4);
    assert_eq!(query.page(), 4);
}

#[test]
fn deals_sort_by_balance_descending() {
    let book = common::showroom_book();
    let rows = BalanceService::rows(&book);
    let mut query = TableQuery::new(10);
    query.set_sort(Some(SortSpec::descending("balance")));
    let page = run_pipeline(&rows, &DealRow::table_definition(), &query);
    let order: Vec<Decimal> = page.rows.iter().map(|row| row.balance).collect();
    assert_eq!(order, vec![dec!(7999.50), dec!(0), dec!(-55000)]);
}

#[test]
fn deal_customer_filter_is_case_insensitive_substring() {
    let book = common::showroom_book();
    let rows = BalanceService::rows(&book);
    let mut query = TableQuery::new(10);
    query.set_filter("customer", FilterValue::Text("COHEN".into()));
    let page = run_pipeline(&rows, &DealRow::table_definition(), &query);
    assert_eq!(page.total_records, 1);
    assert_eq!(page.rows[0].deal.customer_name.as_deref(), Some("avi cohen"));
}

#[test]
fn cars_without_price_sort_first() {
    let cars = common::sample_cars();
    let mut query = TableQuery::new(10);
    query.set_sort(Some(SortSpec::ascending("price")));
    let page = run_pipeline(&cars, &Car::table_definition(), &query);
    let models: Vec<&str> = page.rows.iter().map(|car| car.model.as_str()).collect();
    assert_eq!(models, vec!["Picanto", "Corolla", "CX-5"]);
}

#[test]
fn orders_filter_by_date_window() {
    let book = common::showroom_book();
    let mut query = TableQuery::new(10);
    query.set_filter(
        "date",
        FilterValue::DateRange {
            from: Some(common::date(2024, 4, 1)),
            to: None,
        },
    );
    let page = run_pipeline(&book.orders, &Order::table_definition(), &query);
    assert_eq!(page.total_records, 1);
    assert_eq!(page.rows[0].customer, "Omer Katz");
    assert_eq!(page.rows[0].total(), dec!(1520));
}

#[test]
fn unknown_names_are_ignored() {
    let records = items(3);
    let mut query = TableQuery::new(10);
    query.set_filter("colour", FilterValue::Text("red".into()));
    query.set_sort(Some(SortSpec::ascending("weight")));
    let page = run_pipeline(&records, &item_definition(), &query);
    assert_eq!(page.total_records, 3);
    assert_eq!(page.rows[0].n, 1);
}
