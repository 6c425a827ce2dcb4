mod common;

use dealbook::cli::views::{cars_table, page_footer};
use dealbook::core::{run_pipeline, SortSpec, TableQuery, Tabular};
use dealbook::currency::AmountFormat;
use dealbook::domain::Car;
use insta::assert_snapshot;

#[test]
fn cars_by_price_descending() {
    let cars = common::sample_cars();
    let mut query = TableQuery::new(10);
    query.set_sort(Some(SortSpec::descending("price")));
    let page = run_pipeline(&cars, &Car::table_definition(), &query);

    let rendered = cars_table(&page, &AmountFormat::default()).render();
    assert_snapshot!(rendered, @r"
     ID         Make     Model     Year   Plate             Price   Status
    ──────────────────────────────────────────────────────────────────────────
     5e6f7a8b   Mazda    CX-5      2021   98-765-43   $112,000.50   reserved
     1a2b3c4d   Toyota   Corolla   2019   12-345-67    $68,500.00   available
     9c0d1e2f   Kia      Picanto                                    sold
    ");
    assert_eq!(page_footer(&page), "page 1/1 (3 records)");
}
