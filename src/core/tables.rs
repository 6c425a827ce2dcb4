//! Standard list views for cars, deals, and orders.

use rust_decimal::Decimal;

use crate::core::balance::compute_deal_balance;
use crate::core::table::{FieldValue, TableDefinition, TableFilter};
use crate::domain::{Book, Car, Deal, Order};

/// Records that come with a ready-made list view.
pub trait Tabular: Sized {
    fn table_definition() -> TableDefinition<Self>;
}

/// A deal joined with its derived balance, as shown in the deals list.
#[derive(Debug, Clone, PartialEq)]
pub struct DealRow {
    pub deal: Deal,
    pub bill_count: usize,
    pub balance: Decimal,
}

impl DealRow {
    pub fn from_book(book: &Book) -> Vec<DealRow> {
        book.deals
            .iter()
            .map(|deal| {
                let bills = book.bills_for_deal(deal.id);
                DealRow {
                    balance: compute_deal_balance(deal, &bills),
                    bill_count: bills.len(),
                    deal: deal.clone(),
                }
            })
            .collect()
    }
}

impl Tabular for DealRow {
    fn table_definition() -> TableDefinition<Self> {
        TableDefinition::new()
            .filter(TableFilter::text("customer", customer))
            .filter(TableFilter::exact("type", |row: &DealRow| {
                FieldValue::text(row.deal.deal_type.as_str())
            }))
            .filter(TableFilter::exact("status", |row: &DealRow| {
                FieldValue::text(row.deal.status.as_str())
            }))
            .filter(TableFilter::range("price", |row: &DealRow| {
                FieldValue::Number(row.deal.nominal_price())
            }))
            .filter(TableFilter::range("balance", |row: &DealRow| {
                FieldValue::Number(row.balance)
            }))
            .filter(TableFilter::date_range("created", |row: &DealRow| {
                FieldValue::Date(row.deal.created_at.date_naive())
            }))
            .sort_by("customer", customer)
            .sort_by("type", |row: &DealRow| {
                FieldValue::text(row.deal.deal_type.as_str())
            })
            .sort_by("status", |row: &DealRow| {
                FieldValue::text(row.deal.status.as_str())
            })
            .sort_by("price", |row: &DealRow| {
                FieldValue::Number(row.deal.nominal_price())
            })
            .sort_by("balance", |row: &DealRow| FieldValue::Number(row.balance))
            .sort_by("created", |row: &DealRow| {
                FieldValue::Date(row.deal.created_at.date_naive())
            })
    }
}

fn customer(row: &DealRow) -> FieldValue {
    FieldValue::optional_text(row.deal.customer_name.as_deref())
}

impl Tabular for Car {
    fn table_definition() -> TableDefinition<Self> {
        TableDefinition::new()
            .filter(TableFilter::text("make", |car: &Car| FieldValue::text(&car.make)))
            .filter(TableFilter::text("model", |car: &Car| FieldValue::text(&car.model)))
            .filter(TableFilter::text("plate", |car: &Car| {
                FieldValue::optional_text(car.plate.as_deref())
            }))
            .filter(TableFilter::exact("status", |car: &Car| {
                FieldValue::text(car.status.as_str())
            }))
            .filter(TableFilter::range("price", car_price))
            .filter(TableFilter::range("year", car_year))
            .sort_by("make", |car: &Car| FieldValue::text(&car.make))
            .sort_by("model", |car: &Car| FieldValue::text(&car.model))
            .sort_by("year", car_year)
            .sort_by("price", car_price)
            .sort_by("status", |car: &Car| FieldValue::text(car.status.as_str()))
    }
}

fn car_price(car: &Car) -> FieldValue {
    if car.price.is_blank() {
        FieldValue::Missing
    } else {
        FieldValue::Number(car.price_value())
    }
}

fn car_year(car: &Car) -> FieldValue {
    car.year
        .map_or(FieldValue::Missing, |year| FieldValue::Number(Decimal::from(year)))
}

impl Tabular for Order {
    fn table_definition() -> TableDefinition<Self> {
        TableDefinition::new()
            .filter(TableFilter::text("customer", |order: &Order| {
                FieldValue::text(&order.customer)
            }))
            .filter(TableFilter::exact("status", |order: &Order| {
                FieldValue::text(order.status.as_str())
            }))
            .filter(TableFilter::date_range("date", order_date))
            .filter(TableFilter::range("total", |order: &Order| {
                FieldValue::Number(order.total())
            }))
            .sort_by("customer", |order: &Order| FieldValue::text(&order.customer))
            .sort_by("date", order_date)
            .sort_by("total", |order: &Order| FieldValue::Number(order.total()))
            .sort_by("status", |order: &Order| {
                FieldValue::text(order.status.as_str())
            })
    }
}

fn order_date(order: &Order) -> FieldValue {
    order.date.map_or(FieldValue::Missing, FieldValue::Date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::{run_pipeline, FilterValue, SortSpec, TableQuery};
    use crate::domain::{Bill, BillType, CarStatus, DealType};
    use rust_decimal_macros::dec;

    #[test]
    fn deal_rows_carry_balances_for_sorting() {
        let mut book = Book::new("Rows");
        let paid = Deal::new(DealType::NewSale, 1000).with_customer(uuid::Uuid::new_v4(), "Avi");
        let owing = Deal::new(DealType::NewSale, 5000).with_customer(uuid::Uuid::new_v4(), "Noa");
        book.bills
            .push(Bill::new(paid.id, BillType::ReceiptOnly).with_cash(1000));
        book.deals.push(paid);
        book.deals.push(owing);

        let rows = DealRow::from_book(&book);
        let mut query = TableQuery::default();
        query.set_sort(Some(SortSpec::ascending("balance")));
        let page = run_pipeline(&rows, &DealRow::table_definition(), &query);

        let balances: Vec<_> = page.rows.iter().map(|row| row.balance).collect();
        assert_eq!(balances, vec![dec!(-5000), dec!(0)]);
        assert_eq!(page.rows[1].bill_count, 1);
    }

    #[test]
    fn car_filters_combine_status_and_year() {
        let cars = vec![
            Car::new("Toyota", "Corolla").with_year(2019),
            Car::new("Toyota", "Yaris")
                .with_year(2021)
                .with_status(CarStatus::Sold),
            Car::new("Kia", "Picanto").with_year(2022),
        ];
        let mut query = TableQuery::default();
        query.set_filter("status", FilterValue::Exact("available".into()));
        query.set_filter(
            "year",
            FilterValue::Range {
                min: Some(dec!(2020)),
                max: None,
            },
        );
        let page = run_pipeline(&cars, &Car::table_definition(), &query);
        assert_eq!(page.total_records, 1);
        assert_eq!(page.rows[0].model, "Picanto");
    }
}
