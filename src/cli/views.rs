//! Turns pipeline pages into renderable tables.

use crate::cli::output::balance_cell;
use crate::cli::table_renderer::{Table, TableColumn};
use crate::core::services::BalanceService;
use crate::core::{BalanceEffect, DealRow, TablePage};
use crate::currency::{format_amount, AmountFormat};
use crate::domain::{Bill, Car, Order};

const ID_WIDTH: usize = 8;

fn short_id(id: &uuid::Uuid) -> String {
    id.to_string().chars().take(ID_WIDTH).collect()
}

pub fn deals_table(page: &TablePage<'_, DealRow>, format: &AmountFormat, color: bool) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Customer").max_width(24),
        TableColumn::left("Type"),
        TableColumn::left("Status"),
        TableColumn::right("Price"),
        TableColumn::right("Balance"),
        TableColumn::right("Bills"),
        TableColumn::left("Created"),
    ]);
    for row in &page.rows {
        table.push_row(vec![
            short_id(&row.deal.id),
            row.deal.customer_name.clone().unwrap_or_default(),
            row.deal.deal_type.to_string(),
            row.deal.status.to_string(),
            format_amount(row.deal.nominal_price(), format),
            balance_cell(row.balance, format, color),
            row.bill_count.to_string(),
            row.deal.created_at.format("%Y-%m-%d").to_string(),
        ]);
    }
    table
}

pub fn cars_table(page: &TablePage<'_, Car>, format: &AmountFormat) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Make"),
        TableColumn::left("Model").max_width(20),
        TableColumn::right("Year"),
        TableColumn::left("Plate"),
        TableColumn::right("Price"),
        TableColumn::left("Status"),
    ]);
    for car in &page.rows {
        table.push_row(vec![
            short_id(&car.id),
            car.make.clone(),
            car.model.clone(),
            car.year.map(|year| year.to_string()).unwrap_or_default(),
            car.plate.clone().unwrap_or_default(),
            if car.price.is_blank() {
                String::new()
            } else {
                format_amount(car.price_value(), format)
            },
            car.status.as_str().to_string(),
        ]);
    }
    table
}

pub fn orders_table(page: &TablePage<'_, Order>, format: &AmountFormat) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Customer").max_width(24),
        TableColumn::left("Date"),
        TableColumn::left("Status"),
        TableColumn::right("Items"),
        TableColumn::right("Total"),
    ]);
    for order in &page.rows {
        table.push_row(vec![
            short_id(&order.id),
            order.customer.clone(),
            order.date.map(|date| date.to_string()).unwrap_or_default(),
            order.status.as_str().to_string(),
            order.items.len().to_string(),
            format_amount(order.total(), format),
        ]);
    }
    table
}

/// One line per bill with the effect it has on the deal balance.
pub fn bills_table(bills: &[Bill], format: &AmountFormat) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Bill"),
        TableColumn::left("Type"),
        TableColumn::left("Effect"),
        TableColumn::right("Amount"),
    ]);
    for bill in bills {
        let effect = BalanceService::classify(bill);
        let label = match effect {
            BalanceEffect::Credit => "credit",
            BalanceEffect::Debit => "debit",
            BalanceEffect::Ignored => "ignored",
        };
        table.push_row(vec![
            short_id(&bill.id),
            bill.bill_type.as_str().to_string(),
            label.to_string(),
            format_amount(BalanceService::bill_amount(bill), format),
        ]);
    }
    table
}

/// Pagination summary printed under a list.
pub fn page_footer<T>(page: &TablePage<'_, T>) -> String {
    let mut footer = format!(
        "page {}/{} ({} records)",
        page.page,
        page.page_count().max(1),
        page.total_records
    );
    if page.has_next() {
        footer.push_str(&format!(", next: --page {}", page.page + 1));
    }
    footer
}
