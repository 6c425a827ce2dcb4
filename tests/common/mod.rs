#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use dealbook::domain::{
    Bill, BillDirection, BillType, Book, Car, CarStatus, Deal, DealStatus, DealType, Order,
    OrderItem, OrderStatus, PaymentType,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh data root that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub const DANA: Uuid = Uuid::from_u128(0x0d0d_0000_4000_8000_0000_0000_0000_0001);
pub const OMER: Uuid = Uuid::from_u128(0x0d0d_0000_4000_8000_0000_0000_0000_0002);

pub fn fixed_id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

/// Three deals whose balances are -55,000, 0, and 7,999.50.
pub fn showroom_book() -> Book {
    let mut book = Book::new("Showroom");

    let exchange = Deal::new(DealType::Exchange, "120000")
        .with_trade_in("40000")
        .with_customer(DANA, "Dana Levi")
        .with_status(DealStatus::Active);
    let exchange_id = exchange.id;
    book.deals.push(exchange);
    book.bills.push(Bill::new(exchange_id, BillType::TaxInvoiceReceipt).with_cash("30000"));
    book.bills.push(
        Bill::new(exchange_id, BillType::ReceiptOnly)
            .with_direction(BillDirection::Negative)
            .with_payment(5000, PaymentType::Transfer),
    );
    book.bills.push(Bill::new(exchange_id, BillType::CreditInvoice).with_cash("999"));

    let settled = Deal::new(DealType::NewSale, 85000)
        .with_customer(OMER, "Omer Katz")
        .with_status(DealStatus::Completed);
    let settled_id = settled.id;
    book.deals.push(settled);
    book.bills.push(
        Bill::new(settled_id, BillType::TaxInvoiceReceipt)
            .with_payment("50000", PaymentType::Visa)
            .with_payment("35000", PaymentType::Transfer),
    );

    let mut legacy = Deal::new(DealType::UsedSale, "");
    legacy.selling_price = None;
    legacy.amount = Some("42000.50".into());
    legacy.customer_name = Some("avi cohen".into());
    let legacy_id = legacy.id;
    book.deals.push(legacy);
    book.bills.push(Bill::new(legacy_id, BillType::ReceiptOnly).with_cash("50000"));

    book.cars = sample_cars();
    book.orders = vec![
        Order::new("Dana Levi")
            .on(date(2024, 3, 14))
            .with_item(OrderItem::new("Detailing", "450", 1)),
        Order::new("Omer Katz")
            .on(date(2024, 5, 2))
            .with_item(OrderItem::new("Winter tyres", "380", 4)),
    ];
    book.orders[1].status = OrderStatus::Confirmed;
    book
}

pub fn sample_cars() -> Vec<Car> {
    let mut corolla = Car::new("Toyota", "Corolla")
        .with_year(2019)
        .with_plate("12-345-67")
        .with_price("68500");
    corolla.id = fixed_id(0x1a2b3c4d_0000_4000_8000_000000000001);

    let mut cx5 = Car::new("Mazda", "CX-5")
        .with_year(2021)
        .with_plate("98-765-43")
        .with_price("112000.50")
        .with_status(CarStatus::Reserved);
    cx5.id = fixed_id(0x5e6f7a8b_0000_4000_8000_000000000002);

    let mut picanto = Car::new("Kia", "Picanto").with_status(CarStatus::Sold);
    picanto.id = fixed_id(0x9c0d1e2f_0000_4000_8000_000000000003);

    vec![corolla, cx5, picanto]
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
