//! Calculations and services. No terminal I/O here.

pub mod balance;
pub mod services;
pub mod table;
pub mod tables;

pub use balance::{
    classify_bill, compute_deal_balance, extract_bill_amount, opening_balance, BalanceEffect,
};
pub use table::{
    run_pipeline, FieldValue, FilterValue, SortDirection, SortSpec, TableDefinition, TableFilter,
    TablePage, TableQuery, DEFAULT_PAGE_SIZE,
};
pub use tables::{DealRow, Tabular};
