use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::balance::{self, BalanceEffect};
use crate::core::tables::DealRow;
use crate::domain::{Bill, Book, Deal};

/// Read-only facade over the balance calculation.
pub struct BalanceService;

impl BalanceService {
    pub fn deal_balance(deal: &Deal, bills: &[Bill]) -> Decimal {
        balance::compute_deal_balance(deal, bills)
    }

    pub fn bill_amount(bill: &Bill) -> Decimal {
        balance::extract_bill_amount(bill)
    }

    pub fn classify(bill: &Bill) -> BalanceEffect {
        balance::classify_bill(bill)
    }

    /// Joins the deal with its bills and computes the balance, if the deal exists.
    pub fn deal_balance_in(book: &Book, deal_id: Uuid) -> Option<Decimal> {
        let deal = book.deal(deal_id)?;
        Some(balance::compute_deal_balance(deal, &book.bills_for_deal(deal_id)))
    }

    pub fn rows(book: &Book) -> Vec<DealRow> {
        DealRow::from_book(book)
    }
}
