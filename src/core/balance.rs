//! Deal balance reconciliation.
//!
//! A deal starts as a debt equal to its nominal price. Exchange deals get
//! the appraised trade-in as a credit. Receipts then move the balance: a
//! `receipt_only` bill follows its direction, a `tax_invoice_receipt` always
//! counts as a payment, and every other bill type is ignored. The result is
//! never clamped, so overpayment shows up as a positive balance. Sums that
//! would overflow pin at `Decimal::MAX` or `Decimal::MIN`.
//!
//! Everything here is pure: same deal and bills in, same number out, in any
//! bill order.

use rust_decimal::Decimal;

use crate::domain::{Bill, BillDirection, BillType, Deal};

/// How one bill moves the running balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceEffect {
    Ignored,
    Credit,
    Debit,
}

impl BalanceEffect {
    /// Applies the effect to a magnitude, producing the signed contribution.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            BalanceEffect::Ignored => Decimal::ZERO,
            BalanceEffect::Credit => amount.abs(),
            BalanceEffect::Debit => -amount.abs(),
        }
    }
}

/// Total money a bill carries, from itemized payments when present,
/// otherwise from the legacy per-method fields.
pub fn extract_bill_amount(bill: &Bill) -> Decimal {
    bill.amounts().total()
}

/// Decides whether and in which direction a bill affects the deal balance.
pub fn classify_bill(bill: &Bill) -> BalanceEffect {
    match bill.bill_type {
        // Direction on combined documents is accounting metadata, not cash flow.
        BillType::TaxInvoiceReceipt => BalanceEffect::Credit,
        BillType::ReceiptOnly => match bill.bill_direction {
            Some(BillDirection::Negative) => BalanceEffect::Debit,
            _ => BalanceEffect::Credit,
        },
        _ => BalanceEffect::Ignored,
    }
}

/// Balance before any bill: the negated price plus any trade-in credit.
pub fn opening_balance(deal: &Deal) -> Decimal {
    let mut balance = -deal.nominal_price().abs();
    if let Some(trade_in) = deal.trade_in_value() {
        balance = balance.saturating_add(trade_in.abs());
    }
    balance
}

/// Signed balance of a deal: negative while money is owed, positive on
/// overpayment.
pub fn compute_deal_balance(deal: &Deal, bills: &[Bill]) -> Decimal {
    bills.iter().fold(opening_balance(deal), |balance, bill| {
        match classify_bill(bill) {
            BalanceEffect::Ignored => balance,
            effect => balance.saturating_add(effect.signed(extract_bill_amount(bill))),
        }
    })
}
