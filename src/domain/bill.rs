use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::amount::{saturating_sum, RawAmount};
use crate::domain::common::{BelongsToDeal, Displayable, Identifiable};

/// A financial document (invoice, receipt, or both) tied to a deal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: Uuid,
    pub deal_id: Uuid,
    pub bill_type: BillType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_direction: Option<BillDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visa_amount: Option<RawAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_amount: Option<RawAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_amount: Option<RawAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_amount: Option<RawAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_amount: Option<RawAmount>,
    /// Itemized payments; when non-empty they replace the flat fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_payments: Option<Vec<BillPayment>>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Bill {
    pub fn new(deal_id: Uuid, bill_type: BillType) -> Self {
        Self {
            id: Uuid::new_v4(),
            deal_id,
            bill_type,
            bill_direction: None,
            visa_amount: None,
            transfer_amount: None,
            check_amount: None,
            cash_amount: None,
            bank_amount: None,
            bill_payments: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_direction(mut self, direction: BillDirection) -> Self {
        self.bill_direction = Some(direction);
        self
    }

    pub fn with_cash(mut self, amount: impl Into<RawAmount>) -> Self {
        self.cash_amount = Some(amount.into());
        self
    }

    pub fn with_payment(mut self, amount: impl Into<RawAmount>, payment_type: PaymentType) -> Self {
        self.bill_payments
            .get_or_insert_with(Vec::new)
            .push(BillPayment::new(amount, payment_type));
        self
    }

    /// Normalizes the two amount shapes a bill can carry.
    pub fn amounts(&self) -> BillAmounts<'_> {
        match self.bill_payments.as_deref() {
            Some(payments) if !payments.is_empty() => BillAmounts::Itemized(payments),
            _ => BillAmounts::Flat(LegacyAmounts {
                visa: self.visa_amount.as_ref(),
                transfer: self.transfer_amount.as_ref(),
                check: self.check_amount.as_ref(),
                cash: self.cash_amount.as_ref(),
                bank: self.bank_amount.as_ref(),
            }),
        }
    }
}

impl Identifiable for Bill {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToDeal for Bill {
    fn deal_id(&self) -> Uuid {
        self.deal_id
    }
}

impl Displayable for Bill {
    fn display_label(&self) -> String {
        format!("bill:{} [{}]", self.id, self.bill_type.as_str())
    }
}

/// Either itemized payment entries or the legacy per-method fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BillAmounts<'a> {
    Itemized(&'a [BillPayment]),
    Flat(LegacyAmounts<'a>),
}

impl BillAmounts<'_> {
    pub fn total(&self) -> Decimal {
        match self {
            BillAmounts::Itemized(payments) => {
                saturating_sum(payments.iter().map(|p| p.amount.value()))
            }
            BillAmounts::Flat(legacy) => legacy.total(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LegacyAmounts<'a> {
    pub visa: Option<&'a RawAmount>,
    pub transfer: Option<&'a RawAmount>,
    pub check: Option<&'a RawAmount>,
    pub cash: Option<&'a RawAmount>,
    pub bank: Option<&'a RawAmount>,
}

impl LegacyAmounts<'_> {
    pub fn total(&self) -> Decimal {
        saturating_sum(
            [self.visa, self.transfer, self.check, self.cash, self.bank]
                .into_iter()
                .flatten()
                .map(RawAmount::value),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillPayment {
    #[serde(default)]
    pub amount: RawAmount,
    #[serde(default)]
    pub payment_type: PaymentType,
}

impl BillPayment {
    pub fn new(amount: impl Into<RawAmount>, payment_type: PaymentType) -> Self {
        Self {
            amount: amount.into(),
            payment_type,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    Visa,
    Transfer,
    Check,
    Bank,
    #[default]
    #[serde(other)]
    Other,
}

/// Document kind. Unknown kinds load as [`BillType::Other`] rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillType {
    TaxInvoice,
    ReceiptOnly,
    TaxInvoiceReceipt,
    CreditInvoice,
    ProformaInvoice,
    Other(String),
}

impl BillType {
    pub fn as_str(&self) -> &str {
        match self {
            BillType::TaxInvoice => "tax_invoice",
            BillType::ReceiptOnly => "receipt_only",
            BillType::TaxInvoiceReceipt => "tax_invoice_receipt",
            BillType::CreditInvoice => "credit_invoice",
            BillType::ProformaInvoice => "proforma_invoice",
            BillType::Other(raw) => raw,
        }
    }
}

impl From<String> for BillType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "tax_invoice" => BillType::TaxInvoice,
            "receipt_only" => BillType::ReceiptOnly,
            "tax_invoice_receipt" => BillType::TaxInvoiceReceipt,
            "credit_invoice" => BillType::CreditInvoice,
            "proforma_invoice" => BillType::ProformaInvoice,
            _ => BillType::Other(value),
        }
    }
}

impl From<BillType> for String {
    fn from(value: BillType) -> Self {
        match value {
            BillType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Sign metadata. Anything other than the exact text `negative` reads as positive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum BillDirection {
    #[default]
    Positive,
    Negative,
}

impl From<String> for BillDirection {
    fn from(value: String) -> Self {
        if value == "negative" {
            BillDirection::Negative
        } else {
            BillDirection::Positive
        }
    }
}

impl From<BillDirection> for String {
    fn from(value: BillDirection) -> Self {
        match value {
            BillDirection::Positive => "positive".into(),
            BillDirection::Negative => "negative".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_payment_list_falls_back_to_flat_fields() {
        let mut bill = Bill::new(Uuid::new_v4(), BillType::ReceiptOnly).with_cash("150");
        bill.bill_payments = Some(Vec::new());
        assert!(matches!(bill.amounts(), BillAmounts::Flat(_)));
        assert_eq!(bill.amounts().total(), dec!(150));
    }

    #[test]
    fn itemized_payments_win_over_flat_fields() {
        let bill = Bill::new(Uuid::new_v4(), BillType::ReceiptOnly)
            .with_cash("999")
            .with_payment(100, PaymentType::Cash)
            .with_payment("50.5", PaymentType::Visa);
        assert!(matches!(bill.amounts(), BillAmounts::Itemized(_)));
        assert_eq!(bill.amounts().total(), dec!(150.5));
    }

    #[test]
    fn unknown_wire_values_are_tolerated() {
        let json = r#"{
            "id": "2a7c0c8e-1111-4c4c-9a9a-123456789abc",
            "deal_id": "2a7c0c8e-2222-4c4c-9a9a-123456789abc",
            "bill_type": "delivery_note",
            "bill_direction": "sideways",
            "bill_payments": [{"amount": "x", "payment_type": "crypto"}]
        }"#;
        let bill: Bill = serde_json::from_str(json).expect("lenient bill parses");
        assert_eq!(bill.bill_type, BillType::Other("delivery_note".into()));
        assert_eq!(bill.bill_direction, Some(BillDirection::Positive));
        let payments = bill.bill_payments.as_ref().unwrap();
        assert_eq!(payments[0].payment_type, PaymentType::Other);
        assert_eq!(bill.amounts().total(), Decimal::ZERO);
    }

    #[test]
    fn bill_type_round_trips_through_strings() {
        let json = serde_json::to_string(&BillType::TaxInvoiceReceipt).unwrap();
        assert_eq!(json, "\"tax_invoice_receipt\"");
        let other: BillType = serde_json::from_str("\"custom\"").unwrap();
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"custom\"");
    }
}
