use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::amount::RawAmount;
use crate::domain::common::{Displayable, Identifiable};

/// A sale, exchange, or intermediary transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deal {
    pub id: Uuid,
    pub deal_type: DealType,
    /// Nominal transaction value. Older records only carry `amount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<RawAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<RawAmount>,
    /// Appraised trade-in value; only meaningful for exchange deals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_car_eval_value: Option<RawAmount>,
    #[serde(default)]
    pub status: DealStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_id: Option<Uuid>,
    /// Blob keys of uploaded documents (contracts, ID scans, ...).
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    pub fn new(deal_type: DealType, selling_price: impl Into<RawAmount>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            deal_type,
            selling_price: Some(selling_price.into()),
            amount: None,
            customer_car_eval_value: None,
            status: DealStatus::Pending,
            customer_id: None,
            customer_name: None,
            car_id: None,
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_trade_in(mut self, value: impl Into<RawAmount>) -> Self {
        self.customer_car_eval_value = Some(value.into());
        self
    }

    pub fn with_customer(mut self, id: Uuid, name: impl Into<String>) -> Self {
        self.customer_id = Some(id);
        self.customer_name = Some(name.into());
        self
    }

    pub fn with_status(mut self, status: DealStatus) -> Self {
        self.status = status;
        self
    }

    /// `selling_price`, falling back to the legacy `amount`, then zero.
    pub fn nominal_price(&self) -> Decimal {
        self.selling_price
            .as_ref()
            .or(self.amount.as_ref())
            .map(RawAmount::value)
            .unwrap_or(Decimal::ZERO)
    }

    /// Trade-in credit for exchange deals, `None` for every other type.
    pub fn trade_in_value(&self) -> Option<Decimal> {
        if self.deal_type != DealType::Exchange {
            return None;
        }
        self.customer_car_eval_value.as_ref().map(RawAmount::value)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Deal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Deal {
    fn display_label(&self) -> String {
        match &self.customer_name {
            Some(name) => format!("{} ({}) [{}]", name, self.deal_type, self.status),
            None => format!("deal:{} ({}) [{}]", self.id, self.deal_type, self.status),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DealType {
    NewUsedSale,
    NewSale,
    UsedSale,
    NewUsedSaleTaxInclusive,
    Exchange,
    Intermediary,
    FinancingAssistanceIntermediary,
    CompanyCommission,
}

impl DealType {
    pub const ALL: [DealType; 8] = [
        DealType::NewUsedSale,
        DealType::NewSale,
        DealType::UsedSale,
        DealType::NewUsedSaleTaxInclusive,
        DealType::Exchange,
        DealType::Intermediary,
        DealType::FinancingAssistanceIntermediary,
        DealType::CompanyCommission,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DealType::NewUsedSale => "new_used_sale",
            DealType::NewSale => "new_sale",
            DealType::UsedSale => "used_sale",
            DealType::NewUsedSaleTaxInclusive => "new_used_sale_tax_inclusive",
            DealType::Exchange => "exchange",
            DealType::Intermediary => "intermediary",
            DealType::FinancingAssistanceIntermediary => "financing_assistance_intermediary",
            DealType::CompanyCommission => "company_commission",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl std::fmt::Display for DealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl DealStatus {
    /// Completed and cancelled deals may no longer be edited or deleted.
    pub fn is_locked(self) -> bool {
        matches!(self, DealStatus::Completed | DealStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DealStatus::Pending => "pending",
            DealStatus::Active => "active",
            DealStatus::Completed => "completed",
            DealStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for DealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
