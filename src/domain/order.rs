use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::amount::{saturating_sum, RawAmount};
use crate::domain::common::{Displayable, Identifiable};

/// A trip, event, or service booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub customer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn new(customer: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer: customer.into(),
            date: None,
            status: OrderStatus::Pending,
            items: Vec::new(),
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_item(mut self, item: OrderItem) -> Self {
        self.items.push(item);
        self
    }

    /// Sum of `unit_price × quantity` over all items. Bad numbers count as zero.
    pub fn total(&self) -> Decimal {
        saturating_sum(self.items.iter().map(OrderItem::line_total))
    }
}

impl Identifiable for Order {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Order {
    fn display_label(&self) -> String {
        format!("order:{} {} [{}]", self.id, self.customer, self.status.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub description: String,
    #[serde(default)]
    pub unit_price: RawAmount,
    #[serde(default = "OrderItem::default_quantity")]
    pub quantity: RawAmount,
}

impl OrderItem {
    pub fn new(
        description: impl Into<String>,
        unit_price: impl Into<RawAmount>,
        quantity: impl Into<RawAmount>,
    ) -> Self {
        Self {
            description: description.into(),
            unit_price: unit_price.into(),
            quantity: quantity.into(),
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price
            .value()
            .saturating_mul(self.quantity.value())
    }

    fn default_quantity() -> RawAmount {
        RawAmount::from(1)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}
