use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    activity::{ActivityAction, ActivityEntry},
    bill::Bill,
    car::Car,
    common::{BelongsToDeal, Identifiable},
    deal::Deal,
    order::Order,
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Everything a single business tenant keeps: inventory, deals with their
/// bills, bookings, and the activity trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub deals: Vec<Deal>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub cars: Vec<Car>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub activity: Vec<ActivityEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Book::schema_version_default")]
    pub schema_version: u8,
}

impl Book {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            deals: Vec::new(),
            bills: Vec::new(),
            cars: Vec::new(),
            orders: Vec::new(),
            activity: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_car(&mut self, car: Car) -> Uuid {
        let id = car.id;
        self.cars.push(car);
        self.touch();
        id
    }

    pub fn add_order(&mut self, order: Order) -> Uuid {
        let id = order.id;
        self.orders.push(order);
        self.touch();
        id
    }

    pub fn deal(&self, id: Uuid) -> Option<&Deal> {
        find_by_id(&self.deals, id)
    }

    pub fn deal_mut(&mut self, id: Uuid) -> Option<&mut Deal> {
        self.deals.iter_mut().find(|deal| deal.id == id)
    }

    pub fn bill(&self, id: Uuid) -> Option<&Bill> {
        find_by_id(&self.bills, id)
    }

    pub fn car(&self, id: Uuid) -> Option<&Car> {
        find_by_id(&self.cars, id)
    }

    /// Bills attached to `deal_id`, cloned in storage order.
    pub fn bills_for_deal(&self, deal_id: Uuid) -> Vec<Bill> {
        self.bills
            .iter()
            .filter(|bill| bill.deal_id() == deal_id)
            .cloned()
            .collect()
    }

    pub fn record_activity(
        &mut self,
        action: ActivityAction,
        entity: &str,
        entity_id: Uuid,
        details: Option<String>,
    ) {
        let mut entry = ActivityEntry::new(action, entity, entity_id);
        entry.details = details;
        self.activity.push(entry);
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}
