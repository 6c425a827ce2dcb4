//! Record shapes as the store returns them. No I/O lives here.

pub mod activity;
pub mod amount;
pub mod bill;
pub mod book;
pub mod car;
pub mod common;
pub mod deal;
pub mod order;

pub use activity::{ActivityAction, ActivityEntry};
pub use amount::{parse_decimal_or_zero, saturating_sum, to_decimal_or_zero, RawAmount};
pub use bill::{
    Bill, BillAmounts, BillDirection, BillPayment, BillType, LegacyAmounts, PaymentType,
};
pub use book::Book;
pub use car::{Car, CarStatus};
pub use common::{BelongsToDeal, Displayable, Identifiable};
pub use deal::{Deal, DealStatus, DealType};
pub use order::{Order, OrderItem, OrderStatus};
