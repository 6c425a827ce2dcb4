use uuid::Uuid;

/// Identifies records that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies a presentation-ready label for tables and logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Implemented by records that hang off a deal.
pub trait BelongsToDeal {
    fn deal_id(&self) -> Uuid;
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use rust_decimal;
pub use serde;
pub use uuid;
