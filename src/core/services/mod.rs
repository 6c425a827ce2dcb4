pub mod balance_service;
pub mod bill_service;
pub mod collaborators;
pub mod deal_service;

pub use balance_service::BalanceService;
pub use bill_service::BillService;
pub use collaborators::{
    deal_blob_prefix, BlobStore, CustomerLedger, MemoryBlobStore, MemoryCustomerLedger,
};
pub use deal_service::{DealDeletion, DealHooks, DealService};

use crate::errors::BookError;

pub type ServiceResult<T> = Result<T, BookError>;
