#![doc(test(attr(deny(warnings))))]

//! Dealbook keeps the books of a car dealership: deals and the bills paid
//! against them, cars in stock, and orders. It derives each deal's running
//! balance from its bills and serves every list through one
//! filter/sort/paginate pipeline.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Dealbook tracing initialized.");
    });
}
