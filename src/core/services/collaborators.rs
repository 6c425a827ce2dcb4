//! Outside systems that deal operations notify.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::{BookError, Result};

/// Running balance per customer, kept outside the book.
pub trait CustomerLedger: Send + Sync {
    fn adjust_balance(&self, customer_id: Uuid, delta: Decimal) -> Result<()>;
}

/// Key/value file storage for deal attachments.
pub trait BlobStore: Send + Sync {
    fn put(&self, key: &str, data: &[u8]) -> Result<()>;
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn delete(&self, key: &str) -> Result<()>;
    /// Removes every blob whose key starts with `prefix`, returning how many went.
    fn delete_prefix(&self, prefix: &str) -> Result<usize>;
}

/// Blob key prefix owning all files of a deal.
pub fn deal_blob_prefix(deal_id: Uuid) -> String {
    format!("deals/{}/", deal_id)
}

#[derive(Debug, Default)]
pub struct MemoryCustomerLedger {
    balances: Mutex<HashMap<Uuid, Decimal>>,
    adjustments: Mutex<Vec<(Uuid, Decimal)>>,
}

impl MemoryCustomerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, customer_id: Uuid) -> Decimal {
        self.balances
            .lock()
            .map(|balances| balances.get(&customer_id).copied().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Every adjustment received, in call order.
    pub fn adjustments(&self) -> Vec<(Uuid, Decimal)> {
        self.adjustments
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

impl CustomerLedger for MemoryCustomerLedger {
    fn adjust_balance(&self, customer_id: Uuid, delta: Decimal) -> Result<()> {
        let mut balances = self
            .balances
            .lock()
            .map_err(|_| BookError::StorageError("customer ledger lock poisoned".into()))?;
        let balance = balances.entry(customer_id).or_default();
        *balance = balance.saturating_add(delta);
        if let Ok(mut log) = self.adjustments.lock() {
            log.push((customer_id, delta));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        self.blobs
            .lock()
            .map(|blobs| blobs.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.blobs
            .lock()
            .map_err(|_| BookError::StorageError("blob store lock poisoned".into()))
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        self.lock()?.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        let mut blobs = self.lock()?;
        let before = blobs.len();
        blobs.retain(|key, _| !key.starts_with(prefix));
        Ok(before - blobs.len())
    }
}
