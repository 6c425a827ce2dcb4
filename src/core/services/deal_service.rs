//! Business logic helpers for managing deals.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::balance::compute_deal_balance;
use crate::core::services::collaborators::{deal_blob_prefix, BlobStore, CustomerLedger};
use crate::core::services::ServiceResult;
use crate::domain::{ActivityAction, Bill, Book, Deal, Displayable};
use crate::errors::BookError;

/// External systems touched when a deal goes away.
#[derive(Clone, Copy)]
pub struct DealHooks<'a> {
    pub customers: &'a dyn CustomerLedger,
    pub blobs: &'a dyn BlobStore,
}

/// What a deletion removed and what it told the collaborators.
#[derive(Debug)]
pub struct DealDeletion {
    pub deal: Deal,
    pub bills: Vec<Bill>,
    pub balance: Decimal,
    pub blobs_removed: usize,
    pub blob_cleanup_error: Option<String>,
}

/// Provides validated CRUD helpers for deals.
pub struct DealService;

impl DealService {
    /// Adds a new deal and returns its identifier.
    pub fn add(book: &mut Book, deal: Deal) -> ServiceResult<Uuid> {
        validate(&deal)?;
        if book.deal(deal.id).is_some() {
            return Err(BookError::InvalidInput(format!(
                "deal {} already exists",
                deal.id
            )));
        }
        let id = deal.id;
        let label = deal.display_label();
        book.deals.push(deal);
        book.record_activity(ActivityAction::Created, "deal", id, Some(label));
        book.touch();
        tracing::info!(deal = %id, "deal created");
        Ok(id)
    }

    /// Updates the deal identified by `id` via the provided mutator.
    ///
    /// Completed and cancelled deals are read-only.
    pub fn update<F>(book: &mut Book, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Deal),
    {
        let deal = book
            .deal_mut(id)
            .ok_or_else(|| BookError::deal_not_found(id))?;
        if deal.status.is_locked() {
            return Err(BookError::DealLocked(id));
        }
        let mut draft = deal.clone();
        mutator(&mut draft);
        draft.id = id;
        validate(&draft)?;
        draft.touch();
        *deal = draft;
        book.record_activity(ActivityAction::Updated, "deal", id, None);
        book.touch();
        tracing::debug!(deal = %id, "deal updated");
        Ok(())
    }

    /// Removes the deal and its bills.
    ///
    /// The customer ledger is credited with the negated deal balance and the
    /// deal's blobs are purged, each exactly once. The ledger adjustment runs
    /// before anything is removed so a failure leaves the book untouched; a
    /// failed blob cleanup is reported on the result instead.
    pub fn delete(book: &mut Book, id: Uuid, hooks: DealHooks<'_>) -> ServiceResult<DealDeletion> {
        let deal = book.deal(id).ok_or_else(|| BookError::deal_not_found(id))?;
        if deal.status.is_locked() {
            return Err(BookError::DealLocked(id));
        }
        let bills = book.bills_for_deal(id);
        let balance = compute_deal_balance(deal, &bills);

        if let Some(customer) = deal.customer_id {
            hooks.customers.adjust_balance(customer, -balance)?;
        }

        let position = book
            .deals
            .iter()
            .position(|deal| deal.id == id)
            .ok_or_else(|| BookError::deal_not_found(id))?;
        let deal = book.deals.remove(position);
        book.bills.retain(|bill| bill.deal_id != id);

        let (blobs_removed, blob_cleanup_error) =
            match hooks.blobs.delete_prefix(&deal_blob_prefix(id)) {
                Ok(count) => (count, None),
                Err(err) => {
                    tracing::warn!(deal = %id, error = %err, "deal blob cleanup failed");
                    (0, Some(err.to_string()))
                }
            };

        book.record_activity(
            ActivityAction::Deleted,
            "deal",
            id,
            Some(format!("balance {} with {} bill(s)", balance, bills.len())),
        );
        book.touch();
        tracing::info!(deal = %id, %balance, bills = bills.len(), "deal deleted");

        Ok(DealDeletion {
            deal,
            bills,
            balance,
            blobs_removed,
            blob_cleanup_error,
        })
    }

    /// Returns a snapshot of the book's deals.
    pub fn list(book: &Book) -> Vec<&Deal> {
        book.deals.iter().collect()
    }
}

fn validate(deal: &Deal) -> ServiceResult<()> {
    if deal.nominal_price() < Decimal::ZERO {
        return Err(BookError::InvalidInput(
            "selling price must not be negative".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::collaborators::{MemoryBlobStore, MemoryCustomerLedger};
    use crate::domain::{BillType, DealStatus, DealType};
    use rust_decimal_macros::dec;

    fn book_with_deal(status: DealStatus) -> (Book, Uuid, Uuid) {
        let mut book = Book::new("Deals");
        let customer = Uuid::new_v4();
        let deal = Deal::new(DealType::NewSale, 1000)
            .with_customer(customer, "Lior")
            .with_status(status);
        let id = DealService::add(&mut book, deal).unwrap();
        book.bills
            .push(Bill::new(id, BillType::ReceiptOnly).with_cash(400));
        (book, id, customer)
    }

    #[test]
    fn update_fails_for_missing_deal() {
        let mut book = Book::new("Deals");
        let err = DealService::update(&mut book, Uuid::new_v4(), |_| {})
            .expect_err("update must fail for unknown id");
        assert!(
            matches!(err, BookError::NotFound { entity: "Deal", .. }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn locked_deals_refuse_changes() {
        let (mut book, id, _) = book_with_deal(DealStatus::Completed);
        let err = DealService::update(&mut book, id, |deal| deal.customer_name = None)
            .expect_err("completed deal is read-only");
        assert!(matches!(err, BookError::DealLocked(locked) if locked == id));

        let customers = MemoryCustomerLedger::new();
        let blobs = MemoryBlobStore::new();
        let hooks = DealHooks {
            customers: &customers,
            blobs: &blobs,
        };
        assert!(DealService::delete(&mut book, id, hooks).is_err());
        assert!(customers.adjustments().is_empty());
        assert!(book.deal(id).is_some());
    }

    #[test]
    fn update_rejects_negative_price_and_keeps_original() {
        let (mut book, id, _) = book_with_deal(DealStatus::Active);
        let err = DealService::update(&mut book, id, |deal| {
            deal.selling_price = Some((-5).into());
        })
        .expect_err("negative price rejected");
        assert!(matches!(err, BookError::InvalidInput(_)));
        assert_eq!(book.deal(id).unwrap().nominal_price(), dec!(1000));
    }

    #[test]
    fn delete_notifies_collaborators_once() {
        let (mut book, id, customer) = book_with_deal(DealStatus::Active);
        let customers = MemoryCustomerLedger::new();
        let blobs = MemoryBlobStore::new();
        blobs
            .put(&format!("{}contract.pdf", deal_blob_prefix(id)), b"%PDF")
            .unwrap();

        let removed = DealService::delete(
            &mut book,
            id,
            DealHooks {
                customers: &customers,
                blobs: &blobs,
            },
        )
        .unwrap();

        assert_eq!(removed.balance, dec!(-600));
        assert_eq!(removed.bills.len(), 1);
        assert_eq!(removed.blobs_removed, 1);
        assert_eq!(customers.adjustments(), vec![(customer, dec!(600))]);
        assert!(book.deals.is_empty());
        assert!(book.bills.is_empty());
        assert!(blobs.keys().is_empty());
        assert_eq!(
            book.activity.last().map(|entry| entry.action),
            Some(ActivityAction::Deleted)
        );
    }
}
