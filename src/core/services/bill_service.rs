use uuid::Uuid;

use crate::core::services::ServiceResult;
use crate::domain::{ActivityAction, Bill, Book};
use crate::errors::BookError;

/// CRUD helpers for bills; every bill must point at an existing deal.
pub struct BillService;

impl BillService {
    pub fn add(book: &mut Book, bill: Bill) -> ServiceResult<Uuid> {
        if book.deal(bill.deal_id).is_none() {
            return Err(BookError::InvalidInput(format!(
                "bill references unknown deal {}",
                bill.deal_id
            )));
        }
        let id = bill.id;
        let details = format!("{} for deal {}", bill.bill_type.as_str(), bill.deal_id);
        book.bills.push(bill);
        book.record_activity(ActivityAction::Created, "bill", id, Some(details));
        book.touch();
        Ok(id)
    }

    pub fn remove(book: &mut Book, id: Uuid) -> ServiceResult<Bill> {
        let position = book
            .bills
            .iter()
            .position(|bill| bill.id == id)
            .ok_or_else(|| BookError::bill_not_found(id))?;
        let bill = book.bills.remove(position);
        book.record_activity(ActivityAction::Deleted, "bill", id, None);
        book.touch();
        Ok(bill)
    }

    pub fn list_for_deal(book: &Book, deal_id: Uuid) -> Vec<&Bill> {
        book.bills
            .iter()
            .filter(|bill| bill.deal_id == deal_id)
            .collect()
    }
}
