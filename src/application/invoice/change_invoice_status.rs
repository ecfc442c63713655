use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::entities::Invoice;
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::InvoiceService;
use crate::domain::invoice::value_objects::InvoiceStatus;

/// Use case for moving an invoice through its lifecycle
pub struct ChangeInvoiceStatusUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ChangeInvoiceStatusUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// # Errors
  /// Returns `InvoiceError::InvalidStatusTransition` for disallowed moves
  pub async fn execute(
    &self,
    user_id: Uuid,
    invoice_id: Uuid,
    status: &str,
  ) -> Result<Invoice, InvoiceError> {
    let status = InvoiceStatus::from_str(status)?;
    self
      .invoice_service
      .change_status(user_id, invoice_id, status)
      .await
  }
}
