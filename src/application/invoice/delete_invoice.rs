use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::InvoiceService;

/// Use case for permanently deleting an invoice
pub struct DeleteInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl DeleteInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, user_id: Uuid, invoice_id: Uuid) -> Result<(), InvoiceError> {
    self.invoice_service.delete(user_id, invoice_id).await
  }
}
