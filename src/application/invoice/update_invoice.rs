use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::entities::Invoice;
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::{InvoiceInput, InvoiceService};

/// Use case for re-saving a draft invoice from the wizard's edit mode
pub struct UpdateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl UpdateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// # Errors
  /// Returns `InvoiceError::NotEditable` for invoices past the draft stage
  pub async fn execute(
    &self,
    user_id: Uuid,
    invoice_id: Uuid,
    input: InvoiceInput,
  ) -> Result<Invoice, InvoiceError> {
    self.invoice_service.update(user_id, invoice_id, input).await
  }
}
