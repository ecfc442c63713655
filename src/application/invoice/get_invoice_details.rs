use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::entities::Invoice;
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::InvoiceService;

/// Use case for fetching one invoice with all its lines
pub struct GetInvoiceDetailsUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceDetailsUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, user_id: Uuid, invoice_id: Uuid) -> Result<Invoice, InvoiceError> {
    self.invoice_service.get(user_id, invoice_id).await
  }
}
