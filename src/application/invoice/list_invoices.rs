use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::ports::{InvoiceListQuery, InvoicePage};
use crate::domain::invoice::services::InvoiceService;

/// Use case for the paginated invoice list
pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    user_id: Uuid,
    query: InvoiceListQuery,
  ) -> Result<InvoicePage, InvoiceError> {
    self.invoice_service.list(user_id, query).await
  }
}
