use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::domain::admin::services::AdminService;
use crate::domain::invoice::entities::Invoice;
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::{InvoiceInput, InvoiceService};

/// Use case for saving a new invoice from the wizard
pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
  admin_service: Arc<AdminService>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>, admin_service: Arc<AdminService>) -> Self {
    Self {
      invoice_service,
      admin_service,
    }
  }

  /// Creates the invoice and bumps the usage counter.
  ///
  /// The usage bump is informational only while gating is disabled, so a
  /// failure there never rolls back the invoice.
  pub async fn execute(&self, user_id: Uuid, input: InvoiceInput) -> Result<Invoice, InvoiceError> {
    let invoice = self.invoice_service.create(user_id, input).await?;

    if let Err(e) = self.admin_service.record_invoice_created(user_id).await {
      warn!(user_id = %user_id, error = %e, "Failed to record invoice usage");
    }

    Ok(invoice)
  }
}
