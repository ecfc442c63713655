use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::InvoiceService;
use crate::domain::invoice::wizard::{DraftSeed, WizardStep};

/// Wizard step descriptor sent to the client
#[derive(Debug, Clone, Serialize)]
pub struct WizardStepInfo {
  pub step: WizardStep,
  pub title: &'static str,
  pub index: usize,
}

/// Seeded draft plus the wizard's step sequence
#[derive(Debug, Clone, Serialize)]
pub struct PrepareInvoiceDraftResponse {
  pub draft: DraftSeed,
  pub steps: Vec<WizardStepInfo>,
}

/// Use case for opening the invoice wizard, fresh or in edit mode
pub struct PrepareInvoiceDraftUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl PrepareInvoiceDraftUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    user_id: Uuid,
    editing_id: Option<Uuid>,
  ) -> Result<PrepareInvoiceDraftResponse, InvoiceError> {
    let draft = self.invoice_service.prepare_draft(user_id, editing_id).await?;

    let steps = WizardStep::ALL
      .iter()
      .map(|step| WizardStepInfo {
        step: *step,
        title: step.title(),
        index: step.index(),
      })
      .collect();

    Ok(PrepareInvoiceDraftResponse { draft, steps })
  }
}
