use std::sync::Arc;
use uuid::Uuid;

use crate::domain::settings::entities::UserSettings;
use crate::domain::settings::errors::SettingsError;
use crate::domain::settings::services::SettingsService;

/// Settings plus derived readiness information for the settings page
#[derive(Debug, Clone)]
pub struct GetSettingsResponse {
  pub settings: UserSettings,
  /// Invoice number the counter would produce next
  pub next_invoice_number: String,
  /// Recommended company fields still missing
  pub missing_fields: Vec<&'static str>,
  /// Subset of `missing_fields` that blocks the wizard
  pub missing_critical_fields: Vec<&'static str>,
}

/// Use case for reading a user's settings
pub struct GetSettingsUseCase {
  settings_service: Arc<SettingsService>,
}

impl GetSettingsUseCase {
  pub fn new(settings_service: Arc<SettingsService>) -> Self {
    Self { settings_service }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<GetSettingsResponse, SettingsError> {
    let settings = self.settings_service.get(user_id).await?;
    let next_invoice_number = settings.preview_invoice_number();
    let missing_fields = settings.missing_recommended_fields();
    let missing_critical_fields = settings.missing_critical_fields();

    Ok(GetSettingsResponse {
      settings,
      next_invoice_number,
      missing_fields,
      missing_critical_fields,
    })
  }
}
