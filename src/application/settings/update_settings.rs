use std::sync::Arc;
use uuid::Uuid;

use crate::domain::settings::entities::UserSettings;
use crate::domain::settings::errors::SettingsError;
use crate::domain::settings::services::{SettingsInput, SettingsService};

/// Use case for saving the settings form
pub struct UpdateSettingsUseCase {
  settings_service: Arc<SettingsService>,
}

impl UpdateSettingsUseCase {
  pub fn new(settings_service: Arc<SettingsService>) -> Self {
    Self { settings_service }
  }

  /// Validates and persists the submitted settings
  ///
  /// # Errors
  /// Returns `SettingsError::InvalidSetting` for out-of-range values
  pub async fn execute(
    &self,
    user_id: Uuid,
    input: SettingsInput,
  ) -> Result<UserSettings, SettingsError> {
    self.settings_service.save(user_id, input).await
  }
}
