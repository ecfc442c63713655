use async_trait::async_trait;
use uuid::Uuid;

use super::entities::UserSettings;
use super::errors::SettingsError;

/// Repository trait for per-user settings persistence
#[async_trait]
pub trait SettingsRepository: Send + Sync {
  /// Finds the settings row for a user, if one was ever saved
  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<UserSettings>, SettingsError>;

  /// Inserts or updates the settings row for a user
  async fn upsert(&self, settings: UserSettings) -> Result<UserSettings, SettingsError>;

  /// Atomically claims the current counter value and advances it by one.
  ///
  /// Returns a snapshot of the settings with `invoice_counter` set to the
  /// claimed value, or `None` if the user has no settings row yet.
  async fn claim_next_counter(&self, user_id: Uuid) -> Result<Option<UserSettings>, SettingsError>;
}
