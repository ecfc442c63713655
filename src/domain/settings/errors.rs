use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
  #[error("Settings not found for user")]
  NotFound,

  #[error("Invalid setting: {0}")]
  InvalidSetting(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Repository error: {0}")]
  Repository(String),
}
