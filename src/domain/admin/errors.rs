use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AdminError {
  #[error("User not found: {0}")]
  UserNotFound(Uuid),

  #[error("Admins cannot delete their own account")]
  CannotDeleteSelf,

  #[error("Admins cannot change their own role")]
  CannotChangeOwnRole,

  #[error("Only super admins can manage super admin accounts")]
  SuperAdminRequired,

  #[error("Unknown plan type: {0}")]
  InvalidPlan(String),

  #[error("Unknown role: {0}")]
  InvalidRole(String),

  #[error("No analytics snapshot available")]
  NoSnapshot,

  #[error("Auth error: {0}")]
  Auth(#[from] crate::domain::auth::errors::AuthError),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Repository error: {0}")]
  Repository(String),
}
