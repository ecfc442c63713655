use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("Client not found: {0}")]
  NotFound(Uuid),

  #[error("A client named '{0}' already exists")]
  NameAlreadyExists(String),

  #[error("Client name must not be empty")]
  EmptyName,

  #[error("Invalid client field: {0}")]
  InvalidField(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Repository error: {0}")]
  Repository(String),
}
