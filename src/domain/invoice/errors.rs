use thiserror::Error;
use uuid::Uuid;

use super::value_objects::{InvoiceStatus, ValueObjectError};

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Invoice not found: {0}")]
  NotFound(Uuid),

  #[error("Invoice number '{0}' already exists")]
  NumberAlreadyExists(String),

  #[error("Only draft invoices can be edited")]
  NotEditable,

  #[error("Invalid status transition: {from} -> {to}")]
  InvalidStatusTransition {
    from: InvoiceStatus,
    to: InvoiceStatus,
  },

  #[error("An invoice needs at least one line item")]
  NoLineItems,

  #[error("Invalid invoice field: {0}")]
  InvalidField(String),

  #[error("Settings error: {0}")]
  Settings(#[from] crate::domain::settings::errors::SettingsError),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Repository error: {0}")]
  Repository(String),
}
