use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::admin::errors::AdminError;
use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::client::errors::ClientError;
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::settings::errors::SettingsError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Authentication error (401 Unauthorized or related)
  Auth(AuthErrorKind),

  /// Missing resource (404 Not Found)
  NotFound(String),

  /// Conflicting state, such as a duplicate name (409 Conflict)
  Conflict(String),

  /// Authenticated but not allowed (403 Forbidden)
  Forbidden(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Authentication error kinds
#[derive(Debug, Serialize)]
pub enum AuthErrorKind {
  /// Invalid credentials (401)
  InvalidCredentials,

  /// Session expired or invalid (401)
  InvalidSession,

  /// Invalid token format (401)
  InvalidToken,

  /// Rate limit exceeded (429)
  RateLimitExceeded,

  /// Email already exists (409)
  EmailAlreadyExists,

  /// User not found (404)
  UserNotFound,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthErrorKind::InvalidSession => StatusCode::UNAUTHORIZED,
        AuthErrorKind::InvalidToken => StatusCode::UNAUTHORIZED,
        AuthErrorKind::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        AuthErrorKind::EmailAlreadyExists => StatusCode::CONFLICT,
        AuthErrorKind::UserNotFound => StatusCode::NOT_FOUND,
      },
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => (
          "invalid_credentials",
          "Invalid email or password".to_string(),
        ),
        AuthErrorKind::InvalidSession => {
          ("invalid_session", "Invalid or expired session".to_string())
        }
        AuthErrorKind::InvalidToken => (
          "invalid_token",
          "Invalid or missing authorization token".to_string(),
        ),
        AuthErrorKind::RateLimitExceeded => (
          "rate_limit_exceeded",
          "Too many login attempts. Please try again later".to_string(),
        ),
        AuthErrorKind::EmailAlreadyExists => (
          "email_already_exists",
          "An account with this email already exists".to_string(),
        ),
        AuthErrorKind::UserNotFound => ("user_not_found", "User not found".to_string()),
      },
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Conflict(msg) => ("conflict", msg.clone()),
      ApiError::Forbidden(msg) => ("forbidden", msg.clone()),
      ApiError::Internal(msg) => {
        // Don't expose internal error details to clients
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert AuthError to ApiError
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      AuthError::EmailAlreadyExists => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
      AuthError::UserNotFound => ApiError::Auth(AuthErrorKind::UserNotFound),
      AuthError::InvalidSession => ApiError::Auth(AuthErrorKind::InvalidSession),
      AuthError::RateLimitExceeded => ApiError::Auth(AuthErrorKind::RateLimitExceeded),
      AuthError::ValueObject(err) => ApiError::Validation(err.to_string()),
      AuthError::Repository(err) => match err {
        RepositoryError::NotFound => ApiError::Auth(AuthErrorKind::UserNotFound),
        RepositoryError::DuplicateKey(_) => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
        _ => ApiError::Internal(err.to_string()),
      },
      AuthError::Hash(err) => ApiError::Internal(err.to_string()),
    }
  }
}

/// Convert SettingsError to ApiError
impl From<SettingsError> for ApiError {
  fn from(error: SettingsError) -> Self {
    match error {
      SettingsError::NotFound => ApiError::NotFound("Settings not found".to_string()),
      SettingsError::InvalidSetting(msg) => ApiError::Validation(msg),
      SettingsError::Database(e) => ApiError::Internal(e.to_string()),
      SettingsError::Repository(e) => ApiError::Internal(e),
    }
  }
}

/// Convert ClientError to ApiError
impl From<ClientError> for ApiError {
  fn from(error: ClientError) -> Self {
    match error {
      ClientError::NotFound(id) => ApiError::NotFound(format!("Client not found: {}", id)),
      ClientError::NameAlreadyExists(name) => {
        ApiError::Conflict(format!("A client named '{}' already exists", name))
      }
      ClientError::EmptyName => ApiError::Validation("Client name must not be empty".to_string()),
      ClientError::InvalidField(msg) => ApiError::Validation(msg),
      ClientError::Database(e) => ApiError::Internal(e.to_string()),
      ClientError::Repository(e) => ApiError::Internal(e),
    }
  }
}

/// Convert InvoiceError to ApiError
impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match error {
      InvoiceError::Validation(err) => ApiError::Validation(err.to_string()),
      InvoiceError::NotFound(id) => ApiError::NotFound(format!("Invoice not found: {}", id)),
      InvoiceError::NumberAlreadyExists(number) => {
        ApiError::Conflict(format!("Invoice number '{}' already exists", number))
      }
      InvoiceError::NotEditable => {
        ApiError::Conflict("Only draft invoices can be edited".to_string())
      }
      InvoiceError::InvalidStatusTransition { from, to } => {
        ApiError::Conflict(format!("Invalid status transition: {} -> {}", from, to))
      }
      InvoiceError::NoLineItems => {
        ApiError::Validation("An invoice needs at least one line item".to_string())
      }
      InvoiceError::InvalidField(msg) => ApiError::Validation(msg),
      InvoiceError::Settings(err) => ApiError::from(err),
      InvoiceError::Database(e) => ApiError::Internal(e.to_string()),
      InvoiceError::Repository(e) => ApiError::Internal(e),
    }
  }
}

/// Convert AdminError to ApiError
impl From<AdminError> for ApiError {
  fn from(error: AdminError) -> Self {
    match error {
      AdminError::UserNotFound(id) => ApiError::NotFound(format!("User not found: {}", id)),
      AdminError::CannotDeleteSelf => {
        ApiError::Forbidden("Admins cannot delete their own account".to_string())
      }
      AdminError::CannotChangeOwnRole => {
        ApiError::Forbidden("Admins cannot change their own role".to_string())
      }
      AdminError::SuperAdminRequired => {
        ApiError::Forbidden("Only super admins can manage super admin accounts".to_string())
      }
      AdminError::InvalidPlan(plan) => ApiError::Validation(format!("Unknown plan type: {}", plan)),
      AdminError::InvalidRole(role) => ApiError::Validation(format!("Unknown role: {}", role)),
      AdminError::NoSnapshot => ApiError::NotFound("No analytics snapshot available".to_string()),
      AdminError::Auth(err) => ApiError::from(err),
      AdminError::Database(e) => ApiError::Internal(e.to_string()),
      AdminError::Repository(e) => ApiError::Internal(e),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use uuid::Uuid;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::InvalidCredentials).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::RateLimitExceeded).status_code(),
      StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(
      ApiError::Conflict("test".to_string()).status_code(),
      StatusCode::CONFLICT
    );
    assert_eq!(
      ApiError::Forbidden("test".to_string()).status_code(),
      StatusCode::FORBIDDEN
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_auth_error_conversion() {
    let api_error: ApiError = AuthError::InvalidCredentials.into();
    assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);

    let api_error: ApiError = AuthError::EmailAlreadyExists.into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);
  }

  #[test]
  fn test_invoice_error_conversion() {
    let api_error: ApiError = InvoiceError::NotEditable.into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);

    let api_error: ApiError = InvoiceError::NotFound(Uuid::new_v4()).into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);
  }

  #[test]
  fn test_admin_error_conversion() {
    let api_error: ApiError = AdminError::CannotDeleteSelf.into();
    assert_eq!(api_error.status_code(), StatusCode::FORBIDDEN);

    let api_error: ApiError = AdminError::InvalidPlan("gold".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
  }
}
