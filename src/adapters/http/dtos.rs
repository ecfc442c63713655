use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::auth::value_objects::UserRole;
use crate::domain::invoice::entities::{CustomField, LineItem};
use crate::domain::invoice::themes::ThemeMetadata;

/// Request for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub password: String,

  /// User's full name
  #[validate(length(
    min = 1,
    max = 255,
    message = "Full name must be between 1 and 255 characters"
  ))]
  pub full_name: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,

  /// Whether to create a long-lived session
  #[serde(default)]
  pub remember_me: bool,
}

/// Response after successful user registration
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
  pub user_id: Uuid,
  pub email: String,
  pub full_name: String,
  pub session_token: String,
  pub expires_at: DateTime<Utc>,
}

/// Response after successful user login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  pub user_id: Uuid,
  pub email: String,
  pub full_name: String,
  pub role: UserRole,
  pub session_token: String,
  pub expires_at: DateTime<Utc>,
}

/// Response after successful logout from all devices
#[derive(Debug, Clone, Serialize)]
pub struct LogoutAllResponse {
  /// Number of sessions that were closed
  pub sessions_closed: usize,
  pub message: String,
}

/// Response containing current user information
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
  pub user_id: Uuid,
  pub email: String,
  pub full_name: String,
  pub role: UserRole,
  pub created_at: DateTime<Utc>,
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

/// Request for saving the settings form.
///
/// The form submits the full row, so absent fields are cleared; range
/// checks beyond the basic format validation live in the settings
/// service.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SettingsRequest {
  #[validate(length(max = 255, message = "Company name is too long"))]
  pub company_name: Option<String>,

  #[validate(email(message = "Invalid company email format"))]
  pub company_email: Option<String>,

  pub company_phone: Option<String>,
  pub company_address: Option<String>,
  pub company_website: Option<String>,
  pub company_logo: Option<String>,
  pub default_theme: Option<String>,
  pub default_currency: Option<String>,
  pub default_tax_rate: Option<Decimal>,
  pub default_payment_terms: Option<String>,
  pub default_notes: Option<String>,
  pub invoice_prefix: Option<String>,
  pub invoice_counter: Option<i32>,
  pub invoice_number_format: Option<String>,
}

/// Request for creating or updating a client
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientRequest {
  #[validate(length(
    min = 1,
    max = 255,
    message = "Client name must be between 1 and 255 characters"
  ))]
  pub name: String,

  #[validate(email(message = "Invalid client email format"))]
  pub email: Option<String>,

  pub phone: Option<String>,
  pub tax_number: Option<String>,
  pub website: Option<String>,
  pub address: Option<String>,
}

/// Query parameters for the client list
#[derive(Debug, Clone, Deserialize)]
pub struct ClientListParams {
  pub search: Option<String>,

  #[serde(default)]
  pub include_archived: bool,
}

/// Request for creating or updating an invoice from the wizard's
/// review step.
///
/// Line items accept the legacy field spellings (`desc`, `qty`,
/// `hours`, `unit_price`, `rate`) next to the canonical ones.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvoiceRequest {
  /// Explicit invoice number; leave empty to allocate the next one
  pub invoice_number: Option<String>,

  #[validate(length(
    min = 1,
    max = 255,
    message = "Client name must be between 1 and 255 characters"
  ))]
  pub client_name: String,

  #[validate(length(min = 1, message = "Client address is required"))]
  pub client_address: String,

  #[validate(email(message = "Invalid client email format"))]
  pub client_email: Option<String>,

  pub client_phone: Option<String>,
  pub invoice_date: NaiveDate,

  /// Derived from payment terms when absent
  pub due_date: Option<NaiveDate>,

  /// Payment terms label, e.g. "Net 30" or "Due on Receipt"
  pub payment_terms: Option<String>,

  /// ISO 4217 currency code
  pub currency: Option<String>,

  pub theme_id: Option<String>,
  pub items: Vec<LineItem>,

  #[serde(default)]
  pub custom_fields: Vec<CustomField>,

  pub tax_rate: Option<Decimal>,
  pub notes: Option<String>,
}

/// Query parameters for the invoice list
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceListParams {
  pub status: Option<String>,
  pub search: Option<String>,
  pub limit: Option<i64>,
  pub offset: Option<i64>,
}

/// Request for moving an invoice through its lifecycle
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeStatusRequest {
  #[validate(length(min = 1, message = "Status is required"))]
  pub status: String,
}

/// Query parameters for opening the invoice wizard
#[derive(Debug, Clone, Deserialize)]
pub struct DraftParams {
  /// Invoice to edit; absent for a fresh draft
  pub editing_id: Option<Uuid>,
}

/// Response for the theme picker
#[derive(Debug, Clone, Serialize)]
pub struct ThemeListResponse {
  pub themes: &'static [ThemeMetadata],
  pub default_theme_id: &'static str,
}

/// Query parameters for the admin user table
#[derive(Debug, Clone, Deserialize)]
pub struct AdminUserListParams {
  pub search: Option<String>,
  pub role: Option<String>,
  pub limit: Option<i64>,
  pub offset: Option<i64>,
}

/// Request for changing a user's role
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRoleRequest {
  #[validate(length(min = 1, message = "Role is required"))]
  pub role: String,
}

/// Request for changing a user's plan
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePlanRequest {
  #[validate(length(min = 1, message = "Plan is required"))]
  pub plan: String,
}

/// Query parameters for the analytics endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsParams {
  /// Recompute the snapshot before returning it
  #[serde(default)]
  pub refresh: bool,
}

#[cfg(test)]
mod tests {
  use super::*;
  use validator::Validate;

  #[test]
  fn test_register_request_validation_valid() {
    let request = RegisterRequest {
      email: "test@example.com".to_string(),
      password: "SecureP@ss123".to_string(),
      full_name: "Test User".to_string(),
    };

    assert!(request.validate().is_ok());
  }

  #[test]
  fn test_register_request_validation_invalid_email() {
    let request = RegisterRequest {
      email: "invalid-email".to_string(),
      password: "SecureP@ss123".to_string(),
      full_name: "Test User".to_string(),
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_register_request_validation_short_password() {
    let request = RegisterRequest {
      email: "test@example.com".to_string(),
      password: "short".to_string(),
      full_name: "Test User".to_string(),
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_login_request_remember_me_default() {
    let json = r#"{"email": "test@example.com", "password": "password"}"#;
    let request: LoginRequest = serde_json::from_str(json).unwrap();

    assert!(!request.remember_me);
  }

  #[test]
  fn test_invoice_request_accepts_legacy_item_fields() {
    let json = r#"{
      "client_name": "Acme GmbH",
      "client_address": "1 Main St",
      "invoice_date": "2025-06-01",
      "items": [
        {"desc": "Consulting", "hours": "8", "rate": "120.00"}
      ]
    }"#;

    let request: InvoiceRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.items.len(), 1);
    assert_eq!(request.items[0].description, "Consulting");
  }

  #[test]
  fn test_client_list_params_defaults() {
    let params: ClientListParams = serde_json::from_str("{}").unwrap();
    assert!(params.search.is_none());
    assert!(!params.include_archived);
  }
}
