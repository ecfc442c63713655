use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::InvoiceNumberFormat;

/// Per-user settings: company profile, invoice defaults and numbering state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
  pub id: Uuid,
  pub user_id: Uuid,
  pub company_name: Option<String>,
  pub company_email: Option<String>,
  pub company_phone: Option<String>,
  pub company_address: Option<String>,
  pub company_website: Option<String>,
  /// Data URL or hosted URL of the company logo
  pub company_logo: Option<String>,
  pub default_theme: Option<String>,
  pub default_currency: Option<String>,
  pub default_tax_rate: Option<Decimal>,
  pub default_payment_terms: Option<String>,
  pub default_notes: Option<String>,
  pub invoice_prefix: Option<String>,
  /// Next counter value to be assigned, starts at 1
  pub invoice_counter: i32,
  pub invoice_number_format: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl UserSettings {
  /// Creates an empty settings row for a user who has never saved anything
  pub fn new_for_user(user_id: Uuid) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      company_name: None,
      company_email: None,
      company_phone: None,
      company_address: None,
      company_website: None,
      company_logo: None,
      default_theme: None,
      default_currency: None,
      default_tax_rate: None,
      default_payment_terms: None,
      default_notes: None,
      invoice_prefix: None,
      invoice_counter: 1,
      invoice_number_format: None,
      created_at: now,
      updated_at: now,
    }
  }

  /// Effective invoice prefix, falling back to the built-in default
  pub fn effective_prefix(&self) -> &str {
    self.invoice_prefix.as_deref().unwrap_or("INV")
  }

  /// Effective number format, falling back to the built-in default
  pub fn effective_format(&self) -> InvoiceNumberFormat {
    InvoiceNumberFormat::new(
      self
        .invoice_number_format
        .as_deref()
        .unwrap_or(InvoiceNumberFormat::DEFAULT_PATTERN),
    )
  }

  /// Renders the invoice number the current counter would produce
  pub fn preview_invoice_number(&self) -> String {
    self
      .effective_format()
      .render(self.effective_prefix(), self.invoice_counter)
  }

  /// Lists the critical company fields that are still empty.
  ///
  /// An invoice cannot be issued without these, so the wizard blocks on them.
  pub fn missing_critical_fields(&self) -> Vec<&'static str> {
    let mut missing = Vec::new();

    if self.company_name.as_deref().is_none_or(str::is_empty) {
      missing.push("company_name");
    }
    if self.company_email.as_deref().is_none_or(str::is_empty) {
      missing.push("company_email");
    }
    if self.company_address.as_deref().is_none_or(str::is_empty) {
      missing.push("company_address");
    }

    missing
  }

  /// Lists all recommended company fields that are still empty.
  ///
  /// Starts with the critical fields; the rest only degrade how the
  /// invoice renders.
  pub fn missing_recommended_fields(&self) -> Vec<&'static str> {
    let mut missing = self.missing_critical_fields();

    if self.company_phone.as_deref().is_none_or(str::is_empty) {
      missing.push("company_phone");
    }
    if self.company_website.as_deref().is_none_or(str::is_empty) {
      missing.push("company_website");
    }
    if self.company_logo.as_deref().is_none_or(str::is_empty) {
      missing.push("company_logo");
    }

    missing
  }

  pub fn is_invoice_ready(&self) -> bool {
    self.missing_critical_fields().is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_settings_start_at_counter_one() {
    let settings = UserSettings::new_for_user(Uuid::new_v4());
    assert_eq!(settings.invoice_counter, 1);
    assert_eq!(settings.effective_prefix(), "INV");
    assert_eq!(settings.preview_invoice_number(), "INV-0001");
  }

  #[test]
  fn test_custom_prefix_and_format() {
    let mut settings = UserSettings::new_for_user(Uuid::new_v4());
    settings.invoice_prefix = Some("ACME".to_string());
    settings.invoice_number_format = Some("{prefix}/{number}".to_string());
    settings.invoice_counter = 42;

    assert_eq!(settings.preview_invoice_number(), "ACME/0042");
  }

  #[test]
  fn test_missing_critical_fields() {
    let mut settings = UserSettings::new_for_user(Uuid::new_v4());
    assert!(!settings.is_invoice_ready());
    assert_eq!(
      settings.missing_critical_fields(),
      vec!["company_name", "company_email", "company_address"]
    );

    settings.company_name = Some("Acme Ltd".to_string());
    settings.company_email = Some("billing@acme.test".to_string());
    settings.company_address = Some("1 Main St".to_string());
    assert!(settings.is_invoice_ready());

    settings.company_email = Some(String::new());
    assert_eq!(settings.missing_critical_fields(), vec!["company_email"]);
  }

  #[test]
  fn test_recommended_fields_extend_critical_ones() {
    let mut settings = UserSettings::new_for_user(Uuid::new_v4());
    settings.company_name = Some("Acme Ltd".to_string());
    settings.company_email = Some("billing@acme.test".to_string());
    settings.company_address = Some("1 Main St".to_string());
    settings.company_phone = Some("+1 555 0100".to_string());

    assert!(settings.missing_critical_fields().is_empty());
    assert_eq!(
      settings.missing_recommended_fields(),
      vec!["company_website", "company_logo"]
    );
  }
}
