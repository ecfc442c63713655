use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::UserSettings;
use super::errors::SettingsError;
use super::ports::SettingsRepository;
use super::value_objects::fallback_invoice_number;

/// Editable settings fields as submitted by the settings form.
///
/// Identity, counter bookkeeping and timestamps are managed server-side.
#[derive(Debug, Clone, Default)]
pub struct SettingsInput {
  pub company_name: Option<String>,
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

/// Settings service: reads with defaults, validated saves, number allocation
pub struct SettingsService {
  repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
  pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
    Self { repo }
  }

  /// Returns the user's settings, or an unsaved default row if none exist
  pub async fn get(&self, user_id: Uuid) -> Result<UserSettings, SettingsError> {
    match self.repo.find_by_user_id(user_id).await? {
      Some(settings) => Ok(settings),
      None => Ok(UserSettings::new_for_user(user_id)),
    }
  }

  /// Saves the submitted settings, merging over the existing row
  pub async fn save(
    &self,
    user_id: Uuid,
    input: SettingsInput,
  ) -> Result<UserSettings, SettingsError> {
    Self::validate(&input)?;

    let mut settings = self.get(user_id).await?;

    settings.company_name = input.company_name;
    settings.company_email = input.company_email;
    settings.company_phone = input.company_phone;
    settings.company_address = input.company_address;
    settings.company_website = input.company_website;
    settings.company_logo = input.company_logo;
    settings.default_theme = input.default_theme;
    settings.default_currency = input.default_currency;
    settings.default_tax_rate = input.default_tax_rate;
    settings.default_payment_terms = input.default_payment_terms;
    settings.default_notes = input.default_notes;
    settings.invoice_prefix = input.invoice_prefix;
    settings.invoice_number_format = input.invoice_number_format;
    if let Some(counter) = input.invoice_counter {
      settings.invoice_counter = counter;
    }
    settings.updated_at = Utc::now();

    self.repo.upsert(settings).await
  }

  /// Allocates the next invoice number for a user and advances the counter.
  ///
  /// Creates the settings row on first use. Falls back to a
  /// timestamp-suffixed number if the counter cannot be claimed.
  pub async fn allocate_invoice_number(&self, user_id: Uuid) -> Result<String, SettingsError> {
    if let Some(claimed) = self.repo.claim_next_counter(user_id).await? {
      return Ok(claimed.preview_invoice_number());
    }

    // No settings row yet, create one and retry once
    self
      .repo
      .upsert(UserSettings::new_for_user(user_id))
      .await?;

    match self.repo.claim_next_counter(user_id).await? {
      Some(claimed) => Ok(claimed.preview_invoice_number()),
      None => Ok(fallback_invoice_number()),
    }
  }

  fn validate(input: &SettingsInput) -> Result<(), SettingsError> {
    if let Some(rate) = input.default_tax_rate {
      if rate < Decimal::ZERO || rate > Decimal::from(100) {
        return Err(SettingsError::InvalidSetting(
          "default_tax_rate must be between 0 and 100".to_string(),
        ));
      }
      if rate.normalize().scale() > 2 {
        return Err(SettingsError::InvalidSetting(
          "default_tax_rate supports at most 2 decimal places".to_string(),
        ));
      }
    }

    if let Some(currency) = &input.default_currency {
      if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(SettingsError::InvalidSetting(
          "default_currency must be a 3-letter ISO code".to_string(),
        ));
      }
    }

    if let Some(counter) = input.invoice_counter {
      if counter < 1 {
        return Err(SettingsError::InvalidSetting(
          "invoice_counter must be at least 1".to_string(),
        ));
      }
    }

    if let Some(prefix) = &input.invoice_prefix {
      if prefix.len() > 32 {
        return Err(SettingsError::InvalidSetting(
          "invoice_prefix is too long".to_string(),
        ));
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_validate_tax_rate_bounds() {
    let mut input = SettingsInput::default();

    input.default_tax_rate = Some(dec!(19.00));
    assert!(SettingsService::validate(&input).is_ok());

    input.default_tax_rate = Some(dec!(-1));
    assert!(SettingsService::validate(&input).is_err());

    input.default_tax_rate = Some(dec!(100.01));
    assert!(SettingsService::validate(&input).is_err());
  }

  #[test]
  fn test_validate_tax_rate_scale() {
    let mut input = SettingsInput::default();

    input.default_tax_rate = Some(dec!(19.125));
    assert!(SettingsService::validate(&input).is_err());

    // Trailing zeros do not count against the scale
    input.default_tax_rate = Some(dec!(19.500));
    assert!(SettingsService::validate(&input).is_ok());
  }

  #[test]
  fn test_validate_currency_code() {
    let mut input = SettingsInput::default();

    input.default_currency = Some("EUR".to_string());
    assert!(SettingsService::validate(&input).is_ok());

    input.default_currency = Some("eur".to_string());
    assert!(SettingsService::validate(&input).is_err());

    input.default_currency = Some("EURO".to_string());
    assert!(SettingsService::validate(&input).is_err());
  }

  #[test]
  fn test_validate_counter_floor() {
    let mut input = SettingsInput::default();

    input.invoice_counter = Some(1);
    assert!(SettingsService::validate(&input).is_ok());

    input.invoice_counter = Some(0);
    assert!(SettingsService::validate(&input).is_err());
  }
}
