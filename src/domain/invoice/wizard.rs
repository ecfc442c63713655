use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::entities::{CustomField, Invoice, LineItem};
use super::themes;
use super::value_objects::{Currency, PaymentTerms};
use crate::domain::settings::entities::UserSettings;

/// The five steps of the invoice creation wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
  ChooseTheme,
  ClientInfo,
  InvoiceItems,
  CustomFields,
  Preview,
}

impl WizardStep {
  pub const ALL: [WizardStep; 5] = [
    WizardStep::ChooseTheme,
    WizardStep::ClientInfo,
    WizardStep::InvoiceItems,
    WizardStep::CustomFields,
    WizardStep::Preview,
  ];

  pub fn title(&self) -> &'static str {
    match self {
      WizardStep::ChooseTheme => "Choose Theme",
      WizardStep::ClientInfo => "Client Info",
      WizardStep::InvoiceItems => "Invoice Items",
      WizardStep::CustomFields => "Custom Fields",
      WizardStep::Preview => "Preview",
    }
  }

  pub fn index(&self) -> usize {
    Self::ALL.iter().position(|s| s == self).unwrap_or(0)
  }
}

/// Pre-filled values handed to the wizard when it opens.
///
/// Field precedence, lowest to highest: built-in defaults, the user's saved
/// settings, and (in edit mode) the invoice being edited.
#[derive(Debug, Clone, Serialize)]
pub struct DraftSeed {
  /// Number the counter would produce; nothing is claimed until save
  pub invoice_number: String,
  pub client_name: String,
  pub client_address: String,
  pub client_email: Option<String>,
  pub client_phone: Option<String>,
  pub invoice_date: NaiveDate,
  pub due_date: NaiveDate,
  pub payment_terms: PaymentTerms,
  pub currency: Currency,
  pub tax_rate: Option<Decimal>,
  pub theme_id: String,
  pub theme_name: String,
  pub items: Vec<LineItem>,
  pub custom_fields: Vec<CustomField>,
  pub notes: Option<String>,
  /// Critical company fields still missing from settings
  pub missing_company_fields: Vec<&'static str>,
}

impl DraftSeed {
  /// Seeds a fresh draft from the user's settings
  pub fn from_settings(settings: &UserSettings) -> Self {
    let payment_terms = settings
      .default_payment_terms
      .as_deref()
      .and_then(|s| s.parse::<PaymentTerms>().ok())
      .unwrap_or_default();

    let currency = settings
      .default_currency
      .as_deref()
      .and_then(|s| Currency::new(s).ok())
      .unwrap_or_default();

    let theme = themes::resolve_theme(settings.default_theme.as_deref());

    let invoice_date = Utc::now().date_naive();
    let due_date = payment_terms.due_date_from(invoice_date);

    Self {
      invoice_number: settings.preview_invoice_number(),
      client_name: String::new(),
      client_address: String::new(),
      client_email: None,
      client_phone: None,
      invoice_date,
      due_date,
      payment_terms,
      currency,
      tax_rate: settings.default_tax_rate,
      theme_id: theme.id.to_string(),
      theme_name: theme.name.to_string(),
      items: vec![LineItem::empty()],
      custom_fields: Vec::new(),
      notes: settings.default_notes.clone(),
      missing_company_fields: settings.missing_critical_fields(),
    }
  }

  /// Seeds the wizard from an existing invoice for edit mode
  pub fn from_invoice(settings: &UserSettings, invoice: &Invoice) -> Self {
    Self {
      invoice_number: invoice.invoice_number.clone(),
      client_name: invoice.client_name.clone(),
      client_address: invoice.client_address.clone(),
      client_email: invoice.client_email.clone(),
      client_phone: invoice.client_phone.clone(),
      invoice_date: invoice.invoice_date,
      due_date: invoice.due_date,
      payment_terms: invoice.payment_terms.clone(),
      currency: invoice.currency.clone(),
      tax_rate: invoice.effective_tax_rate(),
      theme_id: invoice.theme_id.clone(),
      theme_name: invoice.theme_name.clone(),
      items: if invoice.items.is_empty() {
        vec![LineItem::empty()]
      } else {
        invoice.items.clone()
      },
      custom_fields: invoice.custom_fields.clone(),
      notes: invoice.notes.clone(),
      missing_company_fields: settings.missing_critical_fields(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  #[test]
  fn test_steps_are_ordered() {
    assert_eq!(WizardStep::ChooseTheme.index(), 0);
    assert_eq!(WizardStep::Preview.index(), 4);
    assert_eq!(WizardStep::ALL.len(), 5);
  }

  #[test]
  fn test_seed_uses_built_in_defaults_when_settings_empty() {
    let settings = UserSettings::new_for_user(Uuid::new_v4());
    let seed = DraftSeed::from_settings(&settings);

    assert_eq!(seed.invoice_number, "INV-0001");
    assert_eq!(seed.payment_terms, PaymentTerms::net(30));
    assert_eq!(seed.currency.as_str(), "USD");
    assert_eq!(seed.theme_id, "classic-white");
    assert_eq!(seed.tax_rate, None);
    assert_eq!(
      seed.due_date,
      seed.payment_terms.due_date_from(seed.invoice_date)
    );
    assert_eq!(seed.items.len(), 1);
    assert!(seed.items[0].description.is_empty());
    assert_eq!(seed.items[0].quantity, Decimal::ONE);
    assert!(seed.custom_fields.is_empty());
    assert!(seed.client_name.is_empty());
    assert!(!seed.missing_company_fields.is_empty());
  }

  #[test]
  fn test_seed_prefers_saved_settings() {
    let mut settings = UserSettings::new_for_user(Uuid::new_v4());
    settings.default_payment_terms = Some("Net 15".to_string());
    settings.default_currency = Some("EUR".to_string());
    settings.default_theme = Some("elegant-green".to_string());
    settings.default_tax_rate = Some(dec!(19));
    settings.default_notes = Some("Thank you!".to_string());

    let seed = DraftSeed::from_settings(&settings);
    assert_eq!(seed.payment_terms.days(), 15);
    assert_eq!(seed.currency.as_str(), "EUR");
    assert_eq!(seed.theme_id, "elegant-green");
    assert_eq!(seed.tax_rate, Some(dec!(19)));
    assert_eq!(seed.notes.as_deref(), Some("Thank you!"));
  }

  #[test]
  fn test_seed_ignores_unparseable_settings_values() {
    let mut settings = UserSettings::new_for_user(Uuid::new_v4());
    settings.default_payment_terms = Some("someday".to_string());
    settings.default_currency = Some("DOLLARS".to_string());
    settings.default_theme = Some("missing-theme".to_string());

    let seed = DraftSeed::from_settings(&settings);
    assert_eq!(seed.payment_terms, PaymentTerms::net(30));
    assert_eq!(seed.currency.as_str(), "USD");
    assert_eq!(seed.theme_id, "classic-white");
  }
}
