use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{CustomField, Invoice, InvoiceTotals, LineItem};
use super::errors::InvoiceError;
use super::ports::{InvoiceListQuery, InvoicePage, InvoiceRepository};
use super::themes;
use super::value_objects::{Currency, InvoiceStatus, PaymentTerms};
use super::wizard::DraftSeed;
use crate::domain::settings::services::SettingsService;

/// How many times to re-allocate when a generated number collides
const NUMBER_ALLOCATION_RETRIES: usize = 3;

/// Invoice fields as submitted from the wizard's review step.
///
/// Totals are never accepted from the client; they are recomputed here.
#[derive(Debug, Clone)]
pub struct InvoiceInput {
  /// Explicit number; when empty the next one is allocated from settings
  pub invoice_number: Option<String>,
  pub client_name: String,
  pub client_address: String,
  pub client_email: Option<String>,
  pub client_phone: Option<String>,
  pub invoice_date: NaiveDate,
  /// Derived from payment terms when absent
  pub due_date: Option<NaiveDate>,
  pub payment_terms: Option<PaymentTerms>,
  pub currency: Option<Currency>,
  pub theme_id: Option<String>,
  pub items: Vec<LineItem>,
  pub custom_fields: Vec<CustomField>,
  pub tax_rate: Option<Decimal>,
  pub notes: Option<String>,
}

/// Invoice service: wizard seeding, defaulting, derivation and lifecycle
pub struct InvoiceService {
  repo: Arc<dyn InvoiceRepository>,
  settings: Arc<SettingsService>,
}

impl InvoiceService {
  pub fn new(repo: Arc<dyn InvoiceRepository>, settings: Arc<SettingsService>) -> Self {
    Self { repo, settings }
  }

  /// Seeds the wizard: fresh draft from settings, or edit mode from an
  /// existing invoice
  pub async fn prepare_draft(
    &self,
    user_id: Uuid,
    editing_id: Option<Uuid>,
  ) -> Result<DraftSeed, InvoiceError> {
    let settings = self.settings.get(user_id).await?;

    match editing_id {
      Some(id) => {
        let invoice = self
          .repo
          .find_by_id(user_id, id)
          .await?
          .ok_or(InvoiceError::NotFound(id))?;
        Ok(DraftSeed::from_invoice(&settings, &invoice))
      }
      None => Ok(DraftSeed::from_settings(&settings)),
    }
  }

  /// Creates an invoice as a draft, allocating a number when none is given
  pub async fn create(&self, user_id: Uuid, input: InvoiceInput) -> Result<Invoice, InvoiceError> {
    Self::validate(&input)?;

    let explicit_number = input
      .invoice_number
      .as_deref()
      .map(str::trim)
      .filter(|n| !n.is_empty())
      .map(str::to_string);

    let invoice_number = match explicit_number {
      Some(number) => {
        if self.repo.number_exists(user_id, &number).await? {
          return Err(InvoiceError::NumberAlreadyExists(number));
        }
        number
      }
      None => self.allocate_number(user_id).await?,
    };

    let invoice = self.build_invoice(user_id, invoice_number, input);
    self.repo.create(invoice).await
  }

  /// Updates a draft invoice; issued invoices are immutable
  pub async fn update(
    &self,
    user_id: Uuid,
    invoice_id: Uuid,
    input: InvoiceInput,
  ) -> Result<Invoice, InvoiceError> {
    Self::validate(&input)?;

    let existing = self
      .repo
      .find_by_id(user_id, invoice_id)
      .await?
      .ok_or(InvoiceError::NotFound(invoice_id))?;

    if !existing.is_editable() {
      return Err(InvoiceError::NotEditable);
    }

    let requested_number = input
      .invoice_number
      .as_deref()
      .map(str::trim)
      .filter(|n| !n.is_empty())
      .map(str::to_string)
      .unwrap_or_else(|| existing.invoice_number.clone());

    if requested_number != existing.invoice_number
      && self.repo.number_exists(user_id, &requested_number).await?
    {
      return Err(InvoiceError::NumberAlreadyExists(requested_number));
    }

    let mut updated = self.build_invoice(user_id, requested_number, input);
    updated.id = existing.id;
    updated.status = existing.status;
    updated.created_at = existing.created_at;

    self.repo.update(updated).await
  }

  pub async fn get(&self, user_id: Uuid, invoice_id: Uuid) -> Result<Invoice, InvoiceError> {
    self
      .repo
      .find_by_id(user_id, invoice_id)
      .await?
      .ok_or(InvoiceError::NotFound(invoice_id))
  }

  pub async fn list(
    &self,
    user_id: Uuid,
    query: InvoiceListQuery,
  ) -> Result<InvoicePage, InvoiceError> {
    self.repo.list(user_id, &query).await
  }

  /// Moves an invoice through its lifecycle, enforcing allowed transitions
  pub async fn change_status(
    &self,
    user_id: Uuid,
    invoice_id: Uuid,
    status: InvoiceStatus,
  ) -> Result<Invoice, InvoiceError> {
    let mut invoice = self.get(user_id, invoice_id).await?;
    invoice.transition_to(status)?;
    self.repo.update(invoice).await
  }

  pub async fn delete(&self, user_id: Uuid, invoice_id: Uuid) -> Result<(), InvoiceError> {
    self.get(user_id, invoice_id).await?;
    self.repo.delete(user_id, invoice_id).await
  }

  /// Allocates the next number, retrying past counters that were already
  /// used up by manually numbered invoices
  async fn allocate_number(&self, user_id: Uuid) -> Result<String, InvoiceError> {
    for _ in 0..NUMBER_ALLOCATION_RETRIES {
      let number = self.settings.allocate_invoice_number(user_id).await?;
      if !self.repo.number_exists(user_id, &number).await? {
        return Ok(number);
      }
    }

    Err(InvoiceError::InvalidField(
      "could not allocate a free invoice number".to_string(),
    ))
  }

  fn build_invoice(&self, user_id: Uuid, invoice_number: String, input: InvoiceInput) -> Invoice {
    let payment_terms = input.payment_terms.unwrap_or_default();
    let due_date = input
      .due_date
      .unwrap_or_else(|| payment_terms.due_date_from(input.invoice_date));
    let currency = input.currency.unwrap_or_default();
    let theme = themes::resolve_theme(input.theme_id.as_deref());
    let totals = InvoiceTotals::compute(&input.items, input.tax_rate);
    let now = Utc::now();

    Invoice {
      id: Uuid::new_v4(),
      user_id,
      invoice_number,
      client_name: input.client_name.trim().to_string(),
      client_address: input.client_address.trim().to_string(),
      client_email: input.client_email.filter(|s| !s.trim().is_empty()),
      client_phone: input.client_phone.filter(|s| !s.trim().is_empty()),
      invoice_date: input.invoice_date,
      due_date,
      payment_terms,
      currency,
      theme_id: theme.id.to_string(),
      theme_name: theme.name.to_string(),
      items: input.items,
      custom_fields: input.custom_fields,
      subtotal: totals.subtotal,
      tax_rate: input.tax_rate,
      tax_amount: totals.tax_amount,
      total_amount: totals.total_amount,
      status: InvoiceStatus::Draft,
      notes: input.notes.filter(|s| !s.trim().is_empty()),
      created_at: now,
      updated_at: now,
    }
  }

  fn validate(input: &InvoiceInput) -> Result<(), InvoiceError> {
    if input.client_name.trim().is_empty() {
      return Err(InvoiceError::InvalidField(
        "client_name must not be empty".to_string(),
      ));
    }

    if input.client_address.trim().is_empty() {
      return Err(InvoiceError::InvalidField(
        "client_address must not be empty".to_string(),
      ));
    }

    if input.items.is_empty() {
      return Err(InvoiceError::NoLineItems);
    }

    for (index, item) in input.items.iter().enumerate() {
      if item.description.trim().is_empty() {
        return Err(InvoiceError::InvalidField(format!(
          "item {} has no description",
          index + 1
        )));
      }
      if item.quantity <= Decimal::ZERO {
        return Err(InvoiceError::InvalidField(format!(
          "item {} quantity must be positive",
          index + 1
        )));
      }
      if item.price < Decimal::ZERO {
        return Err(InvoiceError::InvalidField(format!(
          "item {} price must not be negative",
          index + 1
        )));
      }
    }

    if let Some(rate) = input.tax_rate {
      if rate < Decimal::ZERO || rate > Decimal::from(100) {
        return Err(InvoiceError::InvalidField(
          "tax_rate must be between 0 and 100".to_string(),
        ));
      }
      if rate.normalize().scale() > 2 {
        return Err(InvoiceError::InvalidField(
          "tax_rate supports at most 2 decimal places".to_string(),
        ));
      }
    }

    if let Some(due) = input.due_date {
      if due < input.invoice_date {
        return Err(InvoiceError::InvalidField(
          "due_date cannot be before invoice_date".to_string(),
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

  fn base_input() -> InvoiceInput {
    InvoiceInput {
      invoice_number: None,
      client_name: "Acme Ltd".to_string(),
      client_address: "1 Main St".to_string(),
      client_email: None,
      client_phone: None,
      invoice_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
      due_date: None,
      payment_terms: None,
      currency: None,
      theme_id: None,
      items: vec![LineItem {
        description: "Work".to_string(),
        quantity: dec!(2),
        price: dec!(150),
      }],
      custom_fields: Vec::new(),
      tax_rate: Some(dec!(20)),
      notes: None,
    }
  }

  #[test]
  fn test_validate_accepts_complete_input() {
    assert!(InvoiceService::validate(&base_input()).is_ok());
  }

  #[test]
  fn test_validate_rejects_empty_items() {
    let mut input = base_input();
    input.items.clear();
    assert!(matches!(
      InvoiceService::validate(&input),
      Err(InvoiceError::NoLineItems)
    ));
  }

  #[test]
  fn test_validate_rejects_bad_quantities() {
    let mut input = base_input();
    input.items[0].quantity = Decimal::ZERO;
    assert!(InvoiceService::validate(&input).is_err());

    let mut input = base_input();
    input.items[0].price = dec!(-1);
    assert!(InvoiceService::validate(&input).is_err());
  }

  #[test]
  fn test_validate_rejects_due_before_issue() {
    let mut input = base_input();
    input.due_date = Some(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    assert!(InvoiceService::validate(&input).is_err());
  }

  #[test]
  fn test_validate_rejects_out_of_range_tax() {
    let mut input = base_input();
    input.tax_rate = Some(dec!(101));
    assert!(InvoiceService::validate(&input).is_err());
  }

  #[test]
  fn test_validate_rejects_tax_with_too_many_decimals() {
    let mut input = base_input();
    input.tax_rate = Some(dec!(20.005));
    assert!(InvoiceService::validate(&input).is_err());

    input.tax_rate = Some(dec!(20.50));
    assert!(InvoiceService::validate(&input).is_ok());
  }
}
