use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::InvoiceError;
use super::value_objects::{Currency, InvoiceStatus, PaymentTerms};

/// A single invoice line.
///
/// Stored invoices accumulated three item shapes over time:
/// `{description, quantity, price}` (canonical),
/// `{description, qty, unit_price}` and `{desc, hours, rate}`.
/// The aliases fold all of them into the canonical shape on read;
/// serialization always emits the canonical field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
  #[serde(alias = "desc")]
  pub description: String,
  #[serde(alias = "qty", alias = "hours")]
  pub quantity: Decimal,
  #[serde(alias = "unit_price", alias = "rate")]
  pub price: Decimal,
}

impl LineItem {
  /// Blank row the wizard starts with
  pub fn empty() -> Self {
    Self {
      description: String::new(),
      quantity: Decimal::ONE,
      price: Decimal::ZERO,
    }
  }

  pub fn amount(&self) -> Decimal {
    (self.quantity * self.price).round_dp(2)
  }
}

/// Free-form label/value pair rendered on the invoice footer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
  pub label: String,
  pub value: String,
}

/// Monetary totals derived from line items and the tax rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceTotals {
  pub subtotal: Decimal,
  pub tax_amount: Decimal,
  pub total_amount: Decimal,
}

impl InvoiceTotals {
  /// Computes totals: subtotal from line amounts, tax as a percentage of it
  pub fn compute(items: &[LineItem], tax_rate: Option<Decimal>) -> Self {
    let subtotal: Decimal = items.iter().map(LineItem::amount).sum();
    let subtotal = subtotal.round_dp(2);

    let tax_amount = match tax_rate {
      Some(rate) => (subtotal * rate / Decimal::from(100)).round_dp(2),
      None => Decimal::ZERO,
    };

    Self {
      subtotal,
      tax_amount,
      total_amount: subtotal + tax_amount,
    }
  }
}

/// Invoice aggregate with a point-in-time snapshot of the billed client.
///
/// The client is denormalized on purpose: editing or deleting a registry
/// client must never rewrite history on issued invoices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
  pub id: Uuid,
  pub user_id: Uuid,
  pub invoice_number: String,
  pub client_name: String,
  pub client_address: String,
  pub client_email: Option<String>,
  pub client_phone: Option<String>,
  pub invoice_date: NaiveDate,
  pub due_date: NaiveDate,
  pub payment_terms: PaymentTerms,
  pub currency: Currency,
  pub theme_id: String,
  pub theme_name: String,
  pub items: Vec<LineItem>,
  pub custom_fields: Vec<CustomField>,
  pub subtotal: Decimal,
  /// Percentage rate; `None` on legacy rows that only stored the amount
  pub tax_rate: Option<Decimal>,
  pub tax_amount: Decimal,
  pub total_amount: Decimal,
  pub status: InvoiceStatus,
  pub notes: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Invoice {
  /// Recomputes subtotal, tax and total from the current items and rate
  pub fn recalculate_totals(&mut self) {
    let totals = InvoiceTotals::compute(&self.items, self.tax_rate);
    self.subtotal = totals.subtotal;
    self.tax_amount = totals.tax_amount;
    self.total_amount = totals.total_amount;
  }

  pub fn is_editable(&self) -> bool {
    self.status.is_editable()
  }

  /// Moves the invoice to a new lifecycle status
  pub fn transition_to(&mut self, next: InvoiceStatus) -> Result<(), InvoiceError> {
    if !self.status.can_transition_to(next) {
      return Err(InvoiceError::InvalidStatusTransition {
        from: self.status,
        to: next,
      });
    }

    self.status = next;
    self.updated_at = Utc::now();
    Ok(())
  }

  /// Effective tax rate for display.
  ///
  /// Legacy rows stored only the computed amount, so the rate is derived
  /// back from the stored figures when it is missing.
  pub fn effective_tax_rate(&self) -> Option<Decimal> {
    if self.tax_rate.is_some() {
      return self.tax_rate;
    }

    if self.subtotal > Decimal::ZERO && self.tax_amount > Decimal::ZERO {
      Some((self.tax_amount / self.subtotal * Decimal::from(100)).round_dp(2))
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn item(description: &str, quantity: Decimal, price: Decimal) -> LineItem {
    LineItem {
      description: description.to_string(),
      quantity,
      price,
    }
  }

  #[test]
  fn test_line_item_canonical_shape() {
    let parsed: LineItem =
      serde_json::from_str(r#"{"description":"Design","quantity":2,"price":150}"#).unwrap();
    assert_eq!(parsed, item("Design", dec!(2), dec!(150)));
  }

  #[test]
  fn test_line_item_qty_unit_price_shape() {
    let parsed: LineItem =
      serde_json::from_str(r#"{"description":"Hosting","qty":1,"unit_price":49.99}"#).unwrap();
    assert_eq!(parsed, item("Hosting", dec!(1), dec!(49.99)));
  }

  #[test]
  fn test_line_item_hours_rate_shape() {
    let parsed: LineItem =
      serde_json::from_str(r#"{"desc":"Consulting","hours":7.5,"rate":120}"#).unwrap();
    assert_eq!(parsed, item("Consulting", dec!(7.5), dec!(120)));
    assert_eq!(parsed.amount(), dec!(900.00));
  }

  #[test]
  fn test_line_item_serializes_canonically() {
    let json = serde_json::to_string(&item("X", dec!(1), dec!(10))).unwrap();
    assert!(json.contains("\"quantity\""));
    assert!(json.contains("\"price\""));
    assert!(!json.contains("\"qty\""));
  }

  #[test]
  fn test_totals_computation() {
    let items = vec![
      item("Design", dec!(10), dec!(85)),
      item("Hosting", dec!(1), dec!(49.99)),
    ];

    let totals = InvoiceTotals::compute(&items, Some(dec!(19)));
    assert_eq!(totals.subtotal, dec!(899.99));
    assert_eq!(totals.tax_amount, dec!(171.00));
    assert_eq!(totals.total_amount, dec!(1070.99));
  }

  #[test]
  fn test_totals_without_tax() {
    let items = vec![item("Work", dec!(3), dec!(100))];
    let totals = InvoiceTotals::compute(&items, None);
    assert_eq!(totals.subtotal, dec!(300.00));
    assert_eq!(totals.tax_amount, dec!(0));
    assert_eq!(totals.total_amount, dec!(300.00));
  }

  #[test]
  fn test_legacy_tax_rate_derivation() {
    let mut invoice = sample_invoice();
    invoice.tax_rate = None;
    invoice.subtotal = dec!(200.00);
    invoice.tax_amount = dec!(38.00);

    assert_eq!(invoice.effective_tax_rate(), Some(dec!(19.00)));

    invoice.tax_amount = Decimal::ZERO;
    assert_eq!(invoice.effective_tax_rate(), None);
  }

  #[test]
  fn test_status_transition_guard() {
    let mut invoice = sample_invoice();
    assert!(invoice.transition_to(InvoiceStatus::Sent).is_ok());
    assert!(invoice.transition_to(InvoiceStatus::Paid).is_ok());
    assert!(invoice.transition_to(InvoiceStatus::Cancelled).is_err());
  }

  fn sample_invoice() -> Invoice {
    let now = Utc::now();
    Invoice {
      id: Uuid::new_v4(),
      user_id: Uuid::new_v4(),
      invoice_number: "INV-0001".to_string(),
      client_name: "Acme Ltd".to_string(),
      client_address: "1 Main St".to_string(),
      client_email: None,
      client_phone: None,
      invoice_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
      due_date: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
      payment_terms: PaymentTerms::default(),
      currency: Currency::default(),
      theme_id: "classic-white".to_string(),
      theme_name: "Classic White".to_string(),
      items: vec![item("Work", dec!(1), dec!(100))],
      custom_fields: Vec::new(),
      subtotal: dec!(100.00),
      tax_rate: None,
      tax_amount: Decimal::ZERO,
      total_amount: dec!(100.00),
      status: InvoiceStatus::Draft,
      notes: None,
      created_at: now,
      updated_at: now,
    }
  }
}
