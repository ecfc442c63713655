use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Unknown invoice status: {0}")]
  InvalidStatus(String),

  #[error("Unrecognized payment terms: {0}")]
  InvalidPaymentTerms(String),

  #[error("Invalid currency code: {0}")]
  InvalidCurrency(String),
}

// ============================================================================
// InvoiceStatus Value Object
// ============================================================================

/// Invoice lifecycle status.
///
/// Allowed transitions: draft -> sent or cancelled; sent -> paid, overdue or
/// cancelled; overdue -> paid or cancelled. Paid and cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
  Draft,
  Sent,
  Paid,
  Overdue,
  Cancelled,
}

impl InvoiceStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Draft => "draft",
      InvoiceStatus::Sent => "sent",
      InvoiceStatus::Paid => "paid",
      InvoiceStatus::Overdue => "overdue",
      InvoiceStatus::Cancelled => "cancelled",
    }
  }

  /// Only drafts may have their content edited
  pub fn is_editable(&self) -> bool {
    matches!(self, InvoiceStatus::Draft)
  }

  pub fn is_terminal(&self) -> bool {
    matches!(self, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
  }

  pub fn can_transition_to(&self, next: InvoiceStatus) -> bool {
    use InvoiceStatus::*;
    matches!(
      (self, next),
      (Draft, Sent)
        | (Draft, Cancelled)
        | (Sent, Paid)
        | (Sent, Overdue)
        | (Sent, Cancelled)
        | (Overdue, Paid)
        | (Overdue, Cancelled)
    )
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "draft" => Ok(InvoiceStatus::Draft),
      "sent" => Ok(InvoiceStatus::Sent),
      "paid" => Ok(InvoiceStatus::Paid),
      "overdue" => Ok(InvoiceStatus::Overdue),
      "cancelled" => Ok(InvoiceStatus::Cancelled),
      other => Err(ValueObjectError::InvalidStatus(other.to_string())),
    }
  }
}

impl fmt::Display for InvoiceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ============================================================================
// PaymentTerms Value Object
// ============================================================================

/// Payment terms expressed as days until due.
///
/// Parses the conventional labels: "Due on Receipt" and "Net N".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTerms {
  label: String,
  days: i64,
}

impl PaymentTerms {
  pub fn net(days: i64) -> Self {
    Self {
      label: format!("Net {}", days),
      days,
    }
  }

  pub fn due_on_receipt() -> Self {
    Self {
      label: "Due on Receipt".to_string(),
      days: 0,
    }
  }

  pub fn label(&self) -> &str {
    &self.label
  }

  pub fn days(&self) -> i64 {
    self.days
  }

  /// Due date derived from the invoice date
  pub fn due_date_from(&self, invoice_date: NaiveDate) -> NaiveDate {
    invoice_date + Duration::days(self.days)
  }
}

impl Default for PaymentTerms {
  fn default() -> Self {
    Self::net(30)
  }
}

impl FromStr for PaymentTerms {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();

    if trimmed.eq_ignore_ascii_case("due on receipt") {
      return Ok(Self::due_on_receipt());
    }

    if let Some(days_part) = trimmed
      .strip_prefix("Net ")
      .or_else(|| trimmed.strip_prefix("net "))
    {
      if let Ok(days) = days_part.trim().parse::<i64>() {
        if (0..=365).contains(&days) {
          return Ok(Self::net(days));
        }
      }
    }

    Err(ValueObjectError::InvalidPaymentTerms(trimmed.to_string()))
  }
}

impl fmt::Display for PaymentTerms {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.label)
  }
}

// Serialized as the human-readable label ("Net 30")
impl Serialize for PaymentTerms {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.label)
  }
}

impl<'de> Deserialize<'de> for PaymentTerms {
  fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let label = String::deserialize(deserializer)?;
    label.parse().map_err(serde::de::Error::custom)
  }
}

// ============================================================================
// Currency Value Object
// ============================================================================

/// ISO 4217 currency code, stored and compared uppercase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
  pub fn new(code: impl Into<String>) -> Result<Self, ValueObjectError> {
    let code = code.into();
    let upper = code.to_ascii_uppercase();

    if upper.len() != 3 || !upper.chars().all(|c| c.is_ascii_uppercase()) {
      return Err(ValueObjectError::InvalidCurrency(code));
    }

    Ok(Self(upper))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl Default for Currency {
  fn default() -> Self {
    Self("USD".to_string())
  }
}

impl fmt::Display for Currency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_transitions() {
    use InvoiceStatus::*;

    assert!(Draft.can_transition_to(Sent));
    assert!(Draft.can_transition_to(Cancelled));
    assert!(!Draft.can_transition_to(Paid));

    assert!(Sent.can_transition_to(Paid));
    assert!(Sent.can_transition_to(Overdue));
    assert!(Sent.can_transition_to(Cancelled));
    assert!(!Sent.can_transition_to(Draft));

    assert!(Overdue.can_transition_to(Paid));
    assert!(Overdue.can_transition_to(Cancelled));

    assert!(!Paid.can_transition_to(Cancelled));
    assert!(!Cancelled.can_transition_to(Sent));
  }

  #[test]
  fn test_status_editability() {
    assert!(InvoiceStatus::Draft.is_editable());
    assert!(!InvoiceStatus::Sent.is_editable());
    assert!(!InvoiceStatus::Paid.is_editable());
  }

  #[test]
  fn test_status_round_trip() {
    for status in [
      InvoiceStatus::Draft,
      InvoiceStatus::Sent,
      InvoiceStatus::Paid,
      InvoiceStatus::Overdue,
      InvoiceStatus::Cancelled,
    ] {
      assert_eq!(status.as_str().parse::<InvoiceStatus>().unwrap(), status);
    }
    assert!("unknown".parse::<InvoiceStatus>().is_err());
  }

  #[test]
  fn test_payment_terms_parsing() {
    assert_eq!("Net 30".parse::<PaymentTerms>().unwrap().days(), 30);
    assert_eq!("net 7".parse::<PaymentTerms>().unwrap().days(), 7);
    assert_eq!(
      "Due on Receipt".parse::<PaymentTerms>().unwrap().days(),
      0
    );
    assert!("Net -5".parse::<PaymentTerms>().is_err());
    assert!("whenever".parse::<PaymentTerms>().is_err());
  }

  #[test]
  fn test_due_date_derivation() {
    let invoice_date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let due = PaymentTerms::net(30).due_date_from(invoice_date);
    assert_eq!(due, NaiveDate::from_ymd_opt(2025, 2, 14).unwrap());

    let due = PaymentTerms::due_on_receipt().due_date_from(invoice_date);
    assert_eq!(due, invoice_date);
  }

  #[test]
  fn test_currency_normalization() {
    assert_eq!(Currency::new("eur").unwrap().as_str(), "EUR");
    assert!(Currency::new("EURO").is_err());
    assert!(Currency::new("E1").is_err());
    assert_eq!(Currency::default().as_str(), "USD");
  }
}
