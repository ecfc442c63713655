use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::entities::Invoice;
use super::errors::InvoiceError;
use super::value_objects::InvoiceStatus;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Paging and filtering for the invoice list
#[derive(Debug, Clone)]
pub struct InvoiceListQuery {
  pub limit: i64,
  pub offset: i64,
  pub status: Option<InvoiceStatus>,
  /// Case-insensitive substring match on the client name
  pub search: Option<String>,
}

impl Default for InvoiceListQuery {
  fn default() -> Self {
    Self {
      limit: DEFAULT_PAGE_SIZE,
      offset: 0,
      status: None,
      search: None,
    }
  }
}

impl InvoiceListQuery {
  /// Builds a query with the limit clamped to `1..=MAX_PAGE_SIZE`
  pub fn new(
    limit: Option<i64>,
    offset: Option<i64>,
    status: Option<InvoiceStatus>,
    search: Option<String>,
  ) -> Self {
    Self {
      limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
      offset: offset.unwrap_or(0).max(0),
      status,
      search: search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
    }
  }
}

/// Listing projection, newest first
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceSummary {
  pub id: Uuid,
  pub invoice_number: String,
  pub client_name: String,
  pub invoice_date: NaiveDate,
  pub due_date: NaiveDate,
  pub currency: String,
  pub total_amount: Decimal,
  pub status: InvoiceStatus,
  pub created_at: DateTime<Utc>,
}

/// One page of invoices plus the total row count for the query
#[derive(Debug, Clone, Serialize)]
pub struct InvoicePage {
  pub invoices: Vec<InvoiceSummary>,
  pub total: i64,
}

/// Repository trait for invoice persistence operations
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// Creates a new invoice
  async fn create(&self, invoice: Invoice) -> Result<Invoice, InvoiceError>;

  /// Finds an invoice by id, scoped to its owning user
  async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Invoice>, InvoiceError>;

  /// Checks whether an invoice number is already taken by the user
  async fn number_exists(&self, user_id: Uuid, number: &str) -> Result<bool, InvoiceError>;

  /// Lists a user's invoices, newest first
  async fn list(&self, user_id: Uuid, query: &InvoiceListQuery)
    -> Result<InvoicePage, InvoiceError>;

  /// Replaces an existing invoice
  async fn update(&self, invoice: Invoice) -> Result<Invoice, InvoiceError>;

  /// Permanently deletes an invoice
  async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), InvoiceError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_list_query_clamps_limit() {
    let query = InvoiceListQuery::new(Some(500), Some(-10), None, None);
    assert_eq!(query.limit, MAX_PAGE_SIZE);
    assert_eq!(query.offset, 0);

    let query = InvoiceListQuery::new(None, None, None, None);
    assert_eq!(query.limit, DEFAULT_PAGE_SIZE);

    let query = InvoiceListQuery::new(Some(0), Some(40), None, None);
    assert_eq!(query.limit, 1);
    assert_eq!(query.offset, 40);
  }

  #[test]
  fn test_list_query_drops_blank_search() {
    let query = InvoiceListQuery::new(None, None, None, Some("  ".to_string()));
    assert_eq!(query.search, None);

    let query = InvoiceListQuery::new(None, None, None, Some(" Acme ".to_string()));
    assert_eq!(query.search.as_deref(), Some("Acme"));
  }
}
