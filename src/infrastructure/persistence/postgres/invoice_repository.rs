use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::invoice::entities::{CustomField, Invoice, LineItem};
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::ports::{
  InvoiceListQuery, InvoicePage, InvoiceRepository, InvoiceSummary,
};
use crate::domain::invoice::value_objects::{Currency, InvoiceStatus, PaymentTerms};

const INVOICE_COLUMNS: &str = r#"
    id, user_id, invoice_number, client_name, client_address, client_email,
    client_phone, invoice_date, due_date, payment_terms, currency, theme_id,
    theme_name, items, custom_fields, subtotal, tax_rate, tax_amount,
    total_amount, status, notes, created_at, updated_at
"#;

/// Database row structure for the invoices table.
///
/// Line items and custom fields live in JSONB; deserializing them through
/// `LineItem` folds the legacy item shapes into the canonical one.
#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: Uuid,
  user_id: Uuid,
  invoice_number: String,
  client_name: String,
  client_address: String,
  client_email: Option<String>,
  client_phone: Option<String>,
  invoice_date: NaiveDate,
  due_date: NaiveDate,
  payment_terms: String,
  currency: String,
  theme_id: String,
  theme_name: String,
  items: serde_json::Value,
  custom_fields: serde_json::Value,
  subtotal: Decimal,
  tax_rate: Option<Decimal>,
  tax_amount: Decimal,
  total_amount: Decimal,
  status: String,
  notes: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = InvoiceError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    let items: Vec<LineItem> = serde_json::from_value(row.items)
      .map_err(|e| InvoiceError::Repository(format!("invoices.items: {}", e)))?;

    let custom_fields: Vec<CustomField> = serde_json::from_value(row.custom_fields)
      .map_err(|e| InvoiceError::Repository(format!("invoices.custom_fields: {}", e)))?;

    let payment_terms = PaymentTerms::from_str(&row.payment_terms)
      .map_err(|e| InvoiceError::Repository(format!("invoices.payment_terms: {}", e)))?;

    let currency = Currency::new(&row.currency)
      .map_err(|e| InvoiceError::Repository(format!("invoices.currency: {}", e)))?;

    let status = InvoiceStatus::from_str(&row.status)
      .map_err(|e| InvoiceError::Repository(format!("invoices.status: {}", e)))?;

    Ok(Invoice {
      id: row.id,
      user_id: row.user_id,
      invoice_number: row.invoice_number,
      client_name: row.client_name,
      client_address: row.client_address,
      client_email: row.client_email,
      client_phone: row.client_phone,
      invoice_date: row.invoice_date,
      due_date: row.due_date,
      payment_terms,
      currency,
      theme_id: row.theme_id,
      theme_name: row.theme_name,
      items,
      custom_fields,
      subtotal: row.subtotal,
      tax_rate: row.tax_rate,
      tax_amount: row.tax_amount,
      total_amount: row.total_amount,
      status,
      notes: row.notes,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

/// Listing row structure
#[derive(Debug, FromRow)]
struct InvoiceSummaryRow {
  id: Uuid,
  invoice_number: String,
  client_name: String,
  invoice_date: NaiveDate,
  due_date: NaiveDate,
  currency: String,
  total_amount: Decimal,
  status: String,
  created_at: DateTime<Utc>,
}

impl TryFrom<InvoiceSummaryRow> for InvoiceSummary {
  type Error = InvoiceError;

  fn try_from(row: InvoiceSummaryRow) -> Result<Self, Self::Error> {
    let status = InvoiceStatus::from_str(&row.status)
      .map_err(|e| InvoiceError::Repository(format!("invoices.status: {}", e)))?;

    Ok(InvoiceSummary {
      id: row.id,
      invoice_number: row.invoice_number,
      client_name: row.client_name,
      invoice_date: row.invoice_date,
      due_date: row.due_date,
      currency: row.currency,
      total_amount: row.total_amount,
      status,
      created_at: row.created_at,
    })
  }
}

/// PostgreSQL implementation of the InvoiceRepository trait
pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn create(&self, invoice: Invoice) -> Result<Invoice, InvoiceError> {
    let items = serde_json::to_value(&invoice.items)
      .map_err(|e| InvoiceError::Repository(format!("items: {}", e)))?;
    let custom_fields = serde_json::to_value(&invoice.custom_fields)
      .map_err(|e| InvoiceError::Repository(format!("custom_fields: {}", e)))?;

    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            INSERT INTO invoices (
                id, user_id, invoice_number, client_name, client_address,
                client_email, client_phone, invoice_date, due_date,
                payment_terms, currency, theme_id, theme_name, items,
                custom_fields, subtotal, tax_rate, tax_amount, total_amount,
                status, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21, $22, $23)
            RETURNING {}
            "#,
      INVOICE_COLUMNS
    ))
    .bind(invoice.id)
    .bind(invoice.user_id)
    .bind(&invoice.invoice_number)
    .bind(&invoice.client_name)
    .bind(&invoice.client_address)
    .bind(&invoice.client_email)
    .bind(&invoice.client_phone)
    .bind(invoice.invoice_date)
    .bind(invoice.due_date)
    .bind(invoice.payment_terms.label())
    .bind(invoice.currency.as_str())
    .bind(&invoice.theme_id)
    .bind(&invoice.theme_name)
    .bind(items)
    .bind(custom_fields)
    .bind(invoice.subtotal)
    .bind(invoice.tax_rate)
    .bind(invoice.tax_amount)
    .bind(invoice.total_amount)
    .bind(invoice.status.as_str())
    .bind(&invoice.notes)
    .bind(invoice.created_at)
    .bind(invoice.updated_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
          return InvoiceError::NumberAlreadyExists(invoice.invoice_number.clone());
        }
      }
      tracing::error!("Failed to create invoice: {}", e);
      InvoiceError::Database(e)
    })?;

    row.try_into()
  }

  async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      "SELECT {} FROM invoices WHERE user_id = $1 AND id = $2",
      INVOICE_COLUMNS
    ))
    .bind(user_id)
    .bind(id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to find invoice by id: {}", e);
      InvoiceError::Repository(e.to_string())
    })?;

    row.map(Invoice::try_from).transpose()
  }

  async fn number_exists(&self, user_id: Uuid, number: &str) -> Result<bool, InvoiceError> {
    let exists: bool = sqlx::query_scalar(
      "SELECT EXISTS (SELECT 1 FROM invoices WHERE user_id = $1 AND invoice_number = $2)",
    )
    .bind(user_id)
    .bind(number)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to check invoice number: {}", e);
      InvoiceError::Repository(e.to_string())
    })?;

    Ok(exists)
  }

  async fn list(
    &self,
    user_id: Uuid,
    query: &InvoiceListQuery,
  ) -> Result<InvoicePage, InvoiceError> {
    let status = query.status.map(|s| s.as_str());
    let search = query
      .search
      .as_deref()
      .map(|s| format!("%{}%", s.to_lowercase()));

    let rows = sqlx::query_as::<_, InvoiceSummaryRow>(
      r#"
            SELECT id, invoice_number, client_name, invoice_date, due_date,
                   currency, total_amount, status, created_at
            FROM invoices
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR status = $2)
              AND ($3::TEXT IS NULL OR LOWER(client_name) LIKE $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
    )
    .bind(user_id)
    .bind(status)
    .bind(&search)
    .bind(query.limit)
    .bind(query.offset)
    .fetch_all(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to list invoices: {}", e);
      InvoiceError::Repository(e.to_string())
    })?;

    let total: i64 = sqlx::query_scalar(
      r#"
            SELECT COUNT(*)
            FROM invoices
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR status = $2)
              AND ($3::TEXT IS NULL OR LOWER(client_name) LIKE $3)
            "#,
    )
    .bind(user_id)
    .bind(status)
    .bind(&search)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to count invoices: {}", e);
      InvoiceError::Repository(e.to_string())
    })?;

    let invoices = rows
      .into_iter()
      .map(InvoiceSummary::try_from)
      .collect::<Result<Vec<_>, _>>()?;

    Ok(InvoicePage { invoices, total })
  }

  async fn update(&self, invoice: Invoice) -> Result<Invoice, InvoiceError> {
    let items = serde_json::to_value(&invoice.items)
      .map_err(|e| InvoiceError::Repository(format!("items: {}", e)))?;
    let custom_fields = serde_json::to_value(&invoice.custom_fields)
      .map_err(|e| InvoiceError::Repository(format!("custom_fields: {}", e)))?;

    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            UPDATE invoices
            SET invoice_number = $3, client_name = $4, client_address = $5,
                client_email = $6, client_phone = $7, invoice_date = $8,
                due_date = $9, payment_terms = $10, currency = $11,
                theme_id = $12, theme_name = $13, items = $14,
                custom_fields = $15, subtotal = $16, tax_rate = $17,
                tax_amount = $18, total_amount = $19, status = $20,
                notes = $21, updated_at = $22
            WHERE user_id = $1 AND id = $2
            RETURNING {}
            "#,
      INVOICE_COLUMNS
    ))
    .bind(invoice.user_id)
    .bind(invoice.id)
    .bind(&invoice.invoice_number)
    .bind(&invoice.client_name)
    .bind(&invoice.client_address)
    .bind(&invoice.client_email)
    .bind(&invoice.client_phone)
    .bind(invoice.invoice_date)
    .bind(invoice.due_date)
    .bind(invoice.payment_terms.label())
    .bind(invoice.currency.as_str())
    .bind(&invoice.theme_id)
    .bind(&invoice.theme_name)
    .bind(items)
    .bind(custom_fields)
    .bind(invoice.subtotal)
    .bind(invoice.tax_rate)
    .bind(invoice.tax_amount)
    .bind(invoice.total_amount)
    .bind(invoice.status.as_str())
    .bind(&invoice.notes)
    .bind(Utc::now())
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
          return InvoiceError::NumberAlreadyExists(invoice.invoice_number.clone());
        }
      }
      tracing::error!("Failed to update invoice: {}", e);
      InvoiceError::Database(e)
    })?;

    match row {
      Some(row) => row.try_into(),
      None => Err(InvoiceError::NotFound(invoice.id)),
    }
  }

  async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), InvoiceError> {
    let result = sqlx::query("DELETE FROM invoices WHERE user_id = $1 AND id = $2")
      .bind(user_id)
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(|e| {
        tracing::error!("Failed to delete invoice: {}", e);
        InvoiceError::Repository(e.to_string())
      })?;

    if result.rows_affected() == 0 {
      return Err(InvoiceError::NotFound(id));
    }

    Ok(())
  }
}
