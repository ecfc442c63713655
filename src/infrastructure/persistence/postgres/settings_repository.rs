use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::settings::entities::UserSettings;
use crate::domain::settings::errors::SettingsError;
use crate::domain::settings::ports::SettingsRepository;

const SETTINGS_COLUMNS: &str = r#"
    id, user_id, company_name, company_email, company_phone, company_address,
    company_website, company_logo, default_theme, default_currency,
    default_tax_rate, default_payment_terms, default_notes, invoice_prefix,
    invoice_counter, invoice_number_format, created_at, updated_at
"#;

/// Database row structure for the user_settings table
#[derive(Debug, FromRow)]
struct SettingsRow {
  id: Uuid,
  user_id: Uuid,
  company_name: Option<String>,
  company_email: Option<String>,
  company_phone: Option<String>,
  company_address: Option<String>,
  company_website: Option<String>,
  company_logo: Option<String>,
  default_theme: Option<String>,
  default_currency: Option<String>,
  default_tax_rate: Option<Decimal>,
  default_payment_terms: Option<String>,
  default_notes: Option<String>,
  invoice_prefix: Option<String>,
  invoice_counter: i32,
  invoice_number_format: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<SettingsRow> for UserSettings {
  fn from(row: SettingsRow) -> Self {
    UserSettings {
      id: row.id,
      user_id: row.user_id,
      company_name: row.company_name,
      company_email: row.company_email,
      company_phone: row.company_phone,
      company_address: row.company_address,
      company_website: row.company_website,
      company_logo: row.company_logo,
      default_theme: row.default_theme,
      default_currency: row.default_currency,
      default_tax_rate: row.default_tax_rate,
      default_payment_terms: row.default_payment_terms,
      default_notes: row.default_notes,
      invoice_prefix: row.invoice_prefix,
      invoice_counter: row.invoice_counter,
      invoice_number_format: row.invoice_number_format,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

/// PostgreSQL implementation of the SettingsRepository trait
pub struct PostgresSettingsRepository {
  pool: PgPool,
}

impl PostgresSettingsRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<UserSettings>, SettingsError> {
    let row = sqlx::query_as::<_, SettingsRow>(&format!(
      "SELECT {} FROM user_settings WHERE user_id = $1",
      SETTINGS_COLUMNS
    ))
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to load settings: {}", e);
      SettingsError::Repository(e.to_string())
    })?;

    Ok(row.map(UserSettings::from))
  }

  async fn upsert(&self, settings: UserSettings) -> Result<UserSettings, SettingsError> {
    let row = sqlx::query_as::<_, SettingsRow>(&format!(
      r#"
            INSERT INTO user_settings (
                id, user_id, company_name, company_email, company_phone,
                company_address, company_website, company_logo, default_theme,
                default_currency, default_tax_rate, default_payment_terms,
                default_notes, invoice_prefix, invoice_counter,
                invoice_number_format, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            ON CONFLICT (user_id) DO UPDATE SET
                company_name = EXCLUDED.company_name,
                company_email = EXCLUDED.company_email,
                company_phone = EXCLUDED.company_phone,
                company_address = EXCLUDED.company_address,
                company_website = EXCLUDED.company_website,
                company_logo = EXCLUDED.company_logo,
                default_theme = EXCLUDED.default_theme,
                default_currency = EXCLUDED.default_currency,
                default_tax_rate = EXCLUDED.default_tax_rate,
                default_payment_terms = EXCLUDED.default_payment_terms,
                default_notes = EXCLUDED.default_notes,
                invoice_prefix = EXCLUDED.invoice_prefix,
                invoice_counter = EXCLUDED.invoice_counter,
                invoice_number_format = EXCLUDED.invoice_number_format,
                updated_at = EXCLUDED.updated_at
            RETURNING {}
            "#,
      SETTINGS_COLUMNS
    ))
    .bind(settings.id)
    .bind(settings.user_id)
    .bind(&settings.company_name)
    .bind(&settings.company_email)
    .bind(&settings.company_phone)
    .bind(&settings.company_address)
    .bind(&settings.company_website)
    .bind(&settings.company_logo)
    .bind(&settings.default_theme)
    .bind(&settings.default_currency)
    .bind(settings.default_tax_rate)
    .bind(&settings.default_payment_terms)
    .bind(&settings.default_notes)
    .bind(&settings.invoice_prefix)
    .bind(settings.invoice_counter)
    .bind(&settings.invoice_number_format)
    .bind(settings.created_at)
    .bind(settings.updated_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to upsert settings: {}", e);
      SettingsError::Repository(e.to_string())
    })?;

    Ok(row.into())
  }

  async fn claim_next_counter(&self, user_id: Uuid) -> Result<Option<UserSettings>, SettingsError> {
    // The returned invoice_counter is the claimed (pre-increment) value
    let row = sqlx::query_as::<_, SettingsRow>(
      r#"
            UPDATE user_settings
            SET invoice_counter = invoice_counter + 1, updated_at = NOW()
            WHERE user_id = $1
            RETURNING
                id, user_id, company_name, company_email, company_phone, company_address,
                company_website, company_logo, default_theme, default_currency,
                default_tax_rate, default_payment_terms, default_notes, invoice_prefix,
                invoice_counter - 1 AS invoice_counter, invoice_number_format,
                created_at, updated_at
            "#,
    )
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to claim invoice counter: {}", e);
      SettingsError::Repository(e.to_string())
    })?;

    Ok(row.map(UserSettings::from))
  }
}
