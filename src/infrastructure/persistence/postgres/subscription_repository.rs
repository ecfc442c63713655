use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::admin::entities::{PlanType, Subscription};
use crate::domain::admin::errors::AdminError;
use crate::domain::admin::ports::SubscriptionRepository;

/// Database row structure for the subscriptions table
#[derive(Debug, FromRow)]
struct SubscriptionRow {
  id: Uuid,
  user_id: Uuid,
  plan_type: String,
  status: String,
  invoices_created_this_month: i32,
  invoice_limit: Option<i32>,
  usage_reset_date: NaiveDate,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
  type Error = AdminError;

  fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
    let plan_type = PlanType::from_str(&row.plan_type)
      .map_err(|e| AdminError::Repository(format!("subscriptions.plan_type: {}", e)))?;

    Ok(Subscription {
      id: row.id,
      user_id: row.user_id,
      plan_type,
      status: row.status,
      invoices_created_this_month: row.invoices_created_this_month,
      invoice_limit: row.invoice_limit,
      usage_reset_date: row.usage_reset_date,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

/// PostgreSQL implementation of the SubscriptionRepository trait
pub struct PostgresSubscriptionRepository {
  pool: PgPool,
}

impl PostgresSubscriptionRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Subscription>, AdminError> {
    let row = sqlx::query_as::<_, SubscriptionRow>(
      r#"
            SELECT id, user_id, plan_type, status, invoices_created_this_month,
                   invoice_limit, usage_reset_date, created_at, updated_at
            FROM subscriptions
            WHERE user_id = $1
            "#,
    )
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to load subscription: {}", e);
      AdminError::Repository(e.to_string())
    })?;

    row.map(Subscription::try_from).transpose()
  }

  async fn upsert(&self, subscription: Subscription) -> Result<Subscription, AdminError> {
    let row = sqlx::query_as::<_, SubscriptionRow>(
      r#"
            INSERT INTO subscriptions (
                id, user_id, plan_type, status, invoices_created_this_month,
                invoice_limit, usage_reset_date, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id) DO UPDATE SET
                plan_type = EXCLUDED.plan_type,
                status = EXCLUDED.status,
                invoices_created_this_month = EXCLUDED.invoices_created_this_month,
                invoice_limit = EXCLUDED.invoice_limit,
                usage_reset_date = EXCLUDED.usage_reset_date,
                updated_at = EXCLUDED.updated_at
            RETURNING id, user_id, plan_type, status, invoices_created_this_month,
                      invoice_limit, usage_reset_date, created_at, updated_at
            "#,
    )
    .bind(subscription.id)
    .bind(subscription.user_id)
    .bind(subscription.plan_type.as_str())
    .bind(&subscription.status)
    .bind(subscription.invoices_created_this_month)
    .bind(subscription.invoice_limit)
    .bind(subscription.usage_reset_date)
    .bind(subscription.created_at)
    .bind(subscription.updated_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to upsert subscription: {}", e);
      AdminError::Repository(e.to_string())
    })?;

    row.try_into()
  }

  async fn increment_usage(&self, user_id: Uuid) -> Result<(), AdminError> {
    sqlx::query(
      r#"
            UPDATE subscriptions
            SET invoices_created_this_month = invoices_created_this_month + 1,
                updated_at = NOW()
            WHERE user_id = $1
            "#,
    )
    .bind(user_id)
    .execute(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to increment usage: {}", e);
      AdminError::Repository(e.to_string())
    })?;

    Ok(())
  }
}
