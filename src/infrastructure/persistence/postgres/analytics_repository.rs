use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::admin::entities::AnalyticsSnapshot;
use crate::domain::admin::errors::AdminError;
use crate::domain::admin::ports::AnalyticsRepository;

const SNAPSHOT_COLUMNS: &str = r#"
    id, date, total_users, new_users_today, active_users_last_7_days,
    active_users_last_30_days, total_invoices, invoices_created_today,
    invoices_created_this_week, invoices_created_this_month, total_revenue,
    revenue_today, revenue_this_week, revenue_this_month, free_users,
    pro_users, total_clients, avg_invoices_per_user, created_at, updated_at
"#;

/// Database row structure for the admin_analytics table
#[derive(Debug, FromRow)]
struct SnapshotRow {
  id: Uuid,
  date: NaiveDate,
  total_users: i64,
  new_users_today: i64,
  active_users_last_7_days: i64,
  active_users_last_30_days: i64,
  total_invoices: i64,
  invoices_created_today: i64,
  invoices_created_this_week: i64,
  invoices_created_this_month: i64,
  total_revenue: Decimal,
  revenue_today: Decimal,
  revenue_this_week: Decimal,
  revenue_this_month: Decimal,
  free_users: i64,
  pro_users: i64,
  total_clients: i64,
  avg_invoices_per_user: Decimal,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<SnapshotRow> for AnalyticsSnapshot {
  fn from(row: SnapshotRow) -> Self {
    AnalyticsSnapshot {
      id: row.id,
      date: row.date,
      total_users: row.total_users,
      new_users_today: row.new_users_today,
      active_users_last_7_days: row.active_users_last_7_days,
      active_users_last_30_days: row.active_users_last_30_days,
      total_invoices: row.total_invoices,
      invoices_created_today: row.invoices_created_today,
      invoices_created_this_week: row.invoices_created_this_week,
      invoices_created_this_month: row.invoices_created_this_month,
      total_revenue: row.total_revenue,
      revenue_today: row.revenue_today,
      revenue_this_week: row.revenue_this_week,
      revenue_this_month: row.revenue_this_month,
      free_users: row.free_users,
      pro_users: row.pro_users,
      total_clients: row.total_clients,
      avg_invoices_per_user: row.avg_invoices_per_user,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

/// Raw aggregate result used by compute_snapshot
#[derive(Debug, FromRow)]
struct ComputedRow {
  total_users: i64,
  new_users_today: i64,
  active_users_last_7_days: i64,
  active_users_last_30_days: i64,
  total_invoices: i64,
  invoices_created_today: i64,
  invoices_created_this_week: i64,
  invoices_created_this_month: i64,
  total_revenue: Decimal,
  revenue_today: Decimal,
  revenue_this_week: Decimal,
  revenue_this_month: Decimal,
  pro_users: i64,
  total_clients: i64,
}

/// PostgreSQL implementation of the AnalyticsRepository trait.
///
/// Revenue figures count paid invoices only.
pub struct PostgresAnalyticsRepository {
  pool: PgPool,
}

impl PostgresAnalyticsRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl AnalyticsRepository for PostgresAnalyticsRepository {
  async fn compute_snapshot(&self, date: NaiveDate) -> Result<AnalyticsSnapshot, AdminError> {
    let row = sqlx::query_as::<_, ComputedRow>(
      r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM users WHERE created_at::DATE = $1) AS new_users_today,
                (SELECT COUNT(DISTINCT user_id) FROM sessions
                  WHERE created_at > $1::TIMESTAMPTZ - INTERVAL '7 days') AS active_users_last_7_days,
                (SELECT COUNT(DISTINCT user_id) FROM sessions
                  WHERE created_at > $1::TIMESTAMPTZ - INTERVAL '30 days') AS active_users_last_30_days,
                (SELECT COUNT(*) FROM invoices) AS total_invoices,
                (SELECT COUNT(*) FROM invoices WHERE created_at::DATE = $1) AS invoices_created_today,
                (SELECT COUNT(*) FROM invoices
                  WHERE created_at::DATE >= date_trunc('week', $1::DATE)::DATE) AS invoices_created_this_week,
                (SELECT COUNT(*) FROM invoices
                  WHERE created_at::DATE >= date_trunc('month', $1::DATE)::DATE) AS invoices_created_this_month,
                (SELECT COALESCE(SUM(total_amount), 0) FROM invoices
                  WHERE status = 'paid') AS total_revenue,
                (SELECT COALESCE(SUM(total_amount), 0) FROM invoices
                  WHERE status = 'paid' AND updated_at::DATE = $1) AS revenue_today,
                (SELECT COALESCE(SUM(total_amount), 0) FROM invoices
                  WHERE status = 'paid'
                    AND updated_at::DATE >= date_trunc('week', $1::DATE)::DATE) AS revenue_this_week,
                (SELECT COALESCE(SUM(total_amount), 0) FROM invoices
                  WHERE status = 'paid'
                    AND updated_at::DATE >= date_trunc('month', $1::DATE)::DATE) AS revenue_this_month,
                (SELECT COUNT(*) FROM subscriptions WHERE plan_type = 'pro') AS pro_users,
                (SELECT COUNT(*) FROM clients) AS total_clients
            "#,
    )
    .bind(date)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to compute analytics snapshot: {}", e);
      AdminError::Repository(e.to_string())
    })?;

    // Users without a subscription row are on the free plan
    let free_users = row.total_users - row.pro_users;
    let avg_invoices_per_user = if row.total_users > 0 {
      (Decimal::from(row.total_invoices) / Decimal::from(row.total_users)).round_dp(2)
    } else {
      Decimal::ZERO
    };

    let now = Utc::now();
    Ok(AnalyticsSnapshot {
      id: Uuid::new_v4(),
      date,
      total_users: row.total_users,
      new_users_today: row.new_users_today,
      active_users_last_7_days: row.active_users_last_7_days,
      active_users_last_30_days: row.active_users_last_30_days,
      total_invoices: row.total_invoices,
      invoices_created_today: row.invoices_created_today,
      invoices_created_this_week: row.invoices_created_this_week,
      invoices_created_this_month: row.invoices_created_this_month,
      total_revenue: row.total_revenue,
      revenue_today: row.revenue_today,
      revenue_this_week: row.revenue_this_week,
      revenue_this_month: row.revenue_this_month,
      free_users,
      pro_users: row.pro_users,
      total_clients: row.total_clients,
      avg_invoices_per_user,
      created_at: now,
      updated_at: now,
    })
  }

  async fn upsert_snapshot(
    &self,
    snapshot: AnalyticsSnapshot,
  ) -> Result<AnalyticsSnapshot, AdminError> {
    let row = sqlx::query_as::<_, SnapshotRow>(&format!(
      r#"
            INSERT INTO admin_analytics (
                id, date, total_users, new_users_today, active_users_last_7_days,
                active_users_last_30_days, total_invoices, invoices_created_today,
                invoices_created_this_week, invoices_created_this_month,
                total_revenue, revenue_today, revenue_this_week,
                revenue_this_month, free_users, pro_users, total_clients,
                avg_invoices_per_user, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20)
            ON CONFLICT (date) DO UPDATE SET
                total_users = EXCLUDED.total_users,
                new_users_today = EXCLUDED.new_users_today,
                active_users_last_7_days = EXCLUDED.active_users_last_7_days,
                active_users_last_30_days = EXCLUDED.active_users_last_30_days,
                total_invoices = EXCLUDED.total_invoices,
                invoices_created_today = EXCLUDED.invoices_created_today,
                invoices_created_this_week = EXCLUDED.invoices_created_this_week,
                invoices_created_this_month = EXCLUDED.invoices_created_this_month,
                total_revenue = EXCLUDED.total_revenue,
                revenue_today = EXCLUDED.revenue_today,
                revenue_this_week = EXCLUDED.revenue_this_week,
                revenue_this_month = EXCLUDED.revenue_this_month,
                free_users = EXCLUDED.free_users,
                pro_users = EXCLUDED.pro_users,
                total_clients = EXCLUDED.total_clients,
                avg_invoices_per_user = EXCLUDED.avg_invoices_per_user,
                updated_at = EXCLUDED.updated_at
            RETURNING {}
            "#,
      SNAPSHOT_COLUMNS
    ))
    .bind(snapshot.id)
    .bind(snapshot.date)
    .bind(snapshot.total_users)
    .bind(snapshot.new_users_today)
    .bind(snapshot.active_users_last_7_days)
    .bind(snapshot.active_users_last_30_days)
    .bind(snapshot.total_invoices)
    .bind(snapshot.invoices_created_today)
    .bind(snapshot.invoices_created_this_week)
    .bind(snapshot.invoices_created_this_month)
    .bind(snapshot.total_revenue)
    .bind(snapshot.revenue_today)
    .bind(snapshot.revenue_this_week)
    .bind(snapshot.revenue_this_month)
    .bind(snapshot.free_users)
    .bind(snapshot.pro_users)
    .bind(snapshot.total_clients)
    .bind(snapshot.avg_invoices_per_user)
    .bind(snapshot.created_at)
    .bind(snapshot.updated_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to upsert analytics snapshot: {}", e);
      AdminError::Repository(e.to_string())
    })?;

    Ok(row.into())
  }

  async fn latest_snapshot(&self) -> Result<Option<AnalyticsSnapshot>, AdminError> {
    let row = sqlx::query_as::<_, SnapshotRow>(&format!(
      "SELECT {} FROM admin_analytics ORDER BY date DESC LIMIT 1",
      SNAPSHOT_COLUMNS
    ))
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to load latest analytics snapshot: {}", e);
      AdminError::Repository(e.to_string())
    })?;

    Ok(row.map(AnalyticsSnapshot::from))
  }
}
