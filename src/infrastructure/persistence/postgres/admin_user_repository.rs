use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::admin::entities::{AdminUserPage, AdminUserRecord, PlanType};
use crate::domain::admin::errors::AdminError;
use crate::domain::admin::ports::{AdminUserQuery, AdminUserRepository};
use crate::domain::auth::value_objects::UserRole;

/// Joined row backing the admin user table
#[derive(Debug, FromRow)]
struct AdminUserRow {
  id: Uuid,
  email: String,
  full_name: String,
  role: String,
  plan_type: Option<String>,
  subscription_status: Option<String>,
  invoices_created_this_month: Option<i32>,
  invoice_count: i64,
  client_count: i64,
  created_at: DateTime<Utc>,
}

impl TryFrom<AdminUserRow> for AdminUserRecord {
  type Error = AdminError;

  fn try_from(row: AdminUserRow) -> Result<Self, Self::Error> {
    let role = UserRole::from_str(&row.role)
      .map_err(|e| AdminError::Repository(format!("users.role: {}", e)))?;

    // Users without a subscription row are on the free plan
    let plan_type = match row.plan_type.as_deref() {
      Some(s) => {
        PlanType::from_str(s).map_err(|e| AdminError::Repository(format!("plan_type: {}", e)))?
      }
      None => PlanType::Free,
    };

    Ok(AdminUserRecord {
      id: row.id,
      email: row.email,
      full_name: row.full_name,
      role,
      plan_type,
      subscription_status: row
        .subscription_status
        .unwrap_or_else(|| "active".to_string()),
      invoices_created_this_month: row.invoices_created_this_month.unwrap_or(0),
      invoice_count: row.invoice_count,
      client_count: row.client_count,
      created_at: row.created_at,
    })
  }
}

/// PostgreSQL implementation of the AdminUserRepository trait
pub struct PostgresAdminUserRepository {
  pool: PgPool,
}

impl PostgresAdminUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl AdminUserRepository for PostgresAdminUserRepository {
  async fn list_users(&self, query: &AdminUserQuery) -> Result<AdminUserPage, AdminError> {
    let search = query
      .search
      .as_deref()
      .map(|s| format!("%{}%", s.trim().to_lowercase()));
    let role = query.role.map(|r| r.as_str().to_string());

    let rows = sqlx::query_as::<_, AdminUserRow>(
      r#"
            SELECT u.id, u.email, u.full_name, u.role,
                   s.plan_type,
                   s.status AS subscription_status,
                   s.invoices_created_this_month,
                   (SELECT COUNT(*) FROM invoices i WHERE i.user_id = u.id) AS invoice_count,
                   (SELECT COUNT(*) FROM clients c WHERE c.user_id = u.id) AS client_count,
                   u.created_at
            FROM users u
            LEFT JOIN subscriptions s ON s.user_id = u.id
            WHERE ($1::TEXT IS NULL
                   OR LOWER(u.email) LIKE $1
                   OR LOWER(u.full_name) LIKE $1)
              AND ($2::TEXT IS NULL OR u.role = $2)
            ORDER BY u.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
    )
    .bind(&search)
    .bind(&role)
    .bind(query.limit)
    .bind(query.offset)
    .fetch_all(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to list users: {}", e);
      AdminError::Repository(e.to_string())
    })?;

    let total: i64 = sqlx::query_scalar(
      r#"
            SELECT COUNT(*)
            FROM users u
            WHERE ($1::TEXT IS NULL
                   OR LOWER(u.email) LIKE $1
                   OR LOWER(u.full_name) LIKE $1)
              AND ($2::TEXT IS NULL OR u.role = $2)
            "#,
    )
    .bind(&search)
    .bind(&role)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to count users: {}", e);
      AdminError::Repository(e.to_string())
    })?;

    let users = rows
      .into_iter()
      .map(AdminUserRecord::try_from)
      .collect::<Result<Vec<_>, _>>()?;

    Ok(AdminUserPage { users, total })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(
    plan_type: Option<&str>,
    subscription_status: Option<&str>,
    invoices_created_this_month: Option<i32>,
  ) -> AdminUserRow {
    AdminUserRow {
      id: Uuid::new_v4(),
      email: "user@example.com".to_string(),
      full_name: "Test User".to_string(),
      role: "user".to_string(),
      plan_type: plan_type.map(str::to_string),
      subscription_status: subscription_status.map(str::to_string),
      invoices_created_this_month,
      invoice_count: 3,
      client_count: 2,
      created_at: Utc::now(),
    }
  }

  #[test]
  fn test_row_without_subscription_defaults_to_free_active() {
    let record = AdminUserRecord::try_from(row(None, None, None)).unwrap();

    assert_eq!(record.plan_type, PlanType::Free);
    assert_eq!(record.subscription_status, "active");
    assert_eq!(record.invoices_created_this_month, 0);
  }

  #[test]
  fn test_row_carries_subscription_details() {
    let record = AdminUserRecord::try_from(row(Some("pro"), Some("cancelled"), Some(7))).unwrap();

    assert_eq!(record.plan_type, PlanType::Pro);
    assert_eq!(record.subscription_status, "cancelled");
    assert_eq!(record.invoices_created_this_month, 7);
  }

  #[test]
  fn test_row_with_unknown_role_is_rejected() {
    let mut bad = row(None, None, None);
    bad.role = "owner".to_string();
    assert!(AdminUserRecord::try_from(bad).is_err());
  }
}
