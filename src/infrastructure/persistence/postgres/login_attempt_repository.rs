use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::net::IpAddr;
use uuid::Uuid;

use crate::domain::auth::entities::LoginAttempt;
use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::auth::ports::LoginAttemptRepository;

/// Database row structure for the login_attempts table
#[derive(Debug, FromRow)]
struct LoginAttemptRow {
  id: Uuid,
  email: String,
  ip_address: String,
  success: bool,
  attempted_at: DateTime<Utc>,
}

/// PostgreSQL implementation of the LoginAttemptRepository trait
pub struct PostgresLoginAttemptRepository {
  pool: PgPool,
}

impl PostgresLoginAttemptRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl LoginAttemptRepository for PostgresLoginAttemptRepository {
  async fn create(&self, attempt: LoginAttempt) -> Result<LoginAttempt, AuthError> {
    let row = sqlx::query_as::<_, LoginAttemptRow>(
      r#"
            INSERT INTO login_attempts (id, email, ip_address, success, attempted_at)
            VALUES ($1, $2, CAST($3 AS INET), $4, $5)
            RETURNING id, email, HOST(ip_address) as ip_address, success, attempted_at
            "#,
    )
    .bind(attempt.id)
    .bind(&attempt.email)
    .bind(attempt.ip_address.to_string())
    .bind(attempt.success)
    .bind(attempt.attempted_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to record login attempt: {}", e);
      AuthError::Repository(RepositoryError::QueryFailed(e.to_string()))
    })?;

    let ip_address = row.ip_address.parse::<IpAddr>().map_err(|e| {
      AuthError::Repository(RepositoryError::DatabaseError(format!(
        "login_attempts.ip_address: {}",
        e
      )))
    })?;

    Ok(LoginAttempt::from_db(
      row.id,
      row.email,
      ip_address,
      row.success,
      row.attempted_at,
    ))
  }

  async fn count_recent_failures(
    &self,
    ip_address: IpAddr,
    window_seconds: i64,
  ) -> Result<i64, AuthError> {
    let count: i64 = sqlx::query_scalar(
      r#"
            SELECT COUNT(*)
            FROM login_attempts
            WHERE ip_address = CAST($1 AS INET)
              AND success = false
              AND attempted_at > NOW() - ($2 * INTERVAL '1 second')
            "#,
    )
    .bind(ip_address.to_string())
    .bind(window_seconds)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to count recent login failures: {}", e);
      AuthError::Repository(RepositoryError::QueryFailed(e.to_string()))
    })?;

    Ok(count)
  }
}
