use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use sqlx::{FromRow, PgPool};
use std::net::IpAddr;
use uuid::Uuid;

use crate::domain::auth::entities::Session;
use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::auth::ports::SessionRepository;

/// Database row structure for the sessions table
#[derive(Debug, FromRow)]
struct SessionRow {
  id: Uuid,
  user_id: Uuid,
  session_token: String,
  ip_address: Option<String>,
  user_agent: Option<String>,
  expires_at: DateTime<Utc>,
  created_at: DateTime<Utc>,
}

impl SessionRow {
  fn into_session(self) -> Session {
    let ip_address = self
      .ip_address
      .and_then(|ip_str| ip_str.parse::<IpAddr>().ok());

    Session::from_db(
      self.id,
      self.user_id,
      self.session_token,
      ip_address,
      self.user_agent,
      self.expires_at,
      self.created_at,
    )
  }
}

/// PostgreSQL implementation of the SessionRepository trait with a Redis
/// read-through cache keyed by token hash.
///
/// Cache failures degrade to plain database lookups, they never fail a
/// request.
pub struct PostgresSessionRepository {
  pool: PgPool,
  redis: Option<redis::aio::ConnectionManager>,
}

impl PostgresSessionRepository {
  pub fn new(pool: PgPool, redis: redis::aio::ConnectionManager) -> Self {
    Self {
      pool,
      redis: Some(redis),
    }
  }

  /// Creates a repository without Redis caching
  pub fn without_redis(pool: PgPool) -> Self {
    Self { pool, redis: None }
  }

  fn cache_key(token_hash: &str) -> String {
    format!("session:{}", token_hash)
  }

  async fn cache_put(&self, session: &Session) {
    let Some(redis) = &self.redis else { return };

    let ttl = (session.expires_at - Utc::now()).num_seconds();
    if ttl <= 0 {
      return;
    }

    let Ok(payload) = serde_json::to_string(session) else {
      return;
    };

    let mut conn = redis.clone();
    let key = Self::cache_key(&session.session_token);
    if let Err(e) = conn.set_ex::<_, _, ()>(&key, payload, ttl as u64).await {
      tracing::warn!("Failed to cache session: {}", e);
    }
  }

  async fn cache_get(&self, token_hash: &str) -> Option<Session> {
    let redis = self.redis.as_ref()?;

    let mut conn = redis.clone();
    let payload: Option<String> = match conn.get(Self::cache_key(token_hash)).await {
      Ok(payload) => payload,
      Err(e) => {
        tracing::warn!("Session cache lookup failed: {}", e);
        return None;
      }
    };

    payload.and_then(|p| serde_json::from_str(&p).ok())
  }

  async fn cache_evict(&self, token_hashes: &[String]) {
    let Some(redis) = &self.redis else { return };
    if token_hashes.is_empty() {
      return;
    }

    let keys: Vec<String> = token_hashes.iter().map(|h| Self::cache_key(h)).collect();
    let mut conn = redis.clone();
    if let Err(e) = conn.del::<_, ()>(keys).await {
      tracing::warn!("Failed to evict cached sessions: {}", e);
    }
  }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
  async fn create(&self, session: Session) -> Result<Session, AuthError> {
    let ip_address = session.ip_address.map(|ip| ip.to_string());

    let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions (id, user_id, session_token, ip_address, user_agent, expires_at, created_at)
            VALUES ($1, $2, $3, CAST($4 AS INET), $5, $6, $7)
            RETURNING id, user_id, session_token, HOST(ip_address) as ip_address, user_agent, expires_at, created_at
            "#
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(&session.session_token)
        .bind(ip_address.as_deref())
        .bind(session.user_agent.as_deref())
        .bind(session.expires_at)
        .bind(session.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create session: {}", e);
            AuthError::Repository(RepositoryError::QueryFailed(e.to_string()))
        })?;

    let created = row.into_session();
    self.cache_put(&created).await;

    Ok(created)
  }

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError> {
    if let Some(cached) = self.cache_get(token_hash).await {
      return Ok(Some(cached));
    }

    let row = sqlx::query_as::<_, SessionRow>(
      r#"
            SELECT id, user_id, session_token, HOST(ip_address) as ip_address, user_agent, expires_at, created_at
            FROM sessions
            WHERE session_token = $1
            "#,
    )
    .bind(token_hash)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to find session by token hash: {}", e);
      AuthError::Repository(RepositoryError::QueryFailed(e.to_string()))
    })?;

    match row {
      Some(row) => {
        let session = row.into_session();
        self.cache_put(&session).await;
        Ok(Some(session))
      }
      None => Ok(None),
    }
  }

  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Session>, AuthError> {
    let rows = sqlx::query_as::<_, SessionRow>(
      r#"
            SELECT id, user_id, session_token, HOST(ip_address) as ip_address, user_agent, expires_at, created_at
            FROM sessions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to find sessions by user_id: {}", e);
      AuthError::Repository(RepositoryError::QueryFailed(e.to_string()))
    })?;

    Ok(rows.into_iter().map(SessionRow::into_session).collect())
  }

  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError> {
    let token_hash: Option<String> =
      sqlx::query_scalar("DELETE FROM sessions WHERE id = $1 RETURNING session_token")
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
          tracing::error!("Failed to delete session: {}", e);
          AuthError::Repository(RepositoryError::QueryFailed(e.to_string()))
        })?;

    match token_hash {
      Some(token_hash) => {
        self.cache_evict(&[token_hash]).await;
        Ok(())
      }
      None => {
        tracing::warn!("Session {} not found for deletion", session_id);
        Err(AuthError::Repository(RepositoryError::NotFound))
      }
    }
  }

  async fn delete_all_for_user(&self, user_id: Uuid) -> Result<(), AuthError> {
    let token_hashes: Vec<String> =
      sqlx::query_scalar("DELETE FROM sessions WHERE user_id = $1 RETURNING session_token")
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
          tracing::error!("Failed to delete all sessions for user {}: {}", user_id, e);
          AuthError::Repository(RepositoryError::QueryFailed(e.to_string()))
        })?;

    self.cache_evict(&token_hashes).await;

    tracing::info!("Deleted all sessions for user {}", user_id);
    Ok(())
  }
}
