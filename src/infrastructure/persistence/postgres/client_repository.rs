use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::client::entities::{Client, ClientWithStats};
use crate::domain::client::errors::ClientError;
use crate::domain::client::ports::{ClientQuery, ClientRepository};

/// Database row structure for the clients table
#[derive(Debug, FromRow)]
struct ClientRow {
  id: Uuid,
  user_id: Uuid,
  name: String,
  email: Option<String>,
  phone: Option<String>,
  tax_number: Option<String>,
  website: Option<String>,
  address: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
  archived_at: Option<DateTime<Utc>>,
}

impl From<ClientRow> for Client {
  fn from(row: ClientRow) -> Self {
    Client {
      id: row.id,
      user_id: row.user_id,
      name: row.name,
      email: row.email,
      phone: row.phone,
      tax_number: row.tax_number,
      website: row.website,
      address: row.address,
      created_at: row.created_at,
      updated_at: row.updated_at,
      archived_at: row.archived_at,
    }
  }
}

/// Client row joined with its invoice count
#[derive(Debug, FromRow)]
struct ClientStatsRow {
  #[sqlx(flatten)]
  client: ClientRow,
  invoice_count: i64,
}

/// PostgreSQL implementation of the ClientRepository trait
pub struct PostgresClientRepository {
  pool: PgPool,
}

impl PostgresClientRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
  async fn create(&self, client: Client) -> Result<Client, ClientError> {
    let row = sqlx::query_as::<_, ClientRow>(
      r#"
            INSERT INTO clients (id, user_id, name, email, phone, tax_number, website, address, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, user_id, name, email, phone, tax_number, website, address, created_at, updated_at, archived_at
            "#,
    )
    .bind(client.id)
    .bind(client.user_id)
    .bind(&client.name)
    .bind(&client.email)
    .bind(&client.phone)
    .bind(&client.tax_number)
    .bind(&client.website)
    .bind(&client.address)
    .bind(client.created_at)
    .bind(client.updated_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to create client: {}", e);
      ClientError::Database(e)
    })?;

    Ok(row.into())
  }

  async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Client>, ClientError> {
    let row = sqlx::query_as::<_, ClientRow>(
      r#"
            SELECT id, user_id, name, email, phone, tax_number, website, address, created_at, updated_at, archived_at
            FROM clients
            WHERE user_id = $1 AND id = $2
            "#,
    )
    .bind(user_id)
    .bind(id)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to find client by id: {}", e);
      ClientError::Repository(e.to_string())
    })?;

    Ok(row.map(Client::from))
  }

  async fn find_by_name(&self, user_id: Uuid, name: &str) -> Result<Option<Client>, ClientError> {
    let row = sqlx::query_as::<_, ClientRow>(
      r#"
            SELECT id, user_id, name, email, phone, tax_number, website, address, created_at, updated_at, archived_at
            FROM clients
            WHERE user_id = $1 AND LOWER(name) = LOWER($2)
            "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to find client by name: {}", e);
      ClientError::Repository(e.to_string())
    })?;

    Ok(row.map(Client::from))
  }

  async fn list(
    &self,
    user_id: Uuid,
    query: &ClientQuery,
  ) -> Result<Vec<ClientWithStats>, ClientError> {
    let search = query
      .search
      .as_deref()
      .map(|s| format!("%{}%", s.trim().to_lowercase()));

    let rows = sqlx::query_as::<_, ClientStatsRow>(
      r#"
            SELECT c.id, c.user_id, c.name, c.email, c.phone, c.tax_number, c.website,
                   c.address, c.created_at, c.updated_at, c.archived_at,
                   COUNT(i.id) AS invoice_count
            FROM clients c
            LEFT JOIN invoices i
                   ON i.user_id = c.user_id AND i.client_name = c.name
            WHERE c.user_id = $1
              AND ($2 OR c.archived_at IS NULL)
              AND ($3::TEXT IS NULL
                   OR LOWER(c.name) LIKE $3
                   OR LOWER(COALESCE(c.email, '')) LIKE $3
                   OR LOWER(COALESCE(c.tax_number, '')) LIKE $3
                   OR LOWER(COALESCE(c.phone, '')) LIKE $3)
            GROUP BY c.id
            ORDER BY c.name ASC
            "#,
    )
    .bind(user_id)
    .bind(query.include_archived)
    .bind(search)
    .fetch_all(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to list clients: {}", e);
      ClientError::Repository(e.to_string())
    })?;

    Ok(
      rows
        .into_iter()
        .map(|row| ClientWithStats {
          client: row.client.into(),
          invoice_count: row.invoice_count,
        })
        .collect(),
    )
  }

  async fn update(&self, client: Client) -> Result<Client, ClientError> {
    let row = sqlx::query_as::<_, ClientRow>(
      r#"
            UPDATE clients
            SET name = $3, email = $4, phone = $5, tax_number = $6, website = $7,
                address = $8, updated_at = $9, archived_at = $10
            WHERE user_id = $1 AND id = $2
            RETURNING id, user_id, name, email, phone, tax_number, website, address, created_at, updated_at, archived_at
            "#,
    )
    .bind(client.user_id)
    .bind(client.id)
    .bind(&client.name)
    .bind(&client.email)
    .bind(&client.phone)
    .bind(&client.tax_number)
    .bind(&client.website)
    .bind(&client.address)
    .bind(client.updated_at)
    .bind(client.archived_at)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to update client: {}", e);
      ClientError::Database(e)
    })?;

    row.map(Client::from).ok_or(ClientError::NotFound(client.id))
  }

  async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), ClientError> {
    let result = sqlx::query("DELETE FROM clients WHERE user_id = $1 AND id = $2")
      .bind(user_id)
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(|e| {
        tracing::error!("Failed to delete client: {}", e);
        ClientError::Repository(e.to_string())
      })?;

    if result.rows_affected() == 0 {
      return Err(ClientError::NotFound(id));
    }

    Ok(())
  }
}
