use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Client, ClientWithStats};
use super::errors::ClientError;

/// Listing filter for a user's client registry
#[derive(Debug, Clone, Default)]
pub struct ClientQuery {
  /// Case-insensitive substring match on name, email, tax number or phone
  pub search: Option<String>,
  /// Include archived clients in the result
  pub include_archived: bool,
}

/// Repository trait for client persistence operations
#[async_trait]
pub trait ClientRepository: Send + Sync {
  /// Creates a new client
  async fn create(&self, client: Client) -> Result<Client, ClientError>;

  /// Finds a client by id, scoped to its owning user
  async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Client>, ClientError>;

  /// Finds a client by exact name, scoped to its owning user
  async fn find_by_name(&self, user_id: Uuid, name: &str) -> Result<Option<Client>, ClientError>;

  /// Lists a user's clients with per-client invoice counts, name-ordered
  async fn list(&self, user_id: Uuid, query: &ClientQuery)
    -> Result<Vec<ClientWithStats>, ClientError>;

  /// Updates an existing client
  async fn update(&self, client: Client) -> Result<Client, ClientError>;

  /// Permanently deletes a client
  async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), ClientError>;
}
