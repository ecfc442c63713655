use std::sync::Arc;
use uuid::Uuid;

use crate::domain::client::entities::Client;
use crate::domain::client::errors::ClientError;
use crate::domain::client::services::ClientService;

/// Use case for archiving or restoring a client.
///
/// Archiving hides the client from pickers without touching any invoices
/// that snapshot it.
pub struct ArchiveClientUseCase {
  client_service: Arc<ClientService>,
}

impl ArchiveClientUseCase {
  pub fn new(client_service: Arc<ClientService>) -> Self {
    Self { client_service }
  }

  pub async fn archive(&self, user_id: Uuid, client_id: Uuid) -> Result<Client, ClientError> {
    self.client_service.archive(user_id, client_id).await
  }

  pub async fn restore(&self, user_id: Uuid, client_id: Uuid) -> Result<Client, ClientError> {
    self.client_service.restore(user_id, client_id).await
  }
}
