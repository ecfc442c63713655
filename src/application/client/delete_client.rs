use std::sync::Arc;
use uuid::Uuid;

use crate::domain::client::errors::ClientError;
use crate::domain::client::services::ClientService;

/// Use case for permanently deleting a client.
///
/// Invoices keep their own snapshot of the client, so nothing cascades.
pub struct DeleteClientUseCase {
  client_service: Arc<ClientService>,
}

impl DeleteClientUseCase {
  pub fn new(client_service: Arc<ClientService>) -> Self {
    Self { client_service }
  }

  pub async fn execute(&self, user_id: Uuid, client_id: Uuid) -> Result<(), ClientError> {
    self.client_service.delete(user_id, client_id).await
  }
}
