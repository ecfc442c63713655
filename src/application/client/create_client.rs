use std::sync::Arc;
use uuid::Uuid;

use crate::domain::client::entities::Client;
use crate::domain::client::errors::ClientError;
use crate::domain::client::services::{ClientInput, ClientService};

/// Use case for adding a client to the registry
pub struct CreateClientUseCase {
  client_service: Arc<ClientService>,
}

impl CreateClientUseCase {
  pub fn new(client_service: Arc<ClientService>) -> Self {
    Self { client_service }
  }

  /// # Errors
  /// Returns `ClientError::NameAlreadyExists` for duplicate names
  pub async fn execute(&self, user_id: Uuid, input: ClientInput) -> Result<Client, ClientError> {
    self.client_service.create(user_id, input).await
  }
}
