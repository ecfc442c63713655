use std::sync::Arc;
use uuid::Uuid;

use crate::domain::client::entities::Client;
use crate::domain::client::errors::ClientError;
use crate::domain::client::services::{ClientInput, ClientService};

/// Use case for editing a client's details
pub struct UpdateClientUseCase {
  client_service: Arc<ClientService>,
}

impl UpdateClientUseCase {
  pub fn new(client_service: Arc<ClientService>) -> Self {
    Self { client_service }
  }

  pub async fn execute(
    &self,
    user_id: Uuid,
    client_id: Uuid,
    input: ClientInput,
  ) -> Result<Client, ClientError> {
    self.client_service.update(user_id, client_id, input).await
  }
}
