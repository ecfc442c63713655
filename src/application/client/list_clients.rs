use std::sync::Arc;
use uuid::Uuid;

use crate::domain::client::entities::ClientWithStats;
use crate::domain::client::errors::ClientError;
use crate::domain::client::ports::ClientQuery;
use crate::domain::client::services::ClientService;

/// Use case for listing a user's clients with invoice counts
pub struct ListClientsUseCase {
  client_service: Arc<ClientService>,
}

impl ListClientsUseCase {
  pub fn new(client_service: Arc<ClientService>) -> Self {
    Self { client_service }
  }

  pub async fn execute(
    &self,
    user_id: Uuid,
    query: ClientQuery,
  ) -> Result<Vec<ClientWithStats>, ClientError> {
    self.client_service.list(user_id, query).await
  }
}
