use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Response with the number of sessions that were closed
#[derive(Debug, Clone)]
pub struct LogoutAllDevicesResponse {
  pub sessions_closed: usize,
}

/// Use case for logging out every session of a user
pub struct LogoutAllDevicesUseCase {
  auth_service: Arc<AuthService>,
}

impl LogoutAllDevicesUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<LogoutAllDevicesResponse, AuthError> {
    let sessions_closed = self.auth_service.logout_all(user_id).await?;
    Ok(LogoutAllDevicesResponse { sessions_closed })
  }
}
