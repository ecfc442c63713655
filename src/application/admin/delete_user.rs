use std::sync::Arc;
use uuid::Uuid;

use crate::domain::admin::errors::AdminError;
use crate::domain::admin::services::AdminService;
use crate::domain::auth::entities::User;

/// Use case for removing a user account from the admin console
pub struct DeleteUserUseCase {
  admin_service: Arc<AdminService>,
}

impl DeleteUserUseCase {
  pub fn new(admin_service: Arc<AdminService>) -> Self {
    Self { admin_service }
  }

  /// # Errors
  /// Returns `AdminError::CannotDeleteSelf` when admins target themselves
  pub async fn execute(&self, acting: &User, target_id: Uuid) -> Result<(), AdminError> {
    self.admin_service.delete_user(acting, target_id).await
  }
}
