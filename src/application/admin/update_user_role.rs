use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::admin::errors::AdminError;
use crate::domain::admin::services::AdminService;
use crate::domain::auth::entities::User;
use crate::domain::auth::value_objects::UserRole;

/// Use case for changing another user's role
pub struct UpdateUserRoleUseCase {
  admin_service: Arc<AdminService>,
}

impl UpdateUserRoleUseCase {
  pub fn new(admin_service: Arc<AdminService>) -> Self {
    Self { admin_service }
  }

  /// # Errors
  /// Returns `AdminError::SuperAdminRequired` when a plain admin touches
  /// the super admin role, `AdminError::CannotChangeOwnRole` on self-edits
  pub async fn execute(
    &self,
    acting: &User,
    target_id: Uuid,
    role: &str,
  ) -> Result<User, AdminError> {
    let role = UserRole::from_str(role).map_err(|_| AdminError::InvalidRole(role.to_string()))?;
    self.admin_service.update_role(acting, target_id, role).await
  }
}
