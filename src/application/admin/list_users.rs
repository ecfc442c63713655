use std::sync::Arc;

use crate::domain::admin::entities::AdminUserPage;
use crate::domain::admin::errors::AdminError;
use crate::domain::admin::ports::AdminUserQuery;
use crate::domain::admin::services::AdminService;

/// Use case for the admin console's user table
pub struct ListUsersUseCase {
  admin_service: Arc<AdminService>,
}

impl ListUsersUseCase {
  pub fn new(admin_service: Arc<AdminService>) -> Self {
    Self { admin_service }
  }

  pub async fn execute(&self, query: AdminUserQuery) -> Result<AdminUserPage, AdminError> {
    self.admin_service.list_users(query).await
  }
}
