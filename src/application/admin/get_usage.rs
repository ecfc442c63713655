use std::sync::Arc;
use uuid::Uuid;

use crate::domain::admin::entities::UsageInfo;
use crate::domain::admin::errors::AdminError;
use crate::domain::admin::services::AdminService;

/// Use case for the wizard's usage banner.
///
/// Gating is disabled, so this only reports numbers for display.
pub struct GetUsageUseCase {
  admin_service: Arc<AdminService>,
}

impl GetUsageUseCase {
  pub fn new(admin_service: Arc<AdminService>) -> Self {
    Self { admin_service }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<UsageInfo, AdminError> {
    self.admin_service.usage(user_id).await
  }
}
