use std::sync::Arc;

use crate::domain::admin::entities::AnalyticsSnapshot;
use crate::domain::admin::errors::AdminError;
use crate::domain::admin::services::AdminService;

/// Use case for reading the analytics dashboard.
///
/// `refresh` recomputes today's snapshot from live data before returning.
pub struct GetAnalyticsUseCase {
  admin_service: Arc<AdminService>,
}

impl GetAnalyticsUseCase {
  pub fn new(admin_service: Arc<AdminService>) -> Self {
    Self { admin_service }
  }

  pub async fn execute(&self, refresh: bool) -> Result<AnalyticsSnapshot, AdminError> {
    if refresh {
      self.admin_service.refresh_analytics().await
    } else {
      self.admin_service.analytics().await
    }
  }
}
