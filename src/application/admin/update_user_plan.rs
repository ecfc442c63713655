use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::admin::entities::{PlanType, Subscription};
use crate::domain::admin::errors::AdminError;
use crate::domain::admin::services::AdminService;

/// Use case for switching a user's subscription plan
pub struct UpdateUserPlanUseCase {
  admin_service: Arc<AdminService>,
}

impl UpdateUserPlanUseCase {
  pub fn new(admin_service: Arc<AdminService>) -> Self {
    Self { admin_service }
  }

  pub async fn execute(&self, target_id: Uuid, plan: &str) -> Result<Subscription, AdminError> {
    let plan = PlanType::from_str(plan).map_err(AdminError::InvalidPlan)?;
    self.admin_service.update_plan(target_id, plan).await
  }
}
