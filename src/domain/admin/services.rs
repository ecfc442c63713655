use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{AdminUserPage, AnalyticsSnapshot, PlanType, Subscription, UsageInfo};
use super::errors::AdminError;
use super::ports::{AdminUserQuery, AdminUserRepository, AnalyticsRepository, SubscriptionRepository};
use crate::domain::auth::entities::User;
use crate::domain::auth::ports::UserRepository;
use crate::domain::auth::value_objects::UserRole;

/// Admin console service: user management, plans, usage and analytics
pub struct AdminService {
  user_repo: Arc<dyn UserRepository>,
  admin_users: Arc<dyn AdminUserRepository>,
  subscriptions: Arc<dyn SubscriptionRepository>,
  analytics: Arc<dyn AnalyticsRepository>,
}

impl AdminService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    admin_users: Arc<dyn AdminUserRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
  ) -> Self {
    Self {
      user_repo,
      admin_users,
      subscriptions,
      analytics,
    }
  }

  pub async fn list_users(&self, query: AdminUserQuery) -> Result<AdminUserPage, AdminError> {
    self.admin_users.list_users(&query).await
  }

  /// Changes a user's role.
  ///
  /// Admins cannot change their own role, and anything touching the
  /// super admin role requires a super admin actor.
  pub async fn update_role(
    &self,
    acting: &User,
    target_id: Uuid,
    role: UserRole,
  ) -> Result<User, AdminError> {
    if acting.id == target_id {
      return Err(AdminError::CannotChangeOwnRole);
    }

    let mut target = self
      .user_repo
      .find_by_id(target_id)
      .await?
      .ok_or(AdminError::UserNotFound(target_id))?;

    if (target.is_super_admin() || role == UserRole::SuperAdmin) && !acting.is_super_admin() {
      return Err(AdminError::SuperAdminRequired);
    }

    target.change_role(role);
    Ok(self.user_repo.update(target).await?)
  }

  /// Switches a user's subscription plan, creating the row on first use
  pub async fn update_plan(
    &self,
    target_id: Uuid,
    plan: PlanType,
  ) -> Result<Subscription, AdminError> {
    self
      .user_repo
      .find_by_id(target_id)
      .await?
      .ok_or(AdminError::UserNotFound(target_id))?;

    let mut subscription = match self.subscriptions.find_by_user_id(target_id).await? {
      Some(subscription) => subscription,
      None => Subscription::new_free(target_id),
    };

    subscription.change_plan(plan);
    self.subscriptions.upsert(subscription).await
  }

  /// Permanently deletes a user account with all dependent data.
  ///
  /// Self-deletion is forbidden, and super admin accounts can only be
  /// removed by another super admin.
  pub async fn delete_user(&self, acting: &User, target_id: Uuid) -> Result<(), AdminError> {
    if acting.id == target_id {
      return Err(AdminError::CannotDeleteSelf);
    }

    let target = self
      .user_repo
      .find_by_id(target_id)
      .await?
      .ok_or(AdminError::UserNotFound(target_id))?;

    if target.is_super_admin() && !acting.is_super_admin() {
      return Err(AdminError::SuperAdminRequired);
    }

    self.user_repo.delete(target_id).await?;
    Ok(())
  }

  /// Current usage for a user, rolling the monthly window over when due
  pub async fn usage(&self, user_id: Uuid) -> Result<UsageInfo, AdminError> {
    let subscription = self.ensure_subscription(user_id).await?;
    Ok(UsageInfo::from_subscription(&subscription))
  }

  /// Bumps the monthly usage counter after an invoice was created
  pub async fn record_invoice_created(&self, user_id: Uuid) -> Result<(), AdminError> {
    self.ensure_subscription(user_id).await?;
    self.subscriptions.increment_usage(user_id).await
  }

  /// Recomputes today's analytics snapshot from live data
  pub async fn refresh_analytics(&self) -> Result<AnalyticsSnapshot, AdminError> {
    let today = Utc::now().date_naive();
    let snapshot = self.analytics.compute_snapshot(today).await?;
    self.analytics.upsert_snapshot(snapshot).await
  }

  /// Latest snapshot, computing today's when it does not exist yet
  pub async fn analytics(&self) -> Result<AnalyticsSnapshot, AdminError> {
    let today = Utc::now().date_naive();
    match self.analytics.latest_snapshot().await? {
      Some(snapshot) if snapshot.date == today => Ok(snapshot),
      _ => self.refresh_analytics().await,
    }
  }

  async fn ensure_subscription(&self, user_id: Uuid) -> Result<Subscription, AdminError> {
    let today = Utc::now().date_naive();

    let mut subscription = match self.subscriptions.find_by_user_id(user_id).await? {
      Some(subscription) => subscription,
      None => {
        return self
          .subscriptions
          .upsert(Subscription::new_free(user_id))
          .await;
      }
    };

    if subscription.needs_reset(today) {
      subscription.reset_usage(today);
      subscription = self.subscriptions.upsert(subscription).await?;
    }

    Ok(subscription)
  }
}
