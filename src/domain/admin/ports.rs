use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::entities::{AdminUserPage, AnalyticsSnapshot, Subscription};
use super::errors::AdminError;
use crate::domain::auth::value_objects::UserRole;

/// Listing filter for the admin user table
#[derive(Debug, Clone)]
pub struct AdminUserQuery {
  pub limit: i64,
  pub offset: i64,
  /// Case-insensitive substring match on email or full name
  pub search: Option<String>,
  pub role: Option<UserRole>,
}

impl Default for AdminUserQuery {
  fn default() -> Self {
    Self {
      limit: 20,
      offset: 0,
      search: None,
      role: None,
    }
  }
}

/// Read model for the admin user table, joining users with their
/// subscription and per-user invoice and client counts
#[async_trait]
pub trait AdminUserRepository: Send + Sync {
  async fn list_users(&self, query: &AdminUserQuery) -> Result<AdminUserPage, AdminError>;
}

/// Repository trait for subscription rows
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Subscription>, AdminError>;

  async fn upsert(&self, subscription: Subscription) -> Result<Subscription, AdminError>;

  /// Increments the monthly usage counter for a user
  async fn increment_usage(&self, user_id: Uuid) -> Result<(), AdminError>;
}

/// Repository trait for analytics snapshots
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
  /// Computes a fresh snapshot for the given date from live data
  async fn compute_snapshot(&self, date: NaiveDate) -> Result<AnalyticsSnapshot, AdminError>;

  /// Inserts or updates the snapshot row for its date
  async fn upsert_snapshot(
    &self,
    snapshot: AnalyticsSnapshot,
  ) -> Result<AnalyticsSnapshot, AdminError>;

  /// Most recent snapshot by date, if any
  async fn latest_snapshot(&self) -> Result<Option<AnalyticsSnapshot>, AdminError>;
}
