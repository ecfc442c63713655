use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::auth::value_objects::UserRole;

/// Subscription plan tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
  Free,
  Pro,
}

impl PlanType {
  pub fn as_str(&self) -> &'static str {
    match self {
      PlanType::Free => "free",
      PlanType::Pro => "pro",
    }
  }

  /// Monthly invoice allowance; `None` means unlimited
  pub fn invoice_limit(&self) -> Option<i32> {
    match self {
      PlanType::Free => Some(5),
      PlanType::Pro => None,
    }
  }
}

impl FromStr for PlanType {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "free" => Ok(PlanType::Free),
      "pro" => Ok(PlanType::Pro),
      other => Err(format!("unknown plan type: {}", other)),
    }
  }
}

impl fmt::Display for PlanType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A user's subscription and monthly usage counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
  pub id: Uuid,
  pub user_id: Uuid,
  pub plan_type: PlanType,
  pub status: String,
  pub invoices_created_this_month: i32,
  pub invoice_limit: Option<i32>,
  /// First day of the next calendar month, when the counter resets
  pub usage_reset_date: NaiveDate,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Subscription {
  pub fn new_free(user_id: Uuid) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      plan_type: PlanType::Free,
      status: "active".to_string(),
      invoices_created_this_month: 0,
      invoice_limit: PlanType::Free.invoice_limit(),
      usage_reset_date: next_month_start(now.date_naive()),
      created_at: now,
      updated_at: now,
    }
  }

  pub fn change_plan(&mut self, plan: PlanType) {
    self.plan_type = plan;
    self.invoice_limit = plan.invoice_limit();
    self.updated_at = Utc::now();
  }

  /// True when the monthly window has rolled over
  pub fn needs_reset(&self, today: NaiveDate) -> bool {
    today >= self.usage_reset_date
  }

  pub fn reset_usage(&mut self, today: NaiveDate) {
    self.invoices_created_this_month = 0;
    self.usage_reset_date = next_month_start(today);
    self.updated_at = Utc::now();
  }
}

/// First day of the month after `date`
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
  let (year, month) = if date.month() == 12 {
    (date.year() + 1, 1)
  } else {
    (date.year(), date.month() + 1)
  };
  // Day 1 of a valid month always exists
  NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Usage summary returned to the invoice wizard.
///
/// Plan gating is currently disabled: `can_create` is always true and the
/// limit is reported for display only.
#[derive(Debug, Clone, Serialize)]
pub struct UsageInfo {
  pub plan_type: PlanType,
  pub invoices_created_this_month: i32,
  pub invoice_limit: Option<i32>,
  pub usage_reset_date: NaiveDate,
  pub can_create: bool,
}

impl UsageInfo {
  pub fn from_subscription(subscription: &Subscription) -> Self {
    Self {
      plan_type: subscription.plan_type,
      invoices_created_this_month: subscription.invoices_created_this_month,
      invoice_limit: subscription.invoice_limit,
      usage_reset_date: subscription.usage_reset_date,
      can_create: true,
    }
  }
}

/// Listing row for the admin user table
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserRecord {
  pub id: Uuid,
  pub email: String,
  pub full_name: String,
  pub role: UserRole,
  pub plan_type: PlanType,
  pub subscription_status: String,
  pub invoices_created_this_month: i32,
  pub invoice_count: i64,
  pub client_count: i64,
  pub created_at: DateTime<Utc>,
}

/// One page of admin user records plus the total count
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserPage {
  pub users: Vec<AdminUserRecord>,
  pub total: i64,
}

/// Daily analytics snapshot, one row per calendar date
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSnapshot {
  pub id: Uuid,
  pub date: NaiveDate,
  pub total_users: i64,
  pub new_users_today: i64,
  pub active_users_last_7_days: i64,
  pub active_users_last_30_days: i64,
  pub total_invoices: i64,
  pub invoices_created_today: i64,
  pub invoices_created_this_week: i64,
  pub invoices_created_this_month: i64,
  pub total_revenue: Decimal,
  pub revenue_today: Decimal,
  pub revenue_this_week: Decimal,
  pub revenue_this_month: Decimal,
  pub free_users: i64,
  pub pro_users: i64,
  pub total_clients: i64,
  pub avg_invoices_per_user: Decimal,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_plan_limits() {
    assert_eq!(PlanType::Free.invoice_limit(), Some(5));
    assert_eq!(PlanType::Pro.invoice_limit(), None);
  }

  #[test]
  fn test_next_month_start() {
    let mid_month = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
    assert_eq!(
      next_month_start(mid_month),
      NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    );

    let december = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    assert_eq!(
      next_month_start(december),
      NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    );
  }

  #[test]
  fn test_usage_reset_rollover() {
    let mut subscription = Subscription::new_free(Uuid::new_v4());
    subscription.invoices_created_this_month = 4;
    subscription.usage_reset_date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();

    let before = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
    let after = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
    assert!(!subscription.needs_reset(before));
    assert!(subscription.needs_reset(after));

    subscription.reset_usage(after);
    assert_eq!(subscription.invoices_created_this_month, 0);
    assert_eq!(
      subscription.usage_reset_date,
      NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    );
  }

  #[test]
  fn test_usage_gating_is_disabled() {
    let mut subscription = Subscription::new_free(Uuid::new_v4());
    subscription.invoices_created_this_month = 99;

    let usage = UsageInfo::from_subscription(&subscription);
    assert!(usage.can_create);
    assert_eq!(usage.invoice_limit, Some(5));
  }

  #[test]
  fn test_plan_change_updates_limit() {
    let mut subscription = Subscription::new_free(Uuid::new_v4());
    subscription.change_plan(PlanType::Pro);
    assert_eq!(subscription.invoice_limit, None);
  }
}
