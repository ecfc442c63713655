use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client entity: a billable party in a user's registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
  pub id: Uuid,
  pub user_id: Uuid,
  pub name: String,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub tax_number: Option<String>,
  pub website: Option<String>,
  pub address: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  /// Set when the client is archived (soft deleted)
  pub archived_at: Option<DateTime<Utc>>,
}

impl Client {
  pub fn new(user_id: Uuid, name: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      name,
      email: None,
      phone: None,
      tax_number: None,
      website: None,
      address: None,
      created_at: now,
      updated_at: now,
      archived_at: None,
    }
  }

  pub fn is_archived(&self) -> bool {
    self.archived_at.is_some()
  }

  pub fn archive(&mut self) {
    let now = Utc::now();
    self.archived_at = Some(now);
    self.updated_at = now;
  }

  pub fn restore(&mut self) {
    self.archived_at = None;
    self.updated_at = Utc::now();
  }
}

/// A client together with how many invoices reference it.
///
/// Invoices carry a snapshot of the client rather than a foreign key, so the
/// count is matched by name within the owning user's invoices.
#[derive(Debug, Clone, Serialize)]
pub struct ClientWithStats {
  #[serde(flatten)]
  pub client: Client,
  pub invoice_count: i64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_archive_and_restore() {
    let mut client = Client::new(Uuid::new_v4(), "Acme Ltd".to_string());
    assert!(!client.is_archived());

    client.archive();
    assert!(client.is_archived());

    client.restore();
    assert!(!client.is_archived());
  }
}
