use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Client, ClientWithStats};
use super::errors::ClientError;
use super::ports::{ClientQuery, ClientRepository};

/// Editable client fields as submitted by the client form
#[derive(Debug, Clone)]
pub struct ClientInput {
  pub name: String,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub tax_number: Option<String>,
  pub website: Option<String>,
  pub address: Option<String>,
}

/// Client registry service: CRUD, archiving and duplicate-name protection
pub struct ClientService {
  repo: Arc<dyn ClientRepository>,
}

impl ClientService {
  pub fn new(repo: Arc<dyn ClientRepository>) -> Self {
    Self { repo }
  }

  /// Creates a client, rejecting duplicate names within the same user
  pub async fn create(&self, user_id: Uuid, input: ClientInput) -> Result<Client, ClientError> {
    let name = Self::normalized_name(&input.name)?;

    if self.repo.find_by_name(user_id, &name).await?.is_some() {
      return Err(ClientError::NameAlreadyExists(name));
    }

    let mut client = Client::new(user_id, name.clone());
    Self::apply_input(&mut client, input);

    // The unique constraint backstops the pre-check under concurrency
    match self.repo.create(client).await {
      Ok(created) => Ok(created),
      Err(ClientError::Database(sqlx::Error::Database(db_err)))
        if db_err.is_unique_violation() =>
      {
        Err(ClientError::NameAlreadyExists(name))
      }
      Err(e) => Err(e),
    }
  }

  /// Updates a client, keeping names unique within the user's registry
  pub async fn update(
    &self,
    user_id: Uuid,
    client_id: Uuid,
    input: ClientInput,
  ) -> Result<Client, ClientError> {
    let name = Self::normalized_name(&input.name)?;

    let mut client = self
      .repo
      .find_by_id(user_id, client_id)
      .await?
      .ok_or(ClientError::NotFound(client_id))?;

    if let Some(existing) = self.repo.find_by_name(user_id, &name).await? {
      if existing.id != client_id {
        return Err(ClientError::NameAlreadyExists(name));
      }
    }

    Self::apply_input(&mut client, input);
    client.name = name;
    client.updated_at = Utc::now();

    self.repo.update(client).await
  }

  pub async fn get(&self, user_id: Uuid, client_id: Uuid) -> Result<Client, ClientError> {
    self
      .repo
      .find_by_id(user_id, client_id)
      .await?
      .ok_or(ClientError::NotFound(client_id))
  }

  pub async fn list(
    &self,
    user_id: Uuid,
    query: ClientQuery,
  ) -> Result<Vec<ClientWithStats>, ClientError> {
    self.repo.list(user_id, &query).await
  }

  /// Archives a client so it no longer appears in pickers.
  ///
  /// Existing invoices keep their snapshot and are unaffected.
  pub async fn archive(&self, user_id: Uuid, client_id: Uuid) -> Result<Client, ClientError> {
    let mut client = self.get(user_id, client_id).await?;
    client.archive();
    self.repo.update(client).await
  }

  /// Brings an archived client back into the active registry
  pub async fn restore(&self, user_id: Uuid, client_id: Uuid) -> Result<Client, ClientError> {
    let mut client = self.get(user_id, client_id).await?;
    client.restore();
    self.repo.update(client).await
  }

  /// Permanently removes a client.
  ///
  /// Invoices referencing the client by snapshot are left untouched.
  pub async fn delete(&self, user_id: Uuid, client_id: Uuid) -> Result<(), ClientError> {
    self.get(user_id, client_id).await?;
    self.repo.delete(user_id, client_id).await
  }

  fn normalized_name(raw: &str) -> Result<String, ClientError> {
    let name = raw.trim();
    if name.is_empty() {
      return Err(ClientError::EmptyName);
    }
    if name.len() > 255 {
      return Err(ClientError::InvalidField("name is too long".to_string()));
    }
    Ok(name.to_string())
  }

  fn apply_input(client: &mut Client, input: ClientInput) {
    client.email = input.email.filter(|s| !s.trim().is_empty());
    client.phone = input.phone.filter(|s| !s.trim().is_empty());
    client.tax_number = input.tax_number.filter(|s| !s.trim().is_empty());
    client.website = input.website.filter(|s| !s.trim().is_empty());
    client.address = input.address.filter(|s| !s.trim().is_empty());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_name_normalization() {
    assert_eq!(
      ClientService::normalized_name("  Acme Ltd  ").unwrap(),
      "Acme Ltd"
    );
    assert!(matches!(
      ClientService::normalized_name("   "),
      Err(ClientError::EmptyName)
    ));
    assert!(ClientService::normalized_name(&"x".repeat(300)).is_err());
  }

  #[test]
  fn test_blank_optional_fields_become_none() {
    let mut client = Client::new(Uuid::new_v4(), "Acme".to_string());
    ClientService::apply_input(
      &mut client,
      ClientInput {
        name: "Acme".to_string(),
        email: Some("  ".to_string()),
        phone: Some("+1 555 0100".to_string()),
        tax_number: None,
        website: Some(String::new()),
        address: Some("1 Main St".to_string()),
      },
    );

    assert_eq!(client.email, None);
    assert_eq!(client.phone.as_deref(), Some("+1 555 0100"));
    assert_eq!(client.website, None);
    assert_eq!(client.address.as_deref(), Some("1 Main St"));
  }
}
