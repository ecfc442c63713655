use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use uuid::Uuid;

use super::value_objects::UserRole;

/// User entity representing an account in the system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  /// Unique identifier for the user
  pub id: Uuid,
  /// User's email address (unique)
  pub email: String,
  /// Hashed password using Argon2
  pub password_hash: String,
  /// User's full name
  pub full_name: String,
  /// Role controlling access to the admin console
  pub role: UserRole,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the user was last updated
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new regular user with the given details
  pub fn new(email: String, password_hash: String, full_name: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      email,
      password_hash,
      full_name,
      role: UserRole::User,
      created_at: now,
      updated_at: now,
    }
  }

  /// Creates a user from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    email: String,
    password_hash: String,
    full_name: String,
    role: UserRole,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      email,
      password_hash,
      full_name,
      role,
      created_at,
      updated_at,
    }
  }

  /// Changes the user's role
  pub fn change_role(&mut self, role: UserRole) {
    self.role = role;
    self.updated_at = Utc::now();
  }

  pub fn is_admin(&self) -> bool {
    self.role.is_admin()
  }

  pub fn is_super_admin(&self) -> bool {
    self.role == UserRole::SuperAdmin
  }
}

/// Session entity representing an active user session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  /// Unique identifier for the session
  pub id: Uuid,
  /// Reference to the user who owns this session
  pub user_id: Uuid,
  /// SHA-256 hash of the session token
  pub session_token: String,
  /// IP address from which the session was created
  pub ip_address: Option<IpAddr>,
  /// User agent string from the client
  pub user_agent: Option<String>,
  /// Timestamp when the session expires
  pub expires_at: DateTime<Utc>,
  /// Timestamp when the session was created
  pub created_at: DateTime<Utc>,
}

impl Session {
  /// Creates a new session for a user
  pub fn new(
    user_id: Uuid,
    session_token: String,
    expires_at: DateTime<Utc>,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      user_id,
      session_token,
      ip_address,
      user_agent,
      expires_at,
      created_at: Utc::now(),
    }
  }

  /// Creates a session with a duration instead of absolute expiration time
  pub fn with_duration(
    user_id: Uuid,
    session_token: String,
    duration: Duration,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
  ) -> Self {
    let expires_at = Utc::now() + duration;
    Self::new(user_id, session_token, expires_at, ip_address, user_agent)
  }

  /// Creates a session from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    user_id: Uuid,
    session_token: String,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      user_id,
      session_token,
      ip_address,
      user_agent,
      expires_at,
      created_at,
    }
  }

  /// Checks if the session has expired
  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }

  /// Checks if the session is still valid (not expired)
  pub fn is_valid(&self) -> bool {
    !self.is_expired()
  }
}

/// LoginAttempt entity for tracking authentication attempts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginAttempt {
  /// Unique identifier for the login attempt
  pub id: Uuid,
  /// Email address used in the login attempt
  pub email: String,
  /// IP address from which the attempt was made
  pub ip_address: IpAddr,
  /// Whether the login attempt was successful
  pub success: bool,
  /// Timestamp when the attempt was made
  pub attempted_at: DateTime<Utc>,
}

impl LoginAttempt {
  /// Creates a new login attempt record
  pub fn new(email: String, ip_address: IpAddr, success: bool) -> Self {
    Self {
      id: Uuid::new_v4(),
      email,
      ip_address,
      success,
      attempted_at: Utc::now(),
    }
  }

  /// Creates a successful login attempt
  pub fn success(email: String, ip_address: IpAddr) -> Self {
    Self::new(email, ip_address, true)
  }

  /// Creates a failed login attempt
  pub fn failure(email: String, ip_address: IpAddr) -> Self {
    Self::new(email, ip_address, false)
  }

  /// Creates a login attempt from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    email: String,
    ip_address: IpAddr,
    success: bool,
    attempted_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      email,
      ip_address,
      success,
      attempted_at,
    }
  }

  pub fn is_failure(&self) -> bool {
    !self.success
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  #[test]
  fn test_user_creation_defaults_to_regular_role() {
    let user = User::new(
      "test@example.com".to_string(),
      "hashed_password".to_string(),
      "Test User".to_string(),
    );

    assert_eq!(user.email, "test@example.com");
    assert_eq!(user.role, UserRole::User);
    assert!(!user.is_admin());
  }

  #[test]
  fn test_user_role_change() {
    let mut user = User::new(
      "test@example.com".to_string(),
      "hashed_password".to_string(),
      "Test User".to_string(),
    );

    user.change_role(UserRole::Admin);
    assert!(user.is_admin());
    assert!(!user.is_super_admin());

    user.change_role(UserRole::SuperAdmin);
    assert!(user.is_admin());
    assert!(user.is_super_admin());
  }

  #[test]
  fn test_session_creation() {
    let user_id = Uuid::new_v4();
    let session = Session::with_duration(
      user_id,
      "token_hash".to_string(),
      Duration::hours(1),
      Some("127.0.0.1".parse().unwrap()),
      Some("Mozilla/5.0".to_string()),
    );

    assert_eq!(session.user_id, user_id);
    assert!(!session.is_expired());
    assert!(session.is_valid());
  }

  #[test]
  fn test_session_expiration() {
    let session = Session::new(
      Uuid::new_v4(),
      "token_hash".to_string(),
      Utc::now() - Duration::seconds(10),
      None,
      None,
    );

    assert!(session.is_expired());
    assert!(!session.is_valid());
  }

  #[test]
  fn test_login_attempt_creation() {
    let ip = "192.168.1.1".parse().unwrap();
    let success_attempt = LoginAttempt::success("test@example.com".to_string(), ip);
    let failure_attempt = LoginAttempt::failure("test@example.com".to_string(), ip);

    assert!(!success_attempt.is_failure());
    assert!(failure_attempt.is_failure());
  }
}
