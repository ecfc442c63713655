use chrono::Duration;
use std::net::IpAddr;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{LoginAttempt, Session, User};
use super::errors::{AuthError, RepositoryError};
use super::ports::{LoginAttemptRepository, PasswordHasher, SessionRepository, UserRepository};
use super::value_objects::{Email, Password, PasswordHash, SessionToken};

/// Runtime configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
  pub session_ttl_seconds: i64,
  pub remember_me_ttl_seconds: i64,
  pub rate_limit_window_seconds: i64,
  pub max_failed_attempts: i64,
}

impl Default for AuthServiceConfig {
  fn default() -> Self {
    Self {
      session_ttl_seconds: 86_400,
      remember_me_ttl_seconds: 2_592_000,
      rate_limit_window_seconds: 900,
      max_failed_attempts: 5,
    }
  }
}

/// Authentication service implementing core business logic
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  attempt_repo: Arc<dyn LoginAttemptRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  config: AuthServiceConfig,
}

impl AuthService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    attempt_repo: Arc<dyn LoginAttemptRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      attempt_repo,
      password_hasher,
      config,
    }
  }

  /// Registers a new user and opens their first session
  ///
  /// # Errors
  /// Returns `AuthError::EmailAlreadyExists` if email is already registered
  pub async fn register(
    &self,
    email: Email,
    password: Password,
    full_name: String,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      return Err(AuthError::EmailAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let user = User::new(email.into_inner(), password_hash.into_inner(), full_name);

    // The unique constraint is the final arbiter under concurrent signups
    let created_user = match self.user_repo.create(user).await {
      Ok(user) => user,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        return Err(AuthError::EmailAlreadyExists);
      }
      Err(e) => return Err(e),
    };

    let session_token = SessionToken::generate();
    let token_hash = session_token.hash();

    let session = Session::with_duration(
      created_user.id,
      token_hash.into_inner(),
      Duration::seconds(self.config.session_ttl_seconds),
      None,
      None,
    );

    let created_session = self.session_repo.create(session).await?;

    Ok((created_user, created_session, session_token))
  }

  /// Authenticates a user and creates a new session
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` on bad email or password,
  /// `AuthError::RateLimitExceeded` after too many recent failures.
  pub async fn login(
    &self,
    email: Email,
    password: Password,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
    remember_me: bool,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    // Rate limiting is keyed by source IP; requests without a peer
    // address cannot be counted against a window
    if let Some(ip) = ip_address {
      let failed_attempts = self
        .attempt_repo
        .count_recent_failures(ip, self.config.rate_limit_window_seconds)
        .await?;

      if failed_attempts >= self.config.max_failed_attempts {
        let attempt = LoginAttempt::failure(email.as_str().to_string(), ip);
        self.attempt_repo.create(attempt).await?;

        return Err(AuthError::RateLimitExceeded);
      }
    }

    let user = match self.user_repo.find_by_email(&email).await? {
      Some(user) => user,
      None => {
        if let Some(ip) = ip_address {
          let attempt = LoginAttempt::failure(email.into_inner(), ip);
          self.attempt_repo.create(attempt).await?;
        }
        return Err(AuthError::InvalidCredentials);
      }
    };

    let password_hash = PasswordHash::from_hash(&user.password_hash)?;
    let is_valid = self
      .password_hasher
      .verify(&password, &password_hash)
      .await?;

    if !is_valid {
      if let Some(ip) = ip_address {
        let attempt = LoginAttempt::failure(email.into_inner(), ip);
        self.attempt_repo.create(attempt).await?;
      }

      return Err(AuthError::InvalidCredentials);
    }

    if let Some(ip) = ip_address {
      let attempt = LoginAttempt::success(email.into_inner(), ip);
      self.attempt_repo.create(attempt).await?;
    }

    let session_token = SessionToken::generate();
    let token_hash = session_token.hash();

    let duration = if remember_me {
      Duration::seconds(self.config.remember_me_ttl_seconds)
    } else {
      Duration::seconds(self.config.session_ttl_seconds)
    };

    let session = Session::with_duration(
      user.id,
      token_hash.into_inner(),
      duration,
      ip_address,
      user_agent,
    );

    let created_session = self.session_repo.create(session).await?;

    Ok((user, created_session, session_token))
  }

  /// Logs out a user by invalidating their session token
  ///
  /// # Errors
  /// Returns `AuthError::InvalidSession` if the session does not exist
  pub async fn logout(&self, token: SessionToken) -> Result<(), AuthError> {
    let token_hash = token.hash();

    let session = self
      .session_repo
      .find_by_token_hash(token_hash.as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    self.session_repo.delete(session.id).await?;

    Ok(())
  }

  /// Logs out all sessions for a specific user, returning how many were closed
  pub async fn logout_all(&self, user_id: Uuid) -> Result<usize, AuthError> {
    self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    let sessions = self.session_repo.find_by_user_id(user_id).await?;
    let session_count = sessions.len();

    self.session_repo.delete_all_for_user(user_id).await?;

    Ok(session_count)
  }

  /// Validates a session token and returns the associated user
  ///
  /// Expired sessions are removed on sight.
  pub async fn validate_session(&self, token: SessionToken) -> Result<User, AuthError> {
    let token_hash = token.hash();

    let session = self
      .session_repo
      .find_by_token_hash(token_hash.as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    if session.is_expired() {
      self.session_repo.delete(session.id).await?;
      return Err(AuthError::InvalidSession);
    }

    let user = self
      .user_repo
      .find_by_id(session.user_id)
      .await?
      .ok_or(AuthError::InvalidSession)?;

    Ok(user)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use std::sync::Mutex;

  struct NoUsers;

  #[async_trait]
  impl UserRepository for NoUsers {
    async fn create(&self, user: User) -> Result<User, AuthError> {
      Ok(user)
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, AuthError> {
      Ok(None)
    }

    async fn find_by_email(&self, _email: &Email) -> Result<Option<User>, AuthError> {
      Ok(None)
    }

    async fn update(&self, user: User) -> Result<User, AuthError> {
      Ok(user)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), AuthError> {
      Ok(())
    }
  }

  struct NoSessions;

  #[async_trait]
  impl SessionRepository for NoSessions {
    async fn create(&self, session: Session) -> Result<Session, AuthError> {
      Ok(session)
    }

    async fn find_by_token_hash(&self, _hash: &str) -> Result<Option<Session>, AuthError> {
      Ok(None)
    }

    async fn find_by_user_id(&self, _user_id: Uuid) -> Result<Vec<Session>, AuthError> {
      Ok(Vec::new())
    }

    async fn delete(&self, _session_id: Uuid) -> Result<(), AuthError> {
      Ok(())
    }

    async fn delete_all_for_user(&self, _user_id: Uuid) -> Result<(), AuthError> {
      Ok(())
    }
  }

  struct FixedFailures {
    failures: i64,
    recorded: Mutex<Vec<LoginAttempt>>,
  }

  #[async_trait]
  impl LoginAttemptRepository for FixedFailures {
    async fn create(&self, attempt: LoginAttempt) -> Result<LoginAttempt, AuthError> {
      self.recorded.lock().unwrap().push(attempt.clone());
      Ok(attempt)
    }

    async fn count_recent_failures(
      &self,
      _ip_address: IpAddr,
      _window_seconds: i64,
    ) -> Result<i64, AuthError> {
      Ok(self.failures)
    }
  }

  struct StubHasher;

  #[async_trait]
  impl PasswordHasher for StubHasher {
    async fn hash(&self, _password: &Password) -> Result<PasswordHash, AuthError> {
      Ok(PasswordHash::from_hash("$argon2id$stub").unwrap())
    }

    async fn verify(
      &self,
      _password: &Password,
      _hashed_password: &PasswordHash,
    ) -> Result<bool, AuthError> {
      Ok(false)
    }
  }

  fn service_with_attempts(attempts: Arc<FixedFailures>) -> AuthService {
    AuthService::new(
      Arc::new(NoUsers),
      Arc::new(NoSessions),
      attempts,
      Arc::new(StubHasher),
      AuthServiceConfig::default(),
    )
  }

  #[tokio::test]
  async fn test_login_is_rate_limited_by_ip() {
    let attempts = Arc::new(FixedFailures {
      failures: 5,
      recorded: Mutex::new(Vec::new()),
    });
    let service = service_with_attempts(attempts.clone());

    let result = service
      .login(
        Email::new("user@example.com").unwrap(),
        Password::new("password123").unwrap(),
        Some("203.0.113.9".parse().unwrap()),
        None,
        false,
      )
      .await;

    assert!(matches!(result, Err(AuthError::RateLimitExceeded)));

    let recorded = attempts.recorded.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].ip_address.to_string(), "203.0.113.9");
    assert!(!recorded[0].success);
  }

  #[tokio::test]
  async fn test_login_without_peer_address_skips_rate_limit() {
    let attempts = Arc::new(FixedFailures {
      failures: 99,
      recorded: Mutex::new(Vec::new()),
    });
    let service = service_with_attempts(attempts.clone());

    let result = service
      .login(
        Email::new("user@example.com").unwrap(),
        Password::new("password123").unwrap(),
        None,
        None,
        false,
      )
      .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    assert!(attempts.recorded.lock().unwrap().is_empty());
  }
}
