use actix_web::{
  Error, HttpMessage, HttpResponse,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  domain::auth::entities::User,
  domain::auth::services::AuthService,
  domain::auth::value_objects::SessionToken,
};

/// Session cookie name used by the browser client
pub const SESSION_COOKIE: &str = "session_token";

/// Authentication middleware that validates session tokens and attaches
/// the user to the request.
///
/// The token is taken from the Authorization header (`Bearer <token>`)
/// or, for browser clients, from the session cookie. Requests without a
/// valid session get a 401 response.
pub struct AuthMiddleware {
  auth_service: Arc<AuthService>,
}

impl AuthMiddleware {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      auth_service: self.auth_service.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  auth_service: Arc<AuthService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let auth_service = self.auth_service.clone();

    Box::pin(async move {
      let raw_token = match extract_session_token(&req) {
        Ok(token) => token,
        Err(e) => {
          let (request, _) = req.into_parts();
          let response = HttpResponse::Unauthorized().json(e).map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      let token = match SessionToken::from_string(raw_token) {
        Ok(token) => token,
        Err(_) => {
          let (request, _) = req.into_parts();
          let response = HttpResponse::Unauthorized()
            .json(ApiError::Auth(AuthErrorKind::InvalidToken))
            .map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      let user = match auth_service.validate_session(token).await {
        Ok(user) => user,
        Err(e) => {
          let (request, _) = req.into_parts();
          let api_error: ApiError = e.into();
          let response = HttpResponse::Unauthorized()
            .json(api_error)
            .map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(user);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract the session token from the Authorization header or cookie
fn extract_session_token(req: &ServiceRequest) -> Result<String, ApiError> {
  let from_header = req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.to_string());

  from_header
    .or_else(|| req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()))
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}

/// Extension trait to extract the authenticated user from a request
pub trait AuthUser {
  /// Get the authenticated user from request extensions
  ///
  /// # Panics
  ///
  /// Panics if the user is not present in extensions.
  /// This should only be called in handlers that are protected by AuthMiddleware.
  fn authenticated_user(&self) -> User;
}

impl AuthUser for actix_web::HttpRequest {
  fn authenticated_user(&self) -> User {
    self
      .extensions()
      .get::<User>()
      .cloned()
      .expect("User not found in request extensions. Did you forget to add AuthMiddleware?")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::cookie::Cookie;
  use actix_web::test::TestRequest;

  #[test]
  fn test_extract_session_token_from_header() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_srv_request();

    let token = extract_session_token(&req).unwrap();
    assert_eq!(token, "test_token_123");
  }

  #[test]
  fn test_extract_session_token_from_cookie() {
    let req = TestRequest::default()
      .cookie(Cookie::new(SESSION_COOKIE, "cookie_token_456"))
      .to_srv_request();

    let token = extract_session_token(&req).unwrap();
    assert_eq!(token, "cookie_token_456");
  }

  #[test]
  fn test_header_wins_over_cookie() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer header_token"))
      .cookie(Cookie::new(SESSION_COOKIE, "cookie_token"))
      .to_srv_request();

    let token = extract_session_token(&req).unwrap();
    assert_eq!(token, "header_token");
  }

  #[test]
  fn test_extract_session_token_missing() {
    let req = TestRequest::default().to_srv_request();

    let result = extract_session_token(&req);
    assert!(result.is_err());
  }

  #[test]
  fn test_extract_session_token_invalid_format() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "InvalidFormat token"))
      .to_srv_request();

    let result = extract_session_token(&req);
    assert!(result.is_err());
  }
}
