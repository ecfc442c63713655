use actix_web::{
  HttpRequest, HttpResponse,
  cookie::{Cookie, SameSite, time::Duration as CookieDuration},
  web,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    CurrentUserResponse, LoginRequest, LoginResponse, LogoutAllResponse, RegisterRequest,
    RegisterResponse, SuccessResponse,
  },
  errors::ApiError,
  middleware::SESSION_COOKIE,
};
use crate::application::auth::{
  GetCurrentUserUseCase, LoginUserCommand, LoginUserUseCase, LogoutAllDevicesUseCase,
  LogoutUserUseCase, RegisterUserCommand, RegisterUserUseCase,
};

/// Extract session token from Authorization header or session cookie
fn extract_session_token(req: &HttpRequest) -> Result<String, ApiError> {
  let from_header = req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.to_string());

  from_header
    .or_else(|| req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()))
    .ok_or_else(|| ApiError::Validation("Missing or invalid Authorization header".to_string()))
}

/// Extract IP address from the request
fn extract_ip_address(req: &HttpRequest) -> Option<std::net::IpAddr> {
  req.connection_info().realip_remote_addr().and_then(|addr| {
    // The peer address may or may not carry a port
    addr
      .parse::<std::net::SocketAddr>()
      .map(|sock| sock.ip())
      .or_else(|_| addr.parse::<std::net::IpAddr>())
      .ok()
  })
}

/// Extract user agent from the request
fn extract_user_agent(req: &HttpRequest) -> Option<String> {
  req
    .headers()
    .get("User-Agent")
    .and_then(|h| h.to_str().ok())
    .map(|s| s.to_string())
}

/// HttpOnly session cookie scoped to the whole site
fn session_cookie(token: &str, expires_at: DateTime<Utc>) -> Cookie<'static> {
  let max_age = (expires_at - Utc::now()).num_seconds().max(0);

  Cookie::build(SESSION_COOKIE, token.to_string())
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .max_age(CookieDuration::seconds(max_age))
    .finish()
}

/// Expired cookie that removes the session from the browser
fn clear_session_cookie() -> Cookie<'static> {
  let mut cookie = Cookie::build(SESSION_COOKIE, "")
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .finish();
  cookie.make_removal();
  cookie
}

/// Handler for user registration
///
/// POST /api/auth/register
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = RegisterUserCommand {
    email: request.email.clone(),
    password: request.password.clone(),
    full_name: request.full_name.clone(),
  };

  let response = use_case.execute(command).await?;

  let cookie = session_cookie(&response.session_token, response.expires_at);
  let api_response = RegisterResponse {
    user_id: response.user_id,
    email: response.email,
    full_name: response.full_name,
    session_token: response.session_token,
    expires_at: response.expires_at,
  };

  Ok(HttpResponse::Created().cookie(cookie).json(api_response))
}

/// Handler for user login
///
/// POST /api/auth/login
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let ip_address = extract_ip_address(&http_req);
  let user_agent = extract_user_agent(&http_req);

  let command = LoginUserCommand {
    email: request.email.clone(),
    password: request.password.clone(),
    remember_me: request.remember_me,
  };

  let response = use_case.execute(command, ip_address, user_agent).await?;

  let cookie = session_cookie(&response.session_token, response.expires_at);
  let api_response = LoginResponse {
    user_id: response.user_id,
    email: response.email,
    full_name: response.full_name,
    role: response.role,
    session_token: response.session_token,
    expires_at: response.expires_at,
  };

  Ok(HttpResponse::Ok().cookie(cookie).json(api_response))
}

/// Handler for user logout
///
/// POST /api/auth/logout
pub async fn logout_handler(
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session_token = extract_session_token(&http_req)?;

  use_case.execute(session_token).await?;

  let response = SuccessResponse {
    message: "Successfully logged out".to_string(),
  };

  Ok(
    HttpResponse::Ok()
      .cookie(clear_session_cookie())
      .json(response),
  )
}

/// Handler for logging out from all devices
///
/// POST /api/auth/logout-all
pub async fn logout_all_handler(
  use_case: web::Data<Arc<LogoutAllDevicesUseCase>>,
  get_user_use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session_token = extract_session_token(&http_req)?;

  let current_user = get_user_use_case.execute(session_token).await?;
  let response = use_case.execute(current_user.user_id).await?;

  let api_response = LogoutAllResponse {
    sessions_closed: response.sessions_closed,
    message: format!(
      "Successfully logged out from {} device(s)",
      response.sessions_closed
    ),
  };

  Ok(
    HttpResponse::Ok()
      .cookie(clear_session_cookie())
      .json(api_response),
  )
}

/// Handler for getting current user information
///
/// GET /api/auth/me
pub async fn get_current_user_handler(
  use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session_token = extract_session_token(&http_req)?;

  let response = use_case.execute(session_token).await?;

  let api_response = CurrentUserResponse {
    user_id: response.user_id,
    email: response.email,
    full_name: response.full_name,
    role: response.role,
    created_at: response.created_at,
  };

  Ok(HttpResponse::Ok().json(api_response))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_extract_session_token_from_header() {
    use actix_web::test::TestRequest;

    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_http_request();

    let token = extract_session_token(&req).unwrap();
    assert_eq!(token, "test_token_123");
  }

  #[test]
  fn test_extract_session_token_from_cookie() {
    use actix_web::test::TestRequest;

    let req = TestRequest::default()
      .cookie(Cookie::new(SESSION_COOKIE, "cookie_token"))
      .to_http_request();

    let token = extract_session_token(&req).unwrap();
    assert_eq!(token, "cookie_token");
  }

  #[test]
  fn test_extract_session_token_missing() {
    use actix_web::test::TestRequest;

    let req = TestRequest::default().to_http_request();

    let result = extract_session_token(&req);
    assert!(result.is_err());
  }

  #[test]
  fn test_extract_ip_address_handles_v4_and_v6() {
    use actix_web::test::TestRequest;

    let req = TestRequest::default()
      .peer_addr("192.0.2.10:50514".parse().unwrap())
      .to_http_request();
    assert_eq!(
      extract_ip_address(&req),
      Some("192.0.2.10".parse().unwrap())
    );

    let req = TestRequest::default()
      .peer_addr("[2001:db8::1]:50514".parse().unwrap())
      .to_http_request();
    assert_eq!(
      extract_ip_address(&req),
      Some("2001:db8::1".parse().unwrap())
    );
  }

  #[test]
  fn test_logout_all_response_reports_closed_sessions() {
    use crate::application::auth::LogoutAllDevicesResponse;

    let response = LogoutAllDevicesResponse { sessions_closed: 3 };
    let api_response = LogoutAllResponse {
      sessions_closed: response.sessions_closed,
      message: format!(
        "Successfully logged out from {} device(s)",
        response.sessions_closed
      ),
    };

    let json = serde_json::to_value(&api_response).unwrap();
    assert_eq!(json["sessions_closed"], 3);
    assert_eq!(json["message"], "Successfully logged out from 3 device(s)");
  }

  #[test]
  fn test_session_cookie_attributes() {
    let expires_at = Utc::now() + chrono::Duration::hours(24);
    let cookie = session_cookie("abc123", expires_at);

    assert_eq!(cookie.name(), SESSION_COOKIE);
    assert_eq!(cookie.value(), "abc123");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
  }
}
