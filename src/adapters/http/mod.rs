pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  CurrentUserResponse, ErrorResponse, LoginRequest, LoginResponse, LogoutAllResponse,
  RegisterRequest, RegisterResponse, SuccessResponse,
};
pub use errors::{ApiError, AuthErrorKind};
pub use middleware::{
  AdminGuard, AuthMiddleware, AuthUser, RequestId, RequestIdExt, RequestIdMiddleware,
  SESSION_COOKIE,
};
pub use routes::{ApiDependencies, configure_api_routes};
