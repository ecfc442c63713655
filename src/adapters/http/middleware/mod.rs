pub mod admin;
pub mod auth;
pub mod request_id;

pub use admin::AdminGuard;
pub use auth::{AuthMiddleware, AuthUser, SESSION_COOKIE};
pub use request_id::{RequestId, RequestIdExt, RequestIdMiddleware};
