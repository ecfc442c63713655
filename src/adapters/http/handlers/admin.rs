use actix_web::{HttpRequest, HttpResponse, web};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{AdminUserListParams, AnalyticsParams, SuccessResponse, UpdatePlanRequest,
    UpdateRoleRequest},
  errors::ApiError,
  middleware::AuthUser,
};
use crate::application::admin::{
  DeleteUserUseCase, GetAnalyticsUseCase, ListUsersUseCase, UpdateUserPlanUseCase,
  UpdateUserRoleUseCase,
};
use crate::domain::admin::ports::AdminUserQuery;
use crate::domain::auth::value_objects::UserRole;

/// Handler for the admin user table
///
/// GET /api/admin/users?search=&role=&limit=&offset=
pub async fn list_users_handler(
  params: web::Query<AdminUserListParams>,
  use_case: web::Data<Arc<ListUsersUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let role = params
    .role
    .as_deref()
    .map(|s| {
      UserRole::from_str(s).map_err(|_| ApiError::Validation(format!("Unknown role: {}", s)))
    })
    .transpose()?;

  let defaults = AdminUserQuery::default();
  let query = AdminUserQuery {
    limit: params.limit.unwrap_or(defaults.limit).clamp(1, 100),
    offset: params.offset.unwrap_or(0).max(0),
    search: params.search.clone(),
    role,
  };

  let page = use_case.execute(query).await?;

  Ok(HttpResponse::Ok().json(page))
}

/// Handler for changing a user's role
///
/// PUT /api/admin/users/{user_id}/role
pub async fn update_user_role_handler(
  path: web::Path<Uuid>,
  request: web::Json<UpdateRoleRequest>,
  use_case: web::Data<Arc<UpdateUserRoleUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let acting = http_req.authenticated_user();
  let target_id = path.into_inner();

  let user = use_case.execute(&acting, target_id, &request.role).await?;

  Ok(HttpResponse::Ok().json(serde_json::json!({
    "user_id": user.id,
    "email": user.email,
    "role": user.role,
  })))
}

/// Handler for changing a user's subscription plan
///
/// PUT /api/admin/users/{user_id}/plan
pub async fn update_user_plan_handler(
  path: web::Path<Uuid>,
  request: web::Json<UpdatePlanRequest>,
  use_case: web::Data<Arc<UpdateUserPlanUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let target_id = path.into_inner();

  let subscription = use_case.execute(target_id, &request.plan).await?;

  Ok(HttpResponse::Ok().json(subscription))
}

/// Handler for deleting a user account
///
/// DELETE /api/admin/users/{user_id}
pub async fn delete_user_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let acting = http_req.authenticated_user();
  let target_id = path.into_inner();

  use_case.execute(&acting, target_id).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "User deleted".to_string(),
  }))
}

/// Handler for the analytics dashboard
///
/// GET /api/admin/analytics?refresh=
pub async fn get_analytics_handler(
  params: web::Query<AnalyticsParams>,
  use_case: web::Data<Arc<GetAnalyticsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let snapshot = use_case.execute(params.refresh).await?;

  Ok(HttpResponse::Ok().json(snapshot))
}
