use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{ClientListParams, ClientRequest, SuccessResponse},
  errors::ApiError,
  middleware::AuthUser,
};
use crate::application::client::{
  ArchiveClientUseCase, CreateClientUseCase, DeleteClientUseCase, ListClientsUseCase,
  UpdateClientUseCase,
};
use crate::domain::client::ports::ClientQuery;
use crate::domain::client::services::ClientInput;

fn to_client_input(request: ClientRequest) -> ClientInput {
  ClientInput {
    name: request.name,
    email: request.email,
    phone: request.phone,
    tax_number: request.tax_number,
    website: request.website,
    address: request.address,
  }
}

/// Handler for listing clients with invoice counts
///
/// GET /api/clients?search=&include_archived=
pub async fn list_clients_handler(
  params: web::Query<ClientListParams>,
  use_case: web::Data<Arc<ListClientsUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  let query = ClientQuery {
    search: params.search.clone(),
    include_archived: params.include_archived,
  };

  let clients = use_case.execute(user.id, query).await?;

  Ok(HttpResponse::Ok().json(clients))
}

/// Handler for creating a client
///
/// POST /api/clients
pub async fn create_client_handler(
  request: web::Json<ClientRequest>,
  use_case: web::Data<Arc<CreateClientUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user();

  let client = use_case
    .execute(user.id, to_client_input(request.into_inner()))
    .await?;

  Ok(HttpResponse::Created().json(client))
}

/// Handler for updating a client
///
/// PUT /api/clients/{client_id}
pub async fn update_client_handler(
  path: web::Path<Uuid>,
  request: web::Json<ClientRequest>,
  use_case: web::Data<Arc<UpdateClientUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user();
  let client_id = path.into_inner();

  let client = use_case
    .execute(user.id, client_id, to_client_input(request.into_inner()))
    .await?;

  Ok(HttpResponse::Ok().json(client))
}

/// Handler for archiving a client (soft delete)
///
/// POST /api/clients/{client_id}/archive
pub async fn archive_client_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<ArchiveClientUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();
  let client_id = path.into_inner();

  let client = use_case.archive(user.id, client_id).await?;

  Ok(HttpResponse::Ok().json(client))
}

/// Handler for restoring an archived client
///
/// POST /api/clients/{client_id}/restore
pub async fn restore_client_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<ArchiveClientUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();
  let client_id = path.into_inner();

  let client = use_case.restore(user.id, client_id).await?;

  Ok(HttpResponse::Ok().json(client))
}

/// Handler for permanently deleting a client
///
/// DELETE /api/clients/{client_id}
pub async fn delete_client_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteClientUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();
  let client_id = path.into_inner();

  use_case.execute(user.id, client_id).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Client deleted".to_string(),
  }))
}
