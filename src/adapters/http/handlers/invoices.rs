use actix_web::{HttpRequest, HttpResponse, web};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    ChangeStatusRequest, DraftParams, InvoiceListParams, InvoiceRequest, SuccessResponse,
    ThemeListResponse,
  },
  errors::ApiError,
  middleware::AuthUser,
};
use crate::application::admin::GetUsageUseCase;
use crate::application::invoice::{
  ChangeInvoiceStatusUseCase, CreateInvoiceUseCase, DeleteInvoiceUseCase, GetInvoiceDetailsUseCase,
  ListInvoicesUseCase, ListThemesUseCase, PrepareInvoiceDraftUseCase, UpdateInvoiceUseCase,
};
use crate::domain::invoice::ports::InvoiceListQuery;
use crate::domain::invoice::services::InvoiceInput;
use crate::domain::invoice::value_objects::{Currency, InvoiceStatus, PaymentTerms};

fn to_invoice_input(request: InvoiceRequest) -> Result<InvoiceInput, ApiError> {
  let payment_terms = request
    .payment_terms
    .as_deref()
    .map(PaymentTerms::from_str)
    .transpose()
    .map_err(|e| ApiError::Validation(e.to_string()))?;

  let currency = request
    .currency
    .map(Currency::new)
    .transpose()
    .map_err(|e| ApiError::Validation(e.to_string()))?;

  Ok(InvoiceInput {
    invoice_number: request.invoice_number,
    client_name: request.client_name,
    client_address: request.client_address,
    client_email: request.client_email,
    client_phone: request.client_phone,
    invoice_date: request.invoice_date,
    due_date: request.due_date,
    payment_terms,
    currency,
    theme_id: request.theme_id,
    items: request.items,
    custom_fields: request.custom_fields,
    tax_rate: request.tax_rate,
    notes: request.notes,
  })
}

/// Handler for opening the invoice wizard, fresh or in edit mode
///
/// GET /api/invoices/draft?editing_id=
pub async fn prepare_draft_handler(
  params: web::Query<DraftParams>,
  use_case: web::Data<Arc<PrepareInvoiceDraftUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  let response = use_case.execute(user.id, params.editing_id).await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for the theme picker
///
/// GET /api/invoices/themes
pub async fn list_themes_handler(
  use_case: web::Data<Arc<ListThemesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let (themes, default_theme_id) = use_case.execute();

  Ok(HttpResponse::Ok().json(ThemeListResponse {
    themes,
    default_theme_id,
  }))
}

/// Handler for the paginated invoice list
///
/// GET /api/invoices?status=&search=&limit=&offset=
pub async fn list_invoices_handler(
  params: web::Query<InvoiceListParams>,
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  let status = params
    .status
    .as_deref()
    .map(InvoiceStatus::from_str)
    .transpose()
    .map_err(|e| ApiError::Validation(e.to_string()))?;

  let query = InvoiceListQuery::new(params.limit, params.offset, status, params.search.clone());
  let page = use_case.execute(user.id, query).await?;

  Ok(HttpResponse::Ok().json(page))
}

/// Handler for creating an invoice from the wizard's review step
///
/// POST /api/invoices
pub async fn create_invoice_handler(
  request: web::Json<InvoiceRequest>,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user();

  let input = to_invoice_input(request.into_inner())?;
  let invoice = use_case.execute(user.id, input).await?;

  Ok(HttpResponse::Created().json(invoice))
}

/// Handler for reading a single invoice
///
/// GET /api/invoices/{invoice_id}
pub async fn get_invoice_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetInvoiceDetailsUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();
  let invoice_id = path.into_inner();

  let invoice = use_case.execute(user.id, invoice_id).await?;

  Ok(HttpResponse::Ok().json(invoice))
}

/// Handler for updating a draft invoice
///
/// PUT /api/invoices/{invoice_id}
pub async fn update_invoice_handler(
  path: web::Path<Uuid>,
  request: web::Json<InvoiceRequest>,
  use_case: web::Data<Arc<UpdateInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user();
  let invoice_id = path.into_inner();

  let input = to_invoice_input(request.into_inner())?;
  let invoice = use_case.execute(user.id, invoice_id, input).await?;

  Ok(HttpResponse::Ok().json(invoice))
}

/// Handler for moving an invoice through its lifecycle
///
/// POST /api/invoices/{invoice_id}/status
pub async fn change_status_handler(
  path: web::Path<Uuid>,
  request: web::Json<ChangeStatusRequest>,
  use_case: web::Data<Arc<ChangeInvoiceStatusUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user();
  let invoice_id = path.into_inner();

  let invoice = use_case
    .execute(user.id, invoice_id, &request.status)
    .await?;

  Ok(HttpResponse::Ok().json(invoice))
}

/// Handler for deleting an invoice
///
/// DELETE /api/invoices/{invoice_id}
pub async fn delete_invoice_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();
  let invoice_id = path.into_inner();

  use_case.execute(user.id, invoice_id).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Invoice deleted".to_string(),
  }))
}

/// Handler for the wizard's usage banner
///
/// GET /api/usage
pub async fn get_usage_handler(
  use_case: web::Data<Arc<GetUsageUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  let usage = use_case.execute(user.id).await?;

  Ok(HttpResponse::Ok().json(usage))
}
