use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{dtos::SettingsRequest, errors::ApiError, middleware::AuthUser};
use crate::application::settings::{GetSettingsUseCase, UpdateSettingsUseCase};
use crate::domain::settings::entities::UserSettings;
use crate::domain::settings::services::SettingsInput;

/// Settings page payload: stored values plus derived readiness info
#[derive(Debug, Serialize)]
struct SettingsResponse {
  settings: UserSettings,
  next_invoice_number: String,
  missing_fields: Vec<&'static str>,
  missing_critical_fields: Vec<&'static str>,
}

/// Handler for reading the current user's settings
///
/// GET /api/settings
pub async fn get_settings_handler(
  use_case: web::Data<Arc<GetSettingsUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  let response = use_case.execute(user.id).await?;

  Ok(HttpResponse::Ok().json(SettingsResponse {
    settings: response.settings,
    next_invoice_number: response.next_invoice_number,
    missing_fields: response.missing_fields,
    missing_critical_fields: response.missing_critical_fields,
  }))
}

/// Handler for saving the settings form
///
/// PUT /api/settings
pub async fn update_settings_handler(
  request: web::Json<SettingsRequest>,
  use_case: web::Data<Arc<UpdateSettingsUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user();

  let request = request.into_inner();
  let input = SettingsInput {
    company_name: request.company_name,
    company_email: request.company_email,
    company_phone: request.company_phone,
    company_address: request.company_address,
    company_website: request.company_website,
    company_logo: request.company_logo,
    default_theme: request.default_theme,
    default_currency: request.default_currency,
    default_tax_rate: request.default_tax_rate,
    default_payment_terms: request.default_payment_terms,
    default_notes: request.default_notes,
    invoice_prefix: request.invoice_prefix,
    invoice_counter: request.invoice_counter,
    invoice_number_format: request.invoice_number_format,
  };

  let settings = use_case.execute(user.id, input).await?;

  Ok(HttpResponse::Ok().json(settings))
}
