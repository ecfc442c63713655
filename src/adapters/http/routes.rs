use actix_web::web;
use std::sync::Arc;

use crate::application::admin::{
  DeleteUserUseCase, GetAnalyticsUseCase, GetUsageUseCase, ListUsersUseCase,
  UpdateUserPlanUseCase, UpdateUserRoleUseCase,
};
use crate::application::auth::{
  GetCurrentUserUseCase, LoginUserUseCase, LogoutAllDevicesUseCase, LogoutUserUseCase,
  RegisterUserUseCase,
};
use crate::application::client::{
  ArchiveClientUseCase, CreateClientUseCase, DeleteClientUseCase, ListClientsUseCase,
  UpdateClientUseCase,
};
use crate::application::invoice::{
  ChangeInvoiceStatusUseCase, CreateInvoiceUseCase, DeleteInvoiceUseCase, GetInvoiceDetailsUseCase,
  ListInvoicesUseCase, ListThemesUseCase, PrepareInvoiceDraftUseCase, UpdateInvoiceUseCase,
};
use crate::application::settings::{GetSettingsUseCase, UpdateSettingsUseCase};
use crate::domain::auth::services::AuthService;

use super::handlers::{admin, auth, clients, invoices, settings};
use super::middleware::{AdminGuard, AuthMiddleware};

/// Everything the API routes need, wired up in main
#[derive(Clone)]
pub struct ApiDependencies {
  pub auth_service: Arc<AuthService>,

  // Auth use cases
  pub register_use_case: Arc<RegisterUserUseCase>,
  pub login_use_case: Arc<LoginUserUseCase>,
  pub logout_use_case: Arc<LogoutUserUseCase>,
  pub logout_all_use_case: Arc<LogoutAllDevicesUseCase>,
  pub get_user_use_case: Arc<GetCurrentUserUseCase>,

  // Settings use cases
  pub get_settings_use_case: Arc<GetSettingsUseCase>,
  pub update_settings_use_case: Arc<UpdateSettingsUseCase>,

  // Client use cases
  pub create_client_use_case: Arc<CreateClientUseCase>,
  pub update_client_use_case: Arc<UpdateClientUseCase>,
  pub list_clients_use_case: Arc<ListClientsUseCase>,
  pub archive_client_use_case: Arc<ArchiveClientUseCase>,
  pub delete_client_use_case: Arc<DeleteClientUseCase>,

  // Invoice use cases
  pub prepare_draft_use_case: Arc<PrepareInvoiceDraftUseCase>,
  pub create_invoice_use_case: Arc<CreateInvoiceUseCase>,
  pub update_invoice_use_case: Arc<UpdateInvoiceUseCase>,
  pub list_invoices_use_case: Arc<ListInvoicesUseCase>,
  pub get_invoice_details_use_case: Arc<GetInvoiceDetailsUseCase>,
  pub change_invoice_status_use_case: Arc<ChangeInvoiceStatusUseCase>,
  pub delete_invoice_use_case: Arc<DeleteInvoiceUseCase>,
  pub list_themes_use_case: Arc<ListThemesUseCase>,
  pub get_usage_use_case: Arc<GetUsageUseCase>,

  // Admin use cases
  pub list_users_use_case: Arc<ListUsersUseCase>,
  pub update_user_role_use_case: Arc<UpdateUserRoleUseCase>,
  pub update_user_plan_use_case: Arc<UpdateUserPlanUseCase>,
  pub delete_user_use_case: Arc<DeleteUserUseCase>,
  pub get_analytics_use_case: Arc<GetAnalyticsUseCase>,
}

/// Configure all API routes.
///
/// Mounts three scopes:
/// - /api/auth - public registration, login and session endpoints
/// - /api - session-gated settings, client, invoice and usage endpoints
/// - /api/admin - admin console, gated on the admin role
pub fn configure_api_routes(cfg: &mut web::ServiceConfig, deps: ApiDependencies) {
  // Public auth endpoints; /me, /logout and /logout-all resolve the
  // session themselves so they stay outside the auth middleware
  cfg.service(
    web::scope("/api/auth")
      .app_data(web::Data::new(deps.register_use_case.clone()))
      .app_data(web::Data::new(deps.login_use_case.clone()))
      .app_data(web::Data::new(deps.logout_use_case.clone()))
      .app_data(web::Data::new(deps.logout_all_use_case.clone()))
      .app_data(web::Data::new(deps.get_user_use_case.clone()))
      .route("/register", web::post().to(auth::register_handler))
      .route("/login", web::post().to(auth::login_handler))
      .route("/logout", web::post().to(auth::logout_handler))
      .route("/logout-all", web::post().to(auth::logout_all_handler))
      .route("/me", web::get().to(auth::get_current_user_handler)),
  );

  // Admin console; auth middleware runs first, then the role guard
  cfg.service(
    web::scope("/api/admin")
      .wrap(AdminGuard::new())
      .wrap(AuthMiddleware::new(deps.auth_service.clone()))
      .app_data(web::Data::new(deps.list_users_use_case.clone()))
      .app_data(web::Data::new(deps.update_user_role_use_case.clone()))
      .app_data(web::Data::new(deps.update_user_plan_use_case.clone()))
      .app_data(web::Data::new(deps.delete_user_use_case.clone()))
      .app_data(web::Data::new(deps.get_analytics_use_case.clone()))
      .route("/users", web::get().to(admin::list_users_handler))
      .route(
        "/users/{user_id}/role",
        web::put().to(admin::update_user_role_handler),
      )
      .route(
        "/users/{user_id}/plan",
        web::put().to(admin::update_user_plan_handler),
      )
      .route(
        "/users/{user_id}",
        web::delete().to(admin::delete_user_handler),
      )
      .route("/analytics", web::get().to(admin::get_analytics_handler)),
  );

  // Session-gated application endpoints
  cfg.service(
    web::scope("/api")
      .wrap(AuthMiddleware::new(deps.auth_service.clone()))
      .app_data(web::Data::new(deps.get_settings_use_case.clone()))
      .app_data(web::Data::new(deps.update_settings_use_case.clone()))
      .app_data(web::Data::new(deps.create_client_use_case.clone()))
      .app_data(web::Data::new(deps.update_client_use_case.clone()))
      .app_data(web::Data::new(deps.list_clients_use_case.clone()))
      .app_data(web::Data::new(deps.archive_client_use_case.clone()))
      .app_data(web::Data::new(deps.delete_client_use_case.clone()))
      .app_data(web::Data::new(deps.prepare_draft_use_case.clone()))
      .app_data(web::Data::new(deps.create_invoice_use_case.clone()))
      .app_data(web::Data::new(deps.update_invoice_use_case.clone()))
      .app_data(web::Data::new(deps.list_invoices_use_case.clone()))
      .app_data(web::Data::new(deps.get_invoice_details_use_case.clone()))
      .app_data(web::Data::new(deps.change_invoice_status_use_case.clone()))
      .app_data(web::Data::new(deps.delete_invoice_use_case.clone()))
      .app_data(web::Data::new(deps.list_themes_use_case.clone()))
      .app_data(web::Data::new(deps.get_usage_use_case.clone()))
      // Settings
      .route("/settings", web::get().to(settings::get_settings_handler))
      .route(
        "/settings",
        web::put().to(settings::update_settings_handler),
      )
      // Clients
      .route("/clients", web::get().to(clients::list_clients_handler))
      .route("/clients", web::post().to(clients::create_client_handler))
      .route(
        "/clients/{client_id}",
        web::put().to(clients::update_client_handler),
      )
      .route(
        "/clients/{client_id}",
        web::delete().to(clients::delete_client_handler),
      )
      .route(
        "/clients/{client_id}/archive",
        web::post().to(clients::archive_client_handler),
      )
      .route(
        "/clients/{client_id}/restore",
        web::post().to(clients::restore_client_handler),
      )
      // Invoices; fixed segments before the id parameter
      .route(
        "/invoices/draft",
        web::get().to(invoices::prepare_draft_handler),
      )
      .route(
        "/invoices/themes",
        web::get().to(invoices::list_themes_handler),
      )
      .route("/invoices", web::get().to(invoices::list_invoices_handler))
      .route(
        "/invoices",
        web::post().to(invoices::create_invoice_handler),
      )
      .route(
        "/invoices/{invoice_id}",
        web::get().to(invoices::get_invoice_handler),
      )
      .route(
        "/invoices/{invoice_id}",
        web::put().to(invoices::update_invoice_handler),
      )
      .route(
        "/invoices/{invoice_id}",
        web::delete().to(invoices::delete_invoice_handler),
      )
      .route(
        "/invoices/{invoice_id}/status",
        web::post().to(invoices::change_status_handler),
      )
      // Usage banner for the wizard
      .route("/usage", web::get().to(invoices::get_usage_handler)),
  );
}
