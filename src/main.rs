use actix_web::{App, HttpServer, middleware::Logger};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoicr::{
  adapters::http::{ApiDependencies, RequestIdMiddleware, configure_api_routes},
  application::admin::{
    DeleteUserUseCase, GetAnalyticsUseCase, GetUsageUseCase, ListUsersUseCase,
    UpdateUserPlanUseCase, UpdateUserRoleUseCase,
  },
  application::auth::{
    GetCurrentUserUseCase, LoginUserUseCase, LogoutAllDevicesUseCase, LogoutUserUseCase,
    RegisterUserUseCase,
  },
  application::client::{
    ArchiveClientUseCase, CreateClientUseCase, DeleteClientUseCase, ListClientsUseCase,
    UpdateClientUseCase,
  },
  application::invoice::{
    ChangeInvoiceStatusUseCase, CreateInvoiceUseCase, DeleteInvoiceUseCase,
    GetInvoiceDetailsUseCase, ListInvoicesUseCase, ListThemesUseCase, PrepareInvoiceDraftUseCase,
    UpdateInvoiceUseCase,
  },
  application::settings::{GetSettingsUseCase, UpdateSettingsUseCase},
  domain::admin::services::AdminService,
  domain::auth::services::{AuthService, AuthServiceConfig},
  domain::client::services::ClientService,
  domain::invoice::services::InvoiceService,
  domain::settings::services::SettingsService,
  infrastructure::{
    config::Config,
    persistence::postgres::{
      PostgresAdminUserRepository, PostgresAnalyticsRepository, PostgresClientRepository,
      PostgresInvoiceRepository, PostgresLoginAttemptRepository, PostgresSessionRepository,
      PostgresSettingsRepository, PostgresSubscriptionRepository, PostgresUserRepository,
    },
    security::Argon2PasswordHasher,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoicr=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Invoicr application");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        format!(
          "Could not connect to database. Is PostgreSQL running at {}?",
          config.database.url
        ),
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Set up Redis connection with timeout
  tracing::info!("Connecting to Redis: {}", config.redis.url);

  let redis_client = redis::Client::open(config.redis.url.clone()).map_err(|e| {
    tracing::error!("Failed to create Redis client: {}", e);
    std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      format!("Invalid Redis URL: {}", e),
    )
  })?;

  let redis_conn = tokio::time::timeout(
    Duration::from_secs(config.redis.connect_timeout_seconds),
    redis_client.get_connection_manager(),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Redis connection timed out after {} seconds. Is Redis running?",
      config.redis.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Redis connection timed out after {} seconds",
        config.redis.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to Redis: {}", e);
    std::io::Error::new(
      std::io::ErrorKind::ConnectionRefused,
      format!(
        "Could not connect to Redis. Is Redis running at {}?",
        config.redis.url
      ),
    )
  })?;

  tracing::info!("Redis connection established");

  // Initialize repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let session_repo = Arc::new(PostgresSessionRepository::new(
    db_pool.clone(),
    redis_conn.clone(),
  ));
  let login_attempt_repo = Arc::new(PostgresLoginAttemptRepository::new(db_pool.clone()));
  let settings_repo = Arc::new(PostgresSettingsRepository::new(db_pool.clone()));
  let client_repo = Arc::new(PostgresClientRepository::new(db_pool.clone()));
  let invoice_repo = Arc::new(PostgresInvoiceRepository::new(db_pool.clone()));
  let admin_user_repo = Arc::new(PostgresAdminUserRepository::new(db_pool.clone()));
  let subscription_repo = Arc::new(PostgresSubscriptionRepository::new(db_pool.clone()));
  let analytics_repo = Arc::new(PostgresAnalyticsRepository::new(db_pool.clone()));

  // Initialize security services
  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().expect("Failed to create password hasher"));

  // Initialize domain services
  let auth_config = AuthServiceConfig {
    session_ttl_seconds: config.security.session_ttl_seconds as i64,
    remember_me_ttl_seconds: config.security.remember_me_ttl_seconds as i64,
    rate_limit_window_seconds: config.rate_limit.login_window_seconds as i64,
    max_failed_attempts: config.rate_limit.login_max_attempts as i64,
  };

  let auth_service = Arc::new(AuthService::new(
    user_repo.clone(),
    session_repo.clone(),
    login_attempt_repo.clone(),
    password_hasher,
    auth_config,
  ));

  let settings_service = Arc::new(SettingsService::new(settings_repo.clone()));
  let client_service = Arc::new(ClientService::new(client_repo.clone()));
  let invoice_service = Arc::new(InvoiceService::new(
    invoice_repo.clone(),
    settings_service.clone(),
  ));
  let admin_service = Arc::new(AdminService::new(
    user_repo.clone(),
    admin_user_repo.clone(),
    subscription_repo.clone(),
    analytics_repo.clone(),
  ));

  // Initialize auth use cases
  let register_use_case = Arc::new(RegisterUserUseCase::new(auth_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let logout_use_case = Arc::new(LogoutUserUseCase::new(auth_service.clone()));
  let logout_all_use_case = Arc::new(LogoutAllDevicesUseCase::new(auth_service.clone()));
  let get_user_use_case = Arc::new(GetCurrentUserUseCase::new(auth_service.clone()));

  // Initialize settings use cases
  let get_settings_use_case = Arc::new(GetSettingsUseCase::new(settings_service.clone()));
  let update_settings_use_case = Arc::new(UpdateSettingsUseCase::new(settings_service.clone()));

  // Initialize client use cases
  let create_client_use_case = Arc::new(CreateClientUseCase::new(client_service.clone()));
  let update_client_use_case = Arc::new(UpdateClientUseCase::new(client_service.clone()));
  let list_clients_use_case = Arc::new(ListClientsUseCase::new(client_service.clone()));
  let archive_client_use_case = Arc::new(ArchiveClientUseCase::new(client_service.clone()));
  let delete_client_use_case = Arc::new(DeleteClientUseCase::new(client_service.clone()));

  // Initialize invoice use cases
  let prepare_draft_use_case = Arc::new(PrepareInvoiceDraftUseCase::new(invoice_service.clone()));
  let create_invoice_use_case = Arc::new(CreateInvoiceUseCase::new(
    invoice_service.clone(),
    admin_service.clone(),
  ));
  let update_invoice_use_case = Arc::new(UpdateInvoiceUseCase::new(invoice_service.clone()));
  let list_invoices_use_case = Arc::new(ListInvoicesUseCase::new(invoice_service.clone()));
  let get_invoice_details_use_case =
    Arc::new(GetInvoiceDetailsUseCase::new(invoice_service.clone()));
  let change_invoice_status_use_case =
    Arc::new(ChangeInvoiceStatusUseCase::new(invoice_service.clone()));
  let delete_invoice_use_case = Arc::new(DeleteInvoiceUseCase::new(invoice_service.clone()));
  let list_themes_use_case = Arc::new(ListThemesUseCase::new());
  let get_usage_use_case = Arc::new(GetUsageUseCase::new(admin_service.clone()));

  // Initialize admin use cases
  let list_users_use_case = Arc::new(ListUsersUseCase::new(admin_service.clone()));
  let update_user_role_use_case = Arc::new(UpdateUserRoleUseCase::new(admin_service.clone()));
  let update_user_plan_use_case = Arc::new(UpdateUserPlanUseCase::new(admin_service.clone()));
  let delete_user_use_case = Arc::new(DeleteUserUseCase::new(admin_service.clone()));
  let get_analytics_use_case = Arc::new(GetAnalyticsUseCase::new(admin_service.clone()));

  let deps = ApiDependencies {
    auth_service: auth_service.clone(),
    register_use_case,
    login_use_case,
    logout_use_case,
    logout_all_use_case,
    get_user_use_case,
    get_settings_use_case,
    update_settings_use_case,
    create_client_use_case,
    update_client_use_case,
    list_clients_use_case,
    archive_client_use_case,
    delete_client_use_case,
    prepare_draft_use_case,
    create_invoice_use_case,
    update_invoice_use_case,
    list_invoices_use_case,
    get_invoice_details_use_case,
    change_invoice_status_use_case,
    delete_invoice_use_case,
    list_themes_use_case,
    get_usage_use_case,
    list_users_use_case,
    update_user_role_use_case,
    update_user_plan_use_case,
    delete_user_use_case,
    get_analytics_use_case,
  };

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    let deps = deps.clone();
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .configure(|cfg| configure_api_routes(cfg, deps))
  })
  .bind((server_host, server_port))?
  .run()
  .await
}
