pub mod admin_user_repository;
pub mod analytics_repository;
pub mod client_repository;
pub mod invoice_repository;
pub mod login_attempt_repository;
pub mod session_repository;
pub mod settings_repository;
pub mod subscription_repository;
pub mod user_repository;

pub use admin_user_repository::PostgresAdminUserRepository;
pub use analytics_repository::PostgresAnalyticsRepository;
pub use client_repository::PostgresClientRepository;
pub use invoice_repository::PostgresInvoiceRepository;
pub use login_attempt_repository::PostgresLoginAttemptRepository;
pub use session_repository::PostgresSessionRepository;
pub use settings_repository::PostgresSettingsRepository;
pub use subscription_repository::PostgresSubscriptionRepository;
pub use user_repository::PostgresUserRepository;
