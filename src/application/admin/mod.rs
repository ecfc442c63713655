//! Admin console use cases

mod delete_user;
mod get_analytics;
mod get_usage;
mod list_users;
mod update_user_plan;
mod update_user_role;

pub use delete_user::DeleteUserUseCase;
pub use get_analytics::GetAnalyticsUseCase;
pub use get_usage::GetUsageUseCase;
pub use list_users::ListUsersUseCase;
pub use update_user_plan::UpdateUserPlanUseCase;
pub use update_user_role::UpdateUserRoleUseCase;
