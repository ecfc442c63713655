//! Settings use cases

mod get_settings;
mod update_settings;

pub use get_settings::{GetSettingsResponse, GetSettingsUseCase};
pub use update_settings::UpdateSettingsUseCase;
