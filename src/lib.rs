pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{AppError, AppResult};
pub use services::crew_service::CrewAnalyticsService;
pub use services::settings_service::SettingsService;
