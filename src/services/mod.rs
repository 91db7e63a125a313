pub mod activity_log_service;
pub mod auth_service;
pub mod authorization;
pub mod record_service;
pub mod spreadsheet_service;

pub use activity_log_service::{ActivityLogFilter, ActivityLogService};
pub use auth_service::{AuthService, LoginResult, RegisterUser};
pub use authorization::AuthorizationService;
pub use record_service::{ListQuery, RecordService};
pub use spreadsheet_service::SpreadsheetService;
