//! Error types for agrirecords
//!
//! - **CoreError**: the error every service returns, tagged with a
//!   [`CoreErrorKind`] that the GraphQL layer turns into an extension code
//! - **AuthError**: session, credential and privilege failures
//! - **SpreadsheetError**: workbook encode/decode failures
//!
//! Token signing failures live next to the signer in [`crate::tokenize`].

pub mod auth;
pub mod core_error;
pub mod spreadsheet;

pub use auth::AuthError;
pub use core_error::{CoreError, CoreErrorKind};
pub use spreadsheet::SpreadsheetError;

/// Result type alias for service operations
pub type CoreResult<T> = Result<T, CoreError>;
