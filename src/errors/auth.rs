//! Authentication and session error types
//!
//! Messages are the exact strings clients already pattern-match on; the
//! `error_code` gives them a stable machine-readable alternative.

use thiserror::Error;

use super::CoreError;

/// Authentication, session and privilege errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No session, or a session without a user identity
    #[error("Invalid Session")]
    InvalidSession,

    /// Session user no longer exists or has been deactivated
    #[error("User Invalid")]
    UserInvalid,

    /// Session was closed by `logOut` or has expired
    #[error("User already logged out")]
    AlreadyLoggedOut,

    /// Username/password pair did not match
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Username already taken by a live user
    #[error("Duplicate username")]
    UsernameExists,

    /// Invalid email format
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Invalid username format
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    /// Role lacks the privilege required by an explicit check
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

impl AuthError {
    /// Check if this is an authentication error (401)
    pub fn is_authentication_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidSession
                | AuthError::UserInvalid
                | AuthError::AlreadyLoggedOut
                | AuthError::InvalidCredentials
        )
    }

    /// Get error code for GraphQL/API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidSession => "INVALID_SESSION",
            AuthError::UserInvalid => "USER_INVALID",
            AuthError::AlreadyLoggedOut => "ALREADY_LOGGED_OUT",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::UsernameExists => "USERNAME_EXISTS",
            AuthError::InvalidEmail(_) => "INVALID_EMAIL",
            AuthError::InvalidUsername(_) => "INVALID_USERNAME",
            AuthError::WeakPassword(_) => "WEAK_PASSWORD",
            AuthError::PermissionDenied(_) => "PERMISSION_DENIED",
        }
    }
}

impl From<AuthError> for CoreError {
    fn from(err: AuthError) -> Self {
        let code = err.error_code();
        let core = match &err {
            AuthError::InvalidSession
            | AuthError::UserInvalid
            | AuthError::AlreadyLoggedOut
            | AuthError::InvalidCredentials => CoreError::unauthorized(err.to_string()),
            AuthError::UsernameExists => CoreError::conflict(err.to_string()),
            AuthError::InvalidEmail(_)
            | AuthError::InvalidUsername(_)
            | AuthError::WeakPassword(_) => CoreError::validation(err.to_string()),
            AuthError::PermissionDenied(_) => CoreError::forbidden(err.to_string()),
        };
        core.with_field("reason", code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CoreErrorKind;

    #[test]
    fn test_session_messages_are_stable() {
        assert_eq!(AuthError::InvalidSession.to_string(), "Invalid Session");
        assert_eq!(AuthError::UserInvalid.to_string(), "User Invalid");
        assert_eq!(
            AuthError::AlreadyLoggedOut.to_string(),
            "User already logged out"
        );
    }

    #[test]
    fn test_conversion_keeps_message_and_kind() {
        let core: CoreError = AuthError::AlreadyLoggedOut.into();
        assert_eq!(core.kind(), CoreErrorKind::Unauthorized);
        assert_eq!(core.message(), "User already logged out");

        let core: CoreError = AuthError::PermissionDenied("UserRole:Write".into()).into();
        assert_eq!(core.kind(), CoreErrorKind::Forbidden);
    }

    #[test]
    fn test_authentication_classification() {
        assert!(AuthError::InvalidCredentials.is_authentication_error());
        assert!(!AuthError::UsernameExists.is_authentication_error());
        assert_eq!(AuthError::UsernameExists.error_code(), "USERNAME_EXISTS");
    }
}
