use async_graphql::{Error, ErrorExtensions};

use crate::errors::{CoreError, CoreErrorKind};

/// Extension code attached to every GraphQL error.
pub fn error_code(kind: CoreErrorKind) -> &'static str {
    match kind {
        CoreErrorKind::NotFound => "NOT_FOUND",
        CoreErrorKind::Validation => "VALIDATION_FAILED",
        CoreErrorKind::Conflict => "CONFLICT",
        CoreErrorKind::Forbidden => "FORBIDDEN",
        CoreErrorKind::Unauthorized => "UNAUTHORIZED",
        CoreErrorKind::Unavailable => "SERVICE_ERROR",
        CoreErrorKind::Internal => "INTERNAL_ERROR",
    }
}

/// Keep the message, add `code` plus any structured fields as extensions.
pub fn core_error_to_graphql_error(error: CoreError) -> Error {
    let code = error_code(error.kind());
    let fields = error.fields().cloned().unwrap_or_default();

    Error::new(error.message()).extend_with(|_, e| {
        e.set("code", code);
        for (key, value) in &fields {
            e.set(key.as_str(), value.as_str());
        }
    })
}

/// Entry point resolvers use to surface a [`CoreError`].
pub struct StructuredError;

impl StructuredError {
    pub fn from_core_error(error: CoreError) -> Error {
        core_error_to_graphql_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Value;

    #[test]
    fn test_validation_keeps_message() {
        let error = core_error_to_graphql_error(
            CoreError::validation("Please fill the company name fields")
                .with_field("field", "companyName"),
        );
        assert_eq!(error.message, "Please fill the company name fields");
        let extensions = error.extensions.expect("extensions");
        assert_eq!(extensions.get("field"), Some(&Value::from("companyName")));
    }
}
