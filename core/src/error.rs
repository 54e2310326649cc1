//! Error types and handling for Clinic Desk Core

use thiserror::Error;

/// Result type alias for Clinic Desk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Clinic Desk Core
#[derive(Error, Debug)]
pub enum Error {
    /// Route table and navigation errors
    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while building the route table or resolving a URL
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route '{path}' is already registered")]
    DuplicateRoute { path: String },

    #[error("Routes '{first}' and '{second}' are equally specific and match the same paths")]
    AmbiguousRoute { first: String, second: String },

    #[error("Invalid query for '{path}': {reason}")]
    InvalidQuery { path: String, reason: QueryViolation },

    #[error("No route matches '{path}'")]
    NotFound { path: String },

    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Missing parameter '{param}' for page '{page}'")]
    MissingParam { page: String, param: String },

    #[error("No routes configured")]
    NoRoutes,
}

impl RouteError {
    /// Whether this error can only happen while the table is being built.
    ///
    /// Startup errors abort application boot; everything else is scoped to a
    /// single navigation and is shown to the user instead.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            RouteError::DuplicateRoute { .. }
                | RouteError::AmbiguousRoute { .. }
                | RouteError::InvalidPattern { .. }
                | RouteError::NoRoutes
        )
    }
}

/// A single reason a query string failed its schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryViolation {
    #[error("unknown parameter '{name}'")]
    UnknownParam { name: String },

    #[error("parameter '{name}' given more than once")]
    Repeated { name: String },

    #[error("missing required parameter '{name}'")]
    Missing { name: String },

    #[error("'{value}' is not one of {allowed:?} for '{name}'")]
    NotInEnum {
        name: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("'{value}' is not a valid {expected} for '{name}'")]
    Malformed {
        name: String,
        value: String,
        expected: &'static str,
    },

    #[error("{value} is outside {min}..={max} for '{name}'")]
    OutOfRange {
        name: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("'{name}' is longer than {max_len} characters")]
    TooLong { name: String, max_len: usize },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_classification() {
        assert!(RouteError::DuplicateRoute {
            path: "/blogs/new".into()
        }
        .is_startup());
        assert!(RouteError::NoRoutes.is_startup());
        assert!(!RouteError::NotFound {
            path: "/nope".into()
        }
        .is_startup());
        assert!(!RouteError::InvalidQuery {
            path: "/reviews".into(),
            reason: QueryViolation::Missing {
                name: "status".into()
            },
        }
        .is_startup());
    }

    #[test]
    fn test_error_messages() {
        let error = RouteError::NotFound {
            path: "/unknown-path".to_string(),
        };
        assert_eq!(error.to_string(), "No route matches '/unknown-path'");

        let error = RouteError::InvalidQuery {
            path: "/questions".to_string(),
            reason: QueryViolation::UnknownParam {
                name: "foo".to_string(),
            },
        };
        assert_eq!(
            error.to_string(),
            "Invalid query for '/questions': unknown parameter 'foo'"
        );

        let wrapped: Error = RouteError::NoRoutes.into();
        assert_eq!(wrapped.to_string(), "Route error: No routes configured");
    }
}
