//! Error types for skiplinks.
//!
//! This module defines all error types used throughout the skiplinks crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::route::RouteId;

/// The main error type for skiplinks operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    /// A page rendered the default skip links without defining its own and
    /// its route is not whitelisted.
    #[error(
        "no skip links defined for this page ({route}). Provide a `skip_links` content slot \
         to define skip links for this page, or add \"{route}\" to `whitelisted_routes`."
    )]
    SkipLinksNotDefined {
        /// The offending route.
        route: RouteId,
    },

    /// A route identifier could not be parsed.
    #[error("invalid route '{input}': {message}")]
    InvalidRoute {
        /// The text that failed to parse.
        input: String,
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write a file.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        /// Path that couldn't be written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for skiplinks operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a missing skip links error for a route.
    #[must_use]
    pub fn skip_links_not_defined(route: RouteId) -> Self {
        Self::SkipLinksNotDefined { route }
    }

    /// Create an invalid route error.
    #[must_use]
    pub fn invalid_route(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRoute {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Check if this error reports a page without skip links.
    #[must_use]
    pub fn is_missing_skip_links(&self) -> bool {
        matches!(self, Self::SkipLinksNotDefined { .. })
    }

    /// The route a missing skip links error was raised for.
    #[must_use]
    pub fn route(&self) -> Option<&RouteId> {
        match self {
            Self::SkipLinksNotDefined { route } => Some(route),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_links_not_defined_display() {
        let err = Error::skip_links_not_defined(RouteId::new("test", "show"));
        let msg = err.to_string();
        assert!(msg.starts_with("no skip links defined for this page (test#show)."));
        assert!(msg.contains("`skip_links` content slot"));
        assert!(msg.contains("whitelisted_routes"));
    }

    #[test]
    fn test_is_missing_skip_links() {
        let err = Error::skip_links_not_defined(RouteId::new("pages", "about"));
        assert!(err.is_missing_skip_links());
        assert!(!Error::invalid_route("x", "y").is_missing_skip_links());
    }

    #[test]
    fn test_route_accessor() {
        let err = Error::skip_links_not_defined(RouteId::new("pages", "about"));
        assert_eq!(err.route().map(RouteId::as_str), Some("pages#about"));
        assert!(Error::invalid_route("x", "y").route().is_none());
    }

    #[test]
    fn test_invalid_route_display() {
        let err = Error::invalid_route("pages", "missing '#' separator");
        assert_eq!(
            err.to_string(),
            "invalid route 'pages': missing '#' separator"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "malformed route".to_string(),
        };
        assert!(err.to_string().contains("malformed route"));
    }

    #[test]
    fn test_file_write_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::FileWrite {
            path: PathBuf::from("/root/forbidden/_skip_links.html.erb"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/root/forbidden/_skip_links.html.erb"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
