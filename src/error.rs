// src/error.rs
//! Error types for the exporter.
//!
//! Two layers with very different fates. `FetchError` is what the graph
//! source capability can fail with; the crawler converts it into an
//! embedded value at the scope where it happened and never lets it
//! propagate further. `AppError` is for the CLI shell around the crawl —
//! bad configuration, logging setup, serialization — and does abort the
//! process.

use std::fmt;
use thiserror::Error;

/// Graph API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"OAuthException"`,
/// the backend's failure vocabulary is encoded in the type system, so
/// the client can classify a response body without stringly-typed
/// dispatch at every call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphApiErrorCode {
    /// The access token is missing, expired, or revoked
    OAuthException,
    /// Temporary backend issue — worth retrying
    ApiService,
    /// Application-level request throttling
    ApiTooManyCalls,
    /// The token lacks permission for this resource
    ApiPermissionDenied,
    /// Unknown API error reported by the backend
    ApiUnknown,
    /// HTTP status fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error type this client doesn't recognize yet
    Unknown(String),
}

impl GraphApiErrorCode {
    /// Parse the `error.type` / `error.code` pair of a graph API error
    /// body into the typed vocabulary.
    pub fn from_api_response(error_type: &str, code: Option<u64>) -> Self {
        match error_type {
            "OAuthException" => Self::OAuthException,
            _ => match code {
                Some(1) => Self::ApiUnknown,
                Some(2) => Self::ApiService,
                Some(4) | Some(17) => Self::ApiTooManyCalls,
                Some(10) => Self::ApiPermissionDenied,
                Some(c) if (200..300).contains(&c) => Self::ApiPermissionDenied,
                _ => Self::Unknown(error_type.to_string()),
            },
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this failure is an authorization problem.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::OAuthException | Self::ApiPermissionDenied | Self::HttpStatus(401 | 403)
        )
    }

    /// Whether this failure is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ApiService | Self::ApiTooManyCalls | Self::HttpStatus(500..=599)
        )
    }
}

impl fmt::Display for GraphApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OAuthException => write!(f, "OAuthException"),
            Self::ApiService => write!(f, "ApiService"),
            Self::ApiTooManyCalls => write!(f, "ApiTooManyCalls"),
            Self::ApiPermissionDenied => write!(f, "ApiPermissionDenied"),
            Self::ApiUnknown => write!(f, "ApiUnknown"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(name) => write!(f, "{}", name),
        }
    }
}

/// Failure modes of the graph source capability.
///
/// Every variant carries enough context for the embedded error string;
/// `kind_name` is the `<CauseKind>` that ends up in the exported JSON.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("authorization rejected ({code}): {message}")]
    Auth {
        code: GraphApiErrorCode,
        message: String,
    },

    #[error("transport failure: {message}")]
    Transport {
        /// Backend classification when the failure came with an error
        /// body; `None` for raw network failures.
        code: Option<GraphApiErrorCode>,
        message: String,
    },

    #[error("malformed response: {message}")]
    Decode { message: String },

    #[error("no such path {path}{}", .resolved_from.as_deref().map(|p| format!(" (resolved from {})", p)).unwrap_or_default())]
    NoSuchPath {
        path: String,
        resolved_from: Option<String>,
    },
}

impl FetchError {
    /// The cause-kind label embedded in the result tree, e.g.
    /// `"AuthError, cannot get fields of me."`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Auth { .. } => "AuthError",
            Self::Transport { .. } => "TransportError",
            Self::Decode { .. } => "DecodeError",
            Self::NoSuchPath { .. } => "NoSuchPathError",
        }
    }

    /// Whether the HTTP client should spend another attempt on this.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Auth { code, .. } => code.is_retryable(),
            Self::Transport { code: Some(code), .. } => code.is_retryable(),
            Self::Transport { code: None, .. } => true,
            Self::Decode { .. } | Self::NoSuchPath { .. } => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            code: None,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

/// Top-level application error type for the CLI shell.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to serialize snapshot: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

// Allow converting from anyhow::Error, preserving the rendered chain
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: format!("{:#}", err),
        }
    }
}

/// Result type alias for convenience
#[allow(dead_code)]
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_match_embedded_labels() {
        let auth = FetchError::Auth {
            code: GraphApiErrorCode::OAuthException,
            message: "token expired".to_string(),
        };
        assert_eq!(auth.kind_name(), "AuthError");

        let transport = FetchError::Transport {
            code: None,
            message: "connection reset".to_string(),
        };
        assert_eq!(transport.kind_name(), "TransportError");

        let decode = FetchError::Decode {
            message: "truncated body".to_string(),
        };
        assert_eq!(decode.kind_name(), "DecodeError");
    }

    #[test]
    fn oauth_classifies_as_auth_not_retryable() {
        let code = GraphApiErrorCode::from_api_response("OAuthException", Some(190));
        assert!(code.is_auth());
        assert!(!code.is_retryable());
    }

    #[test]
    fn service_errors_are_retryable() {
        assert!(GraphApiErrorCode::from_api_response("FacebookApiException", Some(2)).is_retryable());
        assert!(GraphApiErrorCode::from_http_status(503).is_retryable());
        assert!(!GraphApiErrorCode::from_http_status(404).is_retryable());
    }

    #[test]
    fn no_such_path_reports_resolution_origin() {
        let err = FetchError::NoSuchPath {
            path: "0".to_string(),
            resolved_from: Some("me".to_string()),
        };
        assert_eq!(err.to_string(), "no such path 0 (resolved from me)");
    }
}
