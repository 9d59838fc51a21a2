//! Error types for the mail client and the JSON property accessor.

use crate::json::JsonKind;
use reqwest::StatusCode;

/// Errors that can occur while talking to the API or reading its responses.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// None of the requested property paths exist in the document.
    #[error("property {} not found in {document}", .paths.join(" | "))]
    PropertyNotFound {
        /// Every path that was attempted, in order.
        paths: Vec<String>,
        /// The document that was searched, serialized.
        document: String,
    },

    /// The property exists but has the wrong shape for the requested type.
    #[error("property '{path}' is {found}, which cannot be converted to {target}")]
    TypeCoercion {
        path: String,
        found: JsonKind,
        target: &'static str,
    },

    /// The API answered with a non-success status code.
    #[error("request failed with status {status}: {message}")]
    RequestFailed { status: StatusCode, message: String },

    /// Transport-level failure (connection, TLS, timeout, body read).
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Request or response body could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL or a request path could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A path segment would address a different resource once resolved.
    #[error("invalid path segment: {0:?}")]
    InvalidPathSegment(String),

    /// The API key cannot be sent as an `Authorization` header.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// The caller cancelled the request before it completed.
    #[error("request was cancelled")]
    Cancelled,
}

impl Error {
    pub(crate) fn not_found(paths: &[&str], document: &serde_json::Value) -> Self {
        Error::PropertyNotFound {
            paths: paths.iter().map(|p| p.to_string()).collect(),
            document: document.to_string(),
        }
    }

    /// `true` when the error means a property was missing rather than malformed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::PropertyNotFound { .. })
    }

    /// HTTP status for [`Error::RequestFailed`], or the status carried by a
    /// transport error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::RequestFailed { status, .. } => Some(*status),
            Error::Request(err) => err.status(),
            _ => None,
        }
    }
}
