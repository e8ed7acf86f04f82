//! Error types for the pipeline client
//!
//! `TransportError` covers building the shared HTTP transport and is fatal at
//! startup. `ClientError` covers a single remote call and is what the `try_*`
//! operations return.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that prevent the client from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The environment does not describe a usable gateway
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No trusted transport could be built
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors raised while building the shared transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The CA bundle file could not be read
    #[error("Cannot read CA bundle {path}: {source}")]
    CaBundleUnreadable {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The CA bundle is not valid PEM
    #[error("Invalid CA bundle: {0}")]
    InvalidCaBundle(#[source] reqwest::Error),

    /// The CA bundle contains no certificates
    #[error("CA bundle {path} contains no certificates")]
    EmptyCaBundle {
        /// Path that was read.
        path: PathBuf,
    },

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Failure category of a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// Connection refused, timeout, DNS or TLS failure
    Transport,
    /// The service answered with an unexpected status
    Protocol,
    /// The response body did not decode
    Decode,
    /// The request body did not encode
    Encode,
}

/// Errors returned by a single remote call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a status other than 200.
    #[error("Unexpected response status: {status}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("Cannot decode response (status {status}): {source}")]
    Decode {
        /// HTTP status code of the response.
        status: u16,
        /// JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be encoded.
    #[error("Cannot encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result type for remote calls.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Get the failure category of this error.
    pub fn category(&self) -> FailureCategory {
        match self {
            ClientError::Request(_) => FailureCategory::Transport,
            ClientError::UnexpectedStatus { .. } => FailureCategory::Protocol,
            ClientError::Decode { .. } => FailureCategory::Decode,
            ClientError::Encode(_) => FailureCategory::Encode,
        }
    }

    /// Get the HTTP status code, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            ClientError::UnexpectedStatus { status } | ClientError::Decode { status, .. } => {
                Some(*status)
            }
            ClientError::Encode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> serde_json::Error {
        serde_json::from_str::<Vec<u8>>("not json").unwrap_err()
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            ClientError::UnexpectedStatus { status: 500 }.category(),
            FailureCategory::Protocol
        );
        assert_eq!(
            ClientError::Decode { status: 200, source: decode_error() }.category(),
            FailureCategory::Decode
        );
        assert_eq!(ClientError::Encode(decode_error()).category(), FailureCategory::Encode);
    }

    #[test]
    fn test_status() {
        assert_eq!(ClientError::UnexpectedStatus { status: 201 }.status(), Some(201));
        assert_eq!(
            ClientError::Decode { status: 502, source: decode_error() }.status(),
            Some(502)
        );
        assert_eq!(ClientError::Encode(decode_error()).status(), None);
    }

    #[test]
    fn test_display() {
        let err = ClientError::UnexpectedStatus { status: 400 };
        assert_eq!(err.to_string(), "Unexpected response status: 400");

        let err = TransportError::EmptyCaBundle { path: PathBuf::from("ca_chain.crt") };
        assert_eq!(err.to_string(), "CA bundle ca_chain.crt contains no certificates");
    }
}
