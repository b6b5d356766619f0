//! Error types and handling for the `apiboard` application

use reqwest::StatusCode;
use thiserror::Error;

/// Application-level error for `apiboard`
#[derive(Error, Debug)]
pub enum ApiboardError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl ApiboardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Failure talking to an upstream API.
///
/// Raised at the boundary of every network call; flows turn it into a fixed
/// "Error fetching ..." message and log the cause.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The upstream answered with a non-success status
    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },

    /// The request never produced a response
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not the JSON shape we expected
    #[error("unexpected response body from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ServiceError {
    /// Status code of the upstream response, if one was received
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
