//! Error types for the homework watcher
//!
//! This module defines the domain errors raised by the API client and by the
//! response/status parsers.

use thiserror::Error;

/// Errors that can occur while fetching homework statuses
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connection refused, DNS, TLS, ...)
    #[error("Request to the homework API failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-200 status code
    #[error("Homework API returned HTTP {0}")]
    Status(u16),

    /// Request timeout
    #[error("Homework API request timed out")]
    Timeout,

    /// Body is not valid JSON
    #[error("Failed to decode homework API response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Status code carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors raised while validating a response or formatting an entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Response body is not a JSON object
    #[error("API response is not a JSON object")]
    NotAnObject,

    /// Required key is absent
    #[error("Missing key \"{0}\" in API response")]
    MissingField(&'static str),

    /// Key is present but does not hold a list
    #[error("Key \"{0}\" in API response is not a list")]
    NotAList(&'static str),

    /// Key is present but has the wrong type
    #[error("Key \"{0}\" in API response has an unexpected type")]
    InvalidField(&'static str),

    /// Status code is not in the catalog
    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),
}
