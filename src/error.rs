//! Unified error handling for the hwbot crate
//!
//! Domain-specific errors ([`FetchError`], [`ParseError`], [`ChannelError`])
//! are consolidated into a single [`Error`] enum. The watcher inspects that
//! enum once per poll cycle; only [`Error::Config`] is allowed to escape to
//! the process boundary.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hwbot::error::{Error, ErrorCategory};
//!
//! fn handle_error(err: Error) {
//!     match err.category() {
//!         ErrorCategory::Config => eprintln!("Fatal error: {err}"),
//!         category => tracing::warn!(%category, "Will retry next cycle: {err}"),
//!     }
//! }
//! ```

use thiserror::Error;

pub use crate::notifications::channels::ChannelError;
pub use crate::utils::error::{FetchError, ParseError};

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP status, transport, timeout)
    Network,
    /// Decoding, validation and formatting errors
    Parsing,
    /// Notification delivery errors
    Delivery,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Delivery => "delivery",
            Self::Config => "config",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unified error type for the hwbot crate
///
/// The `Display` form of each variant is what ends up in the chat when a
/// poll cycle fails, so variants render only their inner message.
#[derive(Error, Debug)]
pub enum Error {
    /// Fetch-specific errors
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// Validation and formatting errors
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Notification channel errors
    #[error("{0}")]
    Channel(#[from] ChannelError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(FetchError::Decode(_)) => ErrorCategory::Parsing,
            Self::Fetch(_) => ErrorCategory::Network,
            Self::Parse(_) => ErrorCategory::Parsing,
            Self::Channel(_) => ErrorCategory::Delivery,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
