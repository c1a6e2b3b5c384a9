//! hwbot - homework review status watcher
//!
//! Polls the homework review API on a fixed interval and forwards status
//! changes (and failures) to a Telegram chat, never repeating the previous
//! message.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`api`] - Homework API client and response validation
//! - [`parser`] - Homework entry parsing and message formatting
//! - [`models`] - Status catalog and core data types
//! - [`notifications`] - Chat delivery channels
//! - [`watcher`] - The poll loop
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use hwbot::config::Config;
//! use hwbot::watcher::Watcher;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let watcher = Watcher::from_config(&config)?;
//!     watcher.run().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod notifications;
pub mod parser;
pub mod utils;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{check_response, PracticumClient};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{Homework, HomeworkStatus};
    pub use crate::notifications::{Channel, Notifier, TelegramChannel};
    pub use crate::parser::parse_status;
    pub use crate::watcher::{CycleOutcome, Watcher};
}

// Direct re-exports for convenience
pub use models::{Homework, HomeworkStatus};
