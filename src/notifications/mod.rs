//! Chat notifications
//!
//! ```text
//! ┌──────────────┐     ┌────────────────────┐
//! │   Notifier   │────▶│  dyn Channel       │
//! │ (never fails)│     │  - TelegramChannel │
//! └──────────────┘     └────────────────────┘
//! ```
//!
//! The [`Notifier`] is the only entry point the watcher uses; it logs every
//! delivery outcome and swallows channel errors.

pub mod channels;
mod notifier;

// Re-exports
pub use channels::telegram::{TelegramChannel, TelegramChannelConfig};
pub use channels::{Channel, ChannelError, ChannelResult, DeliveryStatus};
pub use notifier::Notifier;
