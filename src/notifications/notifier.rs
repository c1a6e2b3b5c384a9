//! Fire-and-forget message delivery

use super::channels::{Channel, DeliveryStatus};

/// Sends chat messages through a [`Channel`], never failing the caller
///
/// Delivery errors are logged and reported in the returned
/// [`DeliveryStatus`]; they are not propagated.
pub struct Notifier {
    channel: Box<dyn Channel>,
}

impl Notifier {
    /// Create a notifier over a channel
    pub fn new(channel: Box<dyn Channel>) -> Self {
        Self { channel }
    }

    /// Name of the underlying channel
    pub fn channel_name(&self) -> &str {
        self.channel.name()
    }

    /// Send a message
    pub async fn notify(&self, message: &str) -> DeliveryStatus {
        match self.channel.send(message).await {
            Ok(status) => {
                tracing::info!(
                    channel = self.channel.name(),
                    destination = self.channel.destination(),
                    "Message sent: {message}"
                );
                status
            }
            Err(e) => {
                tracing::error!(
                    channel = self.channel.name(),
                    destination = self.channel.destination(),
                    "Failed to send message: {e}"
                );
                DeliveryStatus::failure(self.channel.name(), e.to_string())
            }
        }
    }
}
