//! Last-sent message memory

/// Remembers the last message sent for one kind of notification
///
/// Only the immediately preceding value is kept: a message equal to it is a
/// repeat, anything else (including an older message coming back) is new.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupSlot {
    last: Option<String>,
}

impl DedupSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `message` differs from the last recorded one
    pub fn is_new(&self, message: &str) -> bool {
        self.last.as_deref() != Some(message)
    }

    /// Record `message` as the last one sent
    pub fn record(&mut self, message: impl Into<String>) {
        self.last = Some(message.into());
    }

    /// Last recorded message
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}
