//! Common test utilities

use async_trait::async_trait;
use hwbot::api::PracticumClient;
use hwbot::notifications::{Channel, ChannelResult, DeliveryStatus, Notifier};
use hwbot::watcher::Watcher;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of the homework status endpoint on the mock server
pub const STATUS_PATH: &str = "/api/user_api/homework_statuses/";

/// Token used for the homework API in tests
pub const API_TOKEN: &str = "test-practicum-token";

/// Channel that records every message instead of sending it
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingChannel {
    sent: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[allow(dead_code)]
#[async_trait]
impl Channel for RecordingChannel {
    fn name(&self) -> &str {
        "recording"
    }

    fn destination(&self) -> &str {
        "test-chat"
    }

    async fn send(&self, text: &str) -> ChannelResult<DeliveryStatus> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(DeliveryStatus::success("recording"))
    }
}

/// API client pointing at the mock server
pub fn client_for(server: &MockServer) -> PracticumClient {
    PracticumClient::new(
        &format!("{}{STATUS_PATH}", server.uri()),
        API_TOKEN,
        Duration::from_secs(5),
    )
    .unwrap()
}

/// Watcher over the mock API that records outgoing messages
#[allow(dead_code)]
pub fn recording_watcher(server: &MockServer, cursor: i64) -> (Watcher, RecordingChannel) {
    let channel = RecordingChannel::new();
    let watcher = Watcher::new(
        client_for(server),
        Notifier::new(Box::new(channel.clone())),
        Duration::from_millis(10),
    )
    .with_cursor(cursor);
    (watcher, channel)
}

/// Make the mock API answer every GET with `template`
#[allow(dead_code)]
pub async fn mount_status_response(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}
