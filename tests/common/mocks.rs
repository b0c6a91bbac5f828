//! Mock transport helpers.

#[allow(unused_imports)]
pub use orgscout::adapters::mock::{MockHttpClient, MockResponse};
#[allow(unused_imports)]
pub use orgscout::traits::{HttpError, Response};

use orgscout::client::ScoutClient;
use orgscout::config::ClientConfig;

/// Base URL the mock transport answers on
#[allow(dead_code)]
pub const MOCK_BASE: &str = "http://mock.local";

/// Configuration for setting up scripted responses.
#[allow(dead_code)]
pub struct MockHttpConfig {
    client: MockHttpClient,
}

#[allow(dead_code)]
impl MockHttpConfig {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Stream `body` for `path`, split into `chunk_size` byte chunks.
    pub fn with_stream(self, path: &str, body: &str, chunk_size: usize) -> Self {
        self.client.set_response(
            &format!("{}{}", MOCK_BASE, path),
            MockResponse::chunked(body, chunk_size),
        );
        self
    }

    /// Answer `path` with a JSON body.
    pub fn with_json(self, path: &str, value: &serde_json::Value) -> Self {
        self.client
            .set_response(&format!("{}{}", MOCK_BASE, path), MockResponse::json(value));
        self
    }

    pub fn with_response(self, path: &str, response: MockResponse) -> Self {
        self.client
            .set_response(&format!("{}{}", MOCK_BASE, path), response);
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }

    /// Client over the configured mock, plus the mock for inspecting requests.
    pub fn build_client(self) -> (ScoutClient<MockHttpClient>, MockHttpClient) {
        let mock = self.client;
        let client = ScoutClient::with_http_client(
            mock.clone(),
            ClientConfig::new().with_api_base_url(MOCK_BASE),
        );
        (client, mock)
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
