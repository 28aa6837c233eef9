//! OpenAI client construction.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Timeout for OpenAI API requests (5 minutes).
///
/// Agent turns that read long papers can take a while; this bound only
/// exists to prevent hung calls.
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client with a configured timeout.
pub fn create_client() -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(OpenAIConfig::default()).with_http_client(http_client)
}
