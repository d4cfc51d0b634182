//! Shared LLM client wrapper
//!
//! Provides the OpenAI-backed extraction capability used by claim
//! extraction. The client is optional: without an API key the service
//! starts in degraded mode and extraction reports itself as not configured
//! instead of failing at startup.

use rig::providers::openai;

/// Environment variable for the OpenAI API key
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key
    pub fn new(api_key: &str) -> Result<Self, String> {
        let client = openai::Client::new(api_key);

        Ok(Self { client })
    }

    /// Build a client from the environment, if configured
    pub fn from_env() -> Option<Self> {
        let key = std::env::var(ENV_OPENAI_API_KEY).ok()?;
        match Self::new(&key) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create OpenAI client");
                None
            }
        }
    }

    /// Get a reference to the underlying OpenAI client.
    /// Use this to create extractors with custom configuration.
    pub fn openai_client(&self) -> &openai::Client {
        &self.client
    }
}
