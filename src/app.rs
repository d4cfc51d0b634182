//! Application state and service initialization
//!
//! Centralizes service construction and dependency injection so the actix
//! handlers only ever see ready-made services.

use std::sync::Arc;

use crate::model::Config;
use crate::service::{AnalysisService, ClaimExtractor, ExtractionCache, LlmClient};

/// Application state containing all services and shared resources
pub struct AppState {
    /// Redis extraction cache (optional)
    pub cache: Option<ExtractionCache>,
    /// Whether the LLM extraction backend is configured
    pub extraction_configured: bool,
    /// The analysis pipeline
    pub analysis_service: Arc<AnalysisService>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// Both the Redis cache and the LLM client are optional: without Redis
    /// extraction simply isn't cached, and without an API key the analysis
    /// endpoint reports itself as not configured per request.
    pub async fn new(config: Config) -> Self {
        let cache = match ExtractionCache::new().await {
            Ok(cache) => {
                tracing::info!("Redis cache enabled");
                Some(cache)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Redis cache unavailable, running without cache");
                None
            }
        };

        let llm_client = LlmClient::from_env();
        let extraction_configured = llm_client.is_some();
        if !extraction_configured {
            tracing::warn!("OPENAI_API_KEY not set, claim extraction disabled");
        }

        let extractor = ClaimExtractor::new(llm_client, cache.clone());
        let analysis_service = Arc::new(AnalysisService::new(extractor, config.scoring));

        Self {
            cache,
            extraction_configured,
            analysis_service,
        }
    }
}
