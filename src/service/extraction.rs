//! Claim extraction service using LLM
//!
//! Extracts structured claim records from résumé text using rig-core. The
//! LLM is an opaque capability: given text it returns structured records,
//! which are converted into immutable `Claim` values with deterministic
//! content-hash IDs. Responses are cached by document content hash so a
//! re-analysis of identical text never pays for a second extraction.

use std::collections::HashSet;

use rig::client::CompletionClient;
use rig::providers::openai;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::model::{Claim, ClaimCategory, SeniorityLevel, TimePeriod, YearMonth};
use crate::service::cache::ExtractionCache;
use crate::service::document::{self, EmptyDocumentDiagnosis};
use crate::service::llm::LlmClient;

/// Environment variable for the extraction model (defaults to gpt-4o-mini)
const ENV_EXTRACTION_MODEL: &str = "RESUME_INTEL_EXTRACTION_MODEL";

/// Default model for claim extraction
const DEFAULT_MODEL: &str = openai::GPT_4O_MINI;

const EXTRACTION_PREAMBLE: &str = "You are a resume analyst. You extract individual factual \
claims from resume text, exactly as stated, without judging them.";

/// LLM-extractable payload
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedClaims {
    pub claims: Vec<ExtractedClaim>,
}

/// A single extracted claim record, before conversion to the domain type
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedClaim {
    pub category: ExtractedCategory,
    /// The literal sentence or fragment the claim was taken from
    pub claim_text: String,
    pub job_title: Option<String>,
    #[serde(default)]
    pub technologies_mentioned: Vec<String>,
    /// "YYYY-MM" when the claim covers a time span
    pub start_date: Option<String>,
    /// "YYYY-MM", or absent/"present" for ongoing roles
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExtractedCategory {
    WorkExperience,
    Project,
    Skill,
    Education,
    Metric,
    Other,
}

impl From<ExtractedCategory> for ClaimCategory {
    fn from(value: ExtractedCategory) -> Self {
        match value {
            ExtractedCategory::WorkExperience => ClaimCategory::WorkExperience,
            ExtractedCategory::Project => ClaimCategory::Project,
            ExtractedCategory::Skill => ClaimCategory::Skill,
            ExtractedCategory::Education => ClaimCategory::Education,
            ExtractedCategory::Metric => ClaimCategory::Metric,
            ExtractedCategory::Other => ClaimCategory::Other,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The document cannot yield claims; carries the specific diagnosis
    #[error("{0}")]
    EmptyDocument(#[from] EmptyDocumentDiagnosis),

    #[error("LLM extraction failed: {0}")]
    LlmFailed(String),

    #[error("OpenAI client not configured (missing OPENAI_API_KEY)")]
    NotConfigured,
}

/// Service for extracting claims from résumé text
pub struct ClaimExtractor {
    llm_client: Option<LlmClient>,
    cache: Option<ExtractionCache>,
    model: String,
}

impl ClaimExtractor {
    /// Create a new claim extractor. Uses a shared LLM client passed from
    /// startup; without one, extraction reports itself as not configured.
    pub fn new(llm_client: Option<LlmClient>, cache: Option<ExtractionCache>) -> Self {
        let model =
            std::env::var(ENV_EXTRACTION_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        tracing::info!(
            model = %model,
            configured = llm_client.is_some(),
            "Claim extraction service initialized"
        );
        Self {
            llm_client,
            cache,
            model,
        }
    }

    /// Extract claims from résumé text.
    ///
    /// An empty result is a distinctly-diagnosed terminal state, never a
    /// generic failure or a crash.
    pub async fn extract(
        &self,
        text: &str,
        seniority_hint: Option<SeniorityLevel>,
    ) -> Result<Vec<Claim>, ExtractionError> {
        // Cheap structural rejection before any LLM round-trip
        match document::diagnose_empty(text) {
            EmptyDocumentDiagnosis::NoSubstantiveClaims => {}
            diagnosis => return Err(ExtractionError::EmptyDocument(diagnosis)),
        }

        let content_hash = content_hash(text);

        if let Some(cached) = self.cached_claims(&content_hash).await {
            tracing::debug!(
                content_hash = %content_hash,
                claim_count = cached.len(),
                "Cache hit for extracted claims"
            );
            return self.non_empty(cached, text);
        }

        let llm_client = self
            .llm_client
            .as_ref()
            .ok_or(ExtractionError::NotConfigured)?;

        let prompt = build_extraction_prompt(text, seniority_hint);
        let extractor = llm_client
            .openai_client()
            .extractor::<ExtractedClaims>(&self.model)
            .preamble(EXTRACTION_PREAMBLE)
            .build();

        let extracted = extractor
            .extract(&prompt)
            .await
            .map_err(|e| ExtractionError::LlmFailed(e.to_string()))?;

        let claims = records_to_claims(extracted.claims);
        tracing::info!(
            content_hash = %content_hash,
            claim_count = claims.len(),
            "Extracted claims from resume"
        );

        self.cache_claims(&content_hash, &claims).await;
        self.non_empty(claims, text)
    }

    fn non_empty(&self, claims: Vec<Claim>, text: &str) -> Result<Vec<Claim>, ExtractionError> {
        if claims.is_empty() {
            Err(ExtractionError::EmptyDocument(document::diagnose_empty(
                text,
            )))
        } else {
            Ok(claims)
        }
    }

    async fn cached_claims(&self, content_hash: &str) -> Option<Vec<Claim>> {
        let cache = self.cache.as_ref()?;
        match cache.get_claims::<Vec<Claim>>(content_hash).await {
            Ok(claims) => Some(claims),
            Err(crate::service::cache::CacheError::Miss(_)) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Claim cache read failed");
                None
            }
        }
    }

    async fn cache_claims(&self, content_hash: &str, claims: &[Claim]) {
        if let Some(cache) = self.cache.as_ref() {
            if let Err(e) = cache.set_claims(content_hash, &claims).await {
                tracing::warn!(error = %e, "Claim cache write failed");
            }
        }
    }
}

/// SHA-256 hex digest of the document text, the extraction cache key
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn build_extraction_prompt(text: &str, seniority_hint: Option<SeniorityLevel>) -> String {
    let seniority_line = match seniority_hint {
        Some(level) => format!("The candidate is applying at {} level.", level),
        None => "The candidate's seniority level is not declared.".to_string(),
    };

    format!(
        r#"Extract every factual claim from the resume below.

{seniority_line}

Rules:
- One claim per assertion: a job held, a project delivered, a skill, a degree, a quantified result.
- claim_text is the literal sentence or fragment, copied verbatim.
- Use category "metric" for quantified outcome statements ("improved X by N%").
- For work experience and projects, fill job_title and technologies_mentioned where stated.
- Dates as "YYYY-MM"; leave end_date out for ongoing roles.
- Do not invent, merge, or paraphrase claims.

Resume:
{text}"#
    )
}

/// Convert raw records into domain claims: derive content-hash IDs, parse
/// the year-month bounds (malformed dates degrade to absent bounds, never an
/// error), and drop exact duplicates so IDs stay unique within the run.
fn records_to_claims(records: Vec<ExtractedClaim>) -> Vec<Claim> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut claims = Vec::new();

    for record in records {
        let claim_text = record.claim_text.trim().to_string();
        if claim_text.is_empty() {
            continue;
        }

        let claim_id = Claim::id_for_text(&claim_text);
        if !seen.insert(claim_id.clone()) {
            tracing::debug!(claim_id = %claim_id, "Dropping duplicate claim");
            continue;
        }

        let start = parse_bound(record.start_date.as_deref());
        let end = parse_bound(record.end_date.as_deref());
        let time_period = if start.is_some() || end.is_some() {
            Some(TimePeriod { start, end })
        } else {
            None
        };

        claims.push(Claim {
            claim_id,
            category: record.category.into(),
            claim_text,
            job_title: record.job_title,
            technologies_mentioned: record.technologies_mentioned,
            time_period,
        });
    }

    claims
}

fn parse_bound(raw: Option<&str>) -> Option<YearMonth> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("present") || raw.eq_ignore_ascii_case("current")
    {
        return None;
    }
    match raw.parse::<YearMonth>() {
        Ok(ym) => Some(ym),
        Err(e) => {
            tracing::debug!(raw = %raw, error = %e, "Unparseable date bound, leaving open");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> ExtractedClaim {
        ExtractedClaim {
            category: ExtractedCategory::WorkExperience,
            claim_text: text.to_string(),
            job_title: None,
            technologies_mentioned: vec![],
            start_date: Some("2020-03".to_string()),
            end_date: Some("2022-01".to_string()),
        }
    }

    #[test]
    fn test_records_convert_with_parsed_dates() {
        let claims = records_to_claims(vec![record("Backend engineer at Acme")]);
        assert_eq!(claims.len(), 1);
        let period = claims[0].time_period.unwrap();
        assert_eq!(period.start, "2020-03".parse().ok());
        assert_eq!(period.end, "2022-01".parse().ok());
    }

    #[test]
    fn test_present_end_date_means_ongoing() {
        let mut r = record("Platform engineer at Beta");
        r.end_date = Some("present".to_string());
        let claims = records_to_claims(vec![r]);
        let period = claims[0].time_period.unwrap();
        assert!(period.start.is_some());
        assert!(period.end.is_none());
    }

    #[test]
    fn test_malformed_dates_degrade_silently() {
        let mut r = record("SRE at Gamma");
        r.start_date = Some("spring 2019".to_string());
        r.end_date = None;
        let claims = records_to_claims(vec![r]);
        assert_eq!(claims.len(), 1);
        assert!(claims[0].time_period.is_none());
    }

    #[test]
    fn test_duplicate_claim_text_deduplicated() {
        let claims = records_to_claims(vec![
            record("Shipped the billing rewrite"),
            record("Shipped the billing rewrite"),
        ]);
        assert_eq!(claims.len(), 1);
    }

    #[test]
    fn test_blank_claim_text_dropped() {
        let claims = records_to_claims(vec![record("   ")]);
        assert!(claims.is_empty());
    }

    #[test]
    fn test_content_hash_is_stable() {
        assert_eq!(content_hash("abc"), content_hash("abc"));
        assert_ne!(content_hash("abc"), content_hash("abd"));
    }
}
