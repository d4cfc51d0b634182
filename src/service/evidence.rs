//! Evidence validation
//!
//! Assesses how well each claim is substantiated by the rest of the
//! document and by any external references it carries. The validator owns
//! the [0, 1] bounding of its score: bonus signals are summed freely and
//! clamped as the last step, so callers never see an out-of-range value.
//! The aggregator still re-clamps at its own boundary.
//!
//! Validation of distinct claims has no data dependency between claims, so
//! one résumé's claims are validated through a bounded concurrent pool;
//! results are matched back by `claim_id`, never by position.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use regex::Regex;
use url::Url;

use crate::model::{Claim, RedFlag, Severity, Validation, VerificationStatus};

/// Bounded concurrency for per-claim validation
const VALIDATION_CONCURRENCY: usize = 8;

/// Timeout for external link probes
const LINK_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Score contributions; summed then clamped
const BASE_SCORE: f64 = 0.2;
const BONUS_LINK_PRESENT: f64 = 0.2;
const BONUS_QUANTIFIED: f64 = 0.15;
const BONUS_CORROBORATED: f64 = 0.25;
const BONUS_TECH_REUSED: f64 = 0.15;
const BONUS_LINK_REACHABLE: f64 = 0.15;

/// Evidence assessment for one claim, before verification statuses can be
/// derived (statuses also depend on red flags, which do not exist yet at
/// validation time)
#[derive(Debug, Clone)]
pub struct EvidenceDraft {
    pub claim_id: String,
    pub evidence_score: f64,
    pub links_checked: bool,
}

/// Aggregate output of validating every claim of one run
#[derive(Debug, Clone)]
pub struct EvidenceReport {
    pub drafts: Vec<EvidenceDraft>,
    /// Internal-consistency signal in decimal form; the score aggregator
    /// normalizes and clamps it
    pub consistency_signal: f64,
}

/// The evidence-assessment capability consumed by the pipeline.
/// Implementations must return a score already clamped to [0, 1].
#[async_trait]
pub trait EvidenceValidator: Send + Sync {
    async fn validate(&self, claim: &Claim, raw_text: &str) -> EvidenceDraft;
}

/// Validate all claims with bounded concurrency and derive the aggregate
/// consistency signal (mean per-claim evidence score, decimal form).
pub async fn validate_all(
    validator: &dyn EvidenceValidator,
    claims: &[Claim],
    raw_text: &str,
) -> EvidenceReport {
    let drafts: Vec<EvidenceDraft> = stream::iter(claims)
        .map(|claim| validator.validate(claim, raw_text))
        .buffer_unordered(VALIDATION_CONCURRENCY)
        .collect()
        .await;

    let consistency_signal = if drafts.is_empty() {
        0.0
    } else {
        drafts.iter().map(|d| d.evidence_score).sum::<f64>() / drafts.len() as f64
    };

    tracing::debug!(
        claim_count = drafts.len(),
        consistency_signal = consistency_signal,
        "Evidence validation complete"
    );

    EvidenceReport {
        drafts,
        consistency_signal,
    }
}

/// Derive the verification status for one claim once flags exist.
///
/// Precedence matters: strong independent evidence is not discarded because
/// of a single low-severity flag; only a critical flag can keep a
/// high-evidence claim out of `verified`.
pub fn derive_verification_status(
    evidence_score: f64,
    touching_flags: &[&RedFlag],
) -> VerificationStatus {
    let score = evidence_score.clamp(0.0, 1.0);
    let has_critical = touching_flags
        .iter()
        .any(|f| f.severity == Severity::Critical);

    if score > 0.7 && !has_critical {
        VerificationStatus::Verified
    } else if score > 0.4 {
        VerificationStatus::Partial
    } else if !touching_flags.is_empty() && score < 0.3 {
        VerificationStatus::RedFlag
    } else {
        VerificationStatus::Unverified
    }
}

/// Finalize one validation record from its draft and the flags touching it
pub fn finalize_validation(draft: &EvidenceDraft, all_flags: &[RedFlag]) -> Validation {
    let touching: Vec<&RedFlag> = all_flags
        .iter()
        .filter(|f| f.affected_claims.iter().any(|id| *id == draft.claim_id))
        .collect();

    Validation {
        claim_id: draft.claim_id.clone(),
        evidence_score: draft.evidence_score.clamp(0.0, 1.0),
        verification_status: derive_verification_status(draft.evidence_score, &touching),
        links_checked: draft.links_checked,
    }
}

/// Default validator: lexical corroboration against the document itself,
/// plus optional HTTP probes of links found in the claim text.
pub struct LexicalEvidenceValidator {
    http: reqwest::Client,
    /// When off, links contribute a presence bonus but are never fetched
    probe_links: bool,
}

impl LexicalEvidenceValidator {
    pub fn new(probe_links: bool) -> Self {
        let http = reqwest::Client::builder()
            .timeout(LINK_PROBE_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { http, probe_links }
    }

    async fn probe(&self, url: &Url) -> bool {
        match self.http.head(url.clone()).send().await {
            Ok(resp) => resp.status().is_success() || resp.status().is_redirection(),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Link probe failed");
                false
            }
        }
    }
}

/// Well-formed http(s) URLs found in the claim text
fn extract_urls(text: &str) -> Vec<Url> {
    let re = Regex::new(r#"https?://[^\s)>'"\]]+"#).expect("static url pattern");
    re.find_iter(text)
        .filter_map(|m| Url::parse(m.as_str().trim_end_matches(['.', ',', ';'])).ok())
        .filter(|u| matches!(u.scheme(), "http" | "https"))
        .collect()
}

/// Whether the claim text carries a concrete number
fn is_quantified(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

/// A distinctive phrase of the claim appears again elsewhere in the document
fn is_corroborated(claim_text: &str, raw_text: &str) -> bool {
    let phrase = claim_text.trim().to_lowercase();
    if phrase.len() < 12 {
        return false;
    }
    let doc = raw_text.to_lowercase();
    doc.matches(&phrase).count() > 1
}

/// Any of the claim's technologies appears in the document outside the
/// claim text itself
fn techs_reused(claim: &Claim, raw_text: &str) -> bool {
    if claim.technologies_mentioned.is_empty() {
        return false;
    }
    let doc = raw_text.to_lowercase();
    let own = claim.claim_text.to_lowercase();
    claim.technologies_mentioned.iter().any(|tech| {
        let needle = tech.to_lowercase();
        !needle.is_empty() && doc.matches(&needle).count() > own.matches(&needle).count()
    })
}

#[async_trait]
impl EvidenceValidator for LexicalEvidenceValidator {
    async fn validate(&self, claim: &Claim, raw_text: &str) -> EvidenceDraft {
        let mut score = BASE_SCORE;

        let urls = extract_urls(&claim.claim_text);
        if !urls.is_empty() {
            score += BONUS_LINK_PRESENT;
        }
        if is_quantified(&claim.claim_text) {
            score += BONUS_QUANTIFIED;
        }
        if is_corroborated(&claim.claim_text, raw_text) {
            score += BONUS_CORROBORATED;
        }
        if techs_reused(claim, raw_text) {
            score += BONUS_TECH_REUSED;
        }

        let mut links_checked = false;
        if self.probe_links && !urls.is_empty() {
            links_checked = true;
            for url in &urls {
                if self.probe(url).await {
                    score += BONUS_LINK_REACHABLE;
                    break;
                }
            }
        }

        // Bounding is the last step; the bonus sum may exceed 1.0
        EvidenceDraft {
            claim_id: claim.claim_id.clone(),
            evidence_score: score.clamp(0.0, 1.0),
            links_checked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClaimCategory, FlagCategory};

    fn claim(text: &str, techs: &[&str]) -> Claim {
        Claim {
            claim_id: Claim::id_for_text(text),
            category: ClaimCategory::Project,
            claim_text: text.to_string(),
            job_title: None,
            technologies_mentioned: techs.iter().map(|s| s.to_string()).collect(),
            time_period: None,
        }
    }

    fn flag(severity: Severity, claim_id: &str) -> RedFlag {
        RedFlag::new(
            FlagCategory::Other,
            severity,
            "finding",
            "probe",
            vec![claim_id.to_string()],
        )
    }

    #[tokio::test]
    async fn test_score_is_clamped_after_bonus_sum() {
        // Every offline bonus fires; the sum lands near the cap
        let text = "Shipped https://github.com/acme/thing serving 120k users with Rust";
        let raw = format!("{}\n\nAlso maintained Rust services.\n{}", text, text);
        let c = claim(text, &["Rust"]);
        let validator = LexicalEvidenceValidator::new(false);
        let draft = validator.validate(&c, &raw).await;
        assert!(draft.evidence_score <= 1.0);
        assert!(draft.evidence_score > 0.7);
        assert!(!draft.links_checked);
    }

    #[tokio::test]
    async fn test_bare_claim_scores_low() {
        let c = claim("Did some things at a company", &[]);
        let validator = LexicalEvidenceValidator::new(false);
        let draft = validator.validate(&c, "Did some things at a company").await;
        assert!(draft.evidence_score < 0.3);
    }

    #[tokio::test]
    async fn test_validate_all_matches_by_claim_id() {
        let claims = vec![
            claim("Built service A with 99.9% uptime", &[]),
            claim("Maintained service B", &[]),
        ];
        let validator = LexicalEvidenceValidator::new(false);
        let report = validate_all(&validator, &claims, "irrelevant corpus").await;
        assert_eq!(report.drafts.len(), 2);
        for c in &claims {
            assert!(report.drafts.iter().any(|d| d.claim_id == c.claim_id));
        }
        assert!(report.consistency_signal > 0.0 && report.consistency_signal <= 1.0);
    }

    #[test]
    fn test_strong_evidence_survives_low_severity_flag() {
        let f = flag(Severity::Low, "c1");
        let status = derive_verification_status(0.8, &[&f]);
        assert_eq!(status, VerificationStatus::Verified);
    }

    #[test]
    fn test_critical_flag_blocks_verified() {
        let f = flag(Severity::Critical, "c1");
        let status = derive_verification_status(0.8, &[&f]);
        // Falls through to the partial tier, not all the way to red_flag
        assert_eq!(status, VerificationStatus::Partial);
    }

    #[test]
    fn test_low_evidence_with_flag_is_red_flag() {
        let f = flag(Severity::Medium, "c1");
        assert_eq!(
            derive_verification_status(0.2, &[&f]),
            VerificationStatus::RedFlag
        );
    }

    #[test]
    fn test_low_evidence_without_flag_is_unverified() {
        assert_eq!(
            derive_verification_status(0.2, &[]),
            VerificationStatus::Unverified
        );
    }

    #[test]
    fn test_out_of_domain_score_is_reclamped() {
        assert_eq!(
            derive_verification_status(3.7, &[]),
            VerificationStatus::Verified
        );
        assert_eq!(
            derive_verification_status(-2.0, &[]),
            VerificationStatus::Unverified
        );
    }

    #[test]
    fn test_finalize_only_counts_touching_flags() {
        let draft = EvidenceDraft {
            claim_id: "mine".to_string(),
            evidence_score: 0.9,
            links_checked: false,
        };
        // A critical flag on a different claim must not block verification
        let flags = vec![flag(Severity::Critical, "other")];
        let validation = finalize_validation(&draft, &flags);
        assert_eq!(validation.verification_status, VerificationStatus::Verified);
    }
}
