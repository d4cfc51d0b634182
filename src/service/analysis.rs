//! Analysis pipeline
//!
//! Sequences the forward-only data flow: raw text → claims → (validations,
//! timeline facts) → red flags → scores. The scoring core (`analyze`) is
//! pure, synchronous computation over in-memory data; no stage mutates
//! another's output, and each run produces fresh structures, so independent
//! résumé analyses parallelize trivially.

use crate::model::{
    AnalysisResult, Claim, ScoringConfig, SeniorityLevel, Strictness, Validation,
    VerificationStatus,
};
use crate::service::detector::RedFlagDetector;
use crate::service::evidence::{self, EvidenceReport, LexicalEvidenceValidator};
use crate::service::extraction::{ClaimExtractor, ExtractionError};
use crate::service::scoring::{self, ScoreAggregator};
use crate::service::{seniority, timeline};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Everything needed to run one analysis
pub struct AnalysisRequest {
    pub text: String,
    /// Declared seniority; detected from the text when absent
    pub seniority: Option<SeniorityLevel>,
    pub strictness: Strictness,
    /// Probe external links while validating evidence
    pub deep_analysis: bool,
}

pub struct AnalysisService {
    extractor: ClaimExtractor,
    config: ScoringConfig,
}

impl AnalysisService {
    pub fn new(extractor: ClaimExtractor, config: ScoringConfig) -> Self {
        Self { extractor, config }
    }

    /// Full pipeline: extraction, seniority resolution, evidence
    /// validation, then the pure scoring core.
    pub async fn analyze_resume(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let claims = self
            .extractor
            .extract(&request.text, request.seniority)
            .await?;

        let seniority = request
            .seniority
            .unwrap_or_else(|| seniority::detect_seniority(&request.text));

        let validator = LexicalEvidenceValidator::new(request.deep_analysis);
        let report = evidence::validate_all(&validator, &claims, &request.text).await;

        Ok(self.analyze(&claims, report, seniority, request.strictness))
    }

    /// The scoring core: claims plus their evidence report in, bounded
    /// scores and categorized flags out. Pure and synchronous.
    pub fn analyze(
        &self,
        claims: &[Claim],
        evidence_report: EvidenceReport,
        seniority: SeniorityLevel,
        strictness: Strictness,
    ) -> AnalysisResult {
        let timeline = timeline::analyze_timeline(claims, self.config.gap_threshold_months);

        let detector = RedFlagDetector::new(self.config.clone());
        let red_flags = detector.detect(claims, &timeline, seniority, strictness);

        // Statuses depend on the flags, so validations finalize only now;
        // drafts are matched by claim_id, never by position
        let validations: Vec<Validation> = evidence_report
            .drafts
            .iter()
            .map(|draft| evidence::finalize_validation(draft, &red_flags))
            .collect();

        let aggregator = ScoreAggregator::new(self.config.deductions.clone());
        let scores = aggregator.aggregate(&red_flags, evidence_report.consistency_signal);

        let verified_claims = validations
            .iter()
            .filter(|v| v.verification_status == VerificationStatus::Verified)
            .count();
        let unverified_claims = validations
            .iter()
            .filter(|v| {
                matches!(
                    v.verification_status,
                    VerificationStatus::Unverified | VerificationStatus::RedFlag
                )
            })
            .count();

        let recommendation =
            scoring::recommendation_for(scores.risk_assessment, red_flags.len());

        tracing::info!(
            total_claims = claims.len(),
            verified = verified_claims,
            flags = red_flags.len(),
            final_score = scores.final_score,
            risk = ?scores.risk_assessment,
            "Analysis complete"
        );

        AnalysisResult {
            credibility_score: scores.credibility_score,
            consistency_score: scores.consistency_score,
            final_score: scores.final_score,
            risk_assessment: scores.risk_assessment,
            seniority_level: seniority,
            strictness,
            total_claims: claims.len(),
            verified_claims,
            unverified_claims,
            red_flags,
            validations,
            timeline,
            recommendation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClaimCategory, RiskLevel, TimePeriod};
    use crate::service::evidence::EvidenceDraft;

    fn service() -> AnalysisService {
        AnalysisService::new(
            ClaimExtractor::new(None, None),
            ScoringConfig::default(),
        )
    }

    fn claim(id: &str, category: ClaimCategory, text: &str) -> Claim {
        Claim {
            claim_id: id.to_string(),
            category,
            claim_text: text.to_string(),
            job_title: None,
            technologies_mentioned: vec![],
            time_period: None,
        }
    }

    fn draft(id: &str, score: f64) -> EvidenceDraft {
        EvidenceDraft {
            claim_id: id.to_string(),
            evidence_score: score,
            links_checked: false,
        }
    }

    fn report(drafts: Vec<EvidenceDraft>, signal: f64) -> EvidenceReport {
        EvidenceReport {
            drafts,
            consistency_signal: signal,
        }
    }

    #[test]
    fn test_clean_resume_scores_low_risk() {
        let claims = vec![
            claim("a", ClaimCategory::WorkExperience, "Engineer at Acme"),
            claim("b", ClaimCategory::Project, "Built the data pipeline"),
        ];
        let result = service().analyze(
            &claims,
            report(vec![draft("a", 0.9), draft("b", 0.8)], 0.9),
            SeniorityLevel::Mid,
            Strictness::Medium,
        );

        assert!(result.red_flags.is_empty());
        assert_eq!(result.credibility_score, 100.0);
        assert_eq!(result.consistency_score, 90.0);
        assert_eq!(result.final_score, 96.0);
        assert_eq!(result.risk_assessment, RiskLevel::Low);
        assert_eq!(result.verified_claims, 2);
        assert_eq!(result.unverified_claims, 0);
    }

    #[test]
    fn test_flag_heavy_resume_is_critical_and_floored() {
        // One wild metric claim per iteration: 20 critical flags in total
        let claims: Vec<Claim> = (0..20)
            .map(|i| {
                claim(
                    &format!("m{}", i),
                    ClaimCategory::Metric,
                    &format!("Grew revenue by {}00% in 1 month", i + 10),
                )
            })
            .collect();
        let drafts = claims.iter().map(|c| draft(&c.claim_id, 0.1)).collect();

        let result = service().analyze(
            &claims,
            report(drafts, 0.4),
            SeniorityLevel::Mid,
            Strictness::Medium,
        );

        assert_eq!(result.red_flags.len(), 20);
        assert_eq!(result.credibility_score, 0.0);
        assert_eq!(result.risk_assessment, RiskLevel::Critical);
        // Low evidence plus a touching flag per claim
        assert!(result
            .validations
            .iter()
            .all(|v| v.verification_status == VerificationStatus::RedFlag));
    }

    #[test]
    fn test_timeline_gap_flows_into_flags_and_scores() {
        let mut early = claim("a", ClaimCategory::WorkExperience, "First role");
        early.time_period = Some(TimePeriod {
            start: "2019-01".parse().ok(),
            end: "2019-12".parse().ok(),
        });
        let mut late = claim("b", ClaimCategory::WorkExperience, "Second role");
        late.time_period = Some(TimePeriod {
            start: "2020-10".parse().ok(),
            end: "2021-12".parse().ok(),
        });

        let result = service().analyze(
            &[early, late],
            report(vec![draft("a", 0.5), draft("b", 0.5)], 0.8),
            SeniorityLevel::Mid,
            Strictness::Medium,
        );

        assert_eq!(result.timeline.gaps.len(), 1);
        assert_eq!(result.timeline.gaps[0].gap_months, 10);
        assert_eq!(result.red_flags.len(), 1);
        // One high flag: 100 - 20
        assert_eq!(result.credibility_score, 80.0);
    }

    #[test]
    fn test_strictness_changes_outcome_for_same_input() {
        let claims = vec![claim(
            "m",
            ClaimCategory::Metric,
            "Improved conversion by 250% in 1 month",
        )];
        let run = |strictness| {
            service().analyze(
                &claims,
                report(vec![draft("m", 0.6)], 0.8),
                SeniorityLevel::Mid,
                strictness,
            )
        };

        // ratio 5.0 -> critical at medium; stays critical at high; high at low
        let medium = run(Strictness::Medium);
        let high = run(Strictness::High);
        let low = run(Strictness::Low);
        assert_eq!(medium.risk_assessment, RiskLevel::Critical);
        assert_eq!(high.risk_assessment, RiskLevel::Critical);
        assert_ne!(low.risk_assessment, RiskLevel::Critical);
    }

    #[test]
    fn test_validation_counts_partition() {
        let claims = vec![
            claim("a", ClaimCategory::Other, "Well evidenced"),
            claim("b", ClaimCategory::Other, "Half evidenced"),
            claim("c", ClaimCategory::Other, "Not evidenced"),
        ];
        let result = service().analyze(
            &claims,
            report(
                vec![draft("a", 0.9), draft("b", 0.5), draft("c", 0.1)],
                0.7,
            ),
            SeniorityLevel::Mid,
            Strictness::Medium,
        );
        assert_eq!(result.total_claims, 3);
        assert_eq!(result.verified_claims, 1);
        // partial is neither verified nor unverified
        assert_eq!(result.unverified_claims, 1);
    }
}
