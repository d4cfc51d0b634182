//! Score aggregation
//!
//! Combines red flags and the evidence validator's aggregate consistency
//! signal into the three bounded scores and the risk tier. Numeric
//! invariants are enforced here at every boundary crossing rather than
//! trusted from upstream: evidence scores and the consistency signal are
//! re-clamped even though the collaborators promise clamped output.

use crate::model::config::SeverityDeductions;
use crate::model::{RedFlag, RiskLevel, Severity};

/// Weight of credibility vs consistency in the final score
const CREDIBILITY_WEIGHT: f64 = 0.6;
const CONSISTENCY_WEIGHT: f64 = 0.4;

/// Risk tier boundaries on the final score
const RISK_CRITICAL_BELOW: f64 = 30.0;
const RISK_HIGH_BELOW: f64 = 50.0;
const RISK_MEDIUM_BELOW: f64 = 75.0;

/// The three bounded scores plus the derived risk tier
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub credibility_score: f64,
    pub consistency_score: f64,
    pub final_score: f64,
    pub risk_assessment: RiskLevel,
}

pub struct ScoreAggregator {
    deductions: SeverityDeductions,
}

impl ScoreAggregator {
    pub fn new(deductions: SeverityDeductions) -> Self {
        Self { deductions }
    }

    /// Apply one severity-indexed deduction, clamping immediately.
    ///
    /// Clamping after each individual deduction (not only at the end) keeps
    /// the score trajectory well-defined under mid-computation inspection
    /// and guarantees the value can never leave [0, 100] regardless of flag
    /// count.
    pub fn deduct(&self, score: f64, severity: Severity) -> f64 {
        (score - self.deductions.for_severity(severity)).clamp(0.0, 100.0)
    }

    /// Credibility starts at 100 and takes one clamped deduction per flag
    pub fn credibility(&self, flags: &[RedFlag]) -> f64 {
        flags
            .iter()
            .fold(100.0, |score, flag| self.deduct(score, flag.severity))
    }

    /// Full aggregation: credibility from flags, consistency from the
    /// validator's raw signal, weighted final score, risk tier.
    pub fn aggregate(&self, flags: &[RedFlag], consistency_signal: f64) -> ScoreBreakdown {
        let credibility = round1(self.credibility(flags));
        let consistency = round1(normalize_score(consistency_signal));
        let final_score = round1(
            credibility.clamp(0.0, 100.0) * CREDIBILITY_WEIGHT
                + consistency.clamp(0.0, 100.0) * CONSISTENCY_WEIGHT,
        );
        let risk_assessment = risk_for(final_score, flags);

        tracing::debug!(
            credibility = credibility,
            consistency = consistency,
            final_score = final_score,
            risk = ?risk_assessment,
            "Aggregated scores"
        );

        ScoreBreakdown {
            credibility_score: credibility,
            consistency_score: consistency,
            final_score,
            risk_assessment,
        }
    }
}

/// Normalize a consistency signal into [0, 100].
///
/// The raw signal may arrive in decimal form (0-1), already scaled (0-100),
/// or erroneously double-scaled (> 100). All three cases are corrected:
/// values <= 1 are decimal and scaled up, values > 100 are divided back
/// down, values in (1, 100] pass through. The final clamp always applies.
pub fn normalize_score(raw: f64) -> f64 {
    let scaled = if raw <= 1.0 {
        raw * 100.0
    } else if raw > 100.0 {
        raw / 100.0
    } else {
        raw
    };
    scaled.clamp(0.0, 100.0)
}

/// Round to one decimal place for display
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Risk tier: a monotone function of the final score, with critical flags
/// forcing the critical tier regardless of score.
pub fn risk_for(final_score: f64, flags: &[RedFlag]) -> RiskLevel {
    let has_critical = flags.iter().any(|f| f.severity == Severity::Critical);
    if has_critical || final_score < RISK_CRITICAL_BELOW {
        RiskLevel::Critical
    } else if final_score < RISK_HIGH_BELOW {
        RiskLevel::High
    } else if final_score < RISK_MEDIUM_BELOW {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Hiring recommendation line derived from the risk tier
pub fn recommendation_for(risk: RiskLevel, flag_count: usize) -> String {
    match risk {
        RiskLevel::Low => {
            "Proceed with a standard interview; claims are broadly consistent.".to_string()
        }
        RiskLevel::Medium => format!(
            "Proceed, but verify the {} flagged item(s) during the interview.",
            flag_count
        ),
        RiskLevel::High => format!(
            "Significant concerns: require concrete evidence for the {} flagged item(s) before advancing.",
            flag_count
        ),
        RiskLevel::Critical => {
            "Major credibility issues detected; do not advance without independent verification."
                .to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlagCategory;

    fn flag(severity: Severity) -> RedFlag {
        RedFlag::new(FlagCategory::Other, severity, "finding", "probe", vec![])
    }

    fn aggregator() -> ScoreAggregator {
        ScoreAggregator::new(SeverityDeductions::default())
    }

    #[test]
    fn test_credibility_bounded_after_every_deduction() {
        let agg = aggregator();
        let mut score = 100.0;
        for _ in 0..50 {
            score = agg.deduct(score, Severity::Critical);
            assert!((0.0..=100.0).contains(&score), "trajectory left range: {}", score);
        }
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_twenty_critical_flags_floor_at_zero() {
        let agg = aggregator();
        let flags: Vec<RedFlag> = (0..20).map(|_| flag(Severity::Critical)).collect();
        let breakdown = agg.aggregate(&flags, 0.5);
        assert_eq!(breakdown.credibility_score, 0.0);
        assert_eq!(breakdown.risk_assessment, RiskLevel::Critical);
    }

    #[test]
    fn test_normalize_decimal_input() {
        assert_eq!(normalize_score(0.85), 85.0);
    }

    #[test]
    fn test_normalize_passthrough_input() {
        assert_eq!(normalize_score(73.0), 73.0);
    }

    #[test]
    fn test_normalize_double_scaled_input() {
        let normalized = normalize_score(8500.0);
        assert!(normalized <= 100.0);
        assert_eq!(normalized, 85.0);
    }

    #[test]
    fn test_normalize_is_idempotent_on_correct_values() {
        for v in [5.0, 42.0, 73.0, 100.0] {
            assert_eq!(normalize_score(normalize_score(v)), normalize_score(v));
        }
    }

    #[test]
    fn test_normalize_clamps_negatives() {
        assert_eq!(normalize_score(-0.4), 0.0);
    }

    #[test]
    fn test_final_score_weighting() {
        // credibility 90 (one medium deduction), consistency 0.7 -> 70
        let agg = aggregator();
        let flags = vec![flag(Severity::Medium)];
        let breakdown = agg.aggregate(&flags, 0.7);
        assert_eq!(breakdown.credibility_score, 90.0);
        assert_eq!(breakdown.consistency_score, 70.0);
        assert_eq!(breakdown.final_score, 82.0);
        assert_eq!(breakdown.risk_assessment, RiskLevel::Low);
    }

    #[test]
    fn test_risk_tiers_by_score() {
        assert_eq!(risk_for(82.0, &[]), RiskLevel::Low);
        assert_eq!(risk_for(74.9, &[]), RiskLevel::Medium);
        assert_eq!(risk_for(49.9, &[]), RiskLevel::High);
        assert_eq!(risk_for(29.9, &[]), RiskLevel::Critical);
    }

    #[test]
    fn test_single_critical_flag_forces_critical_risk() {
        let flags = vec![flag(Severity::Critical)];
        assert_eq!(risk_for(95.0, &flags), RiskLevel::Critical);
    }

    #[test]
    fn test_rounding_to_one_decimal() {
        assert_eq!(round1(82.04), 82.0);
        assert_eq!(round1(82.07), 82.1);
    }
}
