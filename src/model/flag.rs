use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Severity of a detected anomaly.
///
/// Totally ordered; the escalation pass does index arithmetic on it, so the
/// variant order is load-bearing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    const ORDERED: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Shift by `steps` on the ordered index, clamped at both ends.
    /// `Critical` cannot escalate further; `Low` cannot de-escalate further.
    pub fn shifted(&self, steps: i8) -> Severity {
        let idx = (self.index() as i8 + steps).clamp(0, (Self::ORDERED.len() - 1) as i8);
        Self::ORDERED[idx as usize]
    }
}

/// Which detector family produced a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlagCategory {
    Timeline,
    Metric,
    Buzzword,
    Skill,
    Other,
}

/// One detected anomaly.
///
/// Created by exactly one check inside the detector battery. The severity
/// may be rewritten once by the strictness-escalation pass; a flag is never
/// deleted after creation, so every finding surfaces to the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RedFlag {
    pub flag_id: String,
    pub severity: Severity,
    pub category: FlagCategory,
    pub description: String,
    /// Suggested follow-up question for the interview guide
    pub interview_probe: String,
    /// Claim IDs implicated by this finding
    #[serde(default)]
    pub affected_claims: Vec<String>,
    /// Hint for downstream interview-guide generation
    pub requires_proof: bool,
}

impl RedFlag {
    pub fn new(
        category: FlagCategory,
        severity: Severity,
        description: impl Into<String>,
        interview_probe: impl Into<String>,
        affected_claims: Vec<String>,
    ) -> Self {
        Self {
            flag_id: Uuid::new_v4().to_string(),
            severity,
            category,
            description: description.into(),
            interview_probe: interview_probe.into(),
            affected_claims,
            requires_proof: matches!(severity, Severity::High | Severity::Critical),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_shift_up_promotes_high_to_critical() {
        assert_eq!(Severity::High.shifted(1), Severity::Critical);
    }

    #[test]
    fn test_shift_clamps_at_critical() {
        assert_eq!(Severity::Critical.shifted(1), Severity::Critical);
    }

    #[test]
    fn test_shift_clamps_at_low() {
        assert_eq!(Severity::Low.shifted(-1), Severity::Low);
        assert_eq!(Severity::Medium.shifted(-1), Severity::Low);
    }

    #[test]
    fn test_zero_shift_is_identity() {
        for sev in [
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ] {
            assert_eq!(sev.shifted(0), sev);
        }
    }
}
