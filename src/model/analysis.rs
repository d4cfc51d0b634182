use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::flag::RedFlag;
use crate::model::validation::Validation;

/// Seniority tiers used to parameterize expectation thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityLevel {
    Intern,
    Junior,
    Mid,
    Senior,
    Lead,
}

impl SeniorityLevel {
    pub const ALL: [SeniorityLevel; 5] = [
        SeniorityLevel::Intern,
        SeniorityLevel::Junior,
        SeniorityLevel::Mid,
        SeniorityLevel::Senior,
        SeniorityLevel::Lead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeniorityLevel::Intern => "intern",
            SeniorityLevel::Junior => "junior",
            SeniorityLevel::Mid => "mid",
            SeniorityLevel::Senior => "senior",
            SeniorityLevel::Lead => "lead",
        }
    }
}

impl fmt::Display for SeniorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeniorityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "intern" => Ok(SeniorityLevel::Intern),
            "junior" => Ok(SeniorityLevel::Junior),
            "mid" => Ok(SeniorityLevel::Mid),
            "senior" => Ok(SeniorityLevel::Senior),
            "lead" => Ok(SeniorityLevel::Lead),
            other => Err(format!(
                "invalid seniority '{}', expected one of intern|junior|mid|senior|lead",
                other
            )),
        }
    }
}

/// Configuration axis controlling how aggressively anomalies escalate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    Low,
    #[default]
    Medium,
    High,
}

impl Strictness {
    /// Severity index shift applied by the escalation pass
    pub fn severity_shift(&self) -> i8 {
        match self {
            Strictness::Low => -1,
            Strictness::Medium => 0,
            Strictness::High => 1,
        }
    }
}

impl FromStr for Strictness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Strictness::Low),
            "medium" => Ok(Strictness::Medium),
            "high" => Ok(Strictness::High),
            other => Err(format!(
                "invalid strictness '{}', expected one of low|medium|high",
                other
            )),
        }
    }
}

/// Four-tier summary label derived from the final score and flag severities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// A gap between two adjacent work-experience claims on the timeline
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimelineGap {
    /// Claim that ends before the gap
    pub earlier_claim_id: String,
    /// Claim that starts after the gap
    pub later_claim_id: String,
    pub gap_months: u32,
}

/// Two work-experience claims whose periods intersect in time
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimelineOverlap {
    pub claim_id_a: String,
    pub claim_id_b: String,
}

/// Month-accurate timeline facts for the work-experience claims of one run
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TimelineAnalysis {
    pub gaps: Vec<TimelineGap>,
    pub overlaps: Vec<TimelineOverlap>,
    /// Claims excluded because they carry no usable start date
    pub unplaced_claims: Vec<String>,
}

/// The terminal aggregate of one analysis run.
///
/// All three scores are clamped into [0, 100] before rounding to one decimal
/// place; `final_score = credibility * 0.6 + consistency * 0.4`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    pub credibility_score: f64,
    pub consistency_score: f64,
    pub final_score: f64,
    pub risk_assessment: RiskLevel,
    pub seniority_level: SeniorityLevel,
    pub strictness: Strictness,
    pub total_claims: usize,
    pub verified_claims: usize,
    pub unverified_claims: usize,
    pub red_flags: Vec<RedFlag>,
    pub validations: Vec<Validation>,
    pub timeline: TimelineAnalysis,
    pub recommendation: String,
}
