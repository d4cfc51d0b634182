use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

/// Number of hex characters kept from the SHA-256 digest for claim IDs
const CLAIM_ID_LEN: usize = 16;

/// A calendar position at year-month granularity.
///
/// Résumé time spans never carry a meaningful day component, so interval
/// arithmetic works on whole months. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub struct YearMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl YearMonth {
    /// Sentinel used for open-ended ("ongoing") periods in interval math
    pub const FAR_FUTURE: YearMonth = YearMonth {
        year: 9999,
        month: 12,
    };

    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Calendar-exact month count from `self` to `later`, clamped at zero.
    ///
    /// `(later.year - year) * 12 + (later.month - month)`; never day-count
    /// based, so unequal month lengths and leap years cannot perturb it.
    pub fn months_until(&self, later: &YearMonth) -> u32 {
        let raw = (later.year as i64 - self.year as i64) * 12
            + (later.month as i64 - self.month as i64);
        raw.max(0) as u32
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    /// Parse "YYYY-MM". Anything else is rejected; callers skip the claim
    /// rather than fail the run.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("not a year-month: '{}'", s))?;
        let year: i32 = y.parse().map_err(|_| format!("bad year in '{}'", s))?;
        let month: u32 = m.parse().map_err(|_| format!("bad month in '{}'", s))?;
        YearMonth::new(year, month).ok_or_else(|| format!("month out of range in '{}'", s))
    }
}

/// An employment or project time span. A missing end means "ongoing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimePeriod {
    pub start: Option<YearMonth>,
    pub end: Option<YearMonth>,
}

impl TimePeriod {
    /// End bound for interval math; open periods extend to the far future.
    pub fn end_bound(&self) -> YearMonth {
        self.end.unwrap_or(YearMonth::FAR_FUTURE)
    }

    /// Two periods overlap iff `s1 <= e2 && s2 <= e1`.
    /// Periods without a start date cannot be placed on the timeline.
    pub fn overlaps(&self, other: &TimePeriod) -> bool {
        match (self.start, other.start) {
            (Some(s1), Some(s2)) => s1 <= other.end_bound() && s2 <= self.end_bound(),
            _ => false,
        }
    }
}

/// Category of an extracted claim; determines which downstream checks apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClaimCategory {
    WorkExperience,
    Project,
    Skill,
    Education,
    Metric,
    Other,
}

/// A single factual assertion extracted from résumé text.
///
/// Created once by claim extraction and never mutated; every downstream
/// stage reads it by reference.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claim {
    /// Stable identifier derived from the claim text, so the same textual
    /// claim maps to the same ID across pipeline runs
    pub claim_id: String,
    pub category: ClaimCategory,
    pub claim_text: String,
    pub job_title: Option<String>,
    #[serde(default)]
    pub technologies_mentioned: Vec<String>,
    pub time_period: Option<TimePeriod>,
}

impl Claim {
    /// Deterministic content-hash identifier for a claim text
    pub fn id_for_text(text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.trim().as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        digest[..CLAIM_ID_LEN].to_string()
    }
}
