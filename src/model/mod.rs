pub mod analysis;
pub mod claim;
pub mod config;
pub mod flag;
pub mod validation;

pub use analysis::{
    AnalysisResult, RiskLevel, SeniorityLevel, Strictness, TimelineAnalysis, TimelineGap,
    TimelineOverlap,
};
pub use claim::{Claim, ClaimCategory, TimePeriod, YearMonth};
pub use config::{Config, ScoringConfig};
pub use flag::{FlagCategory, RedFlag, Severity};
pub use validation::{Validation, VerificationStatus};
