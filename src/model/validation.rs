use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of checking one claim against the evidence available for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    Partial,
    Unverified,
    RedFlag,
}

/// The evidence-assessment result for exactly one claim.
///
/// Exactly one validation exists per claim in a completed run; they are
/// matched to claims by `claim_id`, never by position.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Validation {
    pub claim_id: String,
    /// Always within [0.0, 1.0]; bounding is applied as the last step of the
    /// validator's computation, and the aggregator re-clamps at its own
    /// boundary rather than trusting this field
    pub evidence_score: f64,
    pub verification_status: VerificationStatus,
    /// Whether external references were probed over HTTP
    pub links_checked: bool,
}
