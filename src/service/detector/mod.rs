//! Red-flag detection battery
//!
//! Runs a fixed set of independent checks over the claim and timeline data
//! and returns the union of their findings, then applies one
//! strictness-driven severity-escalation pass. Checks do not observe each
//! other's output. A failing check is isolated and logged; the remaining
//! checks still run; anomaly detection is best-effort across independent
//! heuristics, so the only observable effect of one check failing is its
//! absence from the flag list.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::model::{
    Claim, FlagCategory, RedFlag, ScoringConfig, SeniorityLevel, Severity, Strictness,
    TimelineAnalysis,
};

pub mod buzzword;
pub mod metric;
pub mod skill;

pub struct RedFlagDetector {
    config: ScoringConfig,
}

impl RedFlagDetector {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Run the full battery and the escalation pass.
    ///
    /// Flags are never dropped once created; escalation rewrites each flag's
    /// severity at most once.
    pub fn detect(
        &self,
        claims: &[Claim],
        timeline: &TimelineAnalysis,
        seniority: SeniorityLevel,
        strictness: Strictness,
    ) -> Vec<RedFlag> {
        let mut flags = Vec::new();

        flags.extend(run_check("timeline_gaps", || {
            self.check_timeline_gaps(timeline)
        }));
        flags.extend(run_check("timeline_overlaps", || {
            self.check_timeline_overlaps(timeline)
        }));
        flags.extend(run_check("metric_plausibility", || {
            metric::check(claims, &self.config)
        }));
        flags.extend(run_check("buzzword_density", || {
            buzzword::check(claims, &self.config)
        }));
        flags.extend(run_check("expert_skill_inflation", || {
            skill::check_expert_inflation(claims, seniority, &self.config)
        }));
        flags.extend(run_check("skill_cross_reference", || {
            skill::check_cross_reference(claims)
        }));

        self.escalate(&mut flags, strictness);

        tracing::info!(
            flag_count = flags.len(),
            strictness = ?strictness,
            "Red flag detection complete"
        );

        flags
    }

    /// One flag per timeline gap beyond the threshold; severity scales with
    /// gap length.
    fn check_timeline_gaps(&self, timeline: &TimelineAnalysis) -> Vec<RedFlag> {
        timeline
            .gaps
            .iter()
            .map(|gap| {
                let severity = if gap.gap_months > self.config.gap_high_threshold_months {
                    Severity::High
                } else {
                    Severity::Medium
                };
                RedFlag::new(
                    FlagCategory::Timeline,
                    severity,
                    format!("Unexplained {}-month gap between consecutive roles", gap.gap_months),
                    "What were you doing between these two roles?",
                    vec![gap.earlier_claim_id.clone(), gap.later_claim_id.clone()],
                )
            })
            .collect()
    }

    /// Overlapping full-time claims are suspicious but not automatically
    /// disqualifying: medium by default.
    fn check_timeline_overlaps(&self, timeline: &TimelineAnalysis) -> Vec<RedFlag> {
        timeline
            .overlaps
            .iter()
            .map(|overlap| {
                RedFlag::new(
                    FlagCategory::Timeline,
                    Severity::Medium,
                    "Two roles overlap in time",
                    "Were these roles concurrent? Which one was full-time?",
                    vec![overlap.claim_id_a.clone(), overlap.claim_id_b.clone()],
                )
            })
            .collect()
    }

    /// Shift every flag's severity by the strictness multiplier on the
    /// ordered severity index, clamped at both ends. `high` strictness must
    /// be able to promote `high` findings to `critical`.
    fn escalate(&self, flags: &mut [RedFlag], strictness: Strictness) {
        let shift = strictness.severity_shift();
        if shift == 0 {
            return;
        }
        for flag in flags.iter_mut() {
            let before = flag.severity;
            flag.severity = flag.severity.shifted(shift);
            if flag.severity != before {
                tracing::debug!(
                    flag_id = %flag.flag_id,
                    from = ?before,
                    to = ?flag.severity,
                    "Escalated flag severity"
                );
            }
        }
    }
}

/// Isolate one check: a panic inside it is caught and logged, and the check
/// simply contributes no flags.
fn run_check<F>(name: &str, check: F) -> Vec<RedFlag>
where
    F: FnOnce() -> Vec<RedFlag>,
{
    match catch_unwind(AssertUnwindSafe(check)) {
        Ok(flags) => {
            tracing::debug!(check = name, flag_count = flags.len(), "Check completed");
            flags
        }
        Err(_) => {
            tracing::error!(check = name, "Red flag check failed; continuing without it");
            Vec::new()
        }
    }
}
