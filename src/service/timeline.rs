//! Month-accurate timeline analysis over work-experience claims
//!
//! Produces the gap and overlap facts consumed by the red-flag detector.
//! Claims without a usable start date cannot be placed on the timeline and
//! are skipped silently; they never fail the run.

use crate::model::{
    Claim, ClaimCategory, TimelineAnalysis, TimelineGap, TimelineOverlap, TimePeriod,
};

/// Analyze the work-experience claims of one run.
///
/// Gaps are computed between adjacent claims after sorting by start date and
/// reported when they exceed `gap_threshold_months`. Overlaps are checked
/// over all unordered pairs, since non-adjacent full-time claims can still
/// coincide temporally.
pub fn analyze_timeline(claims: &[Claim], gap_threshold_months: u32) -> TimelineAnalysis {
    let mut placed: Vec<(&Claim, TimePeriod)> = Vec::new();
    let mut unplaced: Vec<String> = Vec::new();

    for claim in claims {
        if claim.category != ClaimCategory::WorkExperience {
            continue;
        }
        match claim.time_period {
            Some(period) if period.start.is_some() => placed.push((claim, period)),
            _ => {
                tracing::debug!(
                    claim_id = %claim.claim_id,
                    "Work claim has no start date, excluded from timeline"
                );
                unplaced.push(claim.claim_id.clone());
            }
        }
    }

    placed.sort_by_key(|(_, period)| period.start);

    let mut gaps = Vec::new();
    for pair in placed.windows(2) {
        let (earlier, earlier_period) = &pair[0];
        let (later, later_period) = &pair[1];

        let earlier_end = earlier_period.end_bound();
        let later_start = match later_period.start {
            Some(s) => s,
            None => continue,
        };

        let gap_months = earlier_end.months_until(&later_start);
        if gap_months > gap_threshold_months {
            gaps.push(TimelineGap {
                earlier_claim_id: earlier.claim_id.clone(),
                later_claim_id: later.claim_id.clone(),
                gap_months,
            });
        }
    }

    let mut overlaps = Vec::new();
    for i in 0..placed.len() {
        for j in (i + 1)..placed.len() {
            let (a, period_a) = &placed[i];
            let (b, period_b) = &placed[j];
            if period_a.overlaps(period_b) {
                overlaps.push(TimelineOverlap {
                    claim_id_a: a.claim_id.clone(),
                    claim_id_b: b.claim_id.clone(),
                });
            }
        }
    }

    TimelineAnalysis {
        gaps,
        overlaps,
        unplaced_claims: unplaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClaimCategory, YearMonth};

    fn work_claim(id: &str, start: Option<&str>, end: Option<&str>) -> Claim {
        Claim {
            claim_id: id.to_string(),
            category: ClaimCategory::WorkExperience,
            claim_text: format!("worked somewhere ({})", id),
            job_title: Some("Engineer".to_string()),
            technologies_mentioned: vec![],
            time_period: Some(TimePeriod {
                start: start.map(|s| s.parse::<YearMonth>().unwrap()),
                end: end.map(|s| s.parse::<YearMonth>().unwrap()),
            }),
        }
    }

    #[test]
    fn test_gap_above_threshold_is_reported() {
        let claims = vec![
            work_claim("a", Some("2020-01"), Some("2020-06")),
            work_claim("b", Some("2020-11"), Some("2021-06")),
        ];
        let report = analyze_timeline(&claims, 3);
        assert_eq!(report.gaps.len(), 1);
        assert_eq!(report.gaps[0].gap_months, 5);
        assert_eq!(report.gaps[0].earlier_claim_id, "a");
        assert_eq!(report.gaps[0].later_claim_id, "b");
    }

    #[test]
    fn test_gap_at_threshold_is_ignored() {
        let claims = vec![
            work_claim("a", Some("2020-01"), Some("2020-06")),
            work_claim("b", Some("2020-09"), Some("2021-06")),
        ];
        let report = analyze_timeline(&claims, 3);
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn test_non_adjacent_overlap_detected() {
        // c overlaps a even though b sorts between them
        let claims = vec![
            work_claim("a", Some("2019-01"), None),
            work_claim("b", Some("2020-01"), Some("2020-06")),
            work_claim("c", Some("2021-01"), Some("2021-12")),
        ];
        let report = analyze_timeline(&claims, 3);
        let pairs: Vec<(&str, &str)> = report
            .overlaps
            .iter()
            .map(|o| (o.claim_id_a.as_str(), o.claim_id_b.as_str()))
            .collect();
        assert!(pairs.contains(&("a", "b")));
        assert!(pairs.contains(&("a", "c")));
        assert!(!pairs.contains(&("b", "c")));
    }

    #[test]
    fn test_claims_without_start_are_skipped_silently() {
        let mut no_start = work_claim("x", None, Some("2020-06"));
        no_start.time_period = Some(TimePeriod {
            start: None,
            end: "2020-06".parse().ok(),
        });
        let claims = vec![
            no_start,
            work_claim("a", Some("2020-01"), Some("2020-12")),
        ];
        let report = analyze_timeline(&claims, 3);
        assert!(report.gaps.is_empty());
        assert!(report.overlaps.is_empty());
        assert_eq!(report.unplaced_claims, vec!["x".to_string()]);
    }

    #[test]
    fn test_non_work_claims_are_excluded() {
        let mut skill = work_claim("s", Some("2020-01"), Some("2020-06"));
        skill.category = ClaimCategory::Skill;
        let claims = vec![skill, work_claim("a", Some("2021-01"), Some("2021-06"))];
        let report = analyze_timeline(&claims, 3);
        assert!(report.gaps.is_empty());
        assert!(report.overlaps.is_empty());
    }

    #[test]
    fn test_ongoing_role_produces_no_gap() {
        let claims = vec![
            work_claim("a", Some("2018-01"), None),
            work_claim("b", Some("2022-01"), Some("2022-12")),
        ];
        let report = analyze_timeline(&claims, 3);
        // The open-ended role extends past b's start; months_until clamps at 0
        assert!(report.gaps.is_empty());
        assert_eq!(report.overlaps.len(), 1);
    }
}
