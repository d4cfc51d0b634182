//! Metric plausibility check
//!
//! For each metric claim stating a percentage change over a stated duration,
//! the claimed change is compared against a duration-bucketed ceiling table.
//! Revenue-related claims use a separate, stricter table. Severity scales
//! with the ratio of claimed value to ceiling.

use regex::Regex;

use crate::model::{Claim, ClaimCategory, FlagCategory, RedFlag, ScoringConfig, Severity};

/// Terms that route a claim to the stricter revenue ceiling table
const REVENUE_TERMS: &[&str] = &[
    "revenue", "sales", "arr", "mrr", "profit", "bookings", "gmv",
];

#[derive(Debug, PartialEq)]
struct ClaimedMetric {
    percent: f64,
    duration_months: u32,
}

/// Pull "N% ... in M months" style statements out of a claim text.
/// Claims missing either component are not judgeable and are skipped.
fn parse_metric(text: &str) -> Option<ClaimedMetric> {
    let percent_re =
        Regex::new(r"(\d+(?:\.\d+)?)\s*(?:%|percent)").expect("static percent pattern");
    let duration_re = Regex::new(
        r"(?i)\b(?:in|within|over|during)\s+(?:just\s+|only\s+|the\s+(?:first|last)\s+)?(\d+(?:\.\d+)?|a|an|one)\s*(month|week|year)s?\b",
    )
    .expect("static duration pattern");

    let percent = percent_re
        .captures_iter(text)
        .filter_map(|cap| cap[1].parse::<f64>().ok())
        .fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.max(v)))
        })?;

    let cap = duration_re.captures(text)?;
    let quantity: f64 = match cap[1].to_lowercase().as_str() {
        "a" | "an" | "one" => 1.0,
        n => n.parse().ok()?,
    };
    let duration_months = match cap[2].to_lowercase().as_str() {
        "year" => (quantity * 12.0).round() as u32,
        "week" => ((quantity / 4.0).ceil() as u32).max(1),
        _ => (quantity.round() as u32).max(1),
    };

    Some(ClaimedMetric {
        percent,
        duration_months,
    })
}

fn is_revenue_related(text: &str) -> bool {
    let lower = text.to_lowercase();
    REVENUE_TERMS.iter().any(|t| lower.contains(t))
}

pub fn check(claims: &[Claim], config: &ScoringConfig) -> Vec<RedFlag> {
    let mut flags = Vec::new();

    for claim in claims {
        if claim.category != ClaimCategory::Metric {
            continue;
        }
        let metric = match parse_metric(&claim.claim_text) {
            Some(m) => m,
            None => continue,
        };

        let (table, table_name) = if is_revenue_related(&claim.claim_text) {
            (&config.revenue_ceilings, "revenue")
        } else {
            (&config.metric_ceilings, "general")
        };
        let ceiling = table.ceiling_for(metric.duration_months);
        if ceiling <= 0.0 || metric.percent <= ceiling {
            continue;
        }

        let ratio = metric.percent / ceiling;
        let severity = if ratio >= 4.0 {
            Severity::Critical
        } else if ratio >= 2.0 {
            Severity::High
        } else {
            Severity::Medium
        };

        tracing::debug!(
            claim_id = %claim.claim_id,
            percent = metric.percent,
            months = metric.duration_months,
            ceiling = ceiling,
            table = table_name,
            "Metric exceeds plausibility ceiling"
        );

        flags.push(RedFlag::new(
            FlagCategory::Metric,
            severity,
            format!(
                "Claimed {:.0}% change in {} month(s) exceeds the plausible ceiling of {:.0}%",
                metric.percent, metric.duration_months, ceiling
            ),
            "Walk me through how this number was measured: baseline, methodology, and who verified it?",
            vec![claim.claim_id.clone()],
        ));
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric_claim(text: &str) -> Claim {
        Claim {
            claim_id: Claim::id_for_text(text),
            category: ClaimCategory::Metric,
            claim_text: text.to_string(),
            job_title: None,
            technologies_mentioned: vec![],
            time_period: None,
        }
    }

    #[test]
    fn test_parse_percent_and_months() {
        let m = parse_metric("Increased throughput by 40% in 3 months").unwrap();
        assert_eq!(
            m,
            ClaimedMetric {
                percent: 40.0,
                duration_months: 3
            }
        );
    }

    #[test]
    fn test_parse_year_and_word_quantities() {
        let m = parse_metric("Grew the user base 200% over a year").unwrap();
        assert_eq!(m.duration_months, 12);
        let m = parse_metric("Cut costs 15% within 6 weeks").unwrap();
        assert_eq!(m.duration_months, 2);
    }

    #[test]
    fn test_claim_without_duration_is_skipped() {
        assert!(parse_metric("Improved performance by 30%").is_none());
        let flags = check(
            &[metric_claim("Improved performance by 30%")],
            &ScoringConfig::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn test_plausible_metric_passes() {
        let flags = check(
            &[metric_claim("Reduced build times by 40% in 3 months")],
            &ScoringConfig::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn test_wild_metric_is_critical() {
        // 1000% in one month vs a 50% ceiling: ratio 20
        let flags = check(
            &[metric_claim("Improved conversion by 1000% in 1 month")],
            &ScoringConfig::default(),
        );
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].severity, Severity::Critical);
    }

    #[test]
    fn test_revenue_claims_use_stricter_table() {
        // 100% in 3 months passes the general table (150) but not revenue (60)
        let text = "Increased revenue by 100% in 3 months";
        let flags = check(&[metric_claim(text)], &ScoringConfig::default());
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].severity, Severity::Medium);

        let general = "Increased test coverage by 100% in 3 months";
        let flags = check(&[metric_claim(general)], &ScoringConfig::default());
        assert!(flags.is_empty());
    }

    #[test]
    fn test_non_metric_categories_are_ignored() {
        let mut c = metric_claim("Improved conversion by 1000% in 1 month");
        c.category = ClaimCategory::WorkExperience;
        assert!(check(&[c], &ScoringConfig::default()).is_empty());
    }
}
