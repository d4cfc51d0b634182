//! Buzzword density check
//!
//! Counts total occurrences of lexicon terms across a claim's text (a word
//! repeated three times counts three times) and flags the claim when the
//! occurrence count divided by the word count exceeds the configured
//! threshold.

use crate::model::{Claim, FlagCategory, RedFlag, ScoringConfig, Severity};

/// Built-in lexicon of vague résumé filler. Deployments extend it through
/// `scoring.extra_buzzwords` in the config file.
const BUZZWORDS: &[&str] = &[
    "synergy",
    "synergize",
    "leverage",
    "leveraged",
    "leveraging",
    "innovative",
    "innovation",
    "disruptive",
    "disrupted",
    "passionate",
    "dynamic",
    "proactive",
    "rockstar",
    "ninja",
    "guru",
    "visionary",
    "cutting-edge",
    "world-class",
    "best-in-class",
    "game-changing",
    "seamless",
    "seamlessly",
    "impactful",
    "transformative",
    "revolutionary",
    "holistic",
    "paradigm",
    "evangelist",
    "thought-leader",
];

/// Strip surrounding punctuation and lowercase for lexicon comparison
fn normalize_token(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '-')
        .to_lowercase()
}

/// Total lexicon occurrences and word count for a text fragment
pub fn buzzword_stats(text: &str, extra: &[String]) -> (usize, usize) {
    let mut occurrences = 0;
    let mut words = 0;

    for token in text.split_whitespace() {
        let normalized = normalize_token(token);
        if normalized.is_empty() {
            continue;
        }
        words += 1;
        if BUZZWORDS.contains(&normalized.as_str())
            || extra.iter().any(|b| b.eq_ignore_ascii_case(&normalized))
        {
            occurrences += 1;
        }
    }

    (occurrences, words)
}

pub fn check(claims: &[Claim], config: &ScoringConfig) -> Vec<RedFlag> {
    let mut flags = Vec::new();

    for claim in claims {
        let (occurrences, words) = buzzword_stats(&claim.claim_text, &config.extra_buzzwords);
        if words == 0 || occurrences == 0 {
            continue;
        }

        let density = occurrences as f64 / words as f64;
        if density <= config.buzzword_density_threshold {
            continue;
        }

        let severity = if density >= config.buzzword_density_threshold * 2.0 {
            Severity::High
        } else {
            Severity::Medium
        };

        flags.push(RedFlag::new(
            FlagCategory::Buzzword,
            severity,
            format!(
                "Buzzword-heavy claim: {} filler terms in {} words ({:.0}% density)",
                occurrences,
                words,
                density * 100.0
            ),
            "Ask for a concrete example with specifics: what was built, measured how, and what changed?",
            vec![claim.claim_id.clone()],
        ));
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClaimCategory;

    fn claim(text: &str) -> Claim {
        Claim {
            claim_id: Claim::id_for_text(text),
            category: ClaimCategory::Other,
            claim_text: text.to_string(),
            job_title: None,
            technologies_mentioned: vec![],
            time_period: None,
        }
    }

    #[test]
    fn test_repeated_buzzword_counts_each_occurrence() {
        let (occurrences, words) = buzzword_stats("innovative innovative innovative solution", &[]);
        assert_eq!(occurrences, 3);
        assert_eq!(words, 4);
    }

    #[test]
    fn test_punctuation_and_case_do_not_hide_buzzwords() {
        let (occurrences, _) = buzzword_stats("Leveraged synergy, (seamlessly!)", &[]);
        assert_eq!(occurrences, 3);
    }

    #[test]
    fn test_dense_claim_is_flagged() {
        let claims = vec![claim("Passionate visionary rockstar leveraging synergy")];
        let flags = check(&claims, &ScoringConfig::default());
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].severity, Severity::High);
    }

    #[test]
    fn test_concrete_claim_is_not_flagged() {
        let claims = vec![claim(
            "Reduced p99 latency from 900ms to 120ms by introducing a read-through cache",
        )];
        let flags = check(&claims, &ScoringConfig::default());
        assert!(flags.is_empty());
    }

    #[test]
    fn test_extra_lexicon_entries_count() {
        let config = ScoringConfig {
            extra_buzzwords: vec!["webscale".to_string()],
            ..ScoringConfig::default()
        };
        let claims = vec![claim("webscale webscale everything")];
        let flags = check(&claims, &config);
        assert_eq!(flags.len(), 1);
    }
}
