//! Seniority detection over raw résumé text
//!
//! A scored ballot, not a first-match heuristic: every level accumulates
//! contributions from (a) level markers immediately preceding a job-title
//! noun within a bounded lexical window and (b) a years-of-experience
//! signal, which weighs more heavily than marker hits. The level with the
//! highest combined score wins; ties fall back to `mid`. Summing across all
//! markers keeps the result deterministic regardless of iteration order.

use regex::Regex;

use crate::model::SeniorityLevel;

/// Job-title nouns a marker must precede to count as a hit.
/// A bare "senior" anywhere in prose is not a seniority signal.
const TITLE_NOUNS: &str = "engineer|developer|architect|programmer|scientist|analyst|consultant|administrator|designer|manager";

/// Marker alternations per level, matched immediately before a title noun
/// (up to two intermediate words, e.g. "Senior Software Engineer")
const LEVEL_MARKERS: [(SeniorityLevel, &str); 5] = [
    (SeniorityLevel::Intern, "intern|internship|trainee"),
    (SeniorityLevel::Junior, "junior|jr\\.?|entry[ -]level|graduate"),
    (SeniorityLevel::Mid, "mid[ -]level|midlevel|intermediate"),
    (SeniorityLevel::Senior, "senior|sr\\.?"),
    (SeniorityLevel::Lead, "lead|principal|staff|head"),
];

/// Weight of a single marker-before-title hit
const MARKER_WEIGHT: f64 = 1.0;

pub fn detect_seniority(text: &str) -> SeniorityLevel {
    let mut scores: Vec<(SeniorityLevel, f64)> = SeniorityLevel::ALL
        .iter()
        .map(|level| (*level, 0.0))
        .collect();

    for (level, markers) in LEVEL_MARKERS {
        let hits = count_marker_hits(text, markers, level == SeniorityLevel::Intern);
        if hits > 0 {
            bump(&mut scores, level, hits as f64 * MARKER_WEIGHT);
        }
    }

    if let Some(years) = extract_years_of_experience(text) {
        // Years outweigh title markers; the per-level weights are distinct so
        // a marker hit can still break toward the declared title
        match years {
            y if y >= 10 => {
                bump(&mut scores, SeniorityLevel::Lead, 2.5);
                bump(&mut scores, SeniorityLevel::Senior, 2.0);
            }
            y if y >= 5 => bump(&mut scores, SeniorityLevel::Senior, 3.0),
            y if y >= 2 => bump(&mut scores, SeniorityLevel::Mid, 3.0),
            y if y >= 1 => bump(&mut scores, SeniorityLevel::Junior, 3.0),
            _ => bump(&mut scores, SeniorityLevel::Intern, 3.0),
        }
    }

    let best = scores
        .iter()
        .cloned()
        .fold((SeniorityLevel::Mid, f64::NEG_INFINITY), |acc, (l, s)| {
            if s > acc.1 { (l, s) } else { acc }
        });

    let tied = scores.iter().filter(|(_, s)| *s == best.1).count();
    let detected = if best.1 <= 0.0 || tied > 1 {
        SeniorityLevel::Mid
    } else {
        best.0
    };

    tracing::debug!(
        scores = ?scores,
        detected = %detected,
        "Seniority ballot"
    );

    detected
}

fn bump(scores: &mut [(SeniorityLevel, f64)], level: SeniorityLevel, amount: f64) {
    if let Some(entry) = scores.iter_mut().find(|(l, _)| *l == level) {
        entry.1 += amount;
    }
}

/// Count marker occurrences in title position. For intern the suffix form
/// ("Software Engineering Intern") is also common and counts as well.
fn count_marker_hits(text: &str, markers: &str, allow_suffix: bool) -> usize {
    let prefix_pattern = format!(
        r"(?i)\b(?:{markers})\s+(?:[\w-]+\s+){{0,2}}(?:{TITLE_NOUNS})\b"
    );
    let prefix_re = Regex::new(&prefix_pattern).expect("static seniority pattern");
    let mut hits = prefix_re.find_iter(text).count();

    if allow_suffix {
        let suffix_pattern = format!(r"(?i)\b(?:{TITLE_NOUNS}|engineering)\s+(?:{markers})\b");
        let suffix_re = Regex::new(&suffix_pattern).expect("static seniority pattern");
        hits += suffix_re.find_iter(text).count();
    }

    hits
}

/// Extract the largest "N years experience" style signal, if any
fn extract_years_of_experience(text: &str) -> Option<u32> {
    let re = Regex::new(
        r"(?i)\b(\d{1,2})\s*\+?\s*years?(?:\s+of)?(?:\s+(?:professional|industry|hands-on))?\s+experience\b",
    )
    .expect("static years pattern");

    re.captures_iter(text)
        .filter_map(|cap| cap[1].parse::<u32>().ok())
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_senior_title_with_ten_years_beats_mid() {
        let text = "Senior Software Engineer with 10 years experience building distributed systems.";
        let detected = detect_seniority(text);
        assert!(
            detected == SeniorityLevel::Senior || detected == SeniorityLevel::Lead,
            "got {:?}",
            detected
        );
        assert_ne!(detected, SeniorityLevel::Mid);
    }

    #[test]
    fn test_bare_engineer_substring_does_not_score_senior() {
        let text = "Software Engineer who enjoys working with senior stakeholders.";
        // "senior stakeholders" is not a title; no years signal either
        assert_eq!(detect_seniority(text), SeniorityLevel::Mid);
    }

    #[test]
    fn test_junior_title_detected() {
        let text = "Junior Developer, 1 year of experience with Python.";
        assert_eq!(detect_seniority(text), SeniorityLevel::Junior);
    }

    #[test]
    fn test_intern_suffix_form_detected() {
        let text = "Software Engineering Intern at a fintech startup.";
        assert_eq!(detect_seniority(text), SeniorityLevel::Intern);
    }

    #[test]
    fn test_lead_title_with_long_tenure() {
        let text = "Principal Engineer and team lead, 12 years of industry experience.";
        assert_eq!(detect_seniority(text), SeniorityLevel::Lead);
    }

    #[test]
    fn test_years_signal_outweighs_single_marker() {
        // One junior title mention but 6 years of experience
        let text = "Started as a Junior Developer; now with 6 years of experience.";
        assert_eq!(detect_seniority(text), SeniorityLevel::Senior);
    }

    #[test]
    fn test_empty_text_defaults_to_mid() {
        assert_eq!(detect_seniority(""), SeniorityLevel::Mid);
    }

    #[test]
    fn test_years_extraction_takes_maximum() {
        let text = "2 years experience with Go, 8 years of experience overall.";
        assert_eq!(extract_years_of_experience(text), Some(8));
    }
}
