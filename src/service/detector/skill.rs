//! Skill checks: expert-claim inflation and skill cross-reference
//!
//! Inflation compares the number of expert-level skill claims against a
//! seniority-indexed ceiling. Cross-reference verifies that every claimed
//! skill is actually evidenced somewhere in a work or project claim.

use std::collections::HashSet;

use regex::Regex;

use crate::model::{
    Claim, ClaimCategory, FlagCategory, RedFlag, ScoringConfig, SeniorityLevel, Severity,
};

/// Qualifiers that mark a skill claim as expert-level
const EXPERT_PATTERN: &str = r"(?i)\b(?:expert|expertise|master(?:y|ed)?|guru|ninja)\b";

/// Skill claims whose text keeps at most this many words double as the skill
/// name itself when no technology list was extracted
const BARE_SKILL_MAX_WORDS: usize = 4;

/// Canonical form for lexical skill matching: lowercase, punctuation and
/// whitespace stripped, trailing "js" folded so "React", "React.js" and
/// "ReactJS" all compare equal.
pub fn canonicalize_skill(raw: &str) -> String {
    let mut canonical: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect();
    if canonical.len() > 4 && canonical.ends_with("js") {
        canonical.truncate(canonical.len() - 2);
    }
    canonical
}

fn has_expert_qualifier(text: &str) -> bool {
    Regex::new(EXPERT_PATTERN)
        .expect("static expert pattern")
        .is_match(text)
}

/// The skill names asserted by one skill claim
fn claimed_skills(claim: &Claim) -> Vec<String> {
    if !claim.technologies_mentioned.is_empty() {
        return claim.technologies_mentioned.clone();
    }
    if claim.claim_text.split_whitespace().count() <= BARE_SKILL_MAX_WORDS {
        return vec![claim.claim_text.clone()];
    }
    Vec::new()
}

/// Expert-skill inflation: too many "expert" skills for the seniority tier
pub fn check_expert_inflation(
    claims: &[Claim],
    seniority: SeniorityLevel,
    config: &ScoringConfig,
) -> Vec<RedFlag> {
    let expert_claims: Vec<&Claim> = claims
        .iter()
        .filter(|c| c.category == ClaimCategory::Skill && has_expert_qualifier(&c.claim_text))
        .collect();

    let ceiling = config.expert_skill_ceilings.for_level(seniority);
    if expert_claims.len() <= ceiling {
        return Vec::new();
    }

    let severity = if expert_claims.len() >= ceiling * 2 {
        Severity::High
    } else {
        Severity::Medium
    };

    vec![RedFlag::new(
        FlagCategory::Skill,
        severity,
        format!(
            "{} expert-level skill claims; at most {} are expected at {} level",
            expert_claims.len(),
            ceiling,
            seniority
        ),
        "Pick two of the claimed expert skills and probe for depth: internals, trade-offs, war stories.",
        expert_claims.iter().map(|c| c.claim_id.clone()).collect(),
    )]
}

/// Skill cross-reference: a skill claimed but never evidenced in any work or
/// project claim raises a flag.
pub fn check_cross_reference(claims: &[Claim]) -> Vec<RedFlag> {
    // Evidence corpus from work/project claims: canonical technology tokens,
    // canonical text tokens, and a flattened text blob for multi-word skills
    let mut evidence_tokens: HashSet<String> = HashSet::new();
    let mut flattened_texts: Vec<String> = Vec::new();

    for claim in claims {
        if !matches!(
            claim.category,
            ClaimCategory::WorkExperience | ClaimCategory::Project
        ) {
            continue;
        }
        for tech in &claim.technologies_mentioned {
            let canonical = canonicalize_skill(tech);
            if !canonical.is_empty() {
                evidence_tokens.insert(canonical);
            }
        }
        for token in claim.claim_text.split_whitespace() {
            let canonical = canonicalize_skill(token);
            if !canonical.is_empty() {
                evidence_tokens.insert(canonical);
            }
        }
        flattened_texts.push(canonicalize_skill(&claim.claim_text));
    }

    let mut flags = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for claim in claims.iter().filter(|c| c.category == ClaimCategory::Skill) {
        for skill in claimed_skills(claim) {
            let canonical = canonicalize_skill(&skill);
            if canonical.is_empty() || !seen.insert(canonical.clone()) {
                continue;
            }

            let token_hit = evidence_tokens.contains(&canonical);
            // Substring matching only for names long enough to not collide
            // with fragments of unrelated words
            let substring_hit = canonical.len() >= 5
                && flattened_texts.iter().any(|t| t.contains(&canonical));

            if token_hit || substring_hit {
                continue;
            }

            let severity = if has_expert_qualifier(&claim.claim_text) {
                Severity::Medium
            } else {
                Severity::Low
            };

            flags.push(RedFlag::new(
                FlagCategory::Skill,
                severity,
                format!(
                    "Skill '{}' is claimed but never appears in any work or project description",
                    skill.trim()
                ),
                format!(
                    "Where did you last use {} in practice, and what did you build with it?",
                    skill.trim()
                ),
                vec![claim.claim_id.clone()],
            ));
        }
    }

    flags
}
