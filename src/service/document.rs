//! Résumé text intake
//!
//! File parsing (PDF/DOCX) is an external collaborator; the service accepts
//! raw text. This module carries the small amount of structure awareness the
//! pipeline needs for itself: heading-based section segmentation, used to
//! produce distinct diagnostics when extraction yields no claims at all.

use std::fmt;

use regex::Regex;

/// Minimum word count below which a document cannot yield claims
const MIN_DOCUMENT_WORDS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl SectionKind {
    /// Sections that can carry verifiable claims. A résumé containing only
    /// the others (e.g. just an education block) is flagged as such instead
    /// of failing generically.
    pub fn is_substantive(&self) -> bool {
        matches!(
            self,
            SectionKind::Experience
                | SectionKind::Projects
                | SectionKind::Skills
                | SectionKind::Certifications
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heading alternations per section kind
const SECTION_HEADINGS: [(SectionKind, &str); 6] = [
    (SectionKind::Summary, "summary|objective|profile|about"),
    (
        SectionKind::Experience,
        "work experience|experience|employment|work history|career",
    ),
    (SectionKind::Education, "education|academic"),
    (
        SectionKind::Skills,
        "skills|technologies|competencies|tech stack",
    ),
    (SectionKind::Projects, "projects|portfolio|open source"),
    (
        SectionKind::Certifications,
        "certifications?|certificates|awards|achievements",
    ),
];

/// Section kinds whose headings appear in the text, in order of appearance
pub fn detect_sections(text: &str) -> Vec<SectionKind> {
    let mut found: Vec<(usize, SectionKind)> = Vec::new();

    for (kind, headings) in SECTION_HEADINGS {
        // A heading is a line that starts with the keyword, optionally after
        // markup noise, not a mention buried mid-sentence
        let pattern = format!(r"(?im)^[\s#*=\-]*(?:{})\b[^\n]{{0,40}}$", headings);
        let re = Regex::new(&pattern).expect("static heading pattern");
        if let Some(m) = re.find(text) {
            found.push((m.start(), kind));
        }
    }

    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, kind)| kind).collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Why a document produced no claims: a distinct, user-visible terminal
/// state, not a generic failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmptyDocumentDiagnosis {
    #[error(
        "resume too short ({words} words); upload a complete resume with work experience, projects or skills"
    )]
    TextTooShort { words: usize },

    #[error("could not recognize any resume structure; ensure the text has clear section headings")]
    UnparseableStructure,

    #[error(
        "only non-substantive sections found ({sections}); add work experience, projects or skills"
    )]
    OnlyNonSubstantiveSections { sections: String },

    #[error(
        "no analyzable claims found; ensure the resume lists specific achievements, not just responsibilities"
    )]
    NoSubstantiveClaims,
}

/// Diagnose why extraction came back empty for this text
pub fn diagnose_empty(text: &str) -> EmptyDocumentDiagnosis {
    let words = word_count(text);
    if words < MIN_DOCUMENT_WORDS {
        return EmptyDocumentDiagnosis::TextTooShort { words };
    }

    let sections = detect_sections(text);
    if sections.is_empty() {
        return EmptyDocumentDiagnosis::UnparseableStructure;
    }

    if !sections.iter().any(|s| s.is_substantive()) {
        let names: Vec<&str> = sections.iter().map(|s| s.as_str()).collect();
        return EmptyDocumentDiagnosis::OnlyNonSubstantiveSections {
            sections: names.join(", "),
        };
    }

    EmptyDocumentDiagnosis::NoSubstantiveClaims
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad_words(base: &str, total: usize) -> String {
        let mut text = base.to_string();
        while word_count(&text) < total {
            text.push_str(" additional filler content for the document body");
        }
        text
    }

    #[test]
    fn test_short_text_diagnosed_as_too_short() {
        let diag = diagnose_empty("Jane Doe, engineer.");
        assert!(matches!(
            diag,
            EmptyDocumentDiagnosis::TextTooShort { words: 3 }
        ));
    }

    #[test]
    fn test_headings_detected_in_order() {
        let text = "SUMMARY\n...\n\nWork Experience\n...\n\nSkills\n...";
        let sections = detect_sections(text);
        assert_eq!(
            sections,
            vec![
                SectionKind::Summary,
                SectionKind::Experience,
                SectionKind::Skills
            ]
        );
    }

    #[test]
    fn test_mid_sentence_mention_is_not_a_heading() {
        let text = "I gained experience working with teams across many projects every day.";
        assert!(detect_sections(text).is_empty());
    }

    #[test]
    fn test_unstructured_text_diagnosis() {
        let text = pad_words("Plain prose with no recognizable resume parts at all.", 120);
        assert_eq!(
            diagnose_empty(&text),
            EmptyDocumentDiagnosis::UnparseableStructure
        );
    }

    #[test]
    fn test_education_only_diagnosis() {
        let text = pad_words("Education\nBSc Computer Science, 2019\n", 120);
        match diagnose_empty(&text) {
            EmptyDocumentDiagnosis::OnlyNonSubstantiveSections { sections } => {
                assert!(sections.contains("education"));
            }
            other => panic!("unexpected diagnosis: {:?}", other),
        }
    }

    #[test]
    fn test_substantive_sections_fall_through() {
        let text = pad_words("Experience\nAcme Corp, engineer\n\nSkills\nRust, Go\n", 120);
        assert_eq!(
            diagnose_empty(&text),
            EmptyDocumentDiagnosis::NoSubstantiveClaims
        );
    }
}
