//! Report rendering from a finished analysis
//!
//! Pure presentation: every exporter reads `AnalysisResult` fields
//! read-only and serializes them into a shareable artifact. Nothing here
//! feeds back into scoring.

use std::fmt::Write as _;
use std::str::FromStr;

use chrono::Utc;

use crate::model::AnalysisResult;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Json,
    Csv,
    Checklist,
}

impl ReportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Html => "text/html; charset=utf-8",
            ReportFormat::Json => "application/json",
            ReportFormat::Csv => "text/csv",
            ReportFormat::Checklist => "text/plain; charset=utf-8",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "checklist" => Ok(ReportFormat::Checklist),
            other => Err(ReportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Render an analysis into the requested format
pub fn render(result: &AnalysisResult, format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Html => Ok(render_html(result)),
        ReportFormat::Json => serde_json::to_string_pretty(result)
            .map_err(|e| ReportError::Serialization(e.to_string())),
        ReportFormat::Csv => Ok(render_csv(result)),
        ReportFormat::Checklist => Ok(render_checklist(result)),
    }
}

fn render_html(result: &AnalysisResult) -> String {
    let generated = Utc::now().format("%B %d, %Y at %H:%M UTC");

    let mut flags_html = String::new();
    for flag in &result.red_flags {
        let _ = write!(
            flags_html,
            r#"<div class="red-flag"><strong>{:?}:</strong> {}<br><em>Probe:</em> {}</div>"#,
            flag.severity,
            escape_html(&flag.description),
            escape_html(&flag.interview_probe),
        );
    }
    if flags_html.is_empty() {
        flags_html.push_str("<p>No issues detected.</p>");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Resume Verification Report</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; background: #f5f5f5; }}
        .container {{ max-width: 1000px; margin: 0 auto; background: white; padding: 30px; border-radius: 10px; }}
        .score {{ font-size: 48px; font-weight: bold; }}
        .card {{ background: #f8f9fa; padding: 20px; margin: 15px 0; border-radius: 5px; }}
        .red-flag {{ background: #ffebee; border-left: 4px solid #f44336; padding: 15px; margin: 10px 0; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Resume Verification Report</h1>
        <p>Generated: {generated}</p>
        <div class="card">
            <h2>Overall Assessment</h2>
            <div class="score">{final_score:.1}/100</div>
            <p><strong>Risk Level:</strong> {risk:?}</p>
            <p><strong>Credibility:</strong> {credibility:.1}/100</p>
            <p><strong>Consistency:</strong> {consistency:.1}/100</p>
            <p><strong>Seniority Level:</strong> {seniority}</p>
        </div>
        <div class="card">
            <h2>Claims</h2>
            <p><strong>Total:</strong> {total}</p>
            <p><strong>Verified:</strong> {verified}</p>
            <p><strong>Unverified:</strong> {unverified}</p>
        </div>
        <div class="card">
            <h2>Red Flags ({flag_count})</h2>
            {flags_html}
        </div>
        <div class="card">
            <h2>Recommendation</h2>
            <p>{recommendation}</p>
        </div>
    </div>
</body>
</html>
"#,
        generated = generated,
        final_score = result.final_score,
        risk = result.risk_assessment,
        credibility = result.credibility_score,
        consistency = result.consistency_score,
        seniority = result.seniority_level,
        total = result.total_claims,
        verified = result.verified_claims,
        unverified = result.unverified_claims,
        flag_count = result.red_flags.len(),
        flags_html = flags_html,
        recommendation = escape_html(&result.recommendation),
    )
}

fn render_csv(result: &AnalysisResult) -> String {
    let mut csv = String::new();
    csv.push_str("Metric,Value\n");
    let _ = writeln!(csv, "Final Score,{:.1}", result.final_score);
    let _ = writeln!(csv, "Credibility Score,{:.1}", result.credibility_score);
    let _ = writeln!(csv, "Consistency Score,{:.1}", result.consistency_score);
    let _ = writeln!(csv, "Risk Assessment,{:?}", result.risk_assessment);
    let _ = writeln!(csv, "Total Claims,{}", result.total_claims);
    let _ = writeln!(csv, "Verified Claims,{}", result.verified_claims);
    let _ = writeln!(csv, "Unverified Claims,{}", result.unverified_claims);
    let _ = writeln!(csv, "Red Flags,{}", result.red_flags.len());
    csv.push('\n');
    csv.push_str("Red Flag Severity,Category,Description\n");
    for flag in &result.red_flags {
        let _ = writeln!(
            csv,
            "{:?},{:?},{}",
            flag.severity,
            flag.category,
            escape_csv(&flag.description)
        );
    }
    csv
}

fn render_checklist(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str("INTERVIEW VERIFICATION CHECKLIST\n");
    out.push_str("================================\n\n");
    let _ = writeln!(out, "Position level: {}", result.seniority_level);
    let _ = writeln!(out, "Risk level:     {:?}", result.risk_assessment);
    let _ = writeln!(out, "Final score:    {:.1}/100", result.final_score);
    let _ = writeln!(out, "Red flags:      {}", result.red_flags.len());
    out.push('\n');

    for (i, flag) in result.red_flags.iter().enumerate() {
        let _ = writeln!(out, "{}. [{:?}] {}", i + 1, flag.severity, flag.description);
        let _ = writeln!(out, "   Question: {}", flag.interview_probe);
        if flag.requires_proof {
            out.push_str("   [ ] Concrete proof provided\n");
        }
        out.push_str("   [ ] Verified   [ ] Needs follow-up   [ ] Unresolved\n\n");
    }

    let _ = writeln!(out, "Recommendation: {}", result.recommendation);
    out
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_csv(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
