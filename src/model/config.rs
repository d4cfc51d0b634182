use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::model::analysis::SeniorityLevel;
use crate::model::flag::Severity;

const ENV_CONFIG_PATH: &str = "RESUME_INTEL_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Severity-indexed credibility deductions
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeverityDeductions {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl Default for SeverityDeductions {
    fn default() -> Self {
        Self {
            low: 5.0,
            medium: 10.0,
            high: 20.0,
            critical: 35.0,
        }
    }
}

impl SeverityDeductions {
    pub fn for_severity(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
            Severity::Critical => self.critical,
        }
    }
}

/// Percentage-change ceilings bucketed by the claimed duration in months.
/// A claim is bucketed into the smallest bucket that covers its duration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CeilingTable {
    pub one_month: f64,
    pub three_months: f64,
    pub six_months: f64,
    pub twelve_months: f64,
}

impl CeilingTable {
    pub fn ceiling_for(&self, months: u32) -> f64 {
        match months {
            0..=1 => self.one_month,
            2..=3 => self.three_months,
            4..=6 => self.six_months,
            _ => self.twelve_months,
        }
    }
}

impl Default for CeilingTable {
    fn default() -> Self {
        // General improvement claims ("reduced latency by 40%")
        Self {
            one_month: 50.0,
            three_months: 150.0,
            six_months: 300.0,
            twelve_months: 500.0,
        }
    }
}

/// Stricter ceilings for revenue-related metrics
fn default_revenue_ceilings() -> CeilingTable {
    CeilingTable {
        one_month: 20.0,
        three_months: 60.0,
        six_months: 120.0,
        twelve_months: 250.0,
    }
}

/// Maximum believable count of expert-level skill claims per seniority tier
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExpertSkillCeilings {
    pub intern: usize,
    pub junior: usize,
    pub mid: usize,
    pub senior: usize,
    pub lead: usize,
}

impl Default for ExpertSkillCeilings {
    fn default() -> Self {
        Self {
            intern: 2,
            junior: 5,
            mid: 10,
            senior: 20,
            lead: 30,
        }
    }
}

impl ExpertSkillCeilings {
    pub fn for_level(&self, level: SeniorityLevel) -> usize {
        match level {
            SeniorityLevel::Intern => self.intern,
            SeniorityLevel::Junior => self.junior,
            SeniorityLevel::Mid => self.mid,
            SeniorityLevel::Senior => self.senior,
            SeniorityLevel::Lead => self.lead,
        }
    }
}

/// Tunable thresholds for the detector battery and the score aggregator.
///
/// The numeric defaults are representative, not contractual; deployments
/// override them through the YAML config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Timeline gaps at or below this many months are ignored
    pub gap_threshold_months: u32,
    /// Gaps beyond this many months escalate from medium to high
    pub gap_high_threshold_months: u32,
    /// Buzzword occurrences per word above which a claim is flagged
    pub buzzword_density_threshold: f64,
    /// Deployment-specific additions to the built-in buzzword lexicon
    pub extra_buzzwords: Vec<String>,
    pub deductions: SeverityDeductions,
    pub metric_ceilings: CeilingTable,
    #[serde(default = "default_revenue_ceilings")]
    pub revenue_ceilings: CeilingTable,
    pub expert_skill_ceilings: ExpertSkillCeilings,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            gap_threshold_months: 3,
            gap_high_threshold_months: 6,
            buzzword_density_threshold: 0.15,
            extra_buzzwords: Vec::new(),
            deductions: SeverityDeductions::default(),
            metric_ceilings: CeilingTable::default(),
            revenue_ceilings: default_revenue_ceilings(),
            expert_skill_ceilings: ExpertSkillCeilings::default(),
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let scoring = Self::load_config_file(&config_path)
            .map(|cf| cf.scoring)
            .unwrap_or_default();

        Self {
            scoring,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
