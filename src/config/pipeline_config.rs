//! Pipeline Configuration - every classification and scoring tunable as TOML values
//!
//! Each struct implements `Default` with the shipped rule data (see `defaults`),
//! so a missing config file reproduces the documented evaluation figures.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::types::{Category, Urgency};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "FEEDBACK_TRIAGE_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "triage_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a triage run.
///
/// Load with `PipelineConfig::load()` which searches:
/// 1. `$FEEDBACK_TRIAGE_CONFIG`
/// 2. `./triage_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PipelineConfig {
    /// Category lexicon, confidence floor, tie-break, rating boost
    #[serde(default)]
    pub classification: ClassificationConfig,

    /// Bug severity tiers and device/OS/version patterns
    #[serde(default)]
    pub bug: BugExtractionConfig,

    /// Feature themes and demand-score priority thresholds
    #[serde(default)]
    pub feature: FeatureExtractionConfig,

    /// Ticket identifiers and title rendering
    #[serde(default)]
    pub tickets: TicketConfig,

    /// Quality critic limits
    #[serde(default)]
    pub quality: QualityConfig,

    /// Batch execution switches
    #[serde(default)]
    pub pipeline: ExecutionConfig,
}

impl PipelineConfig {
    /// Load configuration using the standard search order:
    /// 1. `$FEEDBACK_TRIAGE_CONFIG` environment variable
    /// 2. `./triage_config.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// A file that exists but cannot be parsed or validated is an error,
    /// never a silent fallback.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                let config = Self::load_from_file(&p)?;
                info!(path = %p.display(), "Loaded triage config from {CONFIG_ENV_VAR}");
                return Ok(config);
            }
            warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            let config = Self::load_from_file(&local)?;
            info!("Loaded triage config from ./{LOCAL_CONFIG_FILE}");
            return Ok(config);
        }

        info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Triage config saved");
        Ok(())
    }

    /// Validate every tunable for internal consistency.
    ///
    /// Rules:
    /// - Confidence thresholds lie in [0, 1], the critical one at or above the floor
    /// - Every category lexicon is non-empty with finite positive weights
    /// - Tie-break order is a permutation of the five categories
    /// - Feature priority thresholds are finite, non-negative, strictly decreasing
    /// - Ticket prefixes are non-blank and distinct
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();
        let c = &self.classification;

        Self::check_unit_interval(c.confidence_threshold, "classification.confidence_threshold", &mut errors);
        Self::check_unit_interval(
            self.quality.critical_confidence_threshold,
            "quality.critical_confidence_threshold",
            &mut errors,
        );
        if self.quality.critical_confidence_threshold < c.confidence_threshold {
            errors.push(format!(
                "quality.critical_confidence_threshold ({:.3}) must be >= classification.confidence_threshold ({:.3})",
                self.quality.critical_confidence_threshold, c.confidence_threshold
            ));
        }

        // Lexicon
        for category in Category::ALL {
            let table = c.keywords.for_category(category);
            let name = format!("classification.keywords.{}", CategoryKeywords::key(category));
            if table.is_empty() {
                errors.push(format!("{name}: keyword lexicon must not be empty"));
            }
            let mut normalized = HashSet::new();
            for (keyword, weight) in table {
                if keyword.trim().is_empty() {
                    errors.push(format!("{name}: blank keyword"));
                } else if !normalized.insert(keyword.trim().to_lowercase()) {
                    errors.push(format!(
                        "{name}: keyword '{keyword}' duplicates another entry (matching is case-insensitive)"
                    ));
                }
                if !weight.is_finite() || *weight <= 0.0 {
                    errors.push(format!("{name}.{keyword}: weight must be finite and > 0 (got {weight})"));
                }
            }
        }

        // Tie-break order must name each category exactly once
        let distinct: HashSet<Category> = c.tie_break_order.iter().copied().collect();
        if c.tie_break_order.len() != Category::ALL.len() || distinct.len() != Category::ALL.len() {
            errors.push(format!(
                "classification.tie_break_order must list each of the {} categories exactly once (got {:?})",
                Category::ALL.len(),
                c.tie_break_order
            ));
        }

        // Rating boost
        let rb = &c.rating_boost;
        for (value, name) in [
            (rb.low_rating_bug, "low_rating_bug"),
            (rb.low_rating_complaint, "low_rating_complaint"),
            (rb.high_rating_praise, "high_rating_praise"),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("classification.rating_boost.{name} must be finite and >= 0 (got {value})"));
            }
        }
        if !(1..=5).contains(&rb.low_rating_max) || !(1..=5).contains(&rb.high_rating_min) {
            errors.push("classification.rating_boost rating bounds must lie in 1-5".to_string());
        }
        if rb.low_rating_max >= rb.high_rating_min {
            errors.push(format!(
                "classification.rating_boost.low_rating_max ({}) must be < high_rating_min ({})",
                rb.low_rating_max, rb.high_rating_min
            ));
        }

        // Bug extraction
        let sev = &self.bug.severity_keywords;
        if sev.tiers().iter().all(|(_, keywords)| keywords.is_empty()) {
            errors.push("bug.severity_keywords: at least one tier must list keywords".to_string());
        }
        for (urgency, keywords) in sev.tiers() {
            if keywords.iter().any(|k| k.trim().is_empty()) {
                errors.push(format!("bug.severity_keywords.{}: blank keyword", urgency.to_string().to_lowercase()));
            }
        }
        for (list, name) in [
            (&self.bug.device_patterns, "bug.device_patterns"),
            (&self.bug.os_patterns, "bug.os_patterns"),
            (&self.bug.version_patterns, "bug.version_patterns"),
            (&self.bug.repro_cues, "bug.repro_cues"),
        ] {
            if list.iter().any(|p| p.trim().is_empty()) {
                errors.push(format!("{name}: blank entry"));
            }
        }

        // Feature extraction
        let f = &self.feature;
        if f.themes.is_empty() {
            errors.push("feature.themes must not be empty".to_string());
        }
        let mut labels = HashSet::new();
        for theme in &f.themes {
            if theme.label.trim().is_empty() {
                errors.push("feature.themes: blank theme label".to_string());
            }
            if !labels.insert(theme.label.to_lowercase()) {
                errors.push(format!("feature.themes: duplicate theme '{}'", theme.label));
            }
            if theme.keywords.is_empty() || theme.keywords.iter().any(|k| k.trim().is_empty()) {
                errors.push(format!("feature.themes.{}: keywords must be non-empty and non-blank", theme.label));
            }
        }
        if f.priority_thresholds.is_empty() {
            errors.push("feature.priority_thresholds must not be empty".to_string());
        }
        for pt in &f.priority_thresholds {
            if !pt.threshold.is_finite() || pt.threshold < 0.0 {
                errors.push(format!(
                    "feature.priority_thresholds: threshold for {} must be finite and >= 0 (got {})",
                    pt.label, pt.threshold
                ));
            }
        }
        for pair in f.priority_thresholds.windows(2) {
            if pair[1].threshold >= pair[0].threshold {
                errors.push(format!(
                    "feature.priority_thresholds must be strictly decreasing ({} at {} follows {} at {})",
                    pair[1].label, pair[1].threshold, pair[0].label, pair[0].threshold
                ));
            }
        }
        if !f.density_scale.is_finite() || f.density_scale <= 0.0 {
            errors.push(format!("feature.density_scale must be finite and > 0 (got {})", f.density_scale));
        }
        if !f.engaged_rating_multiplier.is_finite() || f.engaged_rating_multiplier <= 0.0 {
            errors.push(format!(
                "feature.engaged_rating_multiplier must be finite and > 0 (got {})",
                f.engaged_rating_multiplier
            ));
        }
        if !(1..=5).contains(&f.engaged_rating_min) {
            errors.push(format!("feature.engaged_rating_min must lie in 1-5 (got {})", f.engaged_rating_min));
        }

        // Tickets
        let mut prefixes = HashSet::new();
        for category in Category::ALL {
            let prefix = self.tickets.prefixes.for_category(category);
            if prefix.trim().is_empty() || prefix.chars().any(char::is_whitespace) {
                errors.push(format!(
                    "tickets.prefixes.{}: prefix must be non-blank without whitespace",
                    CategoryKeywords::key(category)
                ));
            }
            if !prefixes.insert(prefix) {
                errors.push(format!("tickets.prefixes: duplicate prefix '{prefix}'"));
            }
        }
        if self.tickets.max_excerpt_chars < 4 {
            errors.push("tickets.max_excerpt_chars must be >= 4".to_string());
        }

        // Quality
        if self.quality.max_title_length == 0 {
            errors.push("quality.max_title_length must be > 0".to_string());
        }
        if self.quality.min_title_length > self.quality.max_title_length {
            errors.push(format!(
                "quality.min_title_length ({}) must be <= max_title_length ({})",
                self.quality.min_title_length, self.quality.max_title_length
            ));
        }

        // Value-range sanity
        let (range_errors, range_warnings) = super::validation::validate_value_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_unit_interval(value: f64, name: &str, errors: &mut Vec<String>) {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            errors.push(format!("{name} must be a finite value in [0, 1] (got {value})"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Configuration defects. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {1}", .0.display())]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),

    #[error("Invalid pattern in {field}: {source}")]
    Pattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

// ============================================================================
// Classification
// ============================================================================

/// Keyword scoring, confidence floor, and rating boost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationConfig {
    /// Below this confidence a ticket is flagged for review (still classified).
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Category used when no keyword or rating signal fired at all.
    #[serde(default = "default_fallback_category")]
    pub fallback_category: Category,

    /// Winner among equal scores: earlier entries win.
    #[serde(default = "default_tie_break_order")]
    pub tie_break_order: Vec<Category>,

    #[serde(default)]
    pub rating_boost: RatingBoostConfig,

    #[serde(default)]
    pub keywords: CategoryKeywords,
}

fn default_confidence_threshold() -> f64 { 0.03 }
fn default_fallback_category() -> Category { Category::Complaint }
fn default_tie_break_order() -> Vec<Category> {
    vec![
        Category::Bug,
        Category::Complaint,
        Category::FeatureRequest,
        Category::Spam,
        Category::Praise,
    ]
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            fallback_category: default_fallback_category(),
            tie_break_order: default_tie_break_order(),
            rating_boost: RatingBoostConfig::default(),
            keywords: CategoryKeywords::default(),
        }
    }
}

/// Weight added to a category's raw keyword sum based on the star rating.
///
/// The boost joins the raw sum before coverage normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingBoostConfig {
    /// Ratings at or below this count as low.
    #[serde(default = "default_low_rating_max")]
    pub low_rating_max: u8,

    /// Ratings at or above this count as high.
    #[serde(default = "default_high_rating_min")]
    pub high_rating_min: u8,

    #[serde(default = "default_low_rating_bug")]
    pub low_rating_bug: f64,

    #[serde(default = "default_low_rating_complaint")]
    pub low_rating_complaint: f64,

    #[serde(default = "default_high_rating_praise")]
    pub high_rating_praise: f64,
}

fn default_low_rating_max() -> u8 { 2 }
fn default_high_rating_min() -> u8 { 4 }
fn default_low_rating_bug() -> f64 { 0.2 }
fn default_low_rating_complaint() -> f64 { 0.3 }
fn default_high_rating_praise() -> f64 { 0.5 }

impl Default for RatingBoostConfig {
    fn default() -> Self {
        Self {
            low_rating_max: default_low_rating_max(),
            high_rating_min: default_high_rating_min(),
            low_rating_bug: default_low_rating_bug(),
            low_rating_complaint: default_low_rating_complaint(),
            high_rating_praise: default_high_rating_praise(),
        }
    }
}

/// Weighted keyword table per category. Setting a table replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryKeywords {
    #[serde(default = "default_bug_keywords")]
    pub bug: BTreeMap<String, f64>,

    #[serde(default = "default_feature_request_keywords")]
    pub feature_request: BTreeMap<String, f64>,

    #[serde(default = "default_praise_keywords")]
    pub praise: BTreeMap<String, f64>,

    #[serde(default = "default_complaint_keywords")]
    pub complaint: BTreeMap<String, f64>,

    #[serde(default = "default_spam_keywords")]
    pub spam: BTreeMap<String, f64>,
}

fn weighted(table: &[(&str, f64)]) -> BTreeMap<String, f64> {
    table.iter().map(|(k, w)| ((*k).to_string(), *w)).collect()
}

fn default_bug_keywords() -> BTreeMap<String, f64> { weighted(defaults::BUG_KEYWORDS) }
fn default_feature_request_keywords() -> BTreeMap<String, f64> { weighted(defaults::FEATURE_REQUEST_KEYWORDS) }
fn default_praise_keywords() -> BTreeMap<String, f64> { weighted(defaults::PRAISE_KEYWORDS) }
fn default_complaint_keywords() -> BTreeMap<String, f64> { weighted(defaults::COMPLAINT_KEYWORDS) }
fn default_spam_keywords() -> BTreeMap<String, f64> { weighted(defaults::SPAM_KEYWORDS) }

impl Default for CategoryKeywords {
    fn default() -> Self {
        Self {
            bug: default_bug_keywords(),
            feature_request: default_feature_request_keywords(),
            praise: default_praise_keywords(),
            complaint: default_complaint_keywords(),
            spam: default_spam_keywords(),
        }
    }
}

impl CategoryKeywords {
    pub const fn for_category(&self, category: Category) -> &BTreeMap<String, f64> {
        match category {
            Category::Bug => &self.bug,
            Category::FeatureRequest => &self.feature_request,
            Category::Praise => &self.praise,
            Category::Complaint => &self.complaint,
            Category::Spam => &self.spam,
        }
    }

    /// TOML table name for a category.
    pub const fn key(category: Category) -> &'static str {
        match category {
            Category::Bug => "bug",
            Category::FeatureRequest => "feature_request",
            Category::Praise => "praise",
            Category::Complaint => "complaint",
            Category::Spam => "spam",
        }
    }
}

// ============================================================================
// Bug Extraction
// ============================================================================

/// Device/OS/version patterns, repro cues, and severity tiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BugExtractionConfig {
    #[serde(default)]
    pub severity_keywords: SeverityKeywords,

    /// Regexes tried in order; the first that matches names the device.
    #[serde(default = "default_device_patterns")]
    pub device_patterns: Vec<String>,

    #[serde(default = "default_os_patterns")]
    pub os_patterns: Vec<String>,

    #[serde(default = "default_version_patterns")]
    pub version_patterns: Vec<String>,

    /// Whole-word cues marking a reproduction sentence.
    #[serde(default = "default_repro_cues")]
    pub repro_cues: Vec<String>,
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

fn default_device_patterns() -> Vec<String> { strings(defaults::DEVICE_PATTERNS) }
fn default_os_patterns() -> Vec<String> { strings(defaults::OS_PATTERNS) }
fn default_version_patterns() -> Vec<String> { strings(defaults::VERSION_PATTERNS) }
fn default_repro_cues() -> Vec<String> { strings(defaults::REPRO_CUES) }

impl Default for BugExtractionConfig {
    fn default() -> Self {
        Self {
            severity_keywords: SeverityKeywords::default(),
            device_patterns: default_device_patterns(),
            os_patterns: default_os_patterns(),
            version_patterns: default_version_patterns(),
            repro_cues: default_repro_cues(),
        }
    }
}

/// Severity keyword tiers, checked Critical → High → Medium → Low.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeverityKeywords {
    #[serde(default = "default_severity_critical")]
    pub critical: Vec<String>,

    #[serde(default = "default_severity_high")]
    pub high: Vec<String>,

    #[serde(default = "default_severity_medium")]
    pub medium: Vec<String>,

    #[serde(default = "default_severity_low")]
    pub low: Vec<String>,
}

fn default_severity_critical() -> Vec<String> { strings(defaults::SEVERITY_CRITICAL) }
fn default_severity_high() -> Vec<String> { strings(defaults::SEVERITY_HIGH) }
fn default_severity_medium() -> Vec<String> { strings(defaults::SEVERITY_MEDIUM) }
fn default_severity_low() -> Vec<String> { strings(defaults::SEVERITY_LOW) }

impl Default for SeverityKeywords {
    fn default() -> Self {
        Self {
            critical: default_severity_critical(),
            high: default_severity_high(),
            medium: default_severity_medium(),
            low: default_severity_low(),
        }
    }
}

impl SeverityKeywords {
    /// Tiers in precedence order.
    pub fn tiers(&self) -> [(Urgency, &[String]); 4] {
        [
            (Urgency::Critical, self.critical.as_slice()),
            (Urgency::High, self.high.as_slice()),
            (Urgency::Medium, self.medium.as_slice()),
            (Urgency::Low, self.low.as_slice()),
        ]
    }
}

// ============================================================================
// Feature Extraction
// ============================================================================

/// Theme lexicon and demand-score scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureExtractionConfig {
    /// Themes in declaration order (earlier wins ties).
    #[serde(default = "default_themes")]
    pub themes: Vec<ThemeConfig>,

    /// Highest threshold first; below all of them yields Low.
    #[serde(default = "default_priority_thresholds")]
    pub priority_thresholds: Vec<PriorityThreshold>,

    /// Demand score = hits * density_scale / word_count.
    #[serde(default = "default_density_scale")]
    pub density_scale: f64,

    /// Ratings at or above this mark an engaged user.
    #[serde(default = "default_engaged_rating_min")]
    pub engaged_rating_min: u8,

    /// Demand score multiplier for engaged users.
    #[serde(default = "default_engaged_rating_multiplier")]
    pub engaged_rating_multiplier: f64,

    /// Phrases introducing the request itself (for the summary).
    #[serde(default = "default_request_cues")]
    pub request_cues: Vec<String>,
}

/// One feature theme cluster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeConfig {
    pub label: String,
    pub keywords: Vec<String>,
}

/// A (threshold, label) pair for demand-score priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriorityThreshold {
    pub threshold: f64,
    pub label: Urgency,
}

fn default_themes() -> Vec<ThemeConfig> {
    defaults::FEATURE_THEMES
        .iter()
        .map(|(label, keywords)| ThemeConfig {
            label: (*label).to_string(),
            keywords: strings(keywords),
        })
        .collect()
}

fn default_priority_thresholds() -> Vec<PriorityThreshold> {
    vec![
        PriorityThreshold { threshold: 2.0, label: Urgency::Critical },
        PriorityThreshold { threshold: 1.0, label: Urgency::High },
        PriorityThreshold { threshold: 0.5, label: Urgency::Medium },
    ]
}

fn default_density_scale() -> f64 { 10.0 }
fn default_engaged_rating_min() -> u8 { 4 }
fn default_engaged_rating_multiplier() -> f64 { 1.2 }
fn default_request_cues() -> Vec<String> { strings(defaults::REQUEST_CUES) }

impl Default for FeatureExtractionConfig {
    fn default() -> Self {
        Self {
            themes: default_themes(),
            priority_thresholds: default_priority_thresholds(),
            density_scale: default_density_scale(),
            engaged_rating_min: default_engaged_rating_min(),
            engaged_rating_multiplier: default_engaged_rating_multiplier(),
            request_cues: default_request_cues(),
        }
    }
}

// ============================================================================
// Tickets
// ============================================================================

/// Identifier prefixes and title rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketConfig {
    #[serde(default)]
    pub prefixes: TicketPrefixes,

    /// Longest title excerpt, in characters, before the urgency tag.
    #[serde(default = "default_max_excerpt_chars")]
    pub max_excerpt_chars: usize,

    #[serde(default)]
    pub default_urgency: DefaultUrgency,
}

fn default_max_excerpt_chars() -> usize { 80 }

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            prefixes: TicketPrefixes::default(),
            max_excerpt_chars: default_max_excerpt_chars(),
            default_urgency: DefaultUrgency::default(),
        }
    }
}

/// Per-category ticket identifier prefixes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketPrefixes {
    #[serde(default = "default_prefix_bug")]
    pub bug: String,
    #[serde(default = "default_prefix_feature_request")]
    pub feature_request: String,
    #[serde(default = "default_prefix_praise")]
    pub praise: String,
    #[serde(default = "default_prefix_complaint")]
    pub complaint: String,
    #[serde(default = "default_prefix_spam")]
    pub spam: String,
}

fn default_prefix_bug() -> String { "BUG".to_string() }
fn default_prefix_feature_request() -> String { "FEAT".to_string() }
fn default_prefix_praise() -> String { "PRS".to_string() }
fn default_prefix_complaint() -> String { "CMP".to_string() }
fn default_prefix_spam() -> String { "SPAM".to_string() }

impl Default for TicketPrefixes {
    fn default() -> Self {
        Self {
            bug: default_prefix_bug(),
            feature_request: default_prefix_feature_request(),
            praise: default_prefix_praise(),
            complaint: default_prefix_complaint(),
            spam: default_prefix_spam(),
        }
    }
}

impl TicketPrefixes {
    pub fn for_category(&self, category: Category) -> &str {
        match category {
            Category::Bug => &self.bug,
            Category::FeatureRequest => &self.feature_request,
            Category::Praise => &self.praise,
            Category::Complaint => &self.complaint,
            Category::Spam => &self.spam,
        }
    }
}

/// Urgency for categories that carry no extracted details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefaultUrgency {
    #[serde(default = "default_urgency_low")]
    pub praise: Urgency,
    #[serde(default = "default_urgency_high")]
    pub complaint: Urgency,
    #[serde(default = "default_urgency_low")]
    pub spam: Urgency,
}

fn default_urgency_low() -> Urgency { Urgency::Low }
fn default_urgency_high() -> Urgency { Urgency::High }

impl Default for DefaultUrgency {
    fn default() -> Self {
        Self {
            praise: Urgency::Low,
            complaint: Urgency::High,
            spam: Urgency::Low,
        }
    }
}

impl DefaultUrgency {
    /// Configured urgency for a detail-less category, `None` for Bug/FeatureRequest.
    pub const fn for_category(&self, category: Category) -> Option<Urgency> {
        match category {
            Category::Praise => Some(self.praise),
            Category::Complaint => Some(self.complaint),
            Category::Spam => Some(self.spam),
            Category::Bug | Category::FeatureRequest => None,
        }
    }
}

// ============================================================================
// Quality
// ============================================================================

/// Quality critic limits. The confidence floor is shared with the classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityConfig {
    #[serde(default = "default_min_title_length")]
    pub min_title_length: usize,

    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,

    /// Critical-severity bugs below this confidence are flagged.
    #[serde(default = "default_critical_confidence_threshold")]
    pub critical_confidence_threshold: f64,

    /// Urgencies a ticket of each category may carry without being flagged.
    #[serde(default)]
    pub expected_urgency: ExpectedUrgency,
}

fn default_min_title_length() -> usize { 10 }
fn default_max_title_length() -> usize { 120 }
fn default_critical_confidence_threshold() -> f64 { 0.04 }

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_title_length: default_min_title_length(),
            max_title_length: default_max_title_length(),
            critical_confidence_threshold: default_critical_confidence_threshold(),
            expected_urgency: ExpectedUrgency::default(),
        }
    }
}

/// Allowed urgencies per category. An empty list disables the check for
/// that category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpectedUrgency {
    #[serde(default = "default_expected_bug")]
    pub bug: Vec<Urgency>,
    #[serde(default = "default_expected_feature_request")]
    pub feature_request: Vec<Urgency>,
    #[serde(default = "default_expected_praise")]
    pub praise: Vec<Urgency>,
    #[serde(default = "default_expected_complaint")]
    pub complaint: Vec<Urgency>,
    #[serde(default = "default_expected_spam")]
    pub spam: Vec<Urgency>,
}

fn default_expected_bug() -> Vec<Urgency> { vec![Urgency::Critical, Urgency::High, Urgency::Medium] }
fn default_expected_feature_request() -> Vec<Urgency> {
    vec![Urgency::Critical, Urgency::High, Urgency::Medium, Urgency::Low]
}
fn default_expected_praise() -> Vec<Urgency> { vec![Urgency::Low] }
fn default_expected_complaint() -> Vec<Urgency> { vec![Urgency::High, Urgency::Medium] }
fn default_expected_spam() -> Vec<Urgency> { vec![Urgency::Low] }

impl Default for ExpectedUrgency {
    fn default() -> Self {
        Self {
            bug: default_expected_bug(),
            feature_request: default_expected_feature_request(),
            praise: default_expected_praise(),
            complaint: default_expected_complaint(),
            spam: default_expected_spam(),
        }
    }
}

impl ExpectedUrgency {
    pub fn for_category(&self, category: Category) -> &[Urgency] {
        match category {
            Category::Bug => &self.bug,
            Category::FeatureRequest => &self.feature_request,
            Category::Praise => &self.praise,
            Category::Complaint => &self.complaint,
            Category::Spam => &self.spam,
        }
    }

    /// True when `urgency` is allowed for `category` (or nothing is configured).
    pub fn allows(&self, category: Category, urgency: Urgency) -> bool {
        let allowed = self.for_category(category);
        allowed.is_empty() || allowed.contains(&urgency)
    }
}

// ============================================================================
// Execution
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Score records across the rayon pool. IDs are still assigned in input order.
    #[serde(default = "default_parallel_scoring")]
    pub parallel_scoring: bool,
}

fn default_parallel_scoring() -> bool { true }

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            parallel_scoring: default_parallel_scoring(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
