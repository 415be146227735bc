//! Config validation: unknown-key detection with Levenshtein suggestions
//! and value-range sanity checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::PipelineConfig;
use crate::types::Category;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for PipelineConfig.
///
/// Maintained by hand to match the struct hierarchy in pipeline_config.rs.
/// Array-of-table entries (`[[feature.themes]]`) share one path without an index.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [classification]
        "classification",
        "classification.confidence_threshold",
        "classification.fallback_category",
        "classification.tie_break_order",
        "classification.rating_boost",
        "classification.rating_boost.low_rating_max",
        "classification.rating_boost.high_rating_min",
        "classification.rating_boost.low_rating_bug",
        "classification.rating_boost.low_rating_complaint",
        "classification.rating_boost.high_rating_praise",
        "classification.keywords",
        "classification.keywords.bug",
        "classification.keywords.feature_request",
        "classification.keywords.praise",
        "classification.keywords.complaint",
        "classification.keywords.spam",
        // [bug]
        "bug",
        "bug.severity_keywords",
        "bug.severity_keywords.critical",
        "bug.severity_keywords.high",
        "bug.severity_keywords.medium",
        "bug.severity_keywords.low",
        "bug.device_patterns",
        "bug.os_patterns",
        "bug.version_patterns",
        "bug.repro_cues",
        // [feature]
        "feature",
        "feature.themes",
        "feature.themes.label",
        "feature.themes.keywords",
        "feature.priority_thresholds",
        "feature.priority_thresholds.threshold",
        "feature.priority_thresholds.label",
        "feature.density_scale",
        "feature.engaged_rating_min",
        "feature.engaged_rating_multiplier",
        "feature.request_cues",
        // [tickets]
        "tickets",
        "tickets.prefixes",
        "tickets.prefixes.bug",
        "tickets.prefixes.feature_request",
        "tickets.prefixes.praise",
        "tickets.prefixes.complaint",
        "tickets.prefixes.spam",
        "tickets.max_excerpt_chars",
        "tickets.default_urgency",
        "tickets.default_urgency.praise",
        "tickets.default_urgency.complaint",
        "tickets.default_urgency.spam",
        // [quality]
        "quality",
        "quality.min_title_length",
        "quality.max_title_length",
        "quality.critical_confidence_threshold",
        "quality.expected_urgency",
        "quality.expected_urgency.bug",
        "quality.expected_urgency.feature_request",
        "quality.expected_urgency.praise",
        "quality.expected_urgency.complaint",
        "quality.expected_urgency.spam",
        // [pipeline]
        "pipeline",
        "pipeline.parallel_scoring",
    ];
    keys.iter().copied().collect()
}

/// Tables whose keys are user data (keyword → weight), not field names.
const OPEN_TABLES: &[&str] = &[
    "classification.keywords.bug",
    "classification.keywords.feature_request",
    "classification.keywords.praise",
    "classification.keywords.complaint",
    "classification.keywords.spam",
];

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`. Open tables contribute their own path only.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if OPEN_TABLES.contains(&path.as_str()) {
                continue;
            }
            match v {
                toml::Value::Table(_) => keys.extend(walk_toml_keys(v, &path)),
                toml::Value::Array(items) => {
                    for item in items.iter().filter(|i| i.is_table()) {
                        for nested in walk_toml_keys(item, &path) {
                            if !keys.contains(&nested) {
                                keys.push(nested);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the alphabetically first key so output is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        best = match best {
            Some((best_key, best_dist)) if best_dist < dist || (best_dist == dist && best_key < k) => {
                Some((best_key, best_dist))
            }
            _ => Some((k, dist)),
        };
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Never fails on unknown keys; it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            ValidationWarning {
                message: format!("Unknown config key '{key}'"),
                field: key,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Value Range Validation
// ============================================================================

/// Sanity-check values that parse fine but are almost certainly mistakes.
///
/// Returns (errors, warnings). Errors are values that make scoring
/// meaningless; warnings are suspicious but not fatal.
pub fn validate_value_ranges(config: &PipelineConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Coverage-normalized scores rarely exceed a few tenths
    let threshold = config.classification.confidence_threshold;
    if threshold > 0.5 {
        warnings.push(ValidationWarning {
            field: "classification.confidence_threshold".to_string(),
            message: format!(
                "confidence_threshold = {threshold:.3} is high; most tickets will be flagged"
            ),
            suggestion: None,
        });
    }

    for category in Category::ALL {
        let key = super::CategoryKeywords::key(category);
        for (keyword, weight) in config.classification.keywords.for_category(category) {
            if weight.is_finite() && *weight > 1.0 {
                warnings.push(ValidationWarning {
                    field: format!("classification.keywords.{key}"),
                    message: format!("weight for '{keyword}' = {weight} exceeds the usual 0-1 range"),
                    suggestion: None,
                });
            }
        }
    }

    // Excerpt must fit in the title window once tagged
    let tickets = &config.tickets;
    if tickets.max_excerpt_chars > config.quality.max_title_length {
        warnings.push(ValidationWarning {
            field: "tickets.max_excerpt_chars".to_string(),
            message: format!(
                "max_excerpt_chars = {} exceeds quality.max_title_length = {}; long excerpts will be flagged",
                tickets.max_excerpt_chars, config.quality.max_title_length
            ),
            suggestion: None,
        });
    }

    // Each priority label may appear once
    let mut seen = HashSet::new();
    for pt in &config.feature.priority_thresholds {
        if !seen.insert(pt.label) {
            errors.push(format!(
                "feature.priority_thresholds: label {} appears more than once",
                pt.label
            ));
        }
    }

    let multiplier = config.feature.engaged_rating_multiplier;
    if multiplier.is_finite() && multiplier < 1.0 {
        warnings.push(ValidationWarning {
            field: "feature.engaged_rating_multiplier".to_string(),
            message: format!(
                "engaged_rating_multiplier = {multiplier} lowers demand for highly rated requests"
            ),
            suggestion: None,
        });
    }

    // Urgencies the pipeline itself produces should pass the critic
    let expected = &config.quality.expected_urgency;
    for category in [Category::Praise, Category::Complaint, Category::Spam] {
        if let Some(urgency) = config.tickets.default_urgency.for_category(category) {
            if !expected.allows(category, urgency) {
                let key = super::CategoryKeywords::key(category);
                warnings.push(ValidationWarning {
                    field: format!("tickets.default_urgency.{key}"),
                    message: format!(
                        "default urgency {urgency} is not in quality.expected_urgency.{key}; every {category} ticket will be flagged"
                    ),
                    suggestion: None,
                });
            }
        }
    }
    for (urgency, keywords) in config.bug.severity_keywords.tiers() {
        if !keywords.is_empty() && !expected.allows(Category::Bug, urgency) {
            warnings.push(ValidationWarning {
                field: format!("bug.severity_keywords.{}", urgency.to_string().to_lowercase()),
                message: format!(
                    "{urgency} tier lists keywords but quality.expected_urgency.bug excludes {urgency}; those bugs will be flagged"
                ),
                suggestion: None,
            });
        }
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("spam", "spam"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("confidnce", "confidence"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [quality]
            min_title_length = 12
            [tickets.prefixes]
            bug = "DEF"
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"quality".to_string()));
        assert!(keys.contains(&"quality.min_title_length".to_string()));
        assert!(keys.contains(&"tickets.prefixes.bug".to_string()));
    }

    #[test]
    fn test_walk_toml_keys_array_of_tables() {
        let toml: toml::Value = r#"
            [[feature.themes]]
            label = "sync"
            keywords = ["sync"]

            [[feature.themes]]
            label = "widgets"
            keywords = ["widget"]
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert_eq!(keys.iter().filter(|k| *k == "feature.themes.label").count(), 1);
        assert!(keys.contains(&"feature.themes.keywords".to_string()));
    }

    #[test]
    fn test_keyword_tables_are_open() {
        let toml_str = r#"
[classification.keywords.bug]
"keeps crashing" = 0.9
"spinner" = 0.4
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Keyword entries are data, got: {:?}", warnings);
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[classification]
confidence_treshold = 0.05
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("confidence_treshold"));
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("classification.confidence_threshold")
        );
        assert!(warnings[0].to_string().contains("did you mean"));
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
[classification]
confidence_threshold = 0.05
tie_break_order = ["Bug", "Complaint", "FeatureRequest", "Spam", "Praise"]

[classification.rating_boost]
high_rating_praise = 0.6

[quality]
max_title_length = 100

[pipeline]
parallel_scoring = false
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {:?}", warnings);
    }

    #[test]
    fn test_unknown_section_produces_warning() {
        let toml_str = r#"
[clasification]
confidence_threshold = 0.05
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.iter().any(|w| w.field == "clasification"));
        assert!(warnings
            .iter()
            .any(|w| w.suggestion.as_deref() == Some("classification")));
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        let suggestion = suggest_correction("completely_unrelated_garbage_key_xyz", &known);
        assert!(suggestion.is_none());
    }

    #[test]
    fn test_value_ranges_defaults_clean() {
        let config = PipelineConfig::default();
        let (errors, warnings) = validate_value_ranges(&config);
        assert!(errors.is_empty(), "Defaults should produce no errors: {:?}", errors);
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {:?}", warnings);
    }

    #[test]
    fn test_high_threshold_warns() {
        let mut config = PipelineConfig::default();
        config.classification.confidence_threshold = 0.8;
        config.quality.critical_confidence_threshold = 0.9;
        let (errors, warnings) = validate_value_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "classification.confidence_threshold"));
    }

    #[test]
    fn test_heavy_weight_warns() {
        let mut config = PipelineConfig::default();
        config.classification.keywords.spam.insert("jackpot".to_string(), 3.0);
        let (_, warnings) = validate_value_ranges(&config);
        assert!(warnings.iter().any(|w| w.message.contains("jackpot")));
    }

    #[test]
    fn test_unreachable_urgency_settings_warn() {
        let mut config = PipelineConfig::default();
        config.tickets.default_urgency.spam = crate::types::Urgency::Critical;
        config.bug.severity_keywords.low = vec!["typo".to_string()];
        let (errors, warnings) = validate_value_ranges(&config);
        assert!(errors.is_empty());
        let fields: Vec<&str> = warnings.iter().map(|w| w.field.as_str()).collect();
        assert!(fields.contains(&"tickets.default_urgency.spam"), "{fields:?}");
        assert!(fields.contains(&"bug.severity_keywords.low"), "{fields:?}");
    }
}
