//! Compiled lexicon: keyword tables lowercased and patterns compiled once.
//!
//! Every stage reads from a `Lexicon` built at startup from a validated
//! `PipelineConfig`. Matching is case-insensitive substring search for
//! keywords and `regex` for device/OS/version patterns and cue words.

use regex::Regex;

use crate::config::{ConfigError, PipelineConfig};
use crate::types::{Category, Urgency};

/// Sentence boundary: terminal punctuation followed by whitespace or end, or a line break.
const SENTENCE_BOUNDARY: &str = r"[.!?]+(?:\s+|$)|\n+";

/// Numbered-list marker (`1. ` or `2) `) at the start of a line or right
/// after a sentence terminator or colon. Group 1 is the step number.
const NUMBERED_STEP: &str = r"(?m)(?:^|[.!?:]\s+)[ \t]*(\d{1,2})[.)]\s+";

/// Weighted keywords for one category, lowercased.
#[derive(Debug, Clone)]
pub struct CategoryLexicon {
    pub category: Category,
    pub keywords: Vec<(String, f64)>,
}

impl CategoryLexicon {
    /// Number of configured keywords (coverage-ratio denominator).
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// A compiled pattern with the config field it came from.
#[derive(Debug, Clone)]
pub struct ExtractionPattern {
    pub regex: Regex,
    pub source: String,
}

impl ExtractionPattern {
    /// Capture group 1 when present, otherwise the whole match.
    pub fn capture(&self, text: &str) -> Option<String> {
        let caps = self.regex.captures(text)?;
        let m = caps.get(1).or_else(|| caps.get(0))?;
        let value = m.as_str().trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// One numbered-list marker found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepMarker {
    pub number: u32,
    /// Byte offset of the step number
    pub start: usize,
    /// Byte offset where the step text begins
    pub body_start: usize,
}

/// A feature theme with lowercased keywords.
#[derive(Debug, Clone)]
pub struct Theme {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Everything the stages match against, compiled from one config.
#[derive(Debug, Clone)]
pub struct Lexicon {
    categories: Vec<CategoryLexicon>,
    pub severity_tiers: Vec<(Urgency, Vec<String>)>,
    pub device_patterns: Vec<ExtractionPattern>,
    pub os_patterns: Vec<ExtractionPattern>,
    pub version_patterns: Vec<ExtractionPattern>,
    /// Whole-word alternation of repro cues; `None` when no cues are configured
    pub repro_cue: Option<Regex>,
    pub themes: Vec<Theme>,
    /// Alternation of feature request cues; `None` when no cues are configured
    pub request_cue: Option<Regex>,
    sentence_boundary: Regex,
    numbered_step: Regex,
}

impl Lexicon {
    /// Compile every table and pattern in `config`.
    ///
    /// Fails with `ConfigError::Pattern` naming the offending field when a
    /// regex does not compile.
    pub fn compile(config: &PipelineConfig) -> Result<Self, ConfigError> {
        let categories = Category::ALL
            .iter()
            .map(|&category| CategoryLexicon {
                category,
                keywords: config
                    .classification
                    .keywords
                    .for_category(category)
                    .iter()
                    .map(|(k, w)| (k.trim().to_lowercase(), *w))
                    .collect(),
            })
            .collect();

        let severity_tiers = config
            .bug
            .severity_keywords
            .tiers()
            .into_iter()
            .map(|(urgency, keywords)| (urgency, lowercase_all(keywords)))
            .collect();

        let repro_cue = compile_cues(&config.bug.repro_cues, "bug.repro_cues")?;
        let request_cue = compile_cues(&config.feature.request_cues, "feature.request_cues")?;

        let themes = config
            .feature
            .themes
            .iter()
            .map(|t| Theme {
                label: t.label.clone(),
                keywords: lowercase_all(&t.keywords),
            })
            .collect();

        Ok(Self {
            categories,
            severity_tiers,
            device_patterns: compile_list(&config.bug.device_patterns, "bug.device_patterns")?,
            os_patterns: compile_list(&config.bug.os_patterns, "bug.os_patterns")?,
            version_patterns: compile_list(&config.bug.version_patterns, "bug.version_patterns")?,
            repro_cue,
            themes,
            request_cue,
            sentence_boundary: compile_pattern(SENTENCE_BOUNDARY, "sentence boundary")?,
            numbered_step: compile_pattern(NUMBERED_STEP, "numbered step marker")?,
        })
    }

    pub fn category(&self, category: Category) -> &CategoryLexicon {
        &self.categories[category.index()]
    }

    /// Split text into trimmed, non-empty sentences (terminators dropped).
    pub fn sentences<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.sentence_boundary
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Numbered-list markers, in text order.
    pub fn numbered_markers(&self, text: &str) -> Vec<StepMarker> {
        self.numbered_step
            .captures_iter(text)
            .filter_map(|caps| {
                let number = caps.get(1)?;
                Some(StepMarker {
                    number: number.as_str().parse().ok()?,
                    start: number.start(),
                    body_start: caps.get(0)?.end(),
                })
            })
            .collect()
    }
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn compile_cues(cues: &[String], field: &str) -> Result<Option<Regex>, ConfigError> {
    let cues = lowercase_all(cues);
    if cues.is_empty() {
        return Ok(None);
    }
    compile_pattern(&cue_alternation(&cues), field).map(Some)
}

/// Case-insensitive whole-word alternation, longest cues first so multi-word
/// cues win. Word boundaries apply only at word-character edges ("suggestion:").
fn cue_alternation(cues: &[String]) -> String {
    let mut sorted: Vec<&String> = cues.iter().collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let body = sorted
        .iter()
        .map(|c| {
            let lead = if c.starts_with(is_word_char) { r"\b" } else { "" };
            let tail = if c.ends_with(is_word_char) { r"\b" } else { "" };
            format!("{lead}{}{tail}", regex::escape(c))
        })
        .collect::<Vec<_>>()
        .join("|");
    format!("(?i)(?:{body})")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn compile_pattern(pattern: &str, field: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::Pattern {
        field: field.to_string(),
        source,
    })
}

fn compile_list(patterns: &[String], field: &str) -> Result<Vec<ExtractionPattern>, ConfigError> {
    patterns
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let name = format!("{field}[{i}]");
            Ok(ExtractionPattern {
                regex: compile_pattern(p, &name)?,
                source: name,
            })
        })
        .collect()
}
