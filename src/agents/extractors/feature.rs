//! Feature Extractor - theme, demand score, priority, request summary
//!
//! Demand score is theme keyword density:
//! `hits * density_scale / word_count`, multiplied by
//! `engaged_rating_multiplier` when the rating is at least
//! `engaged_rating_min`. Priority is the first configured threshold the
//! score meets, walking from the highest down; below all of them is Low.

use super::DetailExtractor;
use crate::config::defaults::{GENERAL_THEME, MAX_REQUEST_SUMMARY_CHARS, MIN_REQUEST_SUMMARY_CHARS};
use crate::config::FeatureExtractionConfig;
use crate::lexicon::Lexicon;
use crate::rules::RuleSet;
use crate::types::{Category, ExtractedDetails, FeatureDetails, FeedbackRecord, Urgency};

/// Feature Extractor measures how strongly a request is expressed
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn extract_feature_details(&self, record: &FeedbackRecord, rules: &RuleSet) -> FeatureDetails {
        let cfg = &rules.config.feature;
        let lower = record.text.to_lowercase();

        let (theme, hits) = dominant_theme(&rules.lexicon, &lower);
        let demand_score = demand_score(cfg, hits, &lower, record.rating);

        FeatureDetails {
            theme,
            demand_score,
            priority: priority_for(cfg, demand_score),
            request_summary: request_summary(&rules.lexicon, &record.text),
        }
    }
}

impl DetailExtractor for FeatureExtractor {
    fn name(&self) -> &str {
        "Feature"
    }

    fn category(&self) -> Category {
        Category::FeatureRequest
    }

    fn extract(&self, record: &FeedbackRecord, rules: &RuleSet) -> ExtractedDetails {
        ExtractedDetails::Feature(self.extract_feature_details(record, rules))
    }
}

/// Theme with the most keyword occurrences; earlier themes win ties.
fn dominant_theme(lexicon: &Lexicon, lower: &str) -> (String, usize) {
    let mut best: Option<(&str, usize)> = None;
    for theme in &lexicon.themes {
        let hits: usize = theme
            .keywords
            .iter()
            .map(|k| lower.matches(k.as_str()).count())
            .sum();
        if hits > 0 && best.map_or(true, |(_, best_hits)| hits > best_hits) {
            best = Some((theme.label.as_str(), hits));
        }
    }
    match best {
        Some((label, hits)) => (label.to_string(), hits),
        None => (GENERAL_THEME.to_string(), 0),
    }
}

fn demand_score(cfg: &FeatureExtractionConfig, hits: usize, lower: &str, rating: Option<u8>) -> f64 {
    let words = lower.split_whitespace().count();
    if words == 0 || hits == 0 {
        return 0.0;
    }
    let density = hits as f64 * cfg.density_scale / words as f64;
    match rating {
        Some(r) if r >= cfg.engaged_rating_min => density * cfg.engaged_rating_multiplier,
        _ => density,
    }
}

/// First (threshold, label) pair the score meets or exceeds, else Low.
pub fn priority_for(cfg: &FeatureExtractionConfig, score: f64) -> Urgency {
    cfg.priority_thresholds
        .iter()
        .find(|pt| score >= pt.threshold)
        .map_or(Urgency::Low, |pt| pt.label)
}

/// Phrase after the first request cue, up to the end of its sentence.
fn request_summary(lexicon: &Lexicon, text: &str) -> Option<String> {
    let cue = lexicon.request_cue.as_ref()?.find(text)?;
    let rest = text[cue.end()..].trim_start_matches(|c: char| c.is_whitespace() || c == ':' || c == ',');
    let sentence = *lexicon.sentences(rest).first()?;
    if sentence.chars().count() <= MIN_REQUEST_SUMMARY_CHARS {
        return None;
    }
    Some(sentence.chars().take(MAX_REQUEST_SUMMARY_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PipelineConfig, ThemeConfig};
    use chrono::Utc;

    fn extract(text: &str, rating: Option<u8>) -> FeatureDetails {
        let rules = RuleSet::with_defaults().unwrap();
        let record = FeedbackRecord::review("f-1", text, rating, Utc::now());
        FeatureExtractor.extract_feature_details(&record, &rules)
    }

    #[test]
    fn test_dark_mode_request() {
        let details = extract("Would love a dark mode option, please add it!", Some(5));
        assert_eq!(details.theme, "dark mode");
        // 1 hit * 10 / 9 words * 1.2 engaged
        assert!((details.demand_score - 10.0 / 9.0 * 1.2).abs() < 1e-12);
        assert_eq!(details.priority, Urgency::High);
        assert_eq!(
            details.request_summary.as_deref(),
            Some("a dark mode option, please add it")
        );
    }

    #[test]
    fn test_no_theme_is_general_and_low() {
        let details = extract("Please make the buttons bigger for everyone", None);
        assert_eq!(details.theme, GENERAL_THEME);
        assert_eq!(details.demand_score, 0.0);
        assert_eq!(details.priority, Urgency::Low);
    }

    #[test]
    fn test_theme_with_most_hits_wins() {
        // export: "export" x2 + "csv" = 3 hits; integration: "api" = 1
        let details = extract("Export to CSV via the API, and export history too", None);
        assert_eq!(details.theme, "export");
    }

    #[test]
    fn test_theme_tie_goes_to_declaration_order() {
        let mut config = PipelineConfig::default();
        config.feature.themes = vec![
            ThemeConfig { label: "widgets".into(), keywords: vec!["widget".into()] },
            ThemeConfig { label: "sharing".into(), keywords: vec!["share".into()] },
        ];
        let rules = RuleSet::new(config).unwrap();
        let record = FeedbackRecord::review("f-2", "share a widget", None, Utc::now());
        let details = FeatureExtractor.extract_feature_details(&record, &rules);
        assert_eq!(details.theme, "widgets");
    }

    #[test]
    fn test_engaged_rating_boosts_demand() {
        let text = "I want an offline mode for flights";
        let plain = extract(text, Some(3));
        let engaged = extract(text, Some(4));
        assert!((engaged.demand_score - plain.demand_score * 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_priority_thresholds_are_inclusive() {
        let cfg = FeatureExtractionConfig::default();
        assert_eq!(priority_for(&cfg, 2.0), Urgency::Critical);
        assert_eq!(priority_for(&cfg, 1.999), Urgency::High);
        assert_eq!(priority_for(&cfg, 1.0), Urgency::High);
        assert_eq!(priority_for(&cfg, 0.5), Urgency::Medium);
        assert_eq!(priority_for(&cfg, 0.49), Urgency::Low);
        assert_eq!(priority_for(&cfg, 0.0), Urgency::Low);
    }

    #[test]
    fn test_short_request_summary_dropped() {
        let details = extract("Please add CSV.", None);
        assert_eq!(details.request_summary, None, "'add CSV' is too short to keep");
    }

    #[test]
    fn test_request_summary_truncated() {
        let long = format!("Please {}", "support exporting every report ".repeat(10));
        let details = extract(&long, None);
        let summary = details.request_summary.unwrap();
        assert_eq!(summary.chars().count(), MAX_REQUEST_SUMMARY_CHARS);
    }
}
