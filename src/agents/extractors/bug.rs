//! Bug Extractor - device, OS, app version, repro steps, severity

use super::DetailExtractor;
use crate::lexicon::{ExtractionPattern, Lexicon, StepMarker};
use crate::rules::RuleSet;
use crate::types::{BugDetails, Category, ExtractedDetails, FeedbackRecord, Urgency};

/// Bug Extractor pulls technical facts out of a bug report
pub struct BugExtractor;

impl BugExtractor {
    /// Extract bug details. Unmatched fields stay unset; severity defaults to Medium.
    pub fn extract_bug_details(&self, record: &FeedbackRecord, rules: &RuleSet) -> BugDetails {
        let lexicon = &rules.lexicon;
        let text = record.text.as_str();

        BugDetails {
            device: first_capture(&lexicon.device_patterns, text),
            os: first_capture(&lexicon.os_patterns, text),
            app_version: first_capture(&lexicon.version_patterns, text),
            repro_steps: repro_steps(lexicon, text),
            severity: severity(lexicon, text),
        }
    }
}

impl DetailExtractor for BugExtractor {
    fn name(&self) -> &str {
        "Bug"
    }

    fn category(&self) -> Category {
        Category::Bug
    }

    fn extract(&self, record: &FeedbackRecord, rules: &RuleSet) -> ExtractedDetails {
        ExtractedDetails::Bug(self.extract_bug_details(record, rules))
    }
}

/// First pattern in list order that matches anywhere in the text.
fn first_capture(patterns: &[ExtractionPattern], text: &str) -> Option<String> {
    patterns.iter().find_map(|p| p.capture(text))
}

/// First tier (Critical → Low) with a keyword in the text.
fn severity(lexicon: &Lexicon, text: &str) -> Urgency {
    let lower = text.to_lowercase();
    lexicon
        .severity_tiers
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k.as_str())))
        .map_or(Urgency::Medium, |(urgency, _)| *urgency)
}

/// Numbered steps (1, 2, 3 ... in order, at least two) when present, else
/// the first sentence carrying a sequencing cue.
fn repro_steps(lexicon: &Lexicon, text: &str) -> Option<String> {
    let markers = step_run(&lexicon.numbered_markers(text));
    if markers.len() >= 2 {
        let steps: Vec<&str> = markers
            .iter()
            .enumerate()
            .filter_map(|(i, marker)| {
                let body_end = markers.get(i + 1).map_or(text.len(), |next| next.start);
                // A step ends at its own sentence boundary
                lexicon
                    .sentences(&text[marker.body_start..body_end])
                    .first()
                    .map(|s| s.trim_end_matches([';', ',']).trim())
                    .filter(|s| !s.is_empty())
            })
            .collect();
        if steps.len() >= 2 {
            return Some(steps.join("; "));
        }
    }

    let cue = lexicon.repro_cue.as_ref()?;
    lexicon
        .sentences(text)
        .into_iter()
        .find(|sentence| cue.is_match(sentence))
        .map(str::to_string)
}

/// The markers numbered 1, 2, 3 ... starting at the first "1"; the run
/// stops at the first marker out of sequence.
fn step_run(markers: &[StepMarker]) -> Vec<StepMarker> {
    let Some(first) = markers.iter().position(|m| m.number == 1) else {
        return Vec::new();
    };
    let mut run: Vec<StepMarker> = vec![markers[first]];
    for marker in &markers[first + 1..] {
        if marker.number != run.len() as u32 + 1 {
            break;
        }
        run.push(*marker);
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use chrono::Utc;

    fn extract(text: &str) -> BugDetails {
        let rules = RuleSet::with_defaults().unwrap();
        let record = FeedbackRecord::review("b-1", text, Some(1), Utc::now());
        BugExtractor.extract_bug_details(&record, &rules)
    }

    #[test]
    fn test_crash_report_details() {
        let details = extract(
            "App crashes every time I try to open my profile page. iPhone 14, iOS 17.2, app version 3.2.1",
        );
        assert_eq!(details.device.as_deref(), Some("iPhone 14"));
        assert_eq!(details.os.as_deref(), Some("iOS 17.2"));
        assert_eq!(details.app_version.as_deref(), Some("3.2.1"));
        assert_eq!(details.severity, Urgency::Critical);
        assert_eq!(
            details.repro_steps.as_deref(),
            Some("App crashes every time I try to open my profile page")
        );
    }

    #[test]
    fn test_android_device_and_v_prefixed_version() {
        let details = extract("Sync stopped working on my Pixel 7 Pro running Android 14 with v2.8");
        assert_eq!(details.device.as_deref(), Some("Pixel 7 Pro"));
        assert_eq!(details.os.as_deref(), Some("Android 14"));
        assert_eq!(details.app_version.as_deref(), Some("2.8"));
        assert_eq!(details.severity, Urgency::High, "'sync' is a High-tier keyword");
    }

    #[test]
    fn test_unmatched_fields_stay_unset() {
        let details = extract("The settings icon is a bit weird");
        assert_eq!(details.device, None);
        assert_eq!(details.os, None);
        assert_eq!(details.app_version, None);
        assert_eq!(details.repro_steps, None);
        assert_eq!(details.severity, Urgency::Medium, "no tier matched");
    }

    #[test]
    fn test_severity_tier_precedence() {
        // "typo" is Medium, "login" is High; High is checked first
        assert_eq!(extract("Typo on the login screen").severity, Urgency::High);
        assert_eq!(extract("Small typo in the footer").severity, Urgency::Medium);
        assert_eq!(extract("Scrolling has a noticeable lag").severity, Urgency::Medium);
        assert_eq!(
            extract("Login fails and then all my notes disappeared").severity,
            Urgency::Critical
        );
    }

    #[test]
    fn test_configured_low_tier() {
        let mut config = PipelineConfig::default();
        config.bug.severity_keywords.medium.retain(|k| k != "typo");
        config.bug.severity_keywords.low = vec!["typo".to_string()];
        let rules = RuleSet::new(config).unwrap();
        let record = FeedbackRecord::review("b-4", "Small typo in the footer", None, Utc::now());
        assert_eq!(BugExtractor.extract_bug_details(&record, &rules).severity, Urgency::Low);
    }

    #[test]
    fn test_numbered_steps_are_joined() {
        let details = extract("Export fails. 1. Open a project. 2. Tap export. 3) Pick PDF. Nothing happens");
        assert_eq!(
            details.repro_steps.as_deref(),
            Some("Open a project; Tap export; Pick PDF")
        );
    }

    #[test]
    fn test_steps_on_separate_lines() {
        let details = extract("Sync is broken:\n1) Log in\n2) Edit a note\n3) Open the web app");
        assert_eq!(
            details.repro_steps.as_deref(),
            Some("Log in; Edit a note; Open the web app")
        );
    }

    #[test]
    fn test_device_numbers_are_not_steps() {
        let details = extract("App crashes on my iPhone 14. Same on my old iPhone 11. Nothing else to say");
        assert_eq!(details.device.as_deref(), Some("iPhone 14"));
        assert_eq!(details.repro_steps, None, "no cue sentence and no numbered list");
    }

    #[test]
    fn test_out_of_sequence_numbers_fall_back_to_cue_sentence() {
        let details = extract("Checked chapter 2. 5. Then the reader closes. 7. Still closes");
        assert_eq!(details.repro_steps.as_deref(), Some("Then the reader closes"));
    }

    #[test]
    fn test_single_number_falls_back_to_cue_sentence() {
        let details = extract("Page 2. Then the list goes blank");
        assert_eq!(details.repro_steps.as_deref(), Some("Then the list goes blank"));
    }

    #[test]
    fn test_device_pattern_order_wins() {
        let mut config = PipelineConfig::default();
        config.bug.device_patterns = vec![r"(?i)\b(Galaxy\s?S\d+)".to_string(), r"(?i)\b(iPhone\s?\d+)".to_string()];
        let rules = RuleSet::new(config).unwrap();
        let record = FeedbackRecord::review("b-2", "Works on iPhone 12 but not Galaxy S21", None, Utc::now());
        let details = BugExtractor.extract_bug_details(&record, &rules);
        assert_eq!(details.device.as_deref(), Some("Galaxy S21"), "list order, not text order");
    }

    #[test]
    fn test_extract_wraps_bug_variant() {
        let rules = RuleSet::with_defaults().unwrap();
        let record = FeedbackRecord::email("b-3", "It crashed", Utc::now());
        let details = BugExtractor.extract(&record, &rules);
        assert!(details.matches_category(Category::Bug));
        assert_eq!(details.urgency(), Some(Urgency::Critical));
    }
}
