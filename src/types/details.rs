//! Extracted detail types: Urgency, BugDetails, FeatureDetails, ExtractedDetails

use serde::{Deserialize, Serialize};

use super::Category;

/// Urgency tier shared by bug severity and feature priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Urgency {
    Low = 1,
    #[default]
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Urgency::Low => write!(f, "Low"),
            Urgency::Medium => write!(f, "Medium"),
            Urgency::High => write!(f, "High"),
            Urgency::Critical => write!(f, "Critical"),
        }
    }
}

/// Technical facts pulled out of a bug report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BugDetails {
    pub device: Option<String>,
    pub os: Option<String>,
    pub app_version: Option<String>,
    pub repro_steps: Option<String>,
    /// Always set; Medium when no severity keyword matched
    pub severity: Urgency,
}

/// Demand facts pulled out of a feature request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDetails {
    /// Winning theme label, or "General" when no theme keyword matched
    pub theme: String,
    /// Theme keyword density, >= 0
    pub demand_score: f64,
    pub priority: Urgency,
    /// Phrase following the first request cue, when one was found
    pub request_summary: Option<String>,
}

/// Output of the detail extraction stage.
///
/// Exactly one variant applies per record, selected by category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "detailKind")]
pub enum ExtractedDetails {
    Bug(BugDetails),
    Feature(FeatureDetails),
    #[default]
    None,
}

impl ExtractedDetails {
    /// Severity (bug) or priority (feature), if details are present.
    pub fn urgency(&self) -> Option<Urgency> {
        match self {
            ExtractedDetails::Bug(b) => Some(b.severity),
            ExtractedDetails::Feature(f) => Some(f.priority),
            ExtractedDetails::None => None,
        }
    }

    /// Short variant name for log fields and error notes.
    pub const fn kind(&self) -> &'static str {
        match self {
            ExtractedDetails::Bug(_) => "BugDetails",
            ExtractedDetails::Feature(_) => "FeatureDetails",
            ExtractedDetails::None => "None",
        }
    }

    /// Whether this variant is the one `category` must carry.
    pub const fn matches_category(&self, category: Category) -> bool {
        matches!(
            (self, category),
            (ExtractedDetails::Bug(_), Category::Bug)
                | (ExtractedDetails::Feature(_), Category::FeatureRequest)
                | (
                    ExtractedDetails::None,
                    Category::Praise | Category::Complaint | Category::Spam
                )
        )
    }

    pub const fn bug(&self) -> Option<&BugDetails> {
        match self {
            ExtractedDetails::Bug(b) => Some(b),
            _ => None,
        }
    }

    pub const fn feature(&self) -> Option<&FeatureDetails> {
        match self {
            ExtractedDetails::Feature(f) => Some(f),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_ordering() {
        assert!(Urgency::Critical > Urgency::High);
        assert!(Urgency::High > Urgency::Medium);
        assert!(Urgency::Medium > Urgency::Low);
        assert_eq!(Urgency::default(), Urgency::Medium);
    }

    #[test]
    fn test_details_match_only_their_category() {
        let bug = ExtractedDetails::Bug(BugDetails::default());
        assert!(bug.matches_category(Category::Bug));
        assert!(!bug.matches_category(Category::FeatureRequest));
        assert!(!bug.matches_category(Category::Praise));

        let none = ExtractedDetails::None;
        assert!(none.matches_category(Category::Spam));
        assert!(!none.matches_category(Category::Bug));
        assert!(!none.matches_category(Category::FeatureRequest));
    }
}
