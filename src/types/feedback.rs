//! Feedback record types (ingestion → core boundary)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a piece of feedback came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FeedbackSource {
    AppStoreReview,
    SupportEmail,
}

impl std::fmt::Display for FeedbackSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackSource::AppStoreReview => write!(f, "AppStoreReview"),
            FeedbackSource::SupportEmail => write!(f, "SupportEmail"),
        }
    }
}

/// One normalized piece of user feedback.
///
/// Created by ingestion and never mutated by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    /// Source-assigned unique identifier
    pub id: String,
    pub source: FeedbackSource,
    /// Raw feedback text (may be empty; empty text classifies as Spam)
    pub text: String,
    /// Star rating 1-5, app-store reviews only
    #[serde(default)]
    pub rating: Option<u8>,
    pub timestamp: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Build an app-store review record.
    pub fn review(
        id: impl Into<String>,
        text: impl Into<String>,
        rating: Option<u8>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            source: FeedbackSource::AppStoreReview,
            text: text.into(),
            rating,
            timestamp,
        }
    }

    /// Build a support-email record (never carries a rating).
    pub fn email(id: impl Into<String>, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            source: FeedbackSource::SupportEmail,
            text: text.into(),
            rating: None,
            timestamp,
        }
    }

    /// True when the text carries no content after trimming.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
