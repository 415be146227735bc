//! Classification types: Category, Classification

use serde::{Deserialize, Serialize};

/// Top-level feedback category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Bug,
    #[serde(alias = "Feature Request")]
    FeatureRequest,
    Praise,
    Complaint,
    Spam,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 5] = [
        Category::Bug,
        Category::FeatureRequest,
        Category::Praise,
        Category::Complaint,
        Category::Spam,
    ];

    /// Stable array index, matching `ALL`.
    pub const fn index(self) -> usize {
        match self {
            Category::Bug => 0,
            Category::FeatureRequest => 1,
            Category::Praise => 2,
            Category::Complaint => 3,
            Category::Spam => 4,
        }
    }

    /// Whether tickets of this category carry extracted details.
    pub const fn has_details(self) -> bool {
        matches!(self, Category::Bug | Category::FeatureRequest)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Bug => write!(f, "Bug"),
            Category::FeatureRequest => write!(f, "FeatureRequest"),
            Category::Praise => write!(f, "Praise"),
            Category::Complaint => write!(f, "Complaint"),
            Category::Spam => write!(f, "Spam"),
        }
    }
}

/// Classifier output for one record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub category: Category,
    /// Keyword coverage ratio of the winning category, in [0, 1]
    pub confidence: f64,
    /// Matched keywords and signals behind the decision
    pub reasoning: String,
}
