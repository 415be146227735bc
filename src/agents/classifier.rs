//! Classifier - keyword-weight scoring with a star-rating boost
//!
//! Per category: raw score = sum of weights of every lexicon keyword found in
//! the lowercased text, plus the rating boost for that category. The raw score
//! is divided by the number of keywords configured for the category (coverage
//! ratio). The highest normalized score wins; ties go to the earlier entry in
//! `classification.tie_break_order`.

use tracing::debug;

use crate::rules::RuleSet;
use crate::types::{Category, Classification, FeedbackRecord};

/// Reasoning for records with no content.
pub const EMPTY_CONTENT_REASON: &str = "empty content";

/// Reasoning when nothing fired and the fallback category was used.
pub const NO_SIGNAL_REASON: &str = "no keyword or rating signals";

/// Score breakdown for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub category: Category,
    /// Matched keywords, heaviest first (ties alphabetical)
    pub matched: Vec<(String, f64)>,
    pub rating_boost: f64,
    /// (keyword weights + boost) / lexicon size
    pub normalized: f64,
}

/// Stateless classifier over a borrowed rule set.
pub struct Classifier<'r> {
    rules: &'r RuleSet,
}

impl<'r> Classifier<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    /// Assign a category, confidence and reasoning. Never fails.
    pub fn classify(&self, record: &FeedbackRecord) -> Classification {
        if record.is_blank() {
            return Classification {
                category: Category::Spam,
                confidence: 0.0,
                reasoning: EMPTY_CONTENT_REASON.to_string(),
            };
        }

        let scores = self.score_all(record);

        if scores.iter().all(|s| s.normalized == 0.0) {
            let category = self.rules.config.classification.fallback_category;
            debug!(record = %record.id, category = %category, "No signals, using fallback category");
            return Classification {
                category,
                confidence: 0.0,
                reasoning: NO_SIGNAL_REASON.to_string(),
            };
        }

        let mut winner: Option<&CategoryScore> = None;
        for category in &self.rules.config.classification.tie_break_order {
            let candidate = &scores[category.index()];
            // Strictly greater: an equal score never displaces an earlier category
            if winner.map_or(true, |w| candidate.normalized > w.normalized) {
                winner = Some(candidate);
            }
        }
        // tie_break_order is validated to cover every category
        let winner = winner.unwrap_or(&scores[0]);

        let confidence = winner.normalized.clamp(0.0, 1.0);
        debug!(
            record = %record.id,
            category = %winner.category,
            confidence = confidence,
            matched = winner.matched.len(),
            "Classified record"
        );

        Classification {
            category: winner.category,
            confidence,
            reasoning: render_reasoning(winner, record.rating),
        }
    }

    /// Scores for every category, indexed by `Category::index`.
    pub fn score_all(&self, record: &FeedbackRecord) -> Vec<CategoryScore> {
        let text = record.text.to_lowercase();
        Category::ALL
            .iter()
            .map(|&category| self.score_category(category, &text, record.rating))
            .collect()
    }

    fn score_category(&self, category: Category, text: &str, rating: Option<u8>) -> CategoryScore {
        let lexicon = self.rules.lexicon.category(category);

        let mut matched: Vec<(String, f64)> = lexicon
            .keywords
            .iter()
            .filter(|(keyword, _)| text.contains(keyword.as_str()))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let rating_boost = self.rating_boost(category, rating);
        let raw: f64 = matched.iter().map(|(_, w)| w).sum::<f64>() + rating_boost;
        let normalized = if lexicon.is_empty() {
            0.0
        } else {
            raw / lexicon.len() as f64
        };

        CategoryScore {
            category,
            matched,
            rating_boost,
            normalized,
        }
    }

    fn rating_boost(&self, category: Category, rating: Option<u8>) -> f64 {
        let Some(rating) = rating else {
            return 0.0;
        };
        let boost = &self.rules.config.classification.rating_boost;
        match category {
            Category::Bug if rating <= boost.low_rating_max => boost.low_rating_bug,
            Category::Complaint if rating <= boost.low_rating_max => boost.low_rating_complaint,
            Category::Praise if rating >= boost.high_rating_min => boost.high_rating_praise,
            _ => 0.0,
        }
    }
}

fn render_reasoning(score: &CategoryScore, rating: Option<u8>) -> String {
    let keywords = if score.matched.is_empty() {
        "none".to_string()
    } else {
        score
            .matched
            .iter()
            .map(|(k, w)| format!("'{k}' ({w:.2})"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut reasoning = format!("{}: matched {keywords}", score.category);
    if score.rating_boost > 0.0 {
        if let Some(r) = rating {
            reasoning.push_str(&format!("; rating {r} boost +{:.2}", score.rating_boost));
        }
    }
    reasoning.push_str(&format!("; coverage score {:.4}", score.normalized));
    reasoning
}
