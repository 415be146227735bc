//! Ticket Synthesizer - merges record, classification and details into a Ticket
//!
//! Pure composition apart from claiming the next identifier. The category and
//! details are checked before the counter moves, so a precondition failure
//! leaves numbering untouched.

use thiserror::Error;
use tracing::debug;

use crate::pipeline::TicketSequencer;
use crate::rules::RuleSet;
use crate::types::{
    BugDetails, Category, Classification, ExtractedDetails, FeatureDetails, FeedbackRecord,
    Ticket,
};

/// Precondition violations handed to the synthesizer by an upstream stage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("{category} ticket cannot carry {details} details")]
    DetailMismatch {
        category: Category,
        details: &'static str,
    },
}

pub struct TicketSynthesizer<'r> {
    rules: &'r RuleSet,
}

impl<'r> TicketSynthesizer<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    /// Build a ticket, claiming the next ID for the classified category.
    pub fn synthesize(
        &self,
        record: &FeedbackRecord,
        classification: &Classification,
        details: ExtractedDetails,
        sequencer: &TicketSequencer,
    ) -> Result<Ticket, SynthesisError> {
        let category = classification.category;
        if !details.matches_category(category) {
            return Err(SynthesisError::DetailMismatch {
                category,
                details: details.kind(),
            });
        }

        let tickets = &self.rules.config.tickets;
        let urgency = details
            .urgency()
            .or_else(|| tickets.default_urgency.for_category(category))
            .unwrap_or_default();

        let excerpt = excerpt(&self.rules.lexicon.sentences(&record.text), tickets.max_excerpt_chars);
        let title = if category.has_details() {
            format!("[{urgency}] {excerpt}")
        } else {
            excerpt
        };

        let ticket_id = sequencer.next_id(category);
        debug!(ticket = %ticket_id, record = %record.id, urgency = %urgency, "Ticket synthesized");

        Ok(Ticket {
            ticket_id,
            record_id: record.id.clone(),
            source: record.source,
            title,
            description: describe(&record.text, &details),
            category,
            confidence: classification.confidence,
            reasoning: classification.reasoning.clone(),
            urgency,
            details,
        })
    }
}

/// First sentence with whitespace collapsed, truncated with "..." past `max_chars`.
fn excerpt(sentences: &[&str], max_chars: usize) -> String {
    let first = sentences
        .first()
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    if first.chars().count() <= max_chars {
        return first;
    }
    let kept: String = first.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

fn describe(text: &str, details: &ExtractedDetails) -> String {
    let mut description = text.trim().to_string();
    match details {
        ExtractedDetails::Bug(bug) => push_section(&mut description, "Bug Details", &bug_lines(bug)),
        ExtractedDetails::Feature(feature) => {
            push_section(&mut description, "Feature Details", &feature_lines(feature))
        }
        ExtractedDetails::None => {}
    }
    description
}

fn push_section(description: &mut String, heading: &str, lines: &[String]) {
    description.push_str(&format!("\n\n--- {heading} ---"));
    for line in lines {
        description.push('\n');
        description.push_str(line);
    }
}

fn bug_lines(bug: &BugDetails) -> Vec<String> {
    let mut lines = vec![format!("Severity: {}", bug.severity)];
    let optional = [
        ("Device", &bug.device),
        ("OS", &bug.os),
        ("App Version", &bug.app_version),
        ("Repro Steps", &bug.repro_steps),
    ];
    lines.extend(
        optional
            .iter()
            .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}: {v}"))),
    );
    lines
}

fn feature_lines(feature: &FeatureDetails) -> Vec<String> {
    let mut lines = vec![
        format!("Theme: {}", feature.theme),
        format!("Demand Score: {:.2}", feature.demand_score),
        format!("Priority: {}", feature.priority),
    ];
    if let Some(summary) = &feature.request_summary {
        lines.push(format!("Request: {summary}"));
    }
    lines
}
