//! Quality Critic - consistency and confidence review of a finished ticket
//!
//! ## Checks (all run, issues kept in this order)
//!
//! 1. Title clarity: empty, shorter than the minimum, longer than the maximum
//! 2. Confidence floor: below `classification.confidence_threshold`
//! 3. Severity consistency: Critical bug below `quality.critical_confidence_threshold`
//! 4. Category/detail consistency: details must match the category
//! 5. Expected urgency: the ticket urgency is one configured for its category
//!
//! The critic only reads the ticket; any issue flags it.

use tracing::warn;

use crate::rules::RuleSet;
use crate::types::{Category, QualityReport, QualityVerdict, Ticket, Urgency};

pub struct QualityCritic<'r> {
    rules: &'r RuleSet,
}

impl<'r> QualityCritic<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    pub fn critique(&self, ticket: &Ticket) -> QualityReport {
        let mut issues = Vec::new();
        self.check_title(ticket, &mut issues);
        self.check_confidence(ticket, &mut issues);
        self.check_severity(ticket, &mut issues);
        check_details(ticket, &mut issues);
        self.check_urgency(ticket, &mut issues);

        let verdict = if issues.is_empty() {
            QualityVerdict::Pass
        } else {
            warn!(ticket = %ticket.ticket_id, issues = issues.len(), "Ticket flagged for review");
            QualityVerdict::Flagged
        };

        QualityReport {
            ticket_id: ticket.ticket_id.clone(),
            verdict,
            issues,
        }
    }

    fn check_title(&self, ticket: &Ticket, issues: &mut Vec<String>) {
        let q = &self.rules.config.quality;
        let len = ticket.title.trim().chars().count();
        if len == 0 {
            issues.push("Title is empty".to_string());
        } else if len < q.min_title_length {
            issues.push(format!(
                "Title too short ({len} < {} characters)",
                q.min_title_length
            ));
        } else if len > q.max_title_length {
            issues.push(format!(
                "Title too long ({len} > {} characters)",
                q.max_title_length
            ));
        }
    }

    fn check_confidence(&self, ticket: &Ticket, issues: &mut Vec<String>) {
        let threshold = self.rules.config.classification.confidence_threshold;
        if ticket.confidence < threshold {
            issues.push(format!(
                "Confidence {:.4} below threshold {threshold:.4}",
                ticket.confidence
            ));
        }
    }

    fn check_severity(&self, ticket: &Ticket, issues: &mut Vec<String>) {
        let threshold = self.rules.config.quality.critical_confidence_threshold;
        let critical_bug = ticket.category == Category::Bug
            && ticket.details.bug().is_some_and(|b| b.severity == Urgency::Critical);
        if critical_bug && ticket.confidence < threshold {
            issues.push(format!(
                "Critical severity with confidence {:.4} below {threshold:.4}",
                ticket.confidence
            ));
        }
    }

    fn check_urgency(&self, ticket: &Ticket, issues: &mut Vec<String>) {
        let expected = &self.rules.config.quality.expected_urgency;
        if expected.allows(ticket.category, ticket.urgency) {
            return;
        }
        let allowed = expected
            .for_category(ticket.category)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        issues.push(format!(
            "Urgency {} unexpected for {} (expected: {allowed})",
            ticket.urgency, ticket.category
        ));
    }
}

fn check_details(ticket: &Ticket, issues: &mut Vec<String>) {
    if ticket.details.matches_category(ticket.category) {
        return;
    }
    let issue = match ticket.category {
        Category::Bug => "Bug ticket is missing BugDetails".to_string(),
        Category::FeatureRequest => "FeatureRequest ticket is missing FeatureDetails".to_string(),
        category => format!("{category} ticket carries {}", ticket.details.kind()),
    };
    issues.push(issue);
}
