//! Ticket types: Ticket, QualityVerdict, QualityReport, TicketOutcome

use serde::{Deserialize, Serialize};

use super::{Category, ExtractedDetails, FeedbackSource, Urgency};

/// Structured work item synthesized from one feedback record.
///
/// Immutable once created; the quality critic only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// `<PREFIX>-<zero-padded sequence>`, unique per run
    pub ticket_id: String,
    /// Identifier of the record this ticket was built from
    pub record_id: String,
    pub source: FeedbackSource,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub confidence: f64,
    pub reasoning: String,
    /// Severity for bugs, priority for feature requests, configured default otherwise
    pub urgency: Urgency,
    #[serde(flatten)]
    pub details: ExtractedDetails,
}

/// Quality critic verdict
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QualityVerdict {
    Pass,
    Flagged,
}

impl std::fmt::Display for QualityVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityVerdict::Pass => write!(f, "Pass"),
            QualityVerdict::Flagged => write!(f, "Flagged"),
        }
    }
}

/// Quality critic output for one ticket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub ticket_id: String,
    pub verdict: QualityVerdict,
    /// Issues in check order; empty when the verdict is Pass
    pub issues: Vec<String>,
}

impl QualityReport {
    pub fn is_flagged(&self) -> bool {
        self.verdict == QualityVerdict::Flagged
    }
}

/// A ticket paired with its quality review, as handed to persistence/UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketOutcome {
    pub ticket: Ticket,
    pub quality: QualityReport,
}
