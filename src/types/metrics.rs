//! Run-level types: PipelineMetrics, EvaluationReport, SkippedRecord, BatchReport

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Category, TicketOutcome, Urgency};

/// External ground truth: record id → expected category
pub type GroundTruth = std::collections::HashMap<String, Category>;

/// A record the pipeline could not turn into a ticket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRecord {
    pub record_id: String,
    /// Stage that rejected the record
    pub stage: String,
    pub error: String,
}

/// Confusion-matrix scores for one category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

/// Accuracy against externally supplied labels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    /// correct / total_labelled
    pub accuracy: f64,
    pub total_labelled: usize,
    pub correct: usize,
    pub per_category: BTreeMap<Category, CategoryScores>,
}

/// Run-scoped aggregate, rebuilt on every run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineMetrics {
    pub total_records: usize,
    pub tickets_created: usize,
    pub passed: usize,
    pub flagged: usize,
    pub skipped: usize,
    /// Skipped records per rejecting stage ("parse", "validate", "synthesize")
    pub skipped_by_stage: BTreeMap<String, usize>,
    pub category_counts: BTreeMap<Category, usize>,
    pub urgency_counts: BTreeMap<Urgency, usize>,
    pub average_confidence: f64,
    pub elapsed_ms: u64,
    /// Present only when ground truth was supplied
    pub evaluation: Option<EvaluationReport>,
}

/// Everything one batch run produces
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Tickets in input order
    pub tickets: Vec<TicketOutcome>,
    pub skipped: Vec<SkippedRecord>,
    pub metrics: PipelineMetrics,
}
