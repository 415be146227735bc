//! Run metrics: histograms, averages, and ground-truth evaluation
//!
//! The accumulator is fed sequentially in input order, so sums and counts are
//! identical across runs of the same batch.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::types::{
    Category, CategoryScores, EvaluationReport, GroundTruth, PipelineMetrics, SkippedRecord,
    TicketOutcome, Urgency,
};

const ALL_URGENCIES: [Urgency; 4] = [Urgency::Low, Urgency::Medium, Urgency::High, Urgency::Critical];

/// Collects per-ticket and per-skip facts for one run
#[derive(Debug, Default)]
pub struct MetricsAccumulator {
    tickets_created: usize,
    passed: usize,
    flagged: usize,
    skipped: usize,
    skipped_by_stage: BTreeMap<String, usize>,
    confidence_sum: f64,
    category_counts: BTreeMap<Category, usize>,
    urgency_counts: BTreeMap<Urgency, usize>,
    predictions: HashMap<String, Category>,
}

impl MetricsAccumulator {
    pub fn new() -> Self {
        Self {
            category_counts: Category::ALL.iter().map(|&c| (c, 0)).collect(),
            urgency_counts: ALL_URGENCIES.iter().map(|&u| (u, 0)).collect(),
            ..Self::default()
        }
    }

    pub fn record_ticket(&mut self, outcome: &TicketOutcome) {
        let ticket = &outcome.ticket;
        self.tickets_created += 1;
        if outcome.quality.is_flagged() {
            self.flagged += 1;
        } else {
            self.passed += 1;
        }
        self.confidence_sum += ticket.confidence;
        *self.category_counts.entry(ticket.category).or_insert(0) += 1;
        *self.urgency_counts.entry(ticket.urgency).or_insert(0) += 1;
        self.predictions.insert(ticket.record_id.clone(), ticket.category);
    }

    pub fn record_skip(&mut self, skipped: &SkippedRecord) {
        self.skipped += 1;
        *self.skipped_by_stage.entry(skipped.stage.clone()).or_insert(0) += 1;
    }

    /// Close the run. Evaluation is computed only when ground truth is given.
    pub fn finish(self, elapsed: Duration, ground_truth: Option<&GroundTruth>) -> PipelineMetrics {
        let average_confidence = if self.tickets_created == 0 {
            0.0
        } else {
            self.confidence_sum / self.tickets_created as f64
        };

        PipelineMetrics {
            total_records: self.tickets_created + self.skipped,
            tickets_created: self.tickets_created,
            passed: self.passed,
            flagged: self.flagged,
            skipped: self.skipped,
            skipped_by_stage: self.skipped_by_stage,
            evaluation: ground_truth.map(|gt| evaluate_predictions(&self.predictions, gt)),
            category_counts: self.category_counts,
            urgency_counts: self.urgency_counts,
            average_confidence,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Score tickets against ground truth.
///
/// Labelled records without a ticket (skipped or missing) are false negatives
/// for their expected category. Tickets without a label are ignored.
pub fn evaluate(tickets: &[TicketOutcome], ground_truth: &GroundTruth) -> EvaluationReport {
    let predictions: HashMap<String, Category> = tickets
        .iter()
        .map(|o| (o.ticket.record_id.clone(), o.ticket.category))
        .collect();
    evaluate_predictions(&predictions, ground_truth)
}

fn evaluate_predictions(
    predictions: &HashMap<String, Category>,
    ground_truth: &GroundTruth,
) -> EvaluationReport {
    let mut tp = [0usize; 5];
    let mut fp = [0usize; 5];
    let mut fn_ = [0usize; 5];
    let mut correct = 0;

    for (record_id, expected) in ground_truth {
        match predictions.get(record_id) {
            Some(predicted) if predicted == expected => {
                tp[expected.index()] += 1;
                correct += 1;
            }
            Some(predicted) => {
                fp[predicted.index()] += 1;
                fn_[expected.index()] += 1;
            }
            None => fn_[expected.index()] += 1,
        }
    }

    let per_category = Category::ALL
        .iter()
        .map(|&c| {
            let i = c.index();
            (c, category_scores(tp[i], fp[i], fn_[i]))
        })
        .collect();

    let total_labelled = ground_truth.len();
    EvaluationReport {
        accuracy: ratio(correct, total_labelled),
        total_labelled,
        correct,
        per_category,
    }
}

fn category_scores(tp: usize, fp: usize, fn_: usize) -> CategoryScores {
    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    CategoryScores {
        precision,
        recall,
        f1,
        true_positives: tp,
        false_positives: fp,
        false_negatives: fn_,
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
