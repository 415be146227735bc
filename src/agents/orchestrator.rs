//! Orchestrator - drives feedback records through every triage stage
//!
//! Per record: validate → classify → extract details → synthesize → critique.
//!
//! ## Batch Rules
//!
//! - Classification and extraction are pure, so a batch may score records
//!   across the rayon pool (`pipeline.parallel_scoring`)
//! - Validation, ID assignment, critique and metrics run in input order, so
//!   tickets, IDs and metrics are identical to a sequential run
//! - A failing record becomes a `SkippedRecord`; the batch always completes

use std::collections::HashSet;
use std::time::Instant;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use super::classifier::Classifier;
use super::extractors::ExtractorRegistry;
use super::quality_critic::QualityCritic;
use super::ticket_synthesizer::{SynthesisError, TicketSynthesizer};
use crate::config::ConfigError;
use crate::pipeline::{MetricsAccumulator, TicketSequencer};
use crate::rules::RuleSet;
use crate::types::{
    BatchReport, Classification, ExtractedDetails, FeedbackRecord, FeedbackSource, GroundTruth,
    SkippedRecord, TicketOutcome,
};

// ============================================================================
// Errors
// ============================================================================

/// Input defects that make a record unprocessable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record id is empty")]
    EmptyId,

    #[error("rating {0} is outside 1-5")]
    RatingOutOfRange(u8),

    #[error("support emails do not carry a rating")]
    RatingOnSupportEmail,

    #[error("duplicate record id '{0}'")]
    DuplicateId(String),
}

/// Why one record produced no ticket
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("invalid record: {0}")]
    Record(#[from] RecordError),

    #[error("ticket synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),
}

impl ProcessError {
    /// Stage that rejected the record.
    pub const fn stage(&self) -> &'static str {
        match self {
            ProcessError::Record(_) => "validate",
            ProcessError::Synthesis(_) => "synthesize",
        }
    }
}

/// Check a single record for input defects (duplicates need batch context).
pub fn validate_record(record: &FeedbackRecord) -> Result<(), RecordError> {
    if record.id.trim().is_empty() {
        return Err(RecordError::EmptyId);
    }
    match (record.source, record.rating) {
        (_, Some(r)) if !(1..=5).contains(&r) => Err(RecordError::RatingOutOfRange(r)),
        (FeedbackSource::SupportEmail, Some(_)) => Err(RecordError::RatingOnSupportEmail),
        _ => Ok(()),
    }
}

/// Stage name for entries that never decoded into a record.
pub const PARSE_STAGE: &str = "parse";

/// Decode raw JSON entries one at a time.
///
/// An entry that does not decode becomes a `parse`-stage skip, named by its
/// `id` field when present or by its position otherwise.
pub fn parse_records(values: Vec<serde_json::Value>) -> (Vec<FeedbackRecord>, Vec<SkippedRecord>) {
    let mut records = Vec::with_capacity(values.len());
    let mut skipped = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        let record_id = value
            .get("id")
            .and_then(serde_json::Value::as_str)
            .filter(|id| !id.trim().is_empty())
            .map_or_else(|| format!("#{index}"), str::to_string);
        match serde_json::from_value::<FeedbackRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => skipped.push(SkippedRecord {
                record_id,
                stage: PARSE_STAGE.to_string(),
                error: format!("malformed record: {e}"),
            }),
        }
    }
    (records, skipped)
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Classification and detail output for one record, before synthesis
type Scored = (Classification, ExtractedDetails);

/// Owns the rules, the extractor mapping and the ticket counters
pub struct Orchestrator {
    rules: RuleSet,
    extractors: ExtractorRegistry,
    sequencer: TicketSequencer,
    /// Completed batch runs
    runs_completed: u64,
}

impl Orchestrator {
    /// Orchestrator over the shipped default rules
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self::with_rules(RuleSet::with_defaults()?))
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        let sequencer = TicketSequencer::new(rules.config.tickets.prefixes.clone());
        Self {
            rules,
            extractors: ExtractorRegistry::default(),
            sequencer,
            runs_completed: 0,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn sequencer(&self) -> &TicketSequencer {
        &self.sequencer
    }

    pub fn runs_completed(&self) -> u64 {
        self.runs_completed
    }

    /// Drive one record through every stage, claiming the next ID on success.
    pub fn process_record(&self, record: &FeedbackRecord) -> Result<TicketOutcome, ProcessError> {
        validate_record(record)?;
        let scored = self.score(record);
        self.complete(record, scored)
    }

    /// Run a batch. Counters restart, so the same batch always yields the same IDs.
    pub fn run(&mut self, records: &[FeedbackRecord], ground_truth: Option<&GroundTruth>) -> BatchReport {
        self.run_with_skipped(records, Vec::new(), ground_truth)
    }

    /// Run a batch whose ingestion already rejected some entries. Those skips
    /// lead the report and count toward the run metrics.
    pub fn run_with_skipped(
        &mut self,
        records: &[FeedbackRecord],
        rejected: Vec<SkippedRecord>,
        ground_truth: Option<&GroundTruth>,
    ) -> BatchReport {
        let started = Instant::now();
        self.sequencer.reset();

        let parallel = self.rules.config.pipeline.parallel_scoring;
        let scored: Vec<Scored> = if parallel {
            records.par_iter().map(|r| self.score(r)).collect()
        } else {
            records.iter().map(|r| self.score(r)).collect()
        };

        let mut metrics = MetricsAccumulator::new();
        let mut tickets = Vec::with_capacity(records.len());
        for entry in &rejected {
            warn!(record = %entry.record_id, stage = %entry.stage, error = %entry.error, "Record skipped");
            metrics.record_skip(entry);
        }
        let mut skipped = rejected;
        let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());

        for (record, scored) in records.iter().zip(scored) {
            let result = validate_record(record)
                .and_then(|()| {
                    if seen.insert(record.id.as_str()) {
                        Ok(())
                    } else {
                        Err(RecordError::DuplicateId(record.id.clone()))
                    }
                })
                .map_err(ProcessError::from)
                .and_then(|()| self.complete(record, scored));

            match result {
                Ok(outcome) => {
                    metrics.record_ticket(&outcome);
                    tickets.push(outcome);
                }
                Err(e) => {
                    warn!(record = %record.id, stage = e.stage(), error = %e, "Record skipped");
                    let entry = SkippedRecord {
                        record_id: record.id.clone(),
                        stage: e.stage().to_string(),
                        error: e.to_string(),
                    };
                    metrics.record_skip(&entry);
                    skipped.push(entry);
                }
            }
        }

        let metrics = metrics.finish(started.elapsed(), ground_truth);
        self.runs_completed += 1;

        info!(
            records = metrics.total_records,
            tickets = metrics.tickets_created,
            flagged = metrics.flagged,
            skipped = metrics.skipped,
            avg_confidence = metrics.average_confidence,
            parallel = parallel,
            elapsed_ms = metrics.elapsed_ms,
            "Triage batch complete"
        );
        if let Some(eval) = &metrics.evaluation {
            info!(
                accuracy = eval.accuracy,
                labelled = eval.total_labelled,
                correct = eval.correct,
                "Evaluated against ground truth"
            );
        }

        BatchReport {
            tickets,
            skipped,
            metrics,
        }
    }

    /// Stateless stages: classify, then extract for the classified category.
    fn score(&self, record: &FeedbackRecord) -> Scored {
        let classification = Classifier::new(&self.rules).classify(record);
        let details = self
            .extractors
            .extract(record, classification.category, &self.rules);
        (classification, details)
    }

    /// Stateful stages: synthesize (claims an ID) and critique.
    fn complete(&self, record: &FeedbackRecord, (classification, details): Scored) -> Result<TicketOutcome, ProcessError> {
        let ticket = TicketSynthesizer::new(&self.rules).synthesize(
            record,
            &classification,
            details,
            &self.sequencer,
        )?;
        let quality = QualityCritic::new(&self.rules).critique(&ticket);
        Ok(TicketOutcome { ticket, quality })
    }
}

// ============================================================================
// Tests
// ============================================================================
