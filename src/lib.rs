//! Feedback Triage: rule-based classification and ticket synthesis
//!
//! Turns raw user feedback (app-store reviews, support emails) into
//! structured, prioritized tickets with explainable scores.
//!
//! ## Architecture
//!
//! - **Lexicon**: weighted keyword tables and patterns, compiled once from config
//! - **Classifier**: keyword coverage scoring with a star-rating boost
//! - **Extractors**: bug facts (device, OS, version, repro, severity) or
//!   feature demand (theme, density score, priority)
//! - **Ticket Synthesizer**: category-scoped IDs, tagged titles, descriptions
//! - **Quality Critic**: flags tickets that need a human look
//! - **Orchestrator**: batch driver, skip isolation, run metrics

pub mod agents;
pub mod config;
pub mod lexicon;
pub mod pipeline;
pub mod rules;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, PipelineConfig};

// Re-export commonly used types
pub use types::{
    BatchReport, BugDetails, Category, Classification, EvaluationReport, ExtractedDetails,
    FeatureDetails, FeedbackRecord, FeedbackSource, GroundTruth, PipelineMetrics, QualityReport,
    QualityVerdict, SkippedRecord, Ticket, TicketOutcome, Urgency,
};

// Re-export agents
pub use agents::{parse_records, Orchestrator, ProcessError, RecordError, SynthesisError};

pub use lexicon::Lexicon;
pub use rules::RuleSet;
