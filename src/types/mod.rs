//! Shared data structures for the feedback triage pipeline
//!
//! This module defines the types exchanged between pipeline stages:
//! - Stage 0: FeedbackRecord (ingestion output, read-only input)
//! - Stage 1: Classification (classifier output)
//! - Stage 2: BugDetails / FeatureDetails (detail extractor output)
//! - Stage 3: Ticket (synthesizer output)
//! - Stage 4: QualityReport (critic output)
//! - Run level: PipelineMetrics, EvaluationReport, SkippedRecord

mod feedback;
mod classification;
mod details;
mod ticket;
mod metrics;

pub use feedback::*;
pub use classification::*;
pub use details::*;
pub use ticket::*;
pub use metrics::*;
