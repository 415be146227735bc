//! Triage agents for feedback classification and ticket synthesis
//!
//! ## Processing Stages
//!
//! - **Classifier**: keyword-weight scoring plus rating boost, one category per record
//! - **Extractors**: Bug (device/OS/version/repro/severity) or Feature (theme/demand/priority)
//! - **Ticket Synthesizer**: category-scoped IDs, tagged titles, rendered descriptions
//! - **Quality Critic**: title, confidence, severity and detail consistency checks
//! - **Orchestrator**: drives a batch through every stage and aggregates metrics

pub mod classifier;
pub mod extractors;
pub mod orchestrator;
pub mod quality_critic;
pub mod ticket_synthesizer;

pub use classifier::Classifier;
pub use extractors::{BugExtractor, DetailExtractor, ExtractorRegistry, FeatureExtractor};
pub use orchestrator::{
    parse_records, validate_record, Orchestrator, ProcessError, RecordError, PARSE_STAGE,
};
pub use quality_critic::QualityCritic;
pub use ticket_synthesizer::{SynthesisError, TicketSynthesizer};
