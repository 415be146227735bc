//! Run-scoped pipeline state
//!
//! ```text
//! STAGE 1: Classify           (parallel, stateless)
//! STAGE 2: Extract details    (parallel, stateless; Bug/FeatureRequest only)
//! STAGE 3: Validate record    (sequential, input order)
//! STAGE 4: Synthesize ticket  (sequential; claims the next ID)
//! STAGE 5: Critique           (sequential)
//! STAGE 6: Accumulate metrics (sequential)
//! ```
//!
//! The only cross-record state is here: the ticket sequencer and the metrics
//! accumulator, both owned by the orchestrator.

mod metrics;
mod sequencer;

pub use metrics::{evaluate, MetricsAccumulator};
pub use sequencer::TicketSequencer;
