//! Pipeline Configuration Module
//!
//! Every classification and extraction tunable loaded from TOML, replacing
//! hardcoded keyword tables with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `FEEDBACK_TRIAGE_CONFIG` environment variable (path to TOML file)
//! 2. `triage_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Load and validate once at startup, then hand the compiled rules to the
//! orchestrator. There is no process-wide config; every stage borrows it.
//!
//! ```ignore
//! let rules = RuleSet::new(PipelineConfig::load()?)?;
//! let mut orchestrator = Orchestrator::with_rules(rules);
//! ```

mod pipeline_config;
pub mod defaults;
pub mod validation;

pub use pipeline_config::*;
