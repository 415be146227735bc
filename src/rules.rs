//! RuleSet: a validated config paired with its compiled lexicon.

use crate::config::{ConfigError, PipelineConfig};
use crate::lexicon::Lexicon;

/// Immutable rules shared by every stage for the lifetime of a run.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub config: PipelineConfig,
    pub lexicon: Lexicon,
}

impl RuleSet {
    /// Validate `config` and compile its lexicon. Any defect is fatal.
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let lexicon = Lexicon::compile(&config)?;
        Ok(Self { config, lexicon })
    }

    /// Rules built from the shipped defaults.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::new(PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_build() {
        let rules = RuleSet::with_defaults().expect("defaults are valid");
        assert_eq!(rules.config, PipelineConfig::default());
    }

    #[test]
    fn test_invalid_config_is_rejected_before_compile() {
        let mut config = PipelineConfig::default();
        config.feature.themes.clear();
        assert!(matches!(RuleSet::new(config), Err(ConfigError::Validation(_))));
    }
}
