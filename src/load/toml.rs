//! TOML loading strategy.

use super::{LoadStrategy, ModuleValue, StrategyOutcome};
use crate::error::LoadError;
use crate::scan::Candidate;

/// Loads `.toml` route modules. First in the default chain.
pub struct TomlStrategy;

impl LoadStrategy for TomlStrategy {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn attempt(&self, candidate: &Candidate, text: &str) -> StrategyOutcome {
        match toml::from_str::<ModuleValue>(text) {
            Ok(value) => StrategyOutcome::Loaded(value),
            // The extension is the file's own claim about its format. A parse
            // failure on a matching extension is a real defect worth
            // reporting; on any other extension it just means "not ours".
            Err(source) if candidate.extension() == Some("toml") => {
                StrategyOutcome::Failed(LoadError::Toml {
                    path: candidate.path.clone(),
                    source,
                })
            }
            Err(_) => StrategyOutcome::NotApplicable,
        }
    }
}
