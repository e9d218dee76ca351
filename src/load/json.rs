//! JSON loading strategy.

use super::{LoadStrategy, ModuleValue, StrategyOutcome};
use crate::error::LoadError;
use crate::scan::Candidate;

/// Loads `.json` route modules. Second in the default chain.
pub struct JsonStrategy;

impl LoadStrategy for JsonStrategy {
    fn name(&self) -> &'static str {
        "json"
    }

    fn attempt(&self, candidate: &Candidate, text: &str) -> StrategyOutcome {
        match serde_json::from_str::<ModuleValue>(text) {
            Ok(value) => StrategyOutcome::Loaded(value),
            Err(source) if candidate.extension() == Some("json") => {
                StrategyOutcome::Failed(LoadError::Json {
                    path: candidate.path.clone(),
                    source,
                })
            }
            Err(_) => StrategyOutcome::NotApplicable,
        }
    }
}
