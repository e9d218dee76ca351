//! Candidate loading through an ordered strategy chain.
//!
//! # Data Flow
//! ```text
//! Candidate path
//!     → read file once (tokio::fs)
//!     → strategy 1 (TOML): Loaded | NotApplicable | Failed
//!     → strategy 2 (JSON): Loaded | NotApplicable | Failed
//!     → LoadOutcome
//! ```
//!
//! # Design Decisions
//! - The file is read exactly once; every strategy sees the same text
//! - "Wrong convention" is an ordinary branch, not an error: a strategy only
//!   fails hard when the file's extension declares its format and the text
//!   still does not parse
//! - A hard failure stops the chain: the file told us its format, so trying
//!   another one would mask the real problem
//! - All formats normalize to `serde_json::Value` so the classifier inspects
//!   a single value model

pub mod json;
pub mod toml;

pub use self::json::JsonStrategy;
pub use self::toml::TomlStrategy;

use crate::error::LoadError;
use crate::scan::Candidate;

/// The in-memory value a loaded module normalizes to.
pub type ModuleValue = serde_json::Value;

/// Result of a single strategy attempt.
#[derive(Debug)]
pub enum StrategyOutcome {
    /// The text parsed in this strategy's format.
    Loaded(ModuleValue),
    /// The file does not carry this convention; the next strategy gets it.
    NotApplicable,
    /// The file declares this convention but cannot be loaded.
    Failed(LoadError),
}

/// Result of loading one candidate through the whole chain.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Some strategy produced a value (routable or not — classification is
    /// a separate step).
    Loaded(ModuleValue),
    /// No strategy recognized the file. Expected for most files in a real
    /// tree; never logged above DEBUG.
    NotAModule,
    /// Read or parse failure. Logged by the pipeline, never fatal.
    Failed(LoadError),
}

/// One format convention in the loader's ordered chain.
pub trait LoadStrategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Attempt to interpret `text` as this strategy's format.
    fn attempt(&self, candidate: &Candidate, text: &str) -> StrategyOutcome;
}

/// Ordered chain of loading strategies.
pub struct Loader {
    strategies: Vec<Box<dyn LoadStrategy>>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::with_strategies(vec![Box::new(TomlStrategy), Box::new(JsonStrategy)])
    }
}

impl Loader {
    /// Chain with the default strategy order: TOML, then JSON.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain with a caller-supplied strategy list, tried in order. A
    /// deployment that supports a single convention passes just that one.
    pub fn with_strategies(strategies: Vec<Box<dyn LoadStrategy>>) -> Self {
        Self { strategies }
    }

    /// Load one candidate. The file is read exactly once per run.
    pub async fn load(&self, candidate: &Candidate) -> LoadOutcome {
        let text = match tokio::fs::read_to_string(&candidate.path).await {
            Ok(text) => text,
            Err(source) => {
                return LoadOutcome::Failed(LoadError::Io {
                    path: candidate.path.clone(),
                    source,
                })
            }
        };

        for strategy in &self.strategies {
            match strategy.attempt(candidate, &text) {
                StrategyOutcome::Loaded(value) => {
                    tracing::debug!(
                        path = %candidate.path.display(),
                        strategy = strategy.name(),
                        "Module loaded"
                    );
                    return LoadOutcome::Loaded(value);
                }
                StrategyOutcome::NotApplicable => continue,
                StrategyOutcome::Failed(error) => return LoadOutcome::Failed(error),
            }
        }
        LoadOutcome::NotAModule
    }
}
