//! The discovery pipeline entry point.
//!
//! # Data Flow
//! ```text
//! DiscoveryConfig
//!     → resolve + canonicalize root
//!     → scan (blocking walk, ordered candidates)
//!     → load (buffered, order-preserving)
//!     → classify + register (serial, scanner order)
//!     → optional route-table attachment
//!     → DiscoveryReport
//! ```
//!
//! # Design Decisions
//! - Only a directory read failure is fatal; every per-candidate problem is
//!   logged and turns into a report record
//! - Loads overlap up to `LOAD_CONCURRENCY`, but `buffered` replays results
//!   in scanner order, so mounting stays deterministic
//! - Registration runs serially on the one `&mut App`; there are no
//!   concurrent mounts to reason about

use std::path::PathBuf;

use futures_util::stream::{self, StreamExt};

use crate::app::{introspect, App};
use crate::classify;
use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use crate::load::{LoadOutcome, Loader};
use crate::registrar::{self, RegistrationOutcome, RegistrationRecord};
use crate::scan::{self, Candidate};

/// How many candidate files may be loading at once.
const LOAD_CONCURRENCY: usize = 8;

/// Everything one discovery run did.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    /// One record per router the run considered; at least one per candidate.
    pub records: Vec<RegistrationRecord>,
    /// Candidate files the scanner emitted.
    pub candidates: usize,
}

impl DiscoveryReport {
    /// Routers mounted successfully.
    pub fn mounted(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, RegistrationOutcome::Mounted { .. }))
            .count()
    }

    /// Total routes added across all mounted routers.
    pub fn mounted_routes(&self) -> usize {
        self.records
            .iter()
            .map(|r| match r.outcome {
                RegistrationOutcome::Mounted { routes } => routes,
                _ => 0,
            })
            .sum()
    }

    /// Candidates and members with nothing mountable.
    pub fn skipped(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, RegistrationOutcome::SkippedNotRoutable))
            .count()
    }

    /// Routers rejected at mount time.
    pub fn failed(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, RegistrationOutcome::MountFailed(_)))
            .count()
    }
}

/// Discover route modules under the configured root and mount them onto
/// `app`, with the default TOML-then-JSON loading chain.
pub async fn discover(
    app: &mut App,
    config: DiscoveryConfig,
) -> Result<DiscoveryReport, DiscoveryError> {
    discover_with(app, config, &Loader::new()).await
}

/// Like [`discover`], with a caller-supplied loading chain.
pub async fn discover_with(
    app: &mut App,
    config: DiscoveryConfig,
    loader: &Loader,
) -> Result<DiscoveryReport, DiscoveryError> {
    let root = resolve_root(&config)?;
    tracing::info!(root = %root.display(), "Starting route module discovery");

    let scan_root = root.clone();
    let scan_config = config.clone();
    let candidates = tokio::task::spawn_blocking(move || scan::scan(&scan_root, &scan_config))
        .await
        .map_err(|source| DiscoveryError::DirectoryRead {
            path: root.clone(),
            source: std::io::Error::other(source),
        })??;

    let outcomes: Vec<(Candidate, LoadOutcome)> = stream::iter(candidates)
        .map(|candidate| async move {
            let outcome = loader.load(&candidate).await;
            (candidate, outcome)
        })
        .buffered(LOAD_CONCURRENCY)
        .collect()
        .await;

    let mut report = DiscoveryReport {
        records: Vec::new(),
        candidates: outcomes.len(),
    };
    for (candidate, outcome) in outcomes {
        match outcome {
            LoadOutcome::Loaded(value) => {
                let classification = classify::classify(&candidate.path, &value);
                report
                    .records
                    .extend(registrar::register(app, &candidate.path, classification));
            }
            LoadOutcome::NotAModule => {
                tracing::debug!(
                    path = %candidate.path.display(),
                    "No loading strategy recognized the file"
                );
                report
                    .records
                    .push(RegistrationRecord::skipped(&candidate.path));
            }
            LoadOutcome::Failed(error) => {
                tracing::warn!(
                    path = %candidate.path.display(),
                    error = %error,
                    "Failed to load candidate"
                );
                report
                    .records
                    .push(RegistrationRecord::skipped(&candidate.path));
            }
        }
    }

    if config.enable_route_table {
        // A collision here means a module already took the table's path.
        // Discovery still succeeded; the endpoint just cannot be served.
        if let Err(error) = introspect::attach_route_table(app) {
            tracing::error!(error = %error, "Failed to attach route table endpoint");
        }
    }

    tracing::info!(
        candidates = report.candidates,
        mounted = report.mounted(),
        routes = report.mounted_routes(),
        failed = report.failed(),
        "Discovery complete"
    );
    Ok(report)
}

/// Resolve the scan root: the configured path or the current directory,
/// canonicalized. A root that cannot be resolved is the one fatal case.
fn resolve_root(config: &DiscoveryConfig) -> Result<PathBuf, DiscoveryError> {
    let root = match &config.project_path {
        Some(path) => path.clone(),
        None => {
            std::env::current_dir().map_err(|source| DiscoveryError::DirectoryRead {
                path: PathBuf::from("."),
                source,
            })?
        }
    };
    root.canonicalize()
        .map_err(|source| DiscoveryError::DirectoryRead {
            path: root.clone(),
            source,
        })
}
