//! Mounting of classified values, with per-router failure isolation.
//!
//! The registrar is the only pipeline stage that mutates the app. Every
//! router it touches produces exactly one [`RegistrationRecord`], so the
//! run report accounts for each candidate even when nothing was mounted.

use std::path::{Path, PathBuf};

use crate::app::App;
use crate::classify::Classification;
use crate::error::MountError;
use crate::routes::RouterModule;

/// How one router (or container member) fared.
#[derive(Debug)]
pub enum RegistrationOutcome {
    /// Mounted cleanly; `routes` is how many routes the module added.
    Mounted { routes: usize },
    /// Nothing mountable (application config or plain data).
    SkippedNotRoutable,
    /// The router was recognized but rejected at mount time.
    MountFailed(MountError),
}

/// One line of the discovery report.
#[derive(Debug)]
pub struct RegistrationRecord {
    /// Candidate file the value came from.
    pub path: PathBuf,
    /// Set when the candidate was a container and this record covers one
    /// named member.
    pub member: Option<String>,
    pub outcome: RegistrationOutcome,
}

impl RegistrationRecord {
    pub(crate) fn skipped(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            member: None,
            outcome: RegistrationOutcome::SkippedNotRoutable,
        }
    }
}

/// Mount whatever `classification` yielded onto `app`.
///
/// Container members mount independently in declaration order; one failing
/// member never stops its siblings.
pub fn register(
    app: &mut App,
    path: &Path,
    classification: Classification,
) -> Vec<RegistrationRecord> {
    match classification {
        Classification::Router(module) => vec![mount_one(app, path, None, &module)],
        Classification::Container(members) => members
            .into_iter()
            .map(|(name, module)| mount_one(app, path, Some(name), &module))
            .collect(),
        Classification::Application => {
            tracing::debug!(
                path = %path.display(),
                "Application config skipped, not mounting the app onto itself"
            );
            vec![RegistrationRecord::skipped(path)]
        }
        Classification::NotRoutable => {
            tracing::debug!(path = %path.display(), "No mountable router in candidate");
            vec![RegistrationRecord::skipped(path)]
        }
    }
}

fn mount_one(
    app: &mut App,
    path: &Path,
    member: Option<String>,
    module: &RouterModule,
) -> RegistrationRecord {
    let outcome = match app.mount(module) {
        Ok(routes) => {
            match &member {
                Some(name) => tracing::info!(
                    path = %path.display(),
                    member = %name,
                    routes,
                    "Mounted router"
                ),
                None => tracing::info!(path = %path.display(), routes, "Mounted router"),
            }
            RegistrationOutcome::Mounted { routes }
        }
        Err(error) => {
            tracing::error!(
                path = %path.display(),
                error = %error,
                "Failed to mount router"
            );
            RegistrationOutcome::MountFailed(error)
        }
    };
    RegistrationRecord {
        path: path.to_path_buf(),
        member,
        outcome,
    }
}
