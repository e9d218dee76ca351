//! Mount handle over the axum application being assembled.
//!
//! # Responsibilities
//! - Own the `axum::Router` under construction plus the live route registry
//! - Mount router modules transactionally: a module either lands completely
//!   or leaves the router, the registry, and the claimed-route set untouched
//! - Contain axum's panicking route registration so one bad module can never
//!   abort the whole run
//!
//! # Design Decisions
//! - Duplicates are rejected by a pre-check against every route this app has
//!   ever accepted (listed or not), instead of letting axum panic
//! - The merge runs against a clone of the router inside `catch_unwind`; the
//!   original is replaced only on success, which is what makes mounts atomic
//! - The registry records mounted modules only; infrastructure routes are
//!   claimed (so modules cannot collide with them) but never listed

pub mod introspect;
pub mod registry;

pub use registry::{RouteDescriptor, RouteRegistry};

use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};

use axum::routing::{self, MethodRouter};
use axum::Router;

use crate::error::MountError;
use crate::routes::{CannedResponse, RouteMethod, RouterModule};

/// The application routers get mounted onto.
pub struct App {
    router: Router,
    registry: RouteRegistry,
    /// Every method+path accepted so far, including unlisted infrastructure
    /// routes. The duplicate pre-check runs against this, not the registry.
    claimed: BTreeSet<(RouteMethod, String)>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            registry: RouteRegistry::new(),
            claimed: BTreeSet::new(),
        }
    }

    /// Handle to the live registry. Clones share the same table.
    pub fn registry(&self) -> RouteRegistry {
        self.registry.clone()
    }

    /// Currently mounted routes, in mount order.
    pub fn routes(&self) -> Vec<RouteDescriptor> {
        self.registry.snapshot()
    }

    /// Mount one router module. Returns the number of routes added.
    ///
    /// Every route is validated before anything is touched; the first
    /// invalid or duplicate route rejects the whole module.
    pub fn mount(&mut self, module: &RouterModule) -> Result<usize, MountError> {
        let planned = self.plan(module)?;

        let merged = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut sub = Router::new();
            for (method, path, canned) in &planned {
                let canned = canned.clone();
                sub = sub.route(
                    path,
                    routing::on(method.filter(), move || async move { canned }),
                );
            }
            self.router.clone().merge(sub)
        }));

        match merged {
            Ok(router) => {
                self.router = router;
                let count = planned.len();
                let descriptors = planned
                    .iter()
                    .map(|(method, path, _)| RouteDescriptor {
                        method: method.as_str().to_string(),
                        path: path.clone(),
                    })
                    .collect();
                self.claimed
                    .extend(planned.into_iter().map(|(method, path, _)| (method, path)));
                self.registry.append(descriptors);
                Ok(count)
            }
            Err(payload) => Err(MountError::Rejected {
                detail: panic_detail(payload),
            }),
        }
    }

    /// Validate the whole module up front. Nothing is mutated here.
    fn plan(
        &self,
        module: &RouterModule,
    ) -> Result<Vec<(RouteMethod, String, CannedResponse)>, MountError> {
        let mut planned: Vec<(RouteMethod, String, CannedResponse)> = Vec::new();
        for spec in &module.routes {
            let path = join_path(module.prefix.as_deref(), &spec.path);
            validate_path(&path)?;
            let canned = spec.canned()?;

            let duplicate = self.claimed.contains(&(spec.method, path.clone()))
                || planned
                    .iter()
                    .any(|(method, existing, _)| *method == spec.method && *existing == path);
            if duplicate {
                return Err(MountError::DuplicateRoute {
                    method: spec.method,
                    path,
                });
            }
            planned.push((spec.method, path, canned));
        }
        Ok(planned)
    }

    /// Attach an infrastructure route: claimed, so modules cannot collide
    /// with it, but never recorded in the registry.
    pub(crate) fn attach_unlisted(
        &mut self,
        method: RouteMethod,
        path: &str,
        route: MethodRouter,
    ) -> Result<(), MountError> {
        validate_path(path)?;
        if self.claimed.contains(&(method, path.to_string())) {
            return Err(MountError::DuplicateRoute {
                method,
                path: path.to_string(),
            });
        }

        let merged =
            panic::catch_unwind(AssertUnwindSafe(|| self.router.clone().route(path, route)));
        match merged {
            Ok(router) => {
                self.router = router;
                self.claimed.insert((method, path.to_string()));
                Ok(())
            }
            Err(payload) => Err(MountError::Rejected {
                detail: panic_detail(payload),
            }),
        }
    }

    /// Finalize for serving.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Join an optional module prefix with a route path.
fn join_path(prefix: Option<&str>, path: &str) -> String {
    match prefix {
        None | Some("") => path.to_string(),
        Some(prefix) => {
            let base = prefix.trim_end_matches('/');
            if path.is_empty() {
                base.to_string()
            } else if path.starts_with('/') {
                format!("{base}{path}")
            } else {
                format!("{base}/{path}")
            }
        }
    }
}

/// Shape checks for a full route path. Conflicts axum itself detects (like
/// overlapping parameter names) are left to the contained merge.
fn validate_path(path: &str) -> Result<(), MountError> {
    if !path.starts_with('/') {
        return Err(MountError::InvalidPath {
            path: path.to_string(),
            detail: "must begin with '/'",
        });
    }
    if path.chars().any(char::is_whitespace) {
        return Err(MountError::InvalidPath {
            path: path.to_string(),
            detail: "contains whitespace",
        });
    }
    let mut depth = 0i32;
    for c in path.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
        if !(0..=1).contains(&depth) {
            break;
        }
    }
    if depth != 0 {
        return Err(MountError::InvalidPath {
            path: path.to_string(),
            detail: "unbalanced parameter braces",
        });
    }
    Ok(())
}

fn panic_detail(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "route registration panicked".to_string()
    }
}
