//! Filesystem-driven route module discovery and auto-mounting for axum.

pub mod config;
pub mod scan;
pub mod load;
pub mod classify;
pub mod routes;
pub mod app;
pub mod registrar;
pub mod discover;
pub mod error;

pub use app::introspect::ROUTE_TABLE_PATH;
pub use app::{App, RouteDescriptor, RouteRegistry};
pub use config::DiscoveryConfig;
pub use discover::{discover, discover_with, DiscoveryReport};
pub use error::{DiscoveryError, LoadError, MountError};
pub use routes::{RouteMethod, RouteSpec, RouterModule};
