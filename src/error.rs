//! Error taxonomy for the discovery pipeline.
//!
//! Three classes with three fates:
//! - [`DiscoveryError`] is fatal and crosses the public boundary; it aborts a
//!   run before anything was mounted.
//! - [`LoadError`] and [`MountError`] are recovered per candidate: logged,
//!   recorded, and the run moves on to the next file or router.
//! - "Wrong format convention" is not an error at all; it is an ordinary
//!   branch of the loader's outcome enums.

use std::path::PathBuf;

use thiserror::Error;

use crate::routes::RouteMethod;

/// Fatal discovery failure. The only error [`discover`](crate::discover)
/// propagates to the caller.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A directory in the tree (or the root itself) could not be listed.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A candidate file failed to load. Recovered: the candidate is skipped and
/// the rest of the run proceeds.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file itself could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file declares the TOML convention but does not parse.
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The file declares the JSON convention but does not parse.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A classified router was rejected while mounting. Recovered: that router is
/// skipped, subsequent routers still mount.
#[derive(Debug, Error)]
pub enum MountError {
    /// A route path (after joining the module prefix) is not mountable.
    #[error("invalid route path {path:?}: {detail}")]
    InvalidPath { path: String, detail: &'static str },

    /// A route status code is outside the valid HTTP range.
    #[error("invalid response status {status}")]
    InvalidStatus { status: u16 },

    /// A declared response header has an invalid name or value.
    #[error("invalid response header {name:?}")]
    InvalidHeader { name: String },

    /// The same method and path are already registered on the application,
    /// or appear twice within the module.
    #[error("duplicate route {method} {path}")]
    DuplicateRoute { method: RouteMethod, path: String },

    /// The underlying router rejected the registration.
    #[error("route registration rejected: {detail}")]
    Rejected { detail: String },
}
