//! Live, mount-ordered route table.
//!
//! The registry is the one piece of app state the diagnostic endpoint reads,
//! so it is cheaply cloneable and shared by `Arc`. Writers append whole
//! modules at a time; readers take a snapshot.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// One mounted route as reported by the diagnostic endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub method: String,
    pub path: String,
}

/// Shared table of every route the app has accepted, in mount order.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    inner: Arc<RwLock<Vec<RouteDescriptor>>>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one module's descriptors, preserving mount order.
    pub(crate) fn append(&self, descriptors: Vec<RouteDescriptor>) {
        // A panic while holding the lock cannot corrupt a Vec of plain
        // descriptors, so a poisoned lock is still readable.
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(descriptors);
    }

    /// Current contents, in mount order.
    pub fn snapshot(&self) -> Vec<RouteDescriptor> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
