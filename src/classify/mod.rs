//! Structural classification of loaded module values.
//!
//! # Responsibilities
//! - Decide what a loaded value *is*: a router, a full application config, a
//!   container of routers, or nothing mountable
//! - Apply the rules in a fixed priority order so a value gets exactly one
//!   classification
//!
//! # Classification Rules (first match wins)
//! 1. Application config (`listener` table plus a `routes`/`middleware`
//!    stack) — inert, never mounted
//! 2. Router (`routes` array, no `listener`) — decoded as [`RouterModule`]
//! 3. Router under a top-level `default` slot
//! 4. Container — each top-level member checked against rules 2–3 in
//!    declaration order; qualifying members collected by name
//! 5. Everything else is not routable

pub mod markers;

pub use markers::{is_application, recognize_router};

use std::path::Path;

use crate::load::ModuleValue;
use crate::routes::RouterModule;

/// What a loaded value turned out to be.
#[derive(Debug)]
pub enum Classification {
    /// A mountable router module.
    Router(RouterModule),
    /// The application's own config. Recognized so it is skipped, never
    /// mounted onto itself.
    Application,
    /// A table whose named members are themselves router modules, in
    /// declaration order.
    Container(Vec<(String, RouterModule)>),
    /// Valid document, nothing mountable in it.
    NotRoutable,
}

/// Classify one loaded value. `origin` is the file it came from, used only
/// for log context.
pub fn classify(origin: &Path, value: &ModuleValue) -> Classification {
    if markers::is_application(value) {
        tracing::debug!(
            path = %origin.display(),
            "Value is an application config, not mounting"
        );
        return Classification::Application;
    }

    match markers::recognize_router(value) {
        Ok(Some(module)) => return Classification::Router(module),
        Err(error) => {
            tracing::warn!(
                path = %origin.display(),
                error = %error,
                "Router marker present but module does not decode"
            );
            return Classification::NotRoutable;
        }
        Ok(None) => {}
    }

    if let Some(slot) = value.get("default") {
        match markers::recognize_router(slot) {
            Ok(Some(module)) => return Classification::Router(module),
            Err(error) => {
                tracing::warn!(
                    path = %origin.display(),
                    error = %error,
                    "Default slot carries a router marker but does not decode"
                );
                return Classification::NotRoutable;
            }
            Ok(None) => {}
        }
    }

    if let Some(table) = value.as_object() {
        let mut members = Vec::new();
        for (name, member) in table {
            match markers::recognize_member(member) {
                Ok(Some(module)) => members.push((name.clone(), module)),
                Ok(None) => {}
                // A broken member does not poison its siblings.
                Err(error) => {
                    tracing::warn!(
                        path = %origin.display(),
                        member = %name,
                        error = %error,
                        "Container member carries a router marker but does not decode"
                    );
                }
            }
        }
        if !members.is_empty() {
            return Classification::Container(members);
        }
    }

    Classification::NotRoutable
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify_value(value: &ModuleValue) -> Classification {
        classify(Path::new("module.toml"), value)
    }

    #[test]
    fn test_application_config_wins_over_router_marker() {
        let value = json!({
            "listener": { "address": "127.0.0.1", "port": 9000 },
            "routes": [ { "path": "/health" } ]
        });
        assert!(matches!(classify_value(&value), Classification::Application));
    }

    #[test]
    fn test_router_module() {
        let value = json!({
            "prefix": "/api",
            "routes": [ { "path": "/users" }, { "path": "/items" } ]
        });
        match classify_value(&value) {
            Classification::Router(module) => assert_eq!(module.routes.len(), 2),
            other => panic!("expected Router, got {other:?}"),
        }
    }

    #[test]
    fn test_router_under_default_slot() {
        let value = json!({
            "default": { "routes": [ { "path": "/nested" } ] }
        });
        match classify_value(&value) {
            Classification::Router(module) => {
                assert_eq!(module.routes[0].path, "/nested");
            }
            other => panic!("expected Router, got {other:?}"),
        }
    }

    #[test]
    fn test_container_collects_qualifying_members_in_order() {
        let value = json!({
            "users": { "routes": [ { "path": "/u" } ] },
            "limit": 42,
            "items": { "routes": [ { "path": "/i" } ] }
        });
        match classify_value(&value) {
            Classification::Container(members) => {
                let names: Vec<&str> = members.iter().map(|(n, _)| n.as_str()).collect();
                assert_eq!(names, ["users", "items"]);
            }
            other => panic!("expected Container, got {other:?}"),
        }
    }

    #[test]
    fn test_container_member_with_default_slot() {
        let value = json!({
            "api": { "default": { "routes": [ { "path": "/x" } ] } }
        });
        assert!(matches!(
            classify_value(&value),
            Classification::Container(members) if members.len() == 1
        ));
    }

    #[test]
    fn test_broken_container_member_skipped_others_kept() {
        let value = json!({
            "bad": { "routes": [ { "method": "GET" } ] },
            "good": { "routes": [ { "path": "/ok" } ] }
        });
        match classify_value(&value) {
            Classification::Container(members) => {
                assert_eq!(members.len(), 1);
                assert_eq!(members[0].0, "good");
            }
            other => panic!("expected Container, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_table_not_routable() {
        assert!(matches!(
            classify_value(&json!({})),
            Classification::NotRoutable
        ));
    }

    #[test]
    fn test_scalars_and_arrays_not_routable() {
        for value in [json!(3), json!("text"), json!([1, 2]), json!(null)] {
            assert!(matches!(
                classify_value(&value),
                Classification::NotRoutable
            ));
        }
    }

    #[test]
    fn test_broken_router_marker_not_routable() {
        let value = json!({ "routes": [ { "status": 200 } ] });
        assert!(matches!(
            classify_value(&value),
            Classification::NotRoutable
        ));
    }

    #[test]
    fn test_listener_without_stack_not_routable() {
        let value = json!({ "listener": { "port": 1 } });
        assert!(matches!(
            classify_value(&value),
            Classification::NotRoutable
        ));
    }
}
