//! Structural recognizers for loaded module values.
//!
//! Each predicate inspects one marker so the classification rules stay
//! testable in isolation. All checks are purely structural: no I/O, no
//! mutation.

use crate::load::ModuleValue;
use crate::routes::RouterModule;

/// The value carries a serving configuration: a `listener` table, the shape
/// a full application config uses to describe its own bind address.
pub(crate) fn has_listener(value: &ModuleValue) -> bool {
    value.get("listener").is_some_and(|v| v.is_object())
}

/// The value carries a route/middleware stack of its own.
pub(crate) fn has_stack(value: &ModuleValue) -> bool {
    value.get("routes").is_some_and(|v| v.is_array())
        || value.get("middleware").is_some_and(|v| v.is_array())
}

/// A full application config: it both serves and carries a stack. Such a
/// value is the host's own config file, never a module to mount onto it.
///
/// Heuristic by design: a module that declares both markers is skipped even
/// if the author meant it as a router.
pub fn is_application(value: &ModuleValue) -> bool {
    value.is_object() && has_listener(value) && has_stack(value)
}

/// Recognize a router module.
///
/// - `Ok(Some(module))` — the router marker (a `routes` array, no `listener`
///   table) is present and the value decodes.
/// - `Ok(None)` — the marker is absent; the value may still be a container.
/// - `Err(_)` — the marker is present but the value does not decode: the file
///   claims to be a router and is broken, which callers report instead of
///   silently skipping.
pub fn recognize_router(value: &ModuleValue) -> Result<Option<RouterModule>, serde_json::Error> {
    let marker = value
        .as_object()
        .is_some_and(|t| t.get("routes").is_some_and(|v| v.is_array()))
        && !has_listener(value);
    if !marker {
        return Ok(None);
    }
    serde_json::from_value(value.clone()).map(Some)
}

/// Recognize a container member: either a router directly or a router nested
/// under the member's `default` slot.
pub(crate) fn recognize_member(
    value: &ModuleValue,
) -> Result<Option<RouterModule>, serde_json::Error> {
    if let Some(module) = recognize_router(value)? {
        return Ok(Some(module));
    }
    match value.get("default") {
        Some(slot) => recognize_router(slot),
        None => Ok(None),
    }
}
