//! Diagnostic route-table endpoint.
//!
//! One GET handler at a fixed path that serializes the live registry. The
//! handler reads at request time, so routers mounted after attachment show
//! up in later responses without re-attaching anything.

use axum::extract::State;
use axum::routing::get;
use axum::Json;

use super::registry::{RouteDescriptor, RouteRegistry};
use super::App;
use crate::error::MountError;
use crate::routes::RouteMethod;

/// Where the route table is served.
pub const ROUTE_TABLE_PATH: &str = "/_routes";

/// Attach `GET /_routes` to the app. The route is claimed but unlisted, so
/// the table never reports itself.
pub fn attach_route_table(app: &mut App) -> Result<(), MountError> {
    let registry = app.registry();
    app.attach_unlisted(
        RouteMethod::Get,
        ROUTE_TABLE_PATH,
        get(route_table).with_state(registry),
    )
}

async fn route_table(State(registry): State<RouteRegistry>) -> Json<Vec<RouteDescriptor>> {
    Json(registry.snapshot())
}
