mod app_specific;
mod locations;
mod params;
mod reservations;
mod sessions;

use salvo::Router;

use crate::middleware::auth::AuthMiddleware;

// Re-export route constants from core
pub use splash_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, APP_ROUTE_COMPONENT, LOCATIONS_ROUTE_COMPONENT,
    RESERVATIONS_ROUTE_COMPONENT, SESSIONS_ROUTE_COMPONENT,
};

/// ## Summary
/// Constructs the main API router. Everything except the healthcheck
/// requires an authenticated caller.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::public_routes())
        .push(
            Router::new()
                .hoop(AuthMiddleware)
                .push(app_specific::routes())
                .push(locations::routes())
                .push(sessions::routes())
                .push(reservations::routes()),
        )
}
