use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};
use splash_core::types::{Occurrence, Session};
use splash_service::session::SessionDraft;

use super::{LOCATIONS_ROUTE_COMPONENT, params};
use crate::db_handler::get_catalog_from_depot;
use crate::error::{AppError, AppResult, respond};

/// ## Summary
/// GET /api/locations/{location_id}/occurrences?from&to - Bookable occurrences
/// of every active session at the location.
#[handler]
async fn list_occurrences(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    respond(res, StatusCode::OK, location_occurrences(req, depot).await);
}

async fn location_occurrences(req: &Request, depot: &Depot) -> AppResult<Vec<Occurrence>> {
    let user_id = params::caller(depot)?;
    let location_id = params::uuid_param(req, "location_id")?;
    let (from, to) = params::date_window(req)?;

    Ok(get_catalog_from_depot(depot)?
        .location_occurrences(user_id, location_id, from, to)
        .await?)
}

/// GET /api/locations/{location_id}/sessions - Sessions at the location, any status.
#[handler]
async fn list_sessions(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    respond(res, StatusCode::OK, location_sessions(req, depot).await);
}

async fn location_sessions(req: &Request, depot: &Depot) -> AppResult<Vec<Session>> {
    let user_id = params::caller(depot)?;
    let location_id = params::uuid_param(req, "location_id")?;

    Ok(get_catalog_from_depot(depot)?
        .sessions_at_location(user_id, location_id)
        .await?)
}

/// ## Summary
/// POST /api/locations/{location_id}/sessions - Create a session. `status`
/// is optional and defaults to `draft`.
///
/// ## Errors
/// Returns HTTP 400 for a malformed or invalid draft, 404 if the caller is not
/// a member of the location, 422 for an unusable recurrence or timezone.
#[handler]
async fn create_session(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    respond(res, StatusCode::CREATED, create(req, depot).await);
}

async fn create(req: &mut Request, depot: &Depot) -> AppResult<Session> {
    let user_id = params::caller(depot)?;
    let location_id = params::uuid_param(req, "location_id")?;
    let draft: SessionDraft = req.parse_json().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to parse session draft");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    Ok(get_catalog_from_depot(depot)?
        .create_session(user_id, location_id, draft)
        .await?)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(LOCATIONS_ROUTE_COMPONENT).push(
        Router::with_path("{location_id}")
            .push(Router::with_path("occurrences").get(list_occurrences))
            .push(
                Router::with_path("sessions")
                    .get(list_sessions)
                    .post(create_session),
            ),
    )
}
