use chrono::{DateTime, Utc};
use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Deserialize;
use splash_core::types::{Occurrence, Reservation, Session};

use super::{SESSIONS_ROUTE_COMPONENT, params};
use crate::db_handler::{get_catalog_from_depot, get_gate_from_depot};
use crate::error::{AppError, AppResult, respond};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub instance_datetime: DateTime<Utc>,
}

/// GET /api/sessions/{session_id}
#[handler]
async fn get_session(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    respond(res, StatusCode::OK, session(req, depot).await);
}

async fn session(req: &Request, depot: &Depot) -> AppResult<Session> {
    let user_id = params::caller(depot)?;
    let session_id = params::uuid_param(req, "session_id")?;

    Ok(get_catalog_from_depot(depot)?.session(user_id, session_id).await?)
}

/// ## Summary
/// GET /api/sessions/{session_id}/occurrences?from&to
#[handler]
async fn list_occurrences(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    respond(res, StatusCode::OK, session_occurrences(req, depot).await);
}

async fn session_occurrences(req: &Request, depot: &Depot) -> AppResult<Vec<Occurrence>> {
    let user_id = params::caller(depot)?;
    let session_id = params::uuid_param(req, "session_id")?;
    let (from, to) = params::date_window(req)?;

    Ok(get_catalog_from_depot(depot)?
        .session_occurrences(user_id, session_id, from, to)
        .await?)
}

/// ## Summary
/// POST /api/sessions/{session_id}/reservations - Reserve one occurrence.
///
/// The stored `instanceDatetime` is the instant from the request body.
///
/// ## Errors
/// Each refusal carries a distinct `code`: 404 `not_found_or_forbidden`,
/// 410 `in_the_past`, 409 `session_not_active` or `duplicate_reservation`,
/// 422 `no_matching_occurrence`, `invalid_rule_format` or `unknown_timezone`.
#[handler]
async fn create_reservation(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    respond(res, StatusCode::CREATED, reserve(req, depot).await);
}

async fn reserve(req: &mut Request, depot: &Depot) -> AppResult<Reservation> {
    let user_id = params::caller(depot)?;
    let session_id = params::uuid_param(req, "session_id")?;
    let body: CreateReservationRequest = req.parse_json().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to parse reservation request");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    Ok(get_gate_from_depot(depot)?
        .reserve(session_id, user_id, body.instance_datetime)
        .await?)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SESSIONS_ROUTE_COMPONENT).push(
        Router::with_path("{session_id}")
            .get(get_session)
            .push(Router::with_path("occurrences").get(list_occurrences))
            .push(Router::with_path("reservations").post(create_reservation)),
    )
}
