use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};
use splash_core::types::Reservation;
use splash_service::booking::ReservationQuery;

use super::{RESERVATIONS_ROUTE_COMPONENT, params};
use crate::db_handler::get_gate_from_depot;
use crate::error::{AppResult, respond};

/// ## Summary
/// GET /api/reservations?session_id&from&to - The caller's reservations,
/// ordered by occurrence start. `from`/`to` are inclusive RFC 3339 instants.
#[handler]
async fn list_reservations(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    respond(res, StatusCode::OK, list(req, depot).await);
}

async fn list(req: &Request, depot: &Depot) -> AppResult<Vec<Reservation>> {
    let user_id = params::caller(depot)?;
    let query = ReservationQuery {
        session_id: params::optional_uuid_query(req, "session_id")?,
        from: params::optional_instant_query(req, "from")?,
        to: params::optional_instant_query(req, "to")?,
    };

    Ok(get_gate_from_depot(depot)?.list(user_id, query).await?)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(RESERVATIONS_ROUTE_COMPONENT).get(list_reservations)
}
