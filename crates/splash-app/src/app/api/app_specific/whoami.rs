use salvo::http::StatusCode;
use salvo::{Depot, Response, Router, handler};

use crate::error::respond;
use splash_service::auth::get_user_from_depot;

/// ## Summary
/// Returns the authenticated caller, as stored by the `AuthMiddleware`.
#[handler]
async fn whoami(depot: &Depot, res: &mut Response) {
    respond(
        res,
        StatusCode::OK,
        get_user_from_depot(depot).map_err(Into::into),
    );
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("whoami").get(whoami)
}
