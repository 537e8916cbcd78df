use salvo::Depot;

use crate::config::get_config_from_depot;
use crate::error::AppError;
use splash_service::auth::{authenticate, depot_keys};

/// ## Summary
/// Middleware handler for authentication.
/// Requests without a usable identity are answered with 401 and go no further.
pub struct AuthMiddleware;

/// ## Summary
/// Authenticates the request and stores the caller in the depot.
///
/// ## Side Effects
/// Inserts the `AuthenticatedUser` under `depot_keys::AUTHENTICATED_USER` for
/// downstream handlers.
///
/// ## Errors
/// Responds 401 if authentication fails and 500 if configuration is missing.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                e.render(res);
                ctrl.skip_rest();
                return;
            }
        };

        match authenticate(req, &config) {
            Ok(user) => {
                tracing::debug!(user_id = %user.user_id, "User authenticated");
                depot.insert(depot_keys::AUTHENTICATED_USER, user);
            }
            Err(err) => {
                AppError::from(err).render(res);
                ctrl.skip_rest();
            }
        }
    }
}
