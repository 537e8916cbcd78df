//! Depot helpers for the authenticated caller.

use crate::auth::AuthenticatedUser;
use crate::error::{ServiceError, ServiceResult};

pub mod depot_keys {
    pub const AUTHENTICATED_USER: &str = "__authenticated_user";
}

/// Get the authenticated user from the depot.
///
/// ## Errors
///
/// Returns `NotAuthenticated` if the auth middleware did not store a user.
pub fn get_user_from_depot(depot: &salvo::Depot) -> ServiceResult<AuthenticatedUser> {
    depot
        .get::<AuthenticatedUser>(depot_keys::AUTHENTICATED_USER)
        .copied()
        .map_err(|_e| ServiceError::NotAuthenticated)
}
