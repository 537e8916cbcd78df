use serde::Serialize;
use splash_core::config::{AuthMethod, Settings};

use crate::error::{ServiceError, ServiceResult};

/// The caller on whose behalf a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user_id: uuid::Uuid,
}

fn authenticate_single_user(config: &Settings) -> ServiceResult<AuthenticatedUser> {
    let single_user = config
        .auth
        .single_user
        .as_ref()
        .ok_or(ServiceError::InvalidConfiguration(
            "Single user config is missing".to_string(),
        ))?;

    Ok(AuthenticatedUser {
        user_id: single_user.user_id,
    })
}

/// Trusts the user id a reverse proxy placed in the configured header.
fn authenticate_proxy(req: &salvo::Request, config: &Settings) -> ServiceResult<AuthenticatedUser> {
    let proxy = config
        .auth
        .proxy
        .as_ref()
        .ok_or(ServiceError::InvalidConfiguration(
            "Proxy auth config is missing".to_string(),
        ))?;

    let value = req
        .headers()
        .get(proxy.header.as_str())
        .ok_or(ServiceError::NotAuthenticated)?
        .to_str()
        .map_err(|_e| ServiceError::NotAuthenticated)?;

    let user_id = value.trim().parse::<uuid::Uuid>().map_err(|e| {
        tracing::debug!(header = %proxy.header, error = %e, "Proxy user header is not a UUID");
        ServiceError::NotAuthenticated
    })?;

    Ok(AuthenticatedUser { user_id })
}

/// ## Summary
/// Authenticate a request based on the configured authentication method.
///
/// ## Errors
/// Returns `NotAuthenticated` if the request carries no usable identity, or
/// `InvalidConfiguration` if the configured method has no settings.
#[tracing::instrument(skip(req, config))]
pub fn authenticate(req: &salvo::Request, config: &Settings) -> ServiceResult<AuthenticatedUser> {
    tracing::trace!(auth_method = ?config.auth.method, "Authenticating request");

    match config.auth.method {
        AuthMethod::SingleUser => authenticate_single_user(config),
        AuthMethod::Proxy => authenticate_proxy(req, config),
    }
}
