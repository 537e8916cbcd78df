use salvo::http::StatusCode;
use salvo::writing::Json;
use serde::Serialize;
use thiserror::Error;

use splash_core::error::CoreError;
use splash_db::error::DbError;
use splash_rfc::error::RfcError;
use splash_rfc::rfc::tz::ConversionError;
use splash_service::booking::Rejection;
use splash_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] DbError),

    #[error(transparent)]
    RfcError(#[from] RfcError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

/// Body of every successful JSON response.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl From<Rejection> for AppError {
    fn from(value: Rejection) -> Self {
        Self::ServiceError(value.into())
    }
}

const fn rejection_status(rejection: Rejection) -> StatusCode {
    match rejection {
        Rejection::InvalidRuleFormat
        | Rejection::UnknownTimezone
        | Rejection::NoMatchingOccurrence => StatusCode::UNPROCESSABLE_ENTITY,
        Rejection::InThePast => StatusCode::GONE,
        Rejection::SessionNotActive | Rejection::DuplicateReservation => StatusCode::CONFLICT,
        Rejection::NotFoundOrForbidden => StatusCode::NOT_FOUND,
    }
}

const fn rfc_status(err: &RfcError) -> (StatusCode, &'static str) {
    match err {
        RfcError::InvalidRuleFormat(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_rule_format"),
        RfcError::RuleLimitExceeded(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        RfcError::Conversion(ConversionError::UnknownTimezone(_)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "unknown_timezone")
        }
        RfcError::Conversion(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_datetime"),
        RfcError::CoreError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    }
}

const fn db_status(err: &DbError) -> (StatusCode, &'static str) {
    match err {
        DbError::PoolError(_) => (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    }
}

impl AppError {
    /// ## Summary
    /// HTTP status and stable client-facing code for this error.
    #[must_use]
    pub const fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::ServiceError(err) => match err {
                ServiceError::Rejected(rejection) => {
                    (rejection_status(*rejection), rejection.code())
                }
                ServiceError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "not_authenticated"),
                ServiceError::ValidationError(_)
                | ServiceError::CoreError(CoreError::ValidationError(_)) => {
                    (StatusCode::BAD_REQUEST, "validation_error")
                }
                ServiceError::RfcError(err) => rfc_status(err),
                ServiceError::DatabaseError(err) => db_status(err),
                ServiceError::CoreError(_)
                | ServiceError::InvalidConfiguration(_)
                | ServiceError::DieselError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                }
            },
            Self::DatabaseError(err) => db_status(err),
            Self::RfcError(err) => rfc_status(err),
            Self::CoreError(CoreError::ValidationError(_) | CoreError::ParseError(_))
            | Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::CoreError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// ## Summary
    /// Writes this error as a JSON response. Server-side failures are logged
    /// and their details withheld from the client.
    pub fn render(&self, res: &mut salvo::Response) {
        let (status, code) = self.status_and_code();
        let error = if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
            status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        } else {
            tracing::debug!(error = %self, code, "Request rejected");
            self.to_string()
        };

        res.status_code(status);
        res.render(Json(ErrorResponse { error, code }));
    }
}

/// ## Summary
/// Renders `result` as `{ "data": .. }` with `success` status, or as an error response.
pub fn respond<T: Serialize + Send>(
    res: &mut salvo::Response,
    success: StatusCode,
    result: AppResult<T>,
) {
    match result {
        Ok(data) => {
            res.status_code(success);
            res.render(Json(DataResponse { data }));
        }
        Err(err) => err.render(res),
    }
}
