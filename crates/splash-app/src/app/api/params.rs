//! Request parsing shared by the API handlers.

use chrono::{DateTime, NaiveDate, Utc};
use salvo::{Depot, Request};

use crate::error::{AppError, AppResult};
use splash_service::auth::get_user_from_depot;

/// Id of the authenticated caller.
pub fn caller(depot: &Depot) -> AppResult<uuid::Uuid> {
    Ok(get_user_from_depot(depot)?.user_id)
}

pub fn uuid_param(req: &Request, name: &str) -> AppResult<uuid::Uuid> {
    let raw = req
        .param::<String>(name)
        .ok_or_else(|| AppError::BadRequest(format!("Missing path parameter {name}")))?;
    raw.parse()
        .map_err(|_e| AppError::BadRequest(format!("{name} must be a UUID")))
}

pub fn optional_uuid_query(req: &Request, name: &str) -> AppResult<Option<uuid::Uuid>> {
    req.query::<String>(name)
        .map(|raw| {
            raw.parse()
                .map_err(|_e| AppError::BadRequest(format!("{name} must be a UUID")))
        })
        .transpose()
}

fn optional_date_query(req: &Request, name: &str) -> AppResult<Option<NaiveDate>> {
    req.query::<String>(name)
        .map(|raw| {
            raw.parse().map_err(|_e| {
                AppError::BadRequest(format!("{name} must be a calendar date (YYYY-MM-DD)"))
            })
        })
        .transpose()
}

pub fn optional_instant_query(req: &Request, name: &str) -> AppResult<Option<DateTime<Utc>>> {
    req.query::<String>(name)
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|instant| instant.with_timezone(&Utc))
                .map_err(|_e| AppError::BadRequest(format!("{name} must be an RFC 3339 instant")))
        })
        .transpose()
}

/// ## Summary
/// Reads the `from`/`to` calendar window. `from` is required; `to` defaults
/// to `from`, giving a single day.
pub fn date_window(req: &Request) -> AppResult<(NaiveDate, NaiveDate)> {
    let from = optional_date_query(req, "from")?
        .ok_or_else(|| AppError::BadRequest("Missing query parameter from".to_string()))?;
    let to = optional_date_query(req, "to")?.unwrap_or(from);
    Ok((from, to))
}
