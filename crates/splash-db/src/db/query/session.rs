//! Session queries. Every read is scoped to locations the caller belongs to.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::schema::{locations, sessions, user_locations};
use crate::model::location::Location;
use crate::model::session::{NewSession, Session};

/// ## Summary
/// Returns a query for the sessions of a location, ordered by creation.
#[must_use]
pub fn by_location(location_id: uuid::Uuid) -> sessions::BoxedQuery<'static, diesel::pg::Pg> {
    sessions::table
        .filter(sessions::location_id.eq(location_id))
        .order((sessions::created_at.asc(), sessions::id.asc()))
        .into_boxed()
}

/// ## Summary
/// Loads a session together with its location, provided the user is a
/// member of that location.
///
/// ## Returns
/// `Ok(None)` when the session does not exist or the user cannot see it.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_for_member(
    conn: &mut AsyncPgConnection,
    user_id: uuid::Uuid,
    session_id: uuid::Uuid,
) -> diesel::QueryResult<Option<(Session, Location)>> {
    sessions::table
        .inner_join(locations::table)
        .inner_join(user_locations::table.on(user_locations::location_id.eq(locations::id)))
        .filter(sessions::id.eq(session_id))
        .filter(user_locations::user_id.eq(user_id))
        .select((Session::as_select(), Location::as_select()))
        .first(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_for_location(
    conn: &mut AsyncPgConnection,
    location_id: uuid::Uuid,
) -> diesel::QueryResult<Vec<Session>> {
    by_location(location_id)
        .select(Session::as_select())
        .load(conn)
        .await
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert(
    conn: &mut AsyncPgConnection,
    session: &NewSession<'_>,
) -> diesel::QueryResult<Session> {
    diesel::insert_into(sessions::table)
        .values(session)
        .returning(Session::as_returning())
        .get_result(conn)
        .await
}
