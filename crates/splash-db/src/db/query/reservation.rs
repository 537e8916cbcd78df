//! Reservation (`user_sessions`) queries.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error};
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::schema::{sessions, user_locations, user_sessions};
use crate::model::reservation::{NewReservation, Reservation};

/// Optional narrowing applied when listing a user's reservations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub session_id: Option<uuid::Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// ## Summary
/// Builds the listing query for a user's reservations, ordered by instance time.
///
/// Reservations on sessions whose location the user no longer belongs to are
/// left out.
#[must_use]
pub fn for_user(
    user_id: uuid::Uuid,
    filter: ReservationFilter,
) -> user_sessions::BoxedQuery<'static, diesel::pg::Pg> {
    let visible_sessions = sessions::table
        .inner_join(user_locations::table.on(user_locations::location_id.eq(sessions::location_id)))
        .filter(user_locations::user_id.eq(user_id))
        .select(sessions::id);

    let mut query = user_sessions::table
        .filter(user_sessions::user_id.eq(user_id))
        .filter(user_sessions::session_id.eq_any(visible_sessions))
        .into_boxed();

    if let Some(session_id) = filter.session_id {
        query = query.filter(user_sessions::session_id.eq(session_id));
    }
    if let Some(from) = filter.from {
        query = query.filter(user_sessions::instance_datetime.ge(from));
    }
    if let Some(to) = filter.to {
        query = query.filter(user_sessions::instance_datetime.le(to));
    }

    query.order((
        user_sessions::instance_datetime.asc(),
        user_sessions::id.asc(),
    ))
}

/// ## Summary
/// Inserts a reservation row.
///
/// ## Errors
/// Returns a database error if the insert fails. A duplicate
/// `(user_id, session_id, instance_datetime)` surfaces as a unique violation;
/// see [`is_unique_violation`].
pub async fn insert(
    conn: &mut AsyncPgConnection,
    reservation: &NewReservation,
) -> diesel::QueryResult<Reservation> {
    diesel::insert_into(user_sessions::table)
        .values(reservation)
        .returning(Reservation::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list(
    conn: &mut AsyncPgConnection,
    user_id: uuid::Uuid,
    filter: ReservationFilter,
) -> diesel::QueryResult<Vec<Reservation>> {
    for_user(user_id, filter)
        .select(Reservation::as_select())
        .load(conn)
        .await
}

#[must_use]
pub fn is_unique_violation(error: &Error) -> bool {
    matches!(
        error,
        Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}
