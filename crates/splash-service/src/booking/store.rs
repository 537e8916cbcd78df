use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use splash_core::types::{Location, NewReservation, Reservation, Session, SessionContext};

use crate::booking::Rejection;
use crate::error::ServiceResult;

/// Decision run against the loaded session inside the reservation transaction.
pub type ReservationCheck<'a> = &'a (dyn Fn(&SessionContext) -> Result<(), Rejection> + Send + Sync);

/// A location together with all of its sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSessions {
    pub location: Location,
    pub sessions: Vec<Session>,
}

/// Narrowing for a user's reservation listing. Bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReservationQuery {
    pub session_id: Option<uuid::Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Storage seam for sessions and reservations.
///
/// Every lookup is scoped to locations `user_id` is a member of. Anything the
/// user cannot see is reported the same way as anything that does not exist.
pub trait BookingStore: Send + Sync {
    /// Loads a session and its location.
    fn find_session<'a>(
        &'a self,
        user_id: uuid::Uuid,
        session_id: uuid::Uuid,
    ) -> BoxFuture<'a, ServiceResult<Option<SessionContext>>>;

    /// Loads a location and its sessions.
    fn find_location<'a>(
        &'a self,
        user_id: uuid::Uuid,
        location_id: uuid::Uuid,
    ) -> BoxFuture<'a, ServiceResult<Option<LocationSessions>>>;

    /// Persists a new session. The user must belong to its location.
    fn insert_session<'a>(
        &'a self,
        user_id: uuid::Uuid,
        session: Session,
    ) -> BoxFuture<'a, ServiceResult<Session>>;

    /// Loads the session, runs `check` on it and inserts the reservation, all
    /// atomically. A missing session is `Rejection::NotFoundOrForbidden` and a
    /// uniqueness conflict is `Rejection::DuplicateReservation`.
    fn reserve<'a>(
        &'a self,
        request: NewReservation,
        check: ReservationCheck<'a>,
    ) -> BoxFuture<'a, ServiceResult<Reservation>>;

    /// The user's reservations ordered by `instance_datetime`, limited to
    /// locations they still belong to.
    fn list_reservations<'a>(
        &'a self,
        user_id: uuid::Uuid,
        query: ReservationQuery,
    ) -> BoxFuture<'a, ServiceResult<Vec<Reservation>>>;
}

impl<T: BookingStore + ?Sized> BookingStore for std::sync::Arc<T> {
    fn find_session<'a>(
        &'a self,
        user_id: uuid::Uuid,
        session_id: uuid::Uuid,
    ) -> BoxFuture<'a, ServiceResult<Option<SessionContext>>> {
        (**self).find_session(user_id, session_id)
    }

    fn find_location<'a>(
        &'a self,
        user_id: uuid::Uuid,
        location_id: uuid::Uuid,
    ) -> BoxFuture<'a, ServiceResult<Option<LocationSessions>>> {
        (**self).find_location(user_id, location_id)
    }

    fn insert_session<'a>(
        &'a self,
        user_id: uuid::Uuid,
        session: Session,
    ) -> BoxFuture<'a, ServiceResult<Session>> {
        (**self).insert_session(user_id, session)
    }

    fn reserve<'a>(
        &'a self,
        request: NewReservation,
        check: ReservationCheck<'a>,
    ) -> BoxFuture<'a, ServiceResult<Reservation>> {
        (**self).reserve(request, check)
    }

    fn list_reservations<'a>(
        &'a self,
        user_id: uuid::Uuid,
        query: ReservationQuery,
    ) -> BoxFuture<'a, ServiceResult<Vec<Reservation>>> {
        (**self).list_reservations(user_id, query)
    }
}
