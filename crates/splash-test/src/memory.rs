use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use futures::future::BoxFuture;
use splash_core::types::{Location, NewReservation, Reservation, Session, SessionContext};
use splash_service::booking::{
    BookingStore, LocationSessions, Rejection, ReservationCheck, ReservationQuery,
};
use splash_service::error::ServiceResult;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    locations: HashMap<uuid::Uuid, Location>,
    members: HashSet<(uuid::Uuid, uuid::Uuid)>,
    sessions: HashMap<uuid::Uuid, Session>,
    reservations: Vec<Reservation>,
    next_reservation_id: i64,
}

impl State {
    fn is_member(&self, user_id: uuid::Uuid, location_id: uuid::Uuid) -> bool {
        self.members.contains(&(user_id, location_id))
    }

    fn context(&self, user_id: uuid::Uuid, session_id: uuid::Uuid) -> Option<SessionContext> {
        let session = self.sessions.get(&session_id)?;
        if !self.is_member(user_id, session.location_id) {
            return None;
        }
        let location = self.locations.get(&session.location_id)?;
        Some(SessionContext {
            session: session.clone(),
            location: location.clone(),
        })
    }
}

/// ## Summary
/// A [`BookingStore`] held entirely in memory.
///
/// `reserve` holds a single lock across the check and the insert, so it is
/// atomic with respect to other calls on clones of the same store. The
/// `(user, session, instant)` uniqueness rule is enforced the same way the
/// database constraint enforces it.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_location(&self, location: Location) {
        self.state
            .lock()
            .await
            .locations
            .insert(location.id, location);
    }

    /// Makes `user_id` a member of the location.
    pub async fn grant(&self, user_id: uuid::Uuid, location_id: uuid::Uuid) {
        self.state
            .lock()
            .await
            .members
            .insert((user_id, location_id));
    }

    pub async fn revoke(&self, user_id: uuid::Uuid, location_id: uuid::Uuid) {
        self.state
            .lock()
            .await
            .members
            .remove(&(user_id, location_id));
    }

    pub async fn add_session(&self, session: Session) {
        self.state.lock().await.sessions.insert(session.id, session);
    }

    /// Every stored reservation, across all users.
    pub async fn reservations(&self) -> Vec<Reservation> {
        self.state.lock().await.reservations.clone()
    }

    pub async fn session(&self, session_id: uuid::Uuid) -> Option<Session> {
        self.state.lock().await.sessions.get(&session_id).cloned()
    }
}

impl BookingStore for MemoryStore {
    fn find_session<'a>(
        &'a self,
        user_id: uuid::Uuid,
        session_id: uuid::Uuid,
    ) -> BoxFuture<'a, ServiceResult<Option<SessionContext>>> {
        Box::pin(async move { Ok(self.state.lock().await.context(user_id, session_id)) })
    }

    fn find_location<'a>(
        &'a self,
        user_id: uuid::Uuid,
        location_id: uuid::Uuid,
    ) -> BoxFuture<'a, ServiceResult<Option<LocationSessions>>> {
        Box::pin(async move {
            let state = self.state.lock().await;
            if !state.is_member(user_id, location_id) {
                return Ok(None);
            }
            let Some(location) = state.locations.get(&location_id) else {
                return Ok(None);
            };

            let mut sessions: Vec<Session> = state
                .sessions
                .values()
                .filter(|session| session.location_id == location_id)
                .cloned()
                .collect();
            sessions.sort_by_key(|session| session.id);

            Ok(Some(LocationSessions {
                location: location.clone(),
                sessions,
            }))
        })
    }

    fn insert_session<'a>(
        &'a self,
        user_id: uuid::Uuid,
        session: Session,
    ) -> BoxFuture<'a, ServiceResult<Session>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            if !state.is_member(user_id, session.location_id) {
                return Err(Rejection::NotFoundOrForbidden.into());
            }
            state.sessions.insert(session.id, session.clone());
            Ok(session)
        })
    }

    fn reserve<'a>(
        &'a self,
        request: NewReservation,
        check: ReservationCheck<'a>,
    ) -> BoxFuture<'a, ServiceResult<Reservation>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            let context = state
                .context(request.user_id, request.session_id)
                .ok_or(Rejection::NotFoundOrForbidden)?;

            check(&context)?;

            let duplicate = state.reservations.iter().any(|existing| {
                existing.user_id == request.user_id
                    && existing.session_id == request.session_id
                    && existing.instance_datetime == request.instance_datetime
            });
            if duplicate {
                return Err(Rejection::DuplicateReservation.into());
            }

            state.next_reservation_id += 1;
            let now = Utc::now();
            let reservation = Reservation {
                id: state.next_reservation_id,
                session_id: request.session_id,
                user_id: request.user_id,
                instance_datetime: request.instance_datetime,
                created_at: now,
                updated_at: now,
            };
            state.reservations.push(reservation.clone());
            Ok(reservation)
        })
    }

    fn list_reservations<'a>(
        &'a self,
        user_id: uuid::Uuid,
        query: ReservationQuery,
    ) -> BoxFuture<'a, ServiceResult<Vec<Reservation>>> {
        Box::pin(async move {
            let state = self.state.lock().await;
            let mut found: Vec<Reservation> = state
                .reservations
                .iter()
                .filter(|r| r.user_id == user_id)
                .filter(|r| {
                    state
                        .sessions
                        .get(&r.session_id)
                        .is_some_and(|session| state.is_member(user_id, session.location_id))
                })
                .filter(|r| query.session_id.is_none_or(|id| r.session_id == id))
                .filter(|r| query.from.is_none_or(|from| r.instance_datetime >= from))
                .filter(|r| query.to.is_none_or(|to| r.instance_datetime <= to))
                .cloned()
                .collect();
            found.sort_by_key(|r| (r.instance_datetime, r.id));
            Ok(found)
        })
    }
}
