use chrono::{DateTime, Utc};
use splash_core::types::{NewReservation, Reservation, SessionContext};

use crate::booking::store::{BookingStore, ReservationQuery};
use crate::clock::Clock;
use crate::error::ServiceResult;
use crate::occurrence;
use crate::policy::BookingPolicy;

/// Entry point for creating reservations.
///
/// Reads the clock once per request, then hands the store a check that runs
/// the occurrence validator inside the same transaction as the insert.
/// Concurrent duplicates are resolved by the store's uniqueness constraint.
#[derive(Debug, Clone)]
pub struct ReservationGate<S, C> {
    store: S,
    clock: C,
    policy: BookingPolicy,
}

impl<S: BookingStore, C: Clock> ReservationGate<S, C> {
    #[must_use]
    pub const fn new(store: S, clock: C, policy: BookingPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// ## Summary
    /// Reserves the occurrence of `session_id` starting at `proposed` for `user_id`.
    ///
    /// The stored `instance_datetime` is `proposed`, unchanged.
    ///
    /// ## Errors
    /// - `Rejection::NotFoundOrForbidden` if the user cannot see the session
    /// - any rejection from [`occurrence::validate`]
    /// - `Rejection::DuplicateReservation` if the user already holds this occurrence
    /// - `ServiceError::DatabaseError` for storage failures
    #[tracing::instrument(skip(self))]
    pub async fn reserve(
        &self,
        session_id: uuid::Uuid,
        user_id: uuid::Uuid,
        proposed: DateTime<Utc>,
    ) -> ServiceResult<Reservation> {
        let now = self.clock.now();
        let policy = self.policy;
        let request = NewReservation {
            session_id,
            user_id,
            instance_datetime: proposed,
        };

        let check = move |context: &SessionContext| {
            occurrence::validate(context, proposed, now, &policy)
        };
        let result = self.store.reserve(request, &check).await;

        match &result {
            Ok(reservation) => {
                tracing::debug!(reservation_id = reservation.id, "Reservation accepted");
            }
            Err(err) => tracing::debug!(error = %err, "Reservation refused"),
        }
        result
    }

    /// ## Summary
    /// Lists the user's reservations, narrowed by `query`.
    ///
    /// ## Errors
    /// Returns `ServiceError::DatabaseError` for storage failures.
    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: uuid::Uuid,
        query: ReservationQuery,
    ) -> ServiceResult<Vec<Reservation>> {
        self.store.list_reservations(user_id, query).await
    }
}
