use chrono::NaiveDate;
use splash_core::types::{Occurrence, Session};

use crate::booking::{BookingStore, Rejection};
use crate::clock::Clock;
use crate::error::ServiceResult;
use crate::occurrence;
use crate::policy::BookingPolicy;
use crate::session::SessionDraft;

/// Read and authoring operations on sessions, scoped to the caller's locations.
#[derive(Debug, Clone)]
pub struct SessionCatalog<S, C> {
    store: S,
    clock: C,
    policy: BookingPolicy,
}

impl<S: BookingStore, C: Clock> SessionCatalog<S, C> {
    #[must_use]
    pub const fn new(store: S, clock: C, policy: BookingPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// ## Summary
    /// Every session at a location, in any status, oldest start first.
    ///
    /// ## Errors
    /// `Rejection::NotFoundOrForbidden` if the user is not a member of the location.
    #[tracing::instrument(skip(self))]
    pub async fn sessions_at_location(
        &self,
        user_id: uuid::Uuid,
        location_id: uuid::Uuid,
    ) -> ServiceResult<Vec<Session>> {
        let mut sessions = self
            .store
            .find_location(user_id, location_id)
            .await?
            .ok_or(Rejection::NotFoundOrForbidden)?
            .sessions;
        sessions.sort_by_key(|session| (session.start_date, session.start_time, session.id));
        Ok(sessions)
    }

    /// Looks up one session visible to the user.
    ///
    /// ## Errors
    /// `Rejection::NotFoundOrForbidden` if the session is not visible to the user.
    #[tracing::instrument(skip(self))]
    pub async fn session(&self, user_id: uuid::Uuid, session_id: uuid::Uuid) -> ServiceResult<Session> {
        let context = self
            .store
            .find_session(user_id, session_id)
            .await?
            .ok_or(Rejection::NotFoundOrForbidden)?;
        Ok(context.session)
    }

    /// ## Summary
    /// Bookable occurrences across a location's active sessions.
    ///
    /// ## Errors
    /// `Rejection::NotFoundOrForbidden` if the user is not a member of the
    /// location; `ServiceError::ValidationError` for an oversized window.
    #[tracing::instrument(skip(self))]
    pub async fn location_occurrences(
        &self,
        user_id: uuid::Uuid,
        location_id: uuid::Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ServiceResult<Vec<Occurrence>> {
        let location = self
            .store
            .find_location(user_id, location_id)
            .await?
            .ok_or(Rejection::NotFoundOrForbidden)?;
        occurrence::generate_for_location(&location, from, to, &self.policy)
    }

    /// ## Summary
    /// Occurrences of one session, whatever its status.
    ///
    /// ## Errors
    /// `Rejection::NotFoundOrForbidden` if the session is not visible to the
    /// user; rule and zone errors from [`occurrence::generate`].
    #[tracing::instrument(skip(self))]
    pub async fn session_occurrences(
        &self,
        user_id: uuid::Uuid,
        session_id: uuid::Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ServiceResult<Vec<Occurrence>> {
        let context = self
            .store
            .find_session(user_id, session_id)
            .await?
            .ok_or(Rejection::NotFoundOrForbidden)?;
        occurrence::generate(&context, from, to, &self.policy)
    }

    /// ## Summary
    /// Validates a draft against its location and stores it. The status is the
    /// one requested, `draft` when none was given.
    ///
    /// ## Errors
    /// `Rejection::NotFoundOrForbidden` if the user is not a member of the
    /// location, or any draft validation error.
    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_session(
        &self,
        user_id: uuid::Uuid,
        location_id: uuid::Uuid,
        draft: SessionDraft,
    ) -> ServiceResult<Session> {
        let location = self
            .store
            .find_location(user_id, location_id)
            .await?
            .ok_or(Rejection::NotFoundOrForbidden)?;

        let session = draft.into_session(&location.location, self.clock.now(), &self.policy)?;
        let session = self.store.insert_session(user_id, session).await?;

        tracing::info!(session_id = %session.id, status = %session.status, "Session created");
        Ok(session)
    }
}
