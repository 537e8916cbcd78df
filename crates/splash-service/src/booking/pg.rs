use diesel_async::AsyncPgConnection;
use diesel_async::scoped_futures::ScopedFutureExt;
use futures::future::BoxFuture;
use splash_core::types::{NewReservation, Reservation, Session, SessionContext};
use splash_db::db::connection::DbPool;
use splash_db::db::query::{self, reservation::ReservationFilter};
use splash_db::db::transaction::with_transaction;
use splash_db::db::DbProvider;
use splash_db::model;
use tracing::Instrument;

use crate::booking::store::{BookingStore, LocationSessions, ReservationCheck, ReservationQuery};
use crate::booking::Rejection;
use crate::error::ServiceResult;

/// [`BookingStore`] backed by the `PostgreSQL` pool.
#[derive(Clone)]
pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl BookingStore for PgBookingStore {
    fn find_session<'a>(
        &'a self,
        user_id: uuid::Uuid,
        session_id: uuid::Uuid,
    ) -> BoxFuture<'a, ServiceResult<Option<SessionContext>>> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let row = query::session::find_for_member(&mut conn, user_id, session_id).await?;
            Ok(row.map(|(session, location)| SessionContext {
                session: session.into(),
                location: location.into(),
            }))
        })
    }

    fn find_location<'a>(
        &'a self,
        user_id: uuid::Uuid,
        location_id: uuid::Uuid,
    ) -> BoxFuture<'a, ServiceResult<Option<LocationSessions>>> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let Some(location) =
                query::location::find_for_member(&mut conn, user_id, location_id).await?
            else {
                return Ok(None);
            };
            let sessions = query::session::list_for_location(&mut conn, location.id).await?;
            Ok(Some(LocationSessions {
                location: location.into(),
                sessions: sessions.into_iter().map(Into::into).collect(),
            }))
        })
    }

    fn insert_session<'a>(
        &'a self,
        user_id: uuid::Uuid,
        session: Session,
    ) -> BoxFuture<'a, ServiceResult<Session>> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            with_transaction(&mut conn, |tx| insert_session_in(tx, user_id, session).scope_boxed())
                .await
        })
    }

    fn reserve<'a>(
        &'a self,
        request: NewReservation,
        check: ReservationCheck<'a>,
    ) -> BoxFuture<'a, ServiceResult<Reservation>> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            with_transaction(&mut conn, |tx| reserve_in(tx, request, check).scope_boxed()).await
        }
        .instrument(tracing::debug_span!(
            "reserve",
            session_id = %request.session_id,
            user_id = %request.user_id
        )))
    }

    fn list_reservations<'a>(
        &'a self,
        user_id: uuid::Uuid,
        criteria: ReservationQuery,
    ) -> BoxFuture<'a, ServiceResult<Vec<Reservation>>> {
        Box::pin(async move {
            let mut conn = self.pool.get_connection().await?;
            let filter = ReservationFilter {
                session_id: criteria.session_id,
                from: criteria.from,
                to: criteria.to,
            };
            let rows = query::reservation::list(&mut conn, user_id, filter).await?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }
}

async fn insert_session_in(
    tx: &mut AsyncPgConnection,
    user_id: uuid::Uuid,
    session: Session,
) -> ServiceResult<Session> {
    query::location::find_for_member(tx, user_id, session.location_id)
        .await?
        .ok_or(Rejection::NotFoundOrForbidden)?;
    let row = query::session::insert(tx, &model::session::NewSession::from(&session)).await?;
    Ok(row.into())
}

async fn reserve_in(
    tx: &mut AsyncPgConnection,
    request: NewReservation,
    check: ReservationCheck<'_>,
) -> ServiceResult<Reservation> {
    let (session, location) =
        query::session::find_for_member(tx, request.user_id, request.session_id)
            .await?
            .ok_or(Rejection::NotFoundOrForbidden)?;
    let context = SessionContext {
        session: session.into(),
        location: location.into(),
    };

    check(&context)?;

    match query::reservation::insert(tx, &request.into()).await {
        Ok(row) => {
            tracing::info!(reservation_id = row.id, instance = %row.instance_datetime, "Reservation created");
            Ok(row.into())
        }
        Err(err) if query::reservation::is_unique_violation(&err) => {
            tracing::debug!("Reservation already exists");
            Err(Rejection::DuplicateReservation.into())
        }
        Err(err) => Err(err.into()),
    }
}
