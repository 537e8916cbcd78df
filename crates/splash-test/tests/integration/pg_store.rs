//! `PgBookingStore` against a real database.
//!
//! Set `TEST_DATABASE_URL` to a scratch database to run these; they are
//! skipped otherwise. Each test seeds its own organization and location.

use splash_db::db::DbProvider;
use splash_db::db::connection::{DbPool, create_pool};
use splash_db::db::migrate::run_migrations;
use splash_db::db::query;
use splash_db::model::location::{NewLocation, NewUserLocation};
use splash_db::model::organization::NewOrganization;
use splash_service::booking::{
    BookingStore, PgBookingStore, Rejection, ReservationGate, ReservationQuery,
};
use splash_service::clock::FixedClock;
use splash_service::error::ServiceError;
use splash_service::policy::BookingPolicy;

use super::helpers::*;

/// Monday 2025-06-02 09:00 in New York.
const FIRST_MONDAY: i64 = 1_748_869_200;

static MIGRATED: tokio::sync::OnceCell<()> = tokio::sync::OnceCell::const_new();

async fn test_pool() -> Option<DbPool> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        tracing::warn!("TEST_DATABASE_URL not set, skipping database test");
        return None;
    };
    MIGRATED
        .get_or_init(|| async { run_migrations(&url).await.expect("migrations apply") })
        .await;
    Some(create_pool(&url, 4).await.expect("pool connects"))
}

/// Seeds an organization and a New York location the user belongs to.
async fn seed_location(pool: &DbPool, user_id: uuid::Uuid) -> splash_core::types::Location {
    let mut conn = pool.get_connection().await.expect("connection");
    let organization = query::location::insert_organization(
        &mut conn,
        &NewOrganization {
            id: uuid::Uuid::new_v4(),
            name: "City Aquatics",
        },
    )
    .await
    .expect("organization inserted");
    let location = query::location::insert_location(
        &mut conn,
        &NewLocation {
            id: uuid::Uuid::new_v4(),
            organization_id: organization.id,
            name: "Riverside Pool",
            timezone: "America/New_York",
        },
    )
    .await
    .expect("location inserted");
    query::location::grant_access(
        &mut conn,
        NewUserLocation {
            user_id,
            location_id: location.id,
        },
    )
    .await
    .expect("membership granted");
    location.into()
}

#[test_log::test(tokio::test)]
async fn sessions_round_trip_through_the_database() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let user_id = uuid::Uuid::new_v4();
    let location = seed_location(&pool, user_id).await;
    let store = PgBookingStore::new(pool);

    let session = session(
        &location,
        date(2025, 6, 2),
        time(9, 0),
        Some("FREQ=WEEKLY;BYDAY=MO"),
    );
    let stored = store
        .insert_session(user_id, session.clone())
        .await
        .expect("session inserted");
    assert_eq!(stored, session);

    let found = store
        .find_session(user_id, session.id)
        .await
        .expect("lookup succeeds")
        .expect("session visible to member");
    assert_eq!(found.session, session);
    assert_eq!(found.location, location);

    let hidden = store
        .find_session(uuid::Uuid::new_v4(), session.id)
        .await
        .expect("lookup succeeds");
    assert!(hidden.is_none());

    let listed = store
        .find_location(user_id, location.id)
        .await
        .expect("lookup succeeds")
        .expect("location visible to member");
    assert_eq!(listed.sessions, vec![session]);
}

#[test_log::test(tokio::test)]
async fn database_uniqueness_resolves_concurrent_duplicates() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let user_id = uuid::Uuid::new_v4();
    let location = seed_location(&pool, user_id).await;
    let store = PgBookingStore::new(pool);
    let session = session(
        &location,
        date(2025, 6, 2),
        time(9, 0),
        Some("FREQ=WEEKLY;BYDAY=MO"),
    );
    store
        .insert_session(user_id, session.clone())
        .await
        .expect("session inserted");

    let first = ReservationGate::new(store.clone(), FixedClock(now()), BookingPolicy::default());
    let second = ReservationGate::new(store.clone(), FixedClock(now()), BookingPolicy::default());
    let (a, b) = tokio::join!(
        first.reserve(session.id, user_id, instant(FIRST_MONDAY)),
        second.reserve(session.id, user_id, instant(FIRST_MONDAY)),
    );

    let outcomes = [a.is_ok(), b.is_ok()];
    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1, "{a:?} / {b:?}");
    let refused = if a.is_ok() { b } else { a };
    assert!(matches!(
        refused,
        Err(ServiceError::Rejected(Rejection::DuplicateReservation))
    ));

    let listed = first
        .list(user_id, ReservationQuery::default())
        .await
        .expect("listing succeeds");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].instance_datetime, instant(FIRST_MONDAY));
}
