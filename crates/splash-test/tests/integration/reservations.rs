//! Reservation gate behaviour over the in-memory store.

use splash_service::booking::{Rejection, ReservationGate, ReservationQuery};
use splash_service::clock::FixedClock;
use splash_service::error::ServiceError;
use splash_service::policy::BookingPolicy;

use super::helpers::*;

/// Monday 2025-06-02 09:00 in New York.
const FIRST_MONDAY: i64 = 1_748_869_200;

fn gate(
    store: &splash_test::memory::MemoryStore,
) -> ReservationGate<splash_test::memory::MemoryStore, FixedClock> {
    ReservationGate::new(store.clone(), FixedClock(now()), BookingPolicy::default())
}

fn rejection(result: Result<impl std::fmt::Debug, ServiceError>) -> Rejection {
    match result {
        Err(ServiceError::Rejected(rejection)) => rejection,
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn concurrent_duplicates_yield_one_reservation() {
    let (store, location) = seeded_store("America/New_York").await;
    let session = seed_monday_session(&store, &location).await;
    let first = gate(&store);
    let second = gate(&store);

    let (a, b) = tokio::join!(
        first.reserve(session.id, TEST_USER_ID, instant(FIRST_MONDAY)),
        second.reserve(session.id, TEST_USER_ID, instant(FIRST_MONDAY)),
    );

    let (accepted, refused) = match (a, b) {
        (Ok(reservation), other) | (other, Ok(reservation)) => (reservation, other),
        (a, b) => panic!("both reservations failed: {a:?} / {b:?}"),
    };
    assert_eq!(rejection(refused), Rejection::DuplicateReservation);
    assert_eq!(accepted.instance_datetime, instant(FIRST_MONDAY));
    assert_eq!(store.reservations().await.len(), 1);
}

#[test_log::test(tokio::test)]
async fn reservation_echoes_the_requested_instant() {
    let (store, location) = seeded_store("America/New_York").await;
    let session = seed_monday_session(&store, &location).await;

    let reservation = gate(&store)
        .reserve(session.id, TEST_USER_ID, instant(FIRST_MONDAY))
        .await
        .expect("reservation accepted");

    assert_eq!(reservation.session_id, session.id);
    assert_eq!(reservation.user_id, TEST_USER_ID);
    assert_eq!(reservation.instance_datetime, instant(FIRST_MONDAY));
}

#[test_log::test(tokio::test)]
async fn other_users_cannot_see_the_session() {
    let (store, location) = seeded_store("America/New_York").await;
    let session = seed_monday_session(&store, &location).await;
    let stranger = uuid::Uuid::new_v4();

    let result = gate(&store)
        .reserve(session.id, stranger, instant(FIRST_MONDAY))
        .await;
    assert_eq!(rejection(result), Rejection::NotFoundOrForbidden);

    let result = gate(&store)
        .reserve(uuid::Uuid::new_v4(), TEST_USER_ID, instant(FIRST_MONDAY))
        .await;
    assert_eq!(rejection(result), Rejection::NotFoundOrForbidden);
}

#[test_log::test(tokio::test)]
async fn refused_requests_store_nothing() {
    let (store, location) = seeded_store("America/New_York").await;
    let session = seed_monday_session(&store, &location).await;
    let gate = gate(&store);

    let tuesday = gate
        .reserve(session.id, TEST_USER_ID, instant(FIRST_MONDAY + 24 * 3600))
        .await;
    assert_eq!(rejection(tuesday), Rejection::NoMatchingOccurrence);

    let past = gate
        .reserve(session.id, TEST_USER_ID, instant(1_700_000_000))
        .await;
    assert_eq!(rejection(past), Rejection::InThePast);

    assert!(store.reservations().await.is_empty());
}

#[test_log::test(tokio::test)]
async fn listing_is_scoped_to_the_user_and_filters() {
    let (store, location) = seeded_store("America/New_York").await;
    let monday = seed_monday_session(&store, &location).await;
    let daily = session(&location, date(2025, 6, 2), time(18, 0), Some("FREQ=DAILY"));
    store.add_session(daily.clone()).await;
    let other_user = uuid::Uuid::new_v4();
    store.grant(other_user, location.id).await;

    let gate = gate(&store);
    let week = 7 * 24 * 3600;
    for start in [FIRST_MONDAY + week, FIRST_MONDAY] {
        gate.reserve(monday.id, TEST_USER_ID, instant(start))
            .await
            .expect("reservation accepted");
    }
    // 2025-06-03 18:00 New York
    gate.reserve(daily.id, TEST_USER_ID, instant(1_748_988_000))
        .await
        .expect("reservation accepted");
    gate.reserve(monday.id, other_user, instant(FIRST_MONDAY))
        .await
        .expect("reservation accepted");

    let all = gate
        .list(TEST_USER_ID, ReservationQuery::default())
        .await
        .expect("listing succeeds");
    let starts: Vec<i64> = all.iter().map(|r| r.instance_datetime.timestamp()).collect();
    assert_eq!(starts, vec![FIRST_MONDAY, 1_748_988_000, FIRST_MONDAY + week]);

    let mondays_only = gate
        .list(
            TEST_USER_ID,
            ReservationQuery {
                session_id: Some(monday.id),
                ..ReservationQuery::default()
            },
        )
        .await
        .expect("listing succeeds");
    assert_eq!(mondays_only.len(), 2);

    let first_week = gate
        .list(
            TEST_USER_ID,
            ReservationQuery {
                session_id: None,
                from: Some(instant(FIRST_MONDAY)),
                to: Some(instant(1_748_988_000)),
            },
        )
        .await
        .expect("listing succeeds");
    assert_eq!(first_week.len(), 2);
}

#[test_log::test(tokio::test)]
async fn revoked_membership_hides_reservations() {
    let (store, location) = seeded_store("America/New_York").await;
    let session = seed_monday_session(&store, &location).await;
    let gate = gate(&store);
    gate.reserve(session.id, TEST_USER_ID, instant(FIRST_MONDAY))
        .await
        .expect("reservation accepted");

    store.revoke(TEST_USER_ID, location.id).await;

    let listed = gate
        .list(TEST_USER_ID, ReservationQuery::default())
        .await
        .expect("listing succeeds");
    assert!(listed.is_empty());
}
