//! End-to-end requests through the API router.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn healthcheck_needs_no_identity() {
    let (store, _location) = seeded_store("UTC").await;
    let service = create_test_service(&store);

    let response = salvo::test::TestClient::get(format!("{BASE_URL}/api/app/healthcheck"))
        .send(&service)
        .await;
    assert_eq!(response.status_code, Some(StatusCode::OK));
}

#[test_log::test(tokio::test)]
async fn whoami_reports_the_configured_user() {
    let (store, _location) = seeded_store("UTC").await;
    let service = create_test_service(&store);

    let response = get(&service, "/api/app/whoami")
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(response.data()["userId"], TEST_USER_ID.to_string());
}

#[test_log::test(tokio::test)]
async fn location_listing_returns_sorted_occurrences() {
    let (store, location) = seeded_store("America/New_York").await;
    let session = seed_monday_session(&store, &location).await;
    let mut draft = super::helpers::session(&location, date(2025, 6, 3), time(7, 0), None);
    draft.status = splash_core::types::SessionStatus::Draft;
    store.add_session(draft).await;
    let service = create_test_service(&store);

    let response = get(
        &service,
        &format!(
            "/api/locations/{}/occurrences?from=2025-06-01&to=2025-06-28",
            location.id
        ),
    )
    .await
    .assert_status(StatusCode::OK);

    let occurrences = response.data().as_array().expect("array of occurrences");
    assert_eq!(occurrences.len(), 4);
    assert_eq!(occurrences[0]["sessionId"], session.id.to_string());
    assert_eq!(occurrences[0]["occurrenceId"], 1_748_869_200);
    assert_eq!(occurrences[0]["start"], "2025-06-02T13:00:00Z");
    assert_eq!(occurrences[0]["end"], "2025-06-02T14:00:00Z");
    assert_eq!(occurrences[3]["start"], "2025-06-23T13:00:00Z");
}

#[test_log::test(tokio::test)]
async fn session_listing_defaults_to_a_single_day() {
    let (store, location) = seeded_store("America/New_York").await;
    let session = seed_monday_session(&store, &location).await;
    let service = create_test_service(&store);

    let response = get(
        &service,
        &format!("/api/sessions/{}/occurrences?from=2025-06-09", session.id),
    )
    .await
    .assert_status(StatusCode::OK);
    assert_eq!(response.data().as_array().map(Vec::len), Some(1));

    let response = get(
        &service,
        &format!("/api/sessions/{}/occurrences?from=2025-06-10", session.id),
    )
    .await
    .assert_status(StatusCode::OK);
    assert_eq!(response.data().as_array().map(Vec::len), Some(0));
}

#[test_log::test(tokio::test)]
async fn malformed_queries_are_bad_requests() {
    let (store, location) = seeded_store("UTC").await;
    let service = create_test_service(&store);

    get(&service, &format!("/api/locations/{}/occurrences", location.id))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("bad_request");

    get(&service, "/api/locations/not-a-uuid/occurrences?from=2025-06-01")
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("bad_request");

    get(
        &service,
        &format!(
            "/api/locations/{}/occurrences?from=2025-01-01&to=2026-12-31",
            location.id
        ),
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST)
    .assert_error_code("validation_error");
}

#[test_log::test(tokio::test)]
async fn unknown_location_is_not_found() {
    let (store, _location) = seeded_store("UTC").await;
    let elsewhere = location("UTC");
    store.add_location(elsewhere.clone()).await;
    let service = create_test_service(&store);

    for id in [elsewhere.id, uuid::Uuid::new_v4()] {
        get(
            &service,
            &format!("/api/locations/{id}/occurrences?from=2025-06-01"),
        )
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_code("not_found_or_forbidden");
    }
}

#[test_log::test(tokio::test)]
async fn reservation_round_trip_and_refusals() {
    let (store, location) = seeded_store("America/New_York").await;
    let session = seed_monday_session(&store, &location).await;
    let service = create_test_service(&store);
    let path = format!("/api/sessions/{}/reservations", session.id);

    // Offset form of 2025-06-02T13:00:00Z
    let response = post_json(
        &service,
        &path,
        &json!({ "instanceDatetime": "2025-06-02T09:00:00-04:00" }),
    )
    .await
    .assert_status(StatusCode::CREATED);
    assert_eq!(response.data()["instanceDatetime"], "2025-06-02T13:00:00Z");
    assert_eq!(response.data()["sessionId"], session.id.to_string());

    post_json(
        &service,
        &path,
        &json!({ "instanceDatetime": "2025-06-02T13:00:00Z" }),
    )
    .await
    .assert_status(StatusCode::CONFLICT)
    .assert_error_code("duplicate_reservation");

    post_json(
        &service,
        &path,
        &json!({ "instanceDatetime": "2025-06-03T13:00:00Z" }),
    )
    .await
    .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
    .assert_error_code("no_matching_occurrence");

    post_json(
        &service,
        &path,
        &json!({ "instanceDatetime": "2024-06-03T13:00:00Z" }),
    )
    .await
    .assert_status(StatusCode::GONE)
    .assert_error_code("in_the_past");

    post_json(&service, &path, &json!({ "instanceDatetime": "soon" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("bad_request");

    let listed = get(
        &service,
        &format!("/api/reservations?session_id={}", session.id),
    )
    .await
    .assert_status(StatusCode::OK);
    assert_eq!(listed.data().as_array().map(Vec::len), Some(1));
}

#[test_log::test(tokio::test)]
async fn inactive_session_cannot_be_reserved() {
    let (store, location) = seeded_store("UTC").await;
    let mut session = super::helpers::session(&location, date(2025, 6, 1), time(9, 0), None);
    session.status = splash_core::types::SessionStatus::Disabled;
    store.add_session(session.clone()).await;
    let service = create_test_service(&store);

    post_json(
        &service,
        &format!("/api/sessions/{}/reservations", session.id),
        &json!({ "instanceDatetime": "2025-06-01T09:00:00Z" }),
    )
    .await
    .assert_status(StatusCode::CONFLICT)
    .assert_error_code("session_not_active");
}

#[test_log::test(tokio::test)]
async fn creating_a_session_stores_a_draft() {
    let (store, location) = seeded_store("America/New_York").await;
    let service = create_test_service(&store);
    let path = format!("/api/locations/{}/sessions", location.id);

    let response = post_json(
        &service,
        &path,
        &json!({
            "title": "  Aqua aerobics ",
            "startDate": "2025-06-03",
            "startTime": "18:00:00",
            "endTime": "19:00:00",
            "recurrence": { "frequency": "weekly", "byWeekday": ["Tue", "Thu"] },
        }),
    )
    .await
    .assert_status(StatusCode::CREATED);

    let data = response.data();
    assert_eq!(data["title"], "Aqua aerobics");
    assert_eq!(data["status"], "draft");
    assert_eq!(data["locationId"], location.id.to_string());
    let id: uuid::Uuid = data["id"]
        .as_str()
        .and_then(|id| id.parse().ok())
        .expect("session id");
    let stored = store.session(id).await.expect("session stored");
    assert!(stored.is_recurring());

    post_json(
        &service,
        &path,
        &json!({
            "title": "Broken",
            "startDate": "2025-06-03",
            "startTime": "18:00:00",
            "endTime": "19:00:00",
            "recurrence": "FREQ=FORTNIGHTLY",
        }),
    )
    .await
    .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
    .assert_error_code("invalid_rule_format");

    post_json(
        &service,
        &path,
        &json!({
            "title": "Backwards",
            "startDate": "2025-06-03",
            "startTime": "19:00:00",
            "endTime": "18:00:00",
        }),
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST)
    .assert_error_code("validation_error");
}

#[test_log::test(tokio::test)]
async fn session_created_active_is_immediately_bookable() {
    let (store, location) = seeded_store("UTC").await;
    let service = create_test_service(&store);

    let response = post_json(
        &service,
        &format!("/api/locations/{}/sessions", location.id),
        &json!({
            "title": "Open swim",
            "startDate": "2025-06-02",
            "startTime": "12:00:00",
            "endTime": "13:00:00",
            "recurrence": "FREQ=DAILY",
            "status": "active",
        }),
    )
    .await
    .assert_status(StatusCode::CREATED);
    assert_eq!(response.data()["status"], "active");
    let id = response.data()["id"].as_str().expect("session id").to_string();

    let fetched = get(&service, &format!("/api/sessions/{id}"))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(fetched.data()["title"], "Open swim");
    assert_eq!(fetched.data()["status"], "active");

    let listed = get(&service, &format!("/api/locations/{}/sessions", location.id))
        .await
        .assert_status(StatusCode::OK);
    let ids: Vec<&str> = listed
        .data()
        .as_array()
        .expect("array of sessions")
        .iter()
        .filter_map(|session| session["id"].as_str())
        .collect();
    assert_eq!(ids, vec![id.as_str()]);

    let occurrences = get(
        &service,
        &format!("/api/locations/{}/occurrences?from=2025-06-02&to=2025-06-04", location.id),
    )
    .await
    .assert_status(StatusCode::OK);
    assert_eq!(occurrences.data().as_array().map(Vec::len), Some(3));

    post_json(
        &service,
        &format!("/api/sessions/{id}/reservations"),
        &json!({ "instanceDatetime": "2025-06-03T12:00:00Z" }),
    )
    .await
    .assert_status(StatusCode::CREATED);
}

#[test_log::test(tokio::test)]
async fn session_lookups_hide_other_locations() {
    let (store, _location) = seeded_store("UTC").await;
    let elsewhere = location("UTC");
    store.add_location(elsewhere.clone()).await;
    let hidden = super::helpers::session(&elsewhere, date(2025, 6, 1), time(9, 0), None);
    store.add_session(hidden.clone()).await;
    let service = create_test_service(&store);

    get(&service, &format!("/api/sessions/{}", hidden.id))
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_code("not_found_or_forbidden");

    get(&service, &format!("/api/locations/{}/sessions", elsewhere.id))
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_code("not_found_or_forbidden");
}
