#![allow(dead_code, clippy::expect_used)]
//! Test helpers for integration tests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use salvo::prelude::*;
use salvo::test::{ResponseExt, TestClient};
use serde_json::Value;

use splash_app::config::ConfigHandler;
use splash_app::db_handler::StoreHandler;
use splash_core::config::BookingConfig;
use splash_core::types::{Location, Session};
use splash_service::clock::FixedClock;
pub use splash_test::fixtures::*;
use splash_test::memory::MemoryStore;

/// Base URL test requests are addressed to.
pub const BASE_URL: &str = "http://127.0.0.1:5800";

/// `2025-05-01T00:00:00Z`, the instant every test treats as "now".
#[must_use]
pub fn now() -> DateTime<Utc> {
    instant(1_746_057_600)
}

#[must_use]
pub fn instant(epoch_seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(epoch_seconds, 0).expect("valid epoch seconds")
}

/// A store seeded with one location in `timezone` that the test user belongs to.
pub async fn seeded_store(timezone: &str) -> (MemoryStore, Location) {
    let store = MemoryStore::new();
    let location = location(timezone);
    store.add_location(location.clone()).await;
    store.grant(TEST_USER_ID, location.id).await;
    (store, location)
}

/// Weekly-on-Monday session at 09:00 New York time, starting Monday 2025-06-02.
pub async fn seed_monday_session(store: &MemoryStore, location: &Location) -> Session {
    let session = session(
        location,
        date(2025, 6, 2),
        time(9, 0),
        Some("FREQ=WEEKLY;BYDAY=MO"),
    );
    store.add_session(session.clone()).await;
    session
}

/// ## Summary
/// Creates a test service over `store` with the clock fixed at [`now`] and
/// single-user authentication as [`TEST_USER_ID`].
#[must_use]
pub fn create_test_service(store: &MemoryStore) -> Service {
    let router = Router::new()
        .hoop(ConfigHandler {
            settings: test_settings(BookingConfig::default()),
        })
        .hoop(StoreHandler {
            store: Arc::new(store.clone()),
            clock: Arc::new(FixedClock(now())),
        })
        .push(splash_app::app::api::routes());
    Service::new(router)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status, expected,
            "Expected status {expected} but got {} with body {}",
            self.status, self.body
        );
        self
    }

    /// Asserts the error `code` of an error response.
    pub fn assert_error_code(&self, expected: &str) {
        assert_eq!(self.body["code"], expected, "body: {}", self.body);
    }

    #[must_use]
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

async fn finish(mut response: salvo::Response) -> TestResponse {
    let status = response
        .status_code
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.take_json::<Value>().await.unwrap_or(Value::Null);
    TestResponse { status, body }
}

pub async fn get(service: &Service, path: &str) -> TestResponse {
    finish(TestClient::get(format!("{BASE_URL}{path}")).send(service).await).await
}

pub async fn post_json(service: &Service, path: &str, body: &Value) -> TestResponse {
    finish(
        TestClient::post(format!("{BASE_URL}{path}"))
            .json(body)
            .send(service)
            .await,
    )
    .await
}
