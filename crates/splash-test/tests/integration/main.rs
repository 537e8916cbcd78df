//! Integration tests for the booking service.
//!
//! Everything except `pg_store` runs against the in-memory store; `pg_store`
//! needs `TEST_DATABASE_URL` and is skipped without it.

mod helpers;
mod http;
mod pg_store;
mod reservations;
