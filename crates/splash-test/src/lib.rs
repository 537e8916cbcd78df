//! Splash booking service - integration test support.
//!
//! Re-exports the workspace crates under one roof and provides an in-memory
//! [`BookingStore`](splash_service::booking::BookingStore) plus fixture
//! builders, so HTTP and service tests can run without `PostgreSQL`.

pub mod fixtures;
pub mod memory;

pub use splash_app as app;
pub use splash_core as core;
pub use splash_db as db;
pub use splash_rfc as rfc;
pub use splash_service as service;
