//! Reservation creation and listing.
//!
//! ## Module Organization
//!
//! - `gate`: orchestrates validation and the atomic insert
//! - `pg`: `PostgreSQL` implementation of [`BookingStore`]
//! - `rejection`: client-facing reasons a booking request is refused
//! - `store`: the storage seam the gate writes through

pub mod gate;
pub mod pg;
pub mod rejection;
pub mod store;

pub use gate::ReservationGate;
pub use pg::PgBookingStore;
pub use rejection::Rejection;
pub use store::{BookingStore, LocationSessions, ReservationCheck, ReservationQuery};
