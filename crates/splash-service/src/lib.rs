pub mod auth;
pub mod booking;
pub mod clock;
pub mod error;
pub mod occurrence;
pub mod policy;
pub mod session;
