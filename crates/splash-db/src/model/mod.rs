pub mod location;
pub mod organization;
pub mod reservation;
pub mod session;
