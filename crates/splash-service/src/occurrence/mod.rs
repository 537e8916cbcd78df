//! The occurrence engine: expands sessions into bookable slots and checks that
//! a requested slot is real.
//!
//! Both operations are pure functions of their inputs. "Now" and the booking
//! policy are passed in explicitly.

mod generate;
mod listing;
mod validate;

pub use generate::generate;
pub use listing::generate_for_location;
pub use validate::validate;
