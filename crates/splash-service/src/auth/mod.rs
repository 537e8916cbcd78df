//! Caller identity.
//!
//! - `authenticate`: resolves the caller from settings or a proxy header
//! - `depot`: stores and reads the caller on the Salvo depot

pub mod authenticate;
pub mod depot;

pub use authenticate::{AuthenticatedUser, authenticate};
pub use depot::{depot_keys, get_user_from_depot};
