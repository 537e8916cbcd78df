//! Session authoring and occurrence listing.

mod catalog;
mod draft;

pub use catalog::SessionCatalog;
pub use draft::{RecurrenceInput, SessionDraft};
