//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A slug-to-URL mapping
//! - [`Visit`] - A recorded redirect on a link
//!
//! Entities come with separate `New*` structs for creation; store-assigned
//! fields (`id`, timestamps) only appear on the persisted type.

pub mod link;
pub mod visit;

pub use link::{Link, LinkWithVisitCount, NewLink};
pub use visit::{NewVisit, Visit};
