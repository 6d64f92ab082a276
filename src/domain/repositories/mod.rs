//! Repository trait definitions for the domain layer.
//!
//! These traits describe the record store collaborator. Concrete
//! implementations live in `crate::infrastructure::persistence`; mock
//! implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Slug namespace and link lookups
//! - [`VisitRepository`] - Append-only visit log and history reads

pub mod link_repository;
pub mod visit_repository;

pub use link_repository::LinkRepository;
pub use visit_repository::{LinkWithVisits, VisitRepository};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;
