//! Record store implementations.
//!
//! Concrete implementations of domain repository traits.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage and retrieval (PostgreSQL)
//! - [`PgVisitRepository`] - Visit log (PostgreSQL)
//! - [`MemoryStore`] - Both traits in process, for local runs and tests

pub mod memory_store;
pub mod pg_link_repository;
pub mod pg_visit_repository;

pub use memory_store::MemoryStore;
pub use pg_link_repository::PgLinkRepository;
pub use pg_visit_repository::PgVisitRepository;
