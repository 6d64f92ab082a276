//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. JSON field names are camelCase.

pub mod analytics;
pub mod health;
pub mod link;
pub mod shorten;
pub mod slug;
pub mod update_link;
