//! Utility functions for slug generation, URL validation, and request handling.
//!
//! - [`slug_generator`] - Random slug generation
//! - [`url_validator`] - Lenient destination URL validation
//! - [`db_error`] - PostgreSQL constraint classification
//! - [`extract_owner`] - Owner identity from HTTP headers

pub mod db_error;
pub mod extract_owner;
pub mod slug_generator;
pub mod url_validator;
