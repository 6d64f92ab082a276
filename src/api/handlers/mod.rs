//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod analytics;
pub mod health;
pub mod links;
pub mod redirect;
pub mod shorten;

pub use analytics::analytics_handler;
pub use health::health_handler;
pub use links::{get_link_handler, list_links_handler, rename_link_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
