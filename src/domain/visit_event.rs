//! Visit event model for asynchronous visit recording.

/// An in-memory representation of a redirect, queued for persistence.
///
/// Passed from the redirect handler to the background worker via a bounded
/// channel so the redirect response never waits on the visit write.
///
/// # Usage Flow
///
/// 1. Created in the redirect handler from the resolved link and request metadata
/// 2. Sent to the channel without blocking
/// 3. Processed by [`crate::application::visit_worker::run_visit_worker`]
/// 4. Recorded via [`crate::application::services::LinkService::record_visit`]
#[derive(Debug, Clone)]
pub struct VisitEvent {
    pub link_id: i64,
    pub slug: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl VisitEvent {
    /// Creates a new visit event.
    ///
    /// # Arguments
    ///
    /// - `link_id` - Id of the resolved link
    /// - `slug` - The slug that was requested (kept for logging)
    /// - `ip_address` - Optional client IP address
    /// - `user_agent` - Optional User-Agent header
    /// - `referrer` - Optional Referer header
    pub fn new(
        link_id: i64,
        slug: String,
        ip_address: Option<String>,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            slug,
            ip_address,
            user_agent: user_agent.map(str::to_string),
            referrer: referrer.map(str::to_string),
        }
    }
}
