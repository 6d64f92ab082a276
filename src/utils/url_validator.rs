//! Lenient URL validation for user-entered destinations.
//!
//! Accepts absolute URLs, scheme-relative URLs (`//host/path`) and bare
//! domains (`example.com/path`), the way users usually type them.

use url::{Host, Url};

/// Longest destination accepted, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Schemes allowed as redirect destinations.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Returns true if `candidate` is an acceptable destination URL.
///
/// # Rules
///
/// - Empty input, input longer than [`MAX_URL_LENGTH`] and input containing
///   whitespace is rejected
/// - `//host/...` is treated as `http://host/...`
/// - Input without a scheme is treated as `http://<input>`
/// - Only `http`, `https` and `ftp` schemes are accepted
/// - The host must be an IP literal, `localhost`, or a domain whose last
///   label is an alphabetic TLD of at least two characters
///
/// Never panics; malformed input simply yields `false`.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_url("https://example.com/path"));
/// assert!(is_valid_url("example.com"));
/// assert!(is_valid_url("//cdn.example.com/lib.js"));
/// assert!(!is_valid_url("javascript:alert(1)"));
/// assert!(!is_valid_url("not a url"));
/// ```
pub fn is_valid_url(candidate: &str) -> bool {
    let candidate = candidate.trim();

    if candidate.is_empty()
        || candidate.len() > MAX_URL_LENGTH
        || candidate.chars().any(char::is_whitespace)
    {
        return false;
    }

    let Ok(url) = Url::parse(&to_absolute_url(candidate)) else {
        return false;
    };

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return false;
    }

    match url.host() {
        Some(Host::Domain(domain)) => is_valid_domain(domain),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

/// Completes a stored destination into an absolute URL for `Location`.
///
/// Links are stored exactly as submitted, so `example.com/path` and
/// `//cdn.example.com` are completed with `http:` here.
pub fn to_absolute_url(long_url: &str) -> String {
    let long_url = long_url.trim();

    if long_url.starts_with("//") {
        format!("http:{long_url}")
    } else if has_scheme(long_url) {
        long_url.to_string()
    } else {
        format!("http://{long_url}")
    }
}

/// True if `url` starts with `<scheme>://`.
///
/// A `://` after the first path, query or fragment delimiter belongs to
/// that component (`example.com/login?next=https://a.com`).
fn has_scheme(url: &str) -> bool {
    let Some(end) = url.find("://") else {
        return false;
    };
    let scheme = &url[..end];

    scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.trim_end_matches('.');

    if domain.eq_ignore_ascii_case("localhost") {
        return true;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return false;
    }

    let tld = labels[labels.len() - 1];
    let tld_ok = tld.len() >= 2
        && (tld.chars().all(|c| c.is_ascii_alphabetic()) || tld.starts_with("xn--"));

    let labels_ok = labels.iter().all(|label| {
        !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    tld_ok && labels_ok
}
