//! Random slug generation.
//!
//! Slugs are drawn from the 62-character alphanumeric alphabet using OS
//! entropy. Generated slugs are not guaranteed to be unique; callers check
//! the store (see [`crate::application::services::LinkService`]).

/// Default number of characters in a generated slug.
pub const DEFAULT_SLUG_LENGTH: usize = 6;

const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a random slug of `length` characters from `[A-Za-z0-9]`.
///
/// Draws `length` independent bytes from `getrandom` and maps each to the
/// alphabet via `byte % 62`.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
///
/// # Examples
///
/// ```ignore
/// let slug = generate_slug(DEFAULT_SLUG_LENGTH);
/// assert_eq!(slug.len(), 6);
/// assert!(slug.bytes().all(|b| b.is_ascii_alphanumeric()));
/// ```
pub fn generate_slug(length: usize) -> String {
    let mut buffer = vec![0u8; length];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    buffer
        .iter()
        .map(|byte| ALPHABET[(*byte as usize) % ALPHABET.len()] as char)
        .collect()
}

/// Returns true if every character of `slug` belongs to the generator alphabet.
#[cfg(test)]
pub(crate) fn is_slug_charset(slug: &str) -> bool {
    slug.bytes().all(|b| b.is_ascii_alphanumeric())
}
