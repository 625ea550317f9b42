use sha2::{Digest, Sha256};

/// Computes the content fingerprint of cleaned page text
///
/// Hex-encoded SHA-256 over the UTF-8 bytes, so the same text yields the
/// same fingerprint in every run and every process.
///
/// # Examples
///
/// ```
/// use site_corpus::crawler::content_fingerprint;
///
/// let a = content_fingerprint("same text");
/// assert_eq!(a, content_fingerprint("same text"));
/// assert_ne!(a, content_fingerprint("same text."));
/// ```
pub fn content_fingerprint(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
