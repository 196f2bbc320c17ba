//! Short fingerprint of the session key for start-up logs.
//!
//! Lets operators confirm which key a deployment loaded without printing the
//! key itself.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// First eight bytes of SHA-256 over the signing half, hex encoded.
///
/// # Examples
/// ```
/// use actix_web::cookie::Key;
/// use storefront::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::derive_from(&[7; 64]));
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
