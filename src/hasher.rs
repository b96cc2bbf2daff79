//! Credential hashing.
//!
//! Passwords are stored as the lowercase hex SHA-256 digest of their UTF-8
//! bytes. There is no salt, so equal passwords produce equal digests; this
//! keeps existing `todo.db` files readable.

use sha2::{Digest, Sha256};

/// Length of a digest in hex characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// Compute the stored digest for a password.
#[must_use]
pub fn digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}
