//! Digest primitives.

use aws_lc_rs::digest;

/// Length of a SHA-256 digest in bytes.
pub const SHA256_OUTPUT_LEN: usize = 32;

/// Computes a SHA-256 hash of the input data.
#[must_use]
pub fn sha256(data: &[u8]) -> Vec<u8> {
    digest::digest(&digest::SHA256, data).as_ref().to_vec()
}
