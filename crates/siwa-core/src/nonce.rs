//! Replay-protection nonce generation.

use rand::Rng;

/// Default nonce length in characters
pub const DEFAULT_NONCE_LENGTH: usize = 16;

/// URL-safe alphabet: alphanumerics plus `-` and `_`
const URL_SAFE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Generate a cryptographically random URL-safe nonce of exactly `length`
/// characters
///
/// Each call draws fresh randomness from the thread-local CSPRNG; no state
/// is shared between calls.
pub fn generate_nonce(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| URL_SAFE[rng.gen_range(0..URL_SAFE.len())] as char)
        .collect()
}

/// Generate a nonce of the default length
pub fn generate_nonce_default() -> String {
    generate_nonce(DEFAULT_NONCE_LENGTH)
}
