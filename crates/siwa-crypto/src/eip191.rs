//! EIP-191 `personal_sign` message framing.

use crate::hashing::keccak256;

/// Build EIP-191 message for signing
///
/// Format: "\x19Ethereum Signed Message:\n" + len(message) + message
pub fn build_personal_message(message: &str) -> String {
    format!("\x19Ethereum Signed Message:\n{}{}", message.len(), message)
}

/// Compute the EIP-191 digest of a plaintext message
///
/// This is the 32-byte prehash that wallets sign for `personal_sign`.
pub fn hash_personal_message(message: &str) -> [u8; 32] {
    keccak256(build_personal_message(message).as_bytes())
}
