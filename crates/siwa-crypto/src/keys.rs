//! Private-key loading.

use k256::ecdsa::SigningKey;

use crate::errors::{CryptoError, Result};

/// Load a secp256k1 signing key from a hex string (0x prefix optional)
pub fn signing_key_from_hex(private_key_hex: &str) -> Result<SigningKey> {
    let stripped = private_key_hex
        .strip_prefix("0x")
        .unwrap_or(private_key_hex);

    let bytes = hex::decode(stripped)
        .map_err(|e| CryptoError::InvalidPrivateKey(format!("invalid hex: {}", e)))?;

    SigningKey::from_slice(&bytes).map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))
}
