//! EIP-55 checksum address encoding.

use crate::errors::{CryptoError, Result};
use crate::hashing::keccak256;

/// Encode a 20-byte address in EIP-55 checksum form
///
/// Accepts any casing with or without the `0x` prefix and returns the
/// canonical `0x`-prefixed mixed-case form.
pub fn to_checksum_address(address: &str) -> Result<String> {
    let stripped = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);

    if stripped.len() != 40 {
        return Err(CryptoError::InvalidAddress(format!(
            "expected 40 hex chars, got {}",
            stripped.len()
        )));
    }

    let lower = stripped.to_lowercase();
    hex::decode(&lower)
        .map_err(|e| CryptoError::InvalidAddress(format!("invalid hex: {}", e)))?;

    // EIP-55: uppercase each hex digit whose corresponding nibble of
    // keccak256(lowercase_address) is >= 8
    let hash = keccak256(lower.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");

    for (i, ch) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };

        if ch.is_ascii_alphabetic() && nibble >= 8 {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
    }

    Ok(out)
}
