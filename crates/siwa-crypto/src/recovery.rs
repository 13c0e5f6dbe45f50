//! secp256k1 address recovery.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

use crate::address::to_checksum_address;
use crate::eip191::hash_personal_message;
use crate::errors::{CryptoError, Result};
use crate::hashing::keccak256;

/// Recover the signing address from a message hash and signature
///
/// # Arguments
/// * `message_hash` - Keccak256 hash of the (framed) message
/// * `signature` - 65-byte signature (r, s, v)
///
/// # Returns
/// EIP-55 checksummed address with 0x prefix
pub fn recover_address(message_hash: &[u8; 32], signature: &[u8; 65]) -> Result<String> {
    // Extract recovery ID (v parameter); wallets emit 27/28, raw ids 0/1
    let recovery_id = RecoveryId::try_from(signature[64] % 27)
        .map_err(|e| CryptoError::InvalidRecoveryId(e.to_string()))?;

    // Extract signature (r, s parameters)
    let sig = Signature::try_from(&signature[..64])
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;

    // Recover public key from signature
    let verifying_key = VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;

    address_from_verifying_key(&verifying_key)
}

/// Recover the signer of an EIP-191 `personal_sign` signature
///
/// Frames and hashes the plaintext message, then recovers the address from
/// the 65-byte hex signature (0x prefix optional).
pub fn recover_personal_sign(message: &str, signature_hex: &str) -> Result<String> {
    let sig = decode_signature(signature_hex)?;
    recover_address(&hash_personal_message(message), &sig)
}

/// Derive the EIP-55 address of a secp256k1 verifying key
pub fn address_from_verifying_key(verifying_key: &VerifyingKey) -> Result<String> {
    // Get uncompressed public key (65 bytes: 0x04 + x + y)
    let public_key = verifying_key.to_encoded_point(false);
    let public_key_bytes = public_key.as_bytes();

    // Ethereum address = last 20 bytes of keccak256(public_key[1..])
    // Skip the first byte (0x04 prefix for uncompressed key)
    let hash = keccak256(&public_key_bytes[1..]);
    to_checksum_address(&hex::encode(&hash[12..]))
}

/// Decode a 65-byte r || s || v signature from hex
pub fn decode_signature(signature_hex: &str) -> Result<[u8; 65]> {
    let stripped = signature_hex
        .strip_prefix("0x")
        .unwrap_or(signature_hex);

    let bytes = hex::decode(stripped)
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;

    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidSignatureLength(len))
}
