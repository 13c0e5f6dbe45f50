//! Crypto error types.

use thiserror::Error;

/// Errors from signature recovery and address handling
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Signature is not 65 bytes of `r || s || v`
    #[error("Invalid signature length: expected 65 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// Recovery id (v) is out of range
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(String),

    /// Signature bytes do not form a valid secp256k1 signature
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Public key recovery failed
    #[error("Recovery failed: {0}")]
    RecoveryFailed(String),

    /// Address is not 0x-prefixed 20-byte hex
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Private key bytes are not a valid secp256k1 scalar
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
}

/// Result type for crypto operations
pub type Result<T> = std::result::Result<T, CryptoError>;
