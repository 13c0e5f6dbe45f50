//! Local private-key signer.

use async_trait::async_trait;
use k256::ecdsa::SigningKey;
use tracing::debug;

use siwa_core::errors::SignerError;
use siwa_core::traits::Signer;
use siwa_crypto::{address_from_verifying_key, hash_personal_message, signing_key_from_hex};

/// Signer backed by an in-process secp256k1 private key
///
/// Signatures are EIP-191 `personal_sign`: the message is framed, hashed
/// with Keccak256, and signed recoverably; the result is the 65-byte
/// `r || s || v` form with `v` in {27, 28}.
pub struct LocalSigner {
    key: SigningKey,
    address: String,
}

impl LocalSigner {
    /// Create a signer from raw private-key bytes
    pub fn new(key: SigningKey) -> Result<Self, SignerError> {
        let address = address_from_verifying_key(key.verifying_key())
            .map_err(|e| SignerError::InvalidKey(e.to_string()))?;
        Ok(LocalSigner { key, address })
    }

    /// Create a signer from a private-key hex string (0x prefix optional)
    pub fn from_private_key(private_key_hex: &str) -> Result<Self, SignerError> {
        let key = signing_key_from_hex(private_key_hex)
            .map_err(|e| SignerError::InvalidKey(e.to_string()))?;

        Self::new(key)
    }
}

#[async_trait]
impl Signer for LocalSigner {
    async fn get_address(&self) -> Result<String, SignerError> {
        Ok(self.address.clone())
    }

    async fn sign_message(&self, message: &str) -> Result<String, SignerError> {
        let digest = hash_personal_message(message);

        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| SignerError::SigningFailed(e.to_string()))?;

        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&signature.to_bytes());
        bytes[64] = 27 + recovery_id.to_byte();

        debug!(address = %self.address, "signed message with local key");
        Ok(format!("0x{}", hex::encode(bytes)))
    }
}
