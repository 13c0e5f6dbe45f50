//! SIWA capability traits.
//!
//! The verification pipeline and signing flow are generic over these seams:
//! wallet key management ([`Signer`]), nonce storage ([`NonceValidator`]),
//! and on-chain ownership resolution ([`RegistryResolver`]).

use async_trait::async_trait;
use thiserror::Error;

use crate::errors::SignerError;

/// Wallet signing capability
///
/// Backends may be a local key or a remote signing proxy; both methods may
/// suspend. See `siwa-signers` for the provided implementations.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Resolve the canonical (EIP-55) address of this signer
    async fn get_address(&self) -> Result<String, SignerError>;

    /// Sign a plaintext message with EIP-191 `personal_sign`
    ///
    /// Returns the 65-byte `r || s || v` signature as a 0x-prefixed hex
    /// string.
    async fn sign_message(&self, message: &str) -> Result<String, SignerError>;
}

/// Nonce validation callback
///
/// Returns whether the nonce is valid for this authentication attempt. The
/// validator owns consume-once semantics: a nonce it accepts must be marked
/// consumed as a side effect, so a second presentation fails.
#[async_trait]
pub trait NonceValidator: Send + Sync {
    /// Validate (and consume) a nonce
    async fn validate_nonce(&self, nonce: &str) -> bool;
}

/// Plain synchronous predicates are accepted as validators
#[async_trait]
impl<F> NonceValidator for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    async fn validate_nonce(&self, nonce: &str) -> bool {
        self(nonce)
    }
}

/// Registry resolution errors
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The token has no owner in the registry
    #[error("Agent token not found in registry")]
    NotRegistered,

    /// Transport or node failure
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The node returned a malformed response
    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),
}

/// On-chain identity registry lookup
///
/// The pipeline maps any [`owner_of`](RegistryResolver::owner_of) error to a
/// `NOT_REGISTERED` outcome; the distinction between variants only matters
/// to resolver implementations and their logs.
#[async_trait]
pub trait RegistryResolver: Send + Sync {
    /// Resolve the current owner of a registry token
    async fn owner_of(&self, registry_address: &str, agent_id: u64)
        -> Result<String, ResolverError>;

    /// Whether the address currently has deployed contract code
    async fn has_code(&self, address: &str) -> Result<bool, ResolverError>;
}
