//! Fixtures and mock collaborators for integration tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use siwa_core::traits::{NonceValidator, RegistryResolver, ResolverError};
use siwa_core::types::MessageFields;
use siwa_signers::LocalSigner;

/// Relying-party domain used across scenarios
pub const TEST_DOMAIN: &str = "test.example.com";
/// Sign-in target resource
pub const TEST_URI: &str = "https://test.example.com/siwa/verify";
/// Agent token under test
pub const TEST_AGENT_ID: u64 = 999;
/// Identity registry on Base Sepolia
pub const TEST_AGENT_REGISTRY: &str = "eip155:84532:0x8004A818BFB912233c491871b3d84c89A494BD9e";
/// Base Sepolia chain ID
pub const TEST_CHAIN_ID: u64 = 84532;

/// Deterministic signer key for scenarios
pub const TEST_PRIVATE_KEY: &str =
    "0x4242424242424242424242424242424242424242424242424242424242424242";

/// Create the scenario signer
pub fn test_signer() -> LocalSigner {
    LocalSigner::from_private_key(TEST_PRIVATE_KEY).unwrap()
}

/// Message fields for the standard scenario, address left to the signer
pub fn test_fields(nonce: &str) -> MessageFields {
    MessageFields {
        domain: TEST_DOMAIN.to_string(),
        uri: TEST_URI.to_string(),
        agent_id: TEST_AGENT_ID,
        agent_registry: TEST_AGENT_REGISTRY.to_string(),
        chain_id: TEST_CHAIN_ID,
        nonce: nonce.to_string(),
        issued_at: "2024-01-01T00:00:00Z".to_string(),
        ..Default::default()
    }
}

/// Registry mock with a canned owner and code flag
pub struct MockRegistry {
    /// Owner returned by `owner_of`; `None` simulates a missing token
    pub owner: Option<String>,
    /// Whether `has_code` reports deployed code
    pub has_code: bool,
}

impl MockRegistry {
    /// Registry that owns the token with `owner` and reports an EOA
    pub fn owned_by(owner: &str) -> Self {
        MockRegistry {
            owner: Some(owner.to_string()),
            has_code: false,
        }
    }

    /// Registry with no such token
    pub fn unregistered() -> Self {
        MockRegistry {
            owner: None,
            has_code: false,
        }
    }
}

#[async_trait]
impl RegistryResolver for MockRegistry {
    async fn owner_of(
        &self,
        _registry_address: &str,
        _agent_id: u64,
    ) -> Result<String, ResolverError> {
        self.owner.clone().ok_or(ResolverError::NotRegistered)
    }

    async fn has_code(&self, _address: &str) -> Result<bool, ResolverError> {
        Ok(self.has_code)
    }
}

/// Consume-once nonce store: accepts each issued nonce exactly once
pub struct NonceStore {
    issued: Mutex<HashSet<String>>,
}

impl NonceStore {
    /// Create a store with the given nonces outstanding
    pub fn with_issued(nonces: &[&str]) -> Self {
        NonceStore {
            issued: Mutex::new(nonces.iter().map(|n| n.to_string()).collect()),
        }
    }
}

#[async_trait]
impl NonceValidator for NonceStore {
    async fn validate_nonce(&self, nonce: &str) -> bool {
        // Consumes on acceptance; a second presentation fails
        self.issued.lock().unwrap().remove(nonce)
    }
}
