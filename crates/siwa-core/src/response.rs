//! Platform response shaping.
//!
//! [`build_response`] collapses a [`VerificationResult`] into the
//! three-state envelope platforms branch on: `authenticated`,
//! `not_registered` (with an actionable registration remediation), or
//! `rejected`. The envelope is serialized verbatim to the calling platform.

use serde::{Deserialize, Serialize};

use crate::types::{ErrorCode, SignerType, SkillRef, VerificationResult, Verified};

/// Coarse response status for platforms
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// Verification succeeded
    Authenticated,
    /// Verification failed because the agent has no registry entry
    NotRegistered,
    /// Verification failed for any other reason
    Rejected,
}

/// Remediation action attached to `not_registered` responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAction {
    /// Action discriminator, always `"register"`
    #[serde(rename = "type")]
    pub action_type: String,
    /// Human/agent-readable summary of what to do
    pub message: String,
    /// SDK reference for the registration tooling
    pub skill: SkillRef,
    /// Ordered registration steps
    pub steps: Vec<String>,
    /// Registry contract address, when derivable from `agent_registry`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_address: Option<String>,
    /// Chain ID, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

/// Standard SIWA response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiwaResponse {
    /// Coarse outcome platforms branch on
    pub status: ResponseStatus,
    /// Signer address (empty when parsing failed before recovery)
    pub address: String,
    /// Agent token ID
    pub agent_id: u64,
    /// Registry identifier
    pub agent_registry: String,
    /// Chain ID
    pub chain_id: u64,
    /// Whether on-chain resolution was reached
    pub verified: Verified,
    /// Signer classification, when it was determined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_type: Option<SignerType>,
    /// Failure code, absent when authenticated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    /// Failure detail, absent when authenticated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// SDK reference, attached to failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<SkillRef>,
    /// Registration remediation, attached to `not_registered`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<RegisterAction>,
}

/// Map a verification result to the platform response envelope
///
/// Pure and total: every result maps to exactly one envelope. `skill` is
/// the statically configured SDK reference embedded into failure responses.
pub fn build_response(result: &VerificationResult, skill: &SkillRef) -> SiwaResponse {
    match result {
        VerificationResult::Valid(agent) => SiwaResponse {
            status: ResponseStatus::Authenticated,
            address: agent.address.clone(),
            agent_id: agent.agent_id,
            agent_registry: agent.agent_registry.clone(),
            chain_id: agent.chain_id,
            verified: agent.verified,
            signer_type: Some(agent.signer_type),
            code: None,
            error: None,
            skill: None,
            action: None,
        },

        VerificationResult::Invalid(failure) if failure.code == ErrorCode::NotRegistered => {
            let registry_parts: Vec<&str> = failure.agent_registry.split(':').collect();
            let registry_address = (registry_parts.len() == 3)
                .then(|| registry_parts[2].to_string());
            let chain_id = if failure.chain_id != 0 {
                Some(failure.chain_id)
            } else {
                registry_parts.get(1).and_then(|part| part.parse().ok())
            };

            SiwaResponse {
                status: ResponseStatus::NotRegistered,
                address: failure.address.clone(),
                agent_id: failure.agent_id,
                agent_registry: failure.agent_registry.clone(),
                chain_id: failure.chain_id,
                verified: failure.verified,
                signer_type: None,
                code: Some(failure.code),
                error: Some(
                    "Agent is not registered on the ERC-8004 Identity Registry.".to_string(),
                ),
                skill: Some(skill.clone()),
                action: Some(RegisterAction {
                    action_type: "register".to_string(),
                    message: "This address is not registered as an ERC-8004 agent. Install \
                              the SIWA SDK and register before signing in."
                        .to_string(),
                    skill: skill.clone(),
                    steps: registration_steps(skill),
                    registry_address,
                    chain_id,
                }),
            }
        }

        VerificationResult::Invalid(failure) => SiwaResponse {
            status: ResponseStatus::Rejected,
            address: failure.address.clone(),
            agent_id: failure.agent_id,
            agent_registry: failure.agent_registry.clone(),
            chain_id: failure.chain_id,
            verified: failure.verified,
            signer_type: None,
            code: Some(failure.code),
            error: Some(failure.error.clone()),
            skill: Some(skill.clone()),
            action: None,
        },
    }
}

/// The fixed registration walkthrough for unregistered agents
fn registration_steps(skill: &SkillRef) -> Vec<String> {
    vec![
        format!("Install the SDK: {}", skill.install),
        "Create a wallet: generate a secp256k1 key and load it with LocalSigner".to_string(),
        "Fund the wallet with ETH on the target chain for gas fees".to_string(),
        "Build ERC-8004 registration metadata (JSON with name, description, services, \
         active: true)"
            .to_string(),
        "Register onchain: call register(agent_uri) on the Identity Registry contract"
            .to_string(),
        "Retry SIWA sign-in".to_string(),
    ]
}
