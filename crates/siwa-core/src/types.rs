//! SIWA type definitions.

use serde::{Deserialize, Serialize};

/// Fields of a SIWA authentication claim
///
/// Constructed once per authentication attempt, serialized with
/// [`build_message`](crate::message::build_message), transmitted once, and
/// consumed once by verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageFields {
    /// Relying-party origin the message is bound to
    pub domain: String,

    /// Account address (0x-prefixed, 42 chars, EIP-55 canonical casing).
    /// Optional at build time; the signing flow resolves it from the signer.
    pub address: Option<String>,

    /// Human-readable purpose; may span multiple lines
    pub statement: Option<String>,

    /// Target resource
    pub uri: String,

    /// Protocol version (defaults to "1")
    pub version: String,

    /// Token ID in the identity registry
    pub agent_id: u64,

    /// Registry identifier of form "eip155:<chainId>:<contractAddress>"
    pub agent_registry: String,

    /// Numeric chain identifier
    pub chain_id: u64,

    /// Single-use replay-protection token
    pub nonce: String,

    /// RFC 3339 issuance timestamp
    pub issued_at: String,

    /// RFC 3339 expiry bound
    pub expiration_time: Option<String>,

    /// RFC 3339 validity start bound
    pub not_before: Option<String>,

    /// Opaque correlation token
    pub request_id: Option<String>,
}

impl Default for MessageFields {
    fn default() -> Self {
        MessageFields {
            domain: String::new(),
            address: None,
            statement: None,
            uri: String::new(),
            version: "1".to_string(),
            agent_id: 0,
            agent_registry: String::new(),
            chain_id: 0,
            nonce: String::new(),
            issued_at: String::new(),
            expiration_time: None,
            not_before: None,
            request_id: None,
        }
    }
}

/// Whether on-chain resolution was reached during verification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verified {
    /// Verification failed before any chain call
    Offline,
    /// On-chain ownership resolution was reached
    Onchain,
}

/// Signer account classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SignerType {
    /// Externally-owned account (no deployed code)
    Eoa,
    /// Smart-contract account (deployed code at the address)
    Sca,
}

/// Verification failure codes
///
/// `AgentNotActive`, `MissingService`, `MissingTrustModel`, `LowReputation`,
/// and `CustomCheckFailed` are reserved for extension checks layered on top
/// of the base pipeline and are never emitted by it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Signature did not recover to the claimed address
    InvalidSignature,
    /// Message domain does not match the relying party
    DomainMismatch,
    /// Nonce rejected or already consumed
    InvalidNonce,
    /// Expiration time is in the past
    MessageExpired,
    /// Not-before time is in the future
    MessageNotYetValid,
    /// agent_registry is not "eip155:<chainId>:<contractAddress>"
    InvalidRegistryFormat,
    /// No owner for the token in the identity registry
    NotRegistered,
    /// Registry owner differs from the signer
    NotOwner,
    /// Reserved: agent metadata marks it inactive
    AgentNotActive,
    /// Reserved: required service endpoint missing from agent metadata
    MissingService,
    /// Reserved: required trust model missing from agent metadata
    MissingTrustModel,
    /// Reserved: reputation score below the relying party's threshold
    LowReputation,
    /// Reserved: host-supplied extension check rejected the agent
    CustomCheckFailed,
    /// Message unparseable or an unexpected pipeline failure
    VerificationFailed,
}

/// Successful verification outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedAgent {
    /// Recovered signer address (EIP-55)
    pub address: String,
    /// Agent token ID
    pub agent_id: u64,
    /// Registry identifier
    pub agent_registry: String,
    /// Chain ID from the message
    pub chain_id: u64,
    /// Always [`Verified::Onchain`] for a valid result
    pub verified: Verified,
    /// Account classification of the signer
    pub signer_type: SignerType,
}

/// Failed verification outcome
///
/// Field values are taken from whatever parsed successfully; defaults when
/// parsing itself failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationFailure {
    /// Address field of the message, if parsed
    pub address: String,
    /// Agent token ID, if parsed
    pub agent_id: u64,
    /// Registry identifier, if parsed
    pub agent_registry: String,
    /// Chain ID, if parsed
    pub chain_id: u64,
    /// Whether the pipeline reached on-chain resolution
    pub verified: Verified,
    /// Stage-specific failure code
    pub code: ErrorCode,
    /// Human-readable failure detail
    pub error: String,
}

/// Outcome of the verification pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VerificationResult {
    /// All stages passed; the signer owns the agent
    Valid(VerifiedAgent),
    /// Some stage rejected the request
    Invalid(VerificationFailure),
}

impl VerificationResult {
    /// Whether verification succeeded
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationResult::Valid(_))
    }

    /// Failure code, when invalid
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            VerificationResult::Valid(_) => None,
            VerificationResult::Invalid(failure) => Some(failure.code),
        }
    }
}

/// Reference to the SIWA skill/SDK, embedded in platform responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRef {
    /// Skill name
    pub name: String,
    /// Install command for the SDK
    pub install: String,
    /// Skill documentation URL
    pub url: String,
}

impl Default for SkillRef {
    fn default() -> Self {
        SkillRef {
            name: "siwa".to_string(),
            install: "cargo add siwa-core".to_string(),
            url: "https://siwa.id/skill.md".to_string(),
        }
    }
}
