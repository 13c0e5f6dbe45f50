//! Server-side verification pipeline.
//!
//! [`Verifier::verify`] runs the ordered stages of SIWA verification and is
//! total over its boundary: every outcome, including unparseable input, is
//! a [`VerificationResult`] — callers never handle errors for expected
//! authentication failures.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::message::parse_message;
use crate::traits::{NonceValidator, RegistryResolver};
use crate::types::{
    ErrorCode, MessageFields, SignerType, VerificationFailure, VerificationResult, Verified,
    VerifiedAgent,
};

/// CAIP-2 namespace accepted in `agent_registry`
const REGISTRY_NAMESPACE: &str = "eip155";

/// SIWA message verifier
///
/// Holds the relying party's expected domain and the injected nonce and
/// registry collaborators. Stateless across calls; one instance may serve
/// concurrent verifications.
pub struct Verifier<N, R> {
    expected_domain: String,
    nonce_validator: N,
    resolver: R,
    registry_address: Option<String>,
}

impl<N, R> Verifier<N, R>
where
    N: NonceValidator,
    R: RegistryResolver,
{
    /// Create a verifier for the given relying-party domain
    pub fn new(expected_domain: impl Into<String>, nonce_validator: N, resolver: R) -> Self {
        Verifier {
            expected_domain: expected_domain.into(),
            nonce_validator,
            resolver,
            registry_address: None,
        }
    }

    /// Override the registry contract address from the message
    pub fn with_registry_address(mut self, registry_address: impl Into<String>) -> Self {
        self.registry_address = Some(registry_address.into());
        self
    }

    /// Verify a SIWA message and signature
    ///
    /// Stages run in strict order and short-circuit on the first failure;
    /// the signature is verified before any parsed field is trusted, and
    /// domain binding runs before nonce consumption so a cross-domain
    /// replay never burns the legitimate nonce. No chain RPC is spent on a
    /// request that fails an offline stage.
    pub async fn verify(&self, message: &str, signature: &str) -> VerificationResult {
        // 1. Parse: an unparseable message is a terminal offline failure
        let fields = match parse_message(message) {
            Ok(fields) => fields,
            Err(e) => {
                warn!(error = %e, "SIWA message unparseable");
                return fail(
                    &MessageFields::default(),
                    Verified::Offline,
                    ErrorCode::VerificationFailed,
                    e.to_string(),
                );
            }
        };
        // Parse guarantees the address line
        let address = fields.address.clone().unwrap_or_default();

        debug!(
            domain = %fields.domain,
            address = %address,
            agent_id = fields.agent_id,
            "verifying SIWA message"
        );

        // 2. Signature recovery
        let recovered = match siwa_crypto::recover_personal_sign(message, signature) {
            Ok(recovered) => recovered,
            Err(e) => {
                warn!(error = %e, "signature recovery failed");
                return fail(
                    &fields,
                    Verified::Offline,
                    ErrorCode::InvalidSignature,
                    "Invalid signature".to_string(),
                );
            }
        };

        // 3. Recovered signer must match the embedded address
        if !recovered.eq_ignore_ascii_case(&address) {
            warn!(recovered = %recovered, claimed = %address, "signer mismatch");
            return fail(
                &fields,
                Verified::Offline,
                ErrorCode::InvalidSignature,
                format!("Signature recovered {}, expected {}", recovered, address),
            );
        }

        // 4. Domain binding, before nonce consumption
        if fields.domain != self.expected_domain {
            warn!(expected = %self.expected_domain, got = %fields.domain, "domain mismatch");
            return fail(
                &fields,
                Verified::Offline,
                ErrorCode::DomainMismatch,
                format!(
                    "Domain mismatch: expected {}, got {}",
                    self.expected_domain, fields.domain
                ),
            );
        }

        // 5. Nonce validation; the validator consumes on acceptance
        if !self.nonce_validator.validate_nonce(&fields.nonce).await {
            warn!(nonce = %fields.nonce, "nonce rejected");
            return fail(
                &fields,
                Verified::Offline,
                ErrorCode::InvalidNonce,
                "Invalid or consumed nonce".to_string(),
            );
        }

        // 6. Time window
        if let Err(result) = check_time_window(&fields) {
            return result;
        }

        // 7. Registry format
        let registry_parts: Vec<&str> = fields.agent_registry.split(':').collect();
        if registry_parts.len() != 3 || registry_parts[0] != REGISTRY_NAMESPACE {
            return fail(
                &fields,
                Verified::Offline,
                ErrorCode::InvalidRegistryFormat,
                "Invalid agent_registry format".to_string(),
            );
        }

        // 8. On-chain ownership
        let registry_address = self
            .registry_address
            .as_deref()
            .unwrap_or(registry_parts[2]);

        let owner = match self.resolver.owner_of(registry_address, fields.agent_id).await {
            Ok(owner) => owner,
            Err(e) => {
                warn!(
                    registry = %registry_address,
                    agent_id = fields.agent_id,
                    error = %e,
                    "ownership lookup failed"
                );
                return fail(
                    &fields,
                    Verified::Onchain,
                    ErrorCode::NotRegistered,
                    "Agent is not registered on the ERC-8004 Identity Registry".to_string(),
                );
            }
        };

        if !owner.eq_ignore_ascii_case(&recovered) {
            warn!(owner = %owner, signer = %recovered, "signer does not own agent");
            return fail(
                &fields,
                Verified::Onchain,
                ErrorCode::NotOwner,
                "Signer is not the owner of this agent NFT".to_string(),
            );
        }

        // 9. Signer-type classification; informational only
        let signer_type = match self.resolver.has_code(&address).await {
            Ok(true) => SignerType::Sca,
            Ok(false) => SignerType::Eoa,
            Err(e) => {
                warn!(address = %address, error = %e, "code lookup failed, assuming EOA");
                SignerType::Eoa
            }
        };

        debug!(address = %recovered, agent_id = fields.agent_id, "SIWA verification succeeded");

        // 10. Success
        VerificationResult::Valid(VerifiedAgent {
            address: recovered,
            agent_id: fields.agent_id,
            agent_registry: fields.agent_registry.clone(),
            chain_id: fields.chain_id,
            verified: Verified::Onchain,
            signer_type,
        })
    }
}

/// Build a failure result from whatever parsed successfully
fn fail(
    fields: &MessageFields,
    verified: Verified,
    code: ErrorCode,
    error: String,
) -> VerificationResult {
    VerificationResult::Invalid(VerificationFailure {
        address: fields.address.clone().unwrap_or_default(),
        agent_id: fields.agent_id,
        agent_registry: fields.agent_registry.clone(),
        chain_id: fields.chain_id,
        verified,
        code,
        error,
    })
}

/// Enforce `not_before <= now <= expiration_time` for whichever bounds are
/// present; an unparseable timestamp is a terminal failure
fn check_time_window(fields: &MessageFields) -> Result<(), VerificationResult> {
    let now = Utc::now();

    if let Some(raw) = fields.expiration_time.as_deref().filter(|s| !s.is_empty()) {
        let expiration = parse_rfc3339(fields, "expiration_time", raw)?;
        if now > expiration {
            warn!(expiration = %raw, "message expired");
            return Err(fail(
                fields,
                Verified::Offline,
                ErrorCode::MessageExpired,
                "Message expired".to_string(),
            ));
        }
    }

    if let Some(raw) = fields.not_before.as_deref().filter(|s| !s.is_empty()) {
        let not_before = parse_rfc3339(fields, "not_before", raw)?;
        if now < not_before {
            warn!(not_before = %raw, "message not yet valid");
            return Err(fail(
                fields,
                Verified::Offline,
                ErrorCode::MessageNotYetValid,
                "Message not yet valid (not_before)".to_string(),
            ));
        }
    }

    Ok(())
}

fn parse_rfc3339(
    fields: &MessageFields,
    name: &str,
    raw: &str,
) -> Result<DateTime<Utc>, VerificationResult> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            warn!(field = name, value = raw, error = %e, "bad timestamp");
            fail(
                fields,
                Verified::Offline,
                ErrorCode::VerificationFailed,
                format!("Invalid {} timestamp: {}", name, e),
            )
        })
}
