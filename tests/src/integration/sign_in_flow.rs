//! End-to-end sign-in scenarios: build, sign, verify.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use chrono::{Duration, Utc};

    use siwa_core::errors::SignError;
    use siwa_core::sign::sign_message;
    use siwa_core::traits::Signer;
    use siwa_core::types::{ErrorCode, SignerType, VerificationResult, Verified};
    use siwa_core::verify::Verifier;
    use siwa_core::{generate_nonce_default, parse_message};

    use crate::common::*;

    #[tokio::test]
    async fn test_full_sign_in_success() {
        let signer = test_signer();
        let address = signer.get_address().await.unwrap();

        let nonce = generate_nonce_default();
        let signed = sign_message(&test_fields(&nonce), &signer).await.unwrap();

        // The wire message round-trips to the fields that were signed
        let parsed = parse_message(&signed.message).unwrap();
        assert_eq!(parsed.domain, TEST_DOMAIN);
        assert_eq!(parsed.address.as_deref(), Some(address.as_str()));
        assert_eq!(parsed.agent_id, TEST_AGENT_ID);

        // The signature recovers to the signer independently of the pipeline
        assert_eq!(
            siwa_crypto::recover_personal_sign(&signed.message, &signed.signature).unwrap(),
            address
        );

        let verifier = Verifier::new(
            TEST_DOMAIN,
            NonceStore::with_issued(&[&nonce]),
            MockRegistry::owned_by(&address),
        );

        let result = verifier.verify(&signed.message, &signed.signature).await;
        let VerificationResult::Valid(agent) = result else {
            panic!("expected valid result");
        };

        assert_eq!(agent.address, address);
        assert_eq!(agent.agent_id, TEST_AGENT_ID);
        assert_eq!(agent.agent_registry, TEST_AGENT_REGISTRY);
        assert_eq!(agent.chain_id, TEST_CHAIN_ID);
        assert_eq!(agent.verified, Verified::Onchain);
        assert_eq!(agent.signer_type, SignerType::Eoa);
    }

    #[tokio::test]
    async fn test_replay_is_rejected_by_consumed_nonce() {
        let signer = test_signer();
        let address = signer.get_address().await.unwrap();

        let nonce = generate_nonce_default();
        let signed = sign_message(&test_fields(&nonce), &signer).await.unwrap();

        let verifier = Verifier::new(
            TEST_DOMAIN,
            NonceStore::with_issued(&[&nonce]),
            MockRegistry::owned_by(&address),
        );

        let first = verifier.verify(&signed.message, &signed.signature).await;
        assert!(first.is_valid());

        // Same message again: the nonce was consumed by the first pass
        let replay = verifier.verify(&signed.message, &signed.signature).await;
        assert_eq!(replay.code(), Some(ErrorCode::InvalidNonce));
    }

    #[tokio::test]
    async fn test_cross_domain_replay_preserves_nonce() {
        let signer = test_signer();
        let address = signer.get_address().await.unwrap();

        let nonce = generate_nonce_default();
        let signed = sign_message(&test_fields(&nonce), &signer).await.unwrap();

        // One consume-once nonce set shared by both relying parties
        let issued = Arc::new(Mutex::new(HashSet::from([nonce.clone()])));

        // A verifier for another domain must reject on domain binding
        // without consuming the nonce...
        let store = Arc::clone(&issued);
        let other_verifier = Verifier::new(
            "other.example.com",
            move |n: &str| store.lock().unwrap().remove(n),
            MockRegistry::owned_by(&address),
        );

        let result = other_verifier.verify(&signed.message, &signed.signature).await;
        assert_eq!(result.code(), Some(ErrorCode::DomainMismatch));
        assert!(issued.lock().unwrap().contains(&nonce));

        // ...so the legitimate relying party can still authenticate
        let store = Arc::clone(&issued);
        let verifier = Verifier::new(
            TEST_DOMAIN,
            move |n: &str| store.lock().unwrap().remove(n),
            MockRegistry::owned_by(&address),
        );
        let result = verifier.verify(&signed.message, &signed.signature).await;
        assert!(result.is_valid());
        assert!(issued.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unregistered_agent() {
        let signer = test_signer();

        let nonce = generate_nonce_default();
        let signed = sign_message(&test_fields(&nonce), &signer).await.unwrap();

        let verifier = Verifier::new(
            TEST_DOMAIN,
            NonceStore::with_issued(&[&nonce]),
            MockRegistry::unregistered(),
        );

        let result = verifier.verify(&signed.message, &signed.signature).await;
        let VerificationResult::Invalid(failure) = result else {
            panic!("expected failure");
        };
        assert_eq!(failure.code, ErrorCode::NotRegistered);
        assert_eq!(failure.verified, Verified::Onchain);
    }

    #[tokio::test]
    async fn test_expired_message() {
        let signer = test_signer();
        let address = signer.get_address().await.unwrap();

        let nonce = generate_nonce_default();
        let mut fields = test_fields(&nonce);
        fields.expiration_time = Some((Utc::now() - Duration::hours(1)).to_rfc3339());

        let signed = sign_message(&fields, &signer).await.unwrap();

        let verifier = Verifier::new(
            TEST_DOMAIN,
            NonceStore::with_issued(&[&nonce]),
            MockRegistry::owned_by(&address),
        );

        let result = verifier.verify(&signed.message, &signed.signature).await;
        assert_eq!(result.code(), Some(ErrorCode::MessageExpired));
    }

    #[tokio::test]
    async fn test_tampered_message_fails_signature() {
        let signer = test_signer();
        let address = signer.get_address().await.unwrap();

        let nonce = generate_nonce_default();
        let signed = sign_message(&test_fields(&nonce), &signer).await.unwrap();

        let tampered = signed
            .message
            .replacen("test.example.com", "best.example.com", 1);

        let verifier = Verifier::new(
            "best.example.com",
            NonceStore::with_issued(&[&nonce]),
            MockRegistry::owned_by(&address),
        );

        let result = verifier.verify(&tampered, &signed.signature).await;
        assert_eq!(result.code(), Some(ErrorCode::InvalidSignature));
    }

    #[tokio::test]
    async fn test_signer_is_identity_authority() {
        let signer = test_signer();

        let mut fields = test_fields("n-authority");
        fields.address = Some("0x000000000000000000000000000000000000dEaD".to_string());

        let err = sign_message(&fields, &signer).await.unwrap_err();
        assert!(matches!(err, SignError::AddressMismatch { .. }));
    }

    #[tokio::test]
    async fn test_statement_survives_signing_round_trip() {
        let signer = test_signer();

        let mut fields = test_fields("n-statement");
        fields.statement = Some("Authorize this agent to act on your behalf.".to_string());

        let signed = sign_message(&fields, &signer).await.unwrap();
        let parsed = parse_message(&signed.message).unwrap();

        assert_eq!(
            parsed.statement.as_deref(),
            Some("Authorize this agent to act on your behalf.")
        );
    }
}
