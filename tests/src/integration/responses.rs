//! Verification results shaped into platform responses.

#[cfg(test)]
mod tests {
    use siwa_core::response::{build_response, ResponseStatus};
    use siwa_core::sign::sign_message;
    use siwa_core::traits::Signer;
    use siwa_core::types::SkillRef;
    use siwa_core::verify::Verifier;
    use siwa_core::generate_nonce_default;

    use crate::common::*;

    #[tokio::test]
    async fn test_authenticated_envelope() {
        let signer = test_signer();
        let address = signer.get_address().await.unwrap();

        let nonce = generate_nonce_default();
        let signed = sign_message(&test_fields(&nonce), &signer).await.unwrap();

        let verifier = Verifier::new(
            TEST_DOMAIN,
            NonceStore::with_issued(&[&nonce]),
            MockRegistry::owned_by(&address),
        );

        let result = verifier.verify(&signed.message, &signed.signature).await;
        let response = build_response(&result, &SkillRef::default());

        assert_eq!(response.status, ResponseStatus::Authenticated);
        assert_eq!(response.address, address);
        assert_eq!(response.agent_id, TEST_AGENT_ID);
        assert_eq!(response.chain_id, TEST_CHAIN_ID);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "authenticated");
        assert_eq!(json["verified"], "onchain");
        assert_eq!(json["signer_type"], "eoa");
    }

    #[tokio::test]
    async fn test_not_registered_envelope_has_remediation() {
        let signer = test_signer();

        let nonce = generate_nonce_default();
        let signed = sign_message(&test_fields(&nonce), &signer).await.unwrap();

        let verifier = Verifier::new(
            TEST_DOMAIN,
            NonceStore::with_issued(&[&nonce]),
            MockRegistry::unregistered(),
        );

        let result = verifier.verify(&signed.message, &signed.signature).await;
        let response = build_response(&result, &SkillRef::default());

        assert_eq!(response.status, ResponseStatus::NotRegistered);

        let action = response.action.as_ref().expect("registration action");
        assert!(!action.steps.is_empty());
        assert_eq!(
            action.registry_address.as_deref(),
            Some("0x8004A818BFB912233c491871b3d84c89A494BD9e")
        );
        assert_eq!(action.chain_id, Some(TEST_CHAIN_ID));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "not_registered");
        assert_eq!(json["code"], "NOT_REGISTERED");
        assert_eq!(json["action"]["type"], "register");
    }

    #[tokio::test]
    async fn test_rejected_envelope() {
        let signer = test_signer();
        let address = signer.get_address().await.unwrap();

        let nonce = generate_nonce_default();
        let signed = sign_message(&test_fields(&nonce), &signer).await.unwrap();

        // Nonce store never issued this nonce
        let verifier = Verifier::new(
            TEST_DOMAIN,
            NonceStore::with_issued(&[]),
            MockRegistry::owned_by(&address),
        );

        let result = verifier.verify(&signed.message, &signed.signature).await;
        let response = build_response(&result, &SkillRef::default());

        assert_eq!(response.status, ResponseStatus::Rejected);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["code"], "INVALID_NONCE");
        assert!(json.get("action").is_none());
    }
}
