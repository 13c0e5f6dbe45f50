//! Remote keyring proxy signer.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use siwa_core::errors::SignerError;
use siwa_core::traits::Signer;

/// Signer backed by a remote keyring proxy server
///
/// The proxy holds the private key; this client asks it for the account
/// address (`GET {base_url}/address`) and for signatures
/// (`POST {base_url}/sign`). Authentication with an API token is optional.
pub struct KeyringProxySigner {
    http_client: Client,
    base_url: String,
    api_token: Option<String>,
}

/// Response of `GET /address`
#[derive(Debug, Deserialize)]
struct AddressResponse {
    address: String,
}

/// Body of `POST /sign`
#[derive(Debug, Serialize)]
struct SignRequest<'a> {
    message: &'a str,
}

/// Response of `POST /sign`
#[derive(Debug, Deserialize)]
struct SignResponse {
    signature: String,
}

impl KeyringProxySigner {
    /// Create a proxy signer against a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        KeyringProxySigner {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: None,
        }
    }

    /// Attach a bearer token to every proxy request
    pub fn with_api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl Signer for KeyringProxySigner {
    async fn get_address(&self) -> Result<String, SignerError> {
        let url = format!("{}/address", self.base_url);

        let response = self
            .request(self.http_client.get(&url))
            .send()
            .await
            .map_err(|e| SignerError::Proxy(format!("Address request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SignerError::Proxy(format!(
                "Address request failed with status {}",
                response.status()
            )));
        }

        let body: AddressResponse = response
            .json()
            .await
            .map_err(|e| SignerError::Proxy(format!("Failed to parse address response: {}", e)))?;

        Ok(body.address)
    }

    async fn sign_message(&self, message: &str) -> Result<String, SignerError> {
        let url = format!("{}/sign", self.base_url);
        debug!(url = %url, "requesting signature from keyring proxy");

        let response = self
            .request(self.http_client.post(&url))
            .json(&SignRequest { message })
            .send()
            .await
            .map_err(|e| SignerError::Proxy(format!("Sign request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SignerError::Proxy(format!(
                "Sign request failed with status {}",
                response.status()
            )));
        }

        let body: SignResponse = response
            .json()
            .await
            .map_err(|e| SignerError::Proxy(format!("Failed to parse sign response: {}", e)))?;

        Ok(body.signature)
    }
}
