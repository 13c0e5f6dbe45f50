//! Client-side signing flow.

use tracing::debug;

use crate::errors::SignError;
use crate::message::build_message;
use crate::traits::Signer;
use crate::types::MessageFields;

/// A signed SIWA message ready for transmission
#[derive(Debug, Clone)]
pub struct SignedMessage {
    /// The exact serialized message that was signed
    pub message: String,
    /// 0x-prefixed hex signature over the message bytes
    pub signature: String,
    /// The signer's resolved address
    pub address: String,
}

/// Build and sign a SIWA message
///
/// The signer is the single source of truth for identity: its resolved
/// address is written into the message, and a caller-supplied
/// `fields.address` that differs case-insensitively fails with
/// [`SignError::AddressMismatch`] before anything is signed.
pub async fn sign_message<S>(
    fields: &MessageFields,
    signer: &S,
) -> Result<SignedMessage, SignError>
where
    S: Signer + ?Sized,
{
    let signer_address = signer.get_address().await?;

    if let Some(claimed) = fields.address.as_deref() {
        if !claimed.eq_ignore_ascii_case(&signer_address) {
            return Err(SignError::AddressMismatch {
                signer: signer_address,
                claimed: claimed.to_string(),
            });
        }
    }

    let mut resolved = fields.clone();
    resolved.address = Some(signer_address.clone());

    let message = build_message(&resolved)?;
    debug!(domain = %resolved.domain, address = %signer_address, "signing SIWA message");

    let signature = signer.sign_message(&message).await?;

    Ok(SignedMessage {
        message,
        signature,
        address: signer_address,
    })
}
