//! SIWA error types.
//!
//! Two tiers: [`FormatError`] and [`SignError`] are raised to the caller of
//! the codec and signing flow; verification-domain failures never surface
//! as errors and are always folded into a
//! [`VerificationResult`](crate::types::VerificationResult).

use thiserror::Error;

/// Malformed message structure
#[derive(Debug, Error)]
pub enum FormatError {
    /// First line does not end in the fixed sign-in suffix
    #[error("Invalid SIWA message: missing domain line")]
    MissingDomainLine,

    /// Second line is missing, not 0x-prefixed, or not 42 characters
    #[error("Invalid SIWA message: missing or malformed address")]
    MalformedAddress,

    /// Fields have no address to serialize; resolve one from a signer first
    #[error("Missing address: message fields carry no account address")]
    MissingAddress,

    /// A numeric field is present but not base-10
    #[error("Invalid SIWA message: field {field:?} is not numeric: {value:?}")]
    InvalidNumber {
        /// Key of the offending field line
        field: &'static str,
        /// Raw value that failed to parse
        value: String,
    },
}

/// Signing flow errors
#[derive(Debug, Error)]
pub enum SignError {
    /// Caller-supplied address differs from the signer's resolved address
    #[error("Address mismatch: signer has {signer}, message claims {claimed}")]
    AddressMismatch {
        /// Address resolved from the signer
        signer: String,
        /// Address carried by the caller's fields
        claimed: String,
    },

    /// Message serialization failed
    #[error("Message build failed: {0}")]
    Format(#[from] FormatError),

    /// Signer backend failure
    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),
}

/// Signer backend errors
#[derive(Debug, Error)]
pub enum SignerError {
    /// Key material could not be loaded
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    /// The signing operation itself failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Remote keyring proxy error
    #[error("Keyring proxy error: {0}")]
    Proxy(String),
}
