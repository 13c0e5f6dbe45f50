//! # siwa-core
//!
//! Sign In With Agent (SIWA): challenge-response authentication binding a
//! wallet signature to an on-chain agent identity (an ERC-8004-style
//! registry entry).
//!
//! This crate provides:
//! - the canonical plaintext message codec ([`build_message`] /
//!   [`parse_message`])
//! - replay-protection nonce generation ([`generate_nonce`])
//! - the client-side signing flow ([`sign_message`]) over the [`Signer`]
//!   capability
//! - the server-side verification pipeline ([`Verifier`])
//! - the platform response shaper ([`build_response`])
//!
//! Signature recovery, nonce storage, and on-chain ownership resolution are
//! injected through the [`traits`] module; see `siwa-signers` and
//! `siwa-registry` for the production backends.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod message;
pub mod nonce;
pub mod response;
pub mod sign;
pub mod traits;
pub mod types;
pub mod verify;

// Re-exports
pub use errors::{FormatError, SignError, SignerError};
pub use message::{build_message, parse_message};
pub use nonce::{generate_nonce, generate_nonce_default};
pub use response::{build_response, RegisterAction, ResponseStatus, SiwaResponse};
pub use sign::{sign_message, SignedMessage};
pub use traits::{NonceValidator, RegistryResolver, ResolverError, Signer};
pub use types::*;
pub use verify::Verifier;
