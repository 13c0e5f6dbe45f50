//! # siwa-signers
//!
//! Signer backends for the SIWA SDK.
//!
//! Two interchangeable implementations of the
//! [`Signer`](siwa_core::traits::Signer) capability:
//!
//! - [`LocalSigner`] — an in-process secp256k1 private key
//! - [`KeyringProxySigner`] — a remote keyring proxy reached over HTTP,
//!   keeping key material out of the agent process

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod local;
pub mod proxy;

pub use local::LocalSigner;
pub use proxy::KeyringProxySigner;
