//! # siwa-crypto
//!
//! EVM signature primitives for the SIWA SDK.
//!
//! This crate provides the cryptographic operations the verification
//! pipeline and signer backends are built on:
//!
//! - Keccak256 hashing
//! - EIP-191 `personal_sign` message framing and digests
//! - secp256k1 address recovery from 65-byte `r || s || v` signatures
//! - EIP-55 checksum address encoding
//!
//! ## Security Properties
//!
//! - No unsafe code
//! - Signatures are recovered, never trusted from the caller
//! - Addresses are returned in EIP-55 checksum form; comparisons elsewhere
//!   are case-insensitive

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod eip191;
pub mod errors;
pub mod hashing;
pub mod keys;
pub mod recovery;

pub use address::to_checksum_address;
pub use eip191::{build_personal_message, hash_personal_message};
pub use errors::{CryptoError, Result};
pub use hashing::keccak256;
pub use keys::signing_key_from_hex;
pub use recovery::{
    address_from_verifying_key, decode_signature, recover_address, recover_personal_sign,
};
