//! # siwa-registry
//!
//! On-chain identity registry resolution for the SIWA SDK.
//!
//! [`RpcRegistryResolver`] implements the
//! [`RegistryResolver`](siwa_core::traits::RegistryResolver) capability
//! against any Ethereum JSON-RPC endpoint: token ownership through the
//! ERC-721 `ownerOf(uint256)` view call, and signer-type classification
//! through `eth_getCode`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod rpc;

pub use rpc::RpcRegistryResolver;
