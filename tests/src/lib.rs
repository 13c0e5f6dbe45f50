//! # SIWA Test Suite
//!
//! Unified test crate for flows that span the workspace:
//!
//! ```text
//! tests/src/
//! ├── common.rs         # Fixtures and mock collaborators
//! └── integration/      # Cross-crate sign-in and verification flows
//! ```
//!
//! Run with `cargo test -p siwa-tests`.

#![allow(dead_code)]

pub mod common;
