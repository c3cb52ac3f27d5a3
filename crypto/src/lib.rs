//! Cryptographic primitives for commit-reveal voting.
//!
//! - **Keccak-256** for commitments compatible with existing Ethereum tooling
//! - **Blake2b** for the domain-separated `blake2b-v1` commitment scheme
//! - [`commit`] / [`verify`] turn a `(choice, secret)` pair into a commitment and back

pub mod commitment;
pub mod error;
pub mod hash;

pub use commitment::{commit, preimage, verify, BLAKE2B_V1_DOMAIN, SEPARATOR};
pub use error::CryptoError;
pub use hash::{blake2b_256, blake2b_256_multi, keccak256, keccak256_multi};
