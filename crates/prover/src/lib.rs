//! Calldata generation for the `NativeProver` cross-chain storage verifier.
//!
//! This crate assembles the proof calldata the on-chain `NativeProver`
//! contract consumes to verify that a storage slot on a source chain holds a
//! particular value, as observed from a destination chain:
//! - Registry lookups for per-chain settlement configuration
//! - L1-origin discovery through the destination chain's block-hash oracle
//! - Settlement discovery for OP Stack Bedrock and Cannon chains
//! - Account and storage Merkle proofs via `eth_getProof`
//! - RLP and contract-ABI encoding of the assembled artifact

#![warn(missing_docs)]
#![warn(unreachable_pub)]
#![deny(unused_must_use)]
#![deny(rust_2018_idioms)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod error;
pub mod l1_origin;
pub mod l1_prover;
pub mod prover;
pub mod registry;
pub mod rpc;
pub mod settlement;
pub mod slots;
pub mod storage;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use cli::Cli;
pub use constants::*;
pub use error::*;
