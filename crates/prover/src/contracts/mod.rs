//! Compile-time contract bindings and calldata encoders.
//!
//! All ABIs are embedded via the `sol!` macro; selectors are compile-time
//! constants derived from the canonical signatures.

pub mod dispute_game;
pub mod l1_block;
pub mod native_prover;
pub mod output_oracle;
pub mod registry;

use alloy_sol_types::SolCall;

use crate::error::ProverError;

/// Decodes an `eth_call` return for the given contract function, rejecting
/// empty return data.
pub(crate) fn decode_returns<C: SolCall>(data: &[u8]) -> Result<C::Return, ProverError> {
    if data.is_empty() {
        return Err(ProverError::EmptyResult(format!(
            "{} returned no data",
            C::SIGNATURE
        )));
    }
    C::abi_decode_returns(data)
        .map_err(|e| ProverError::Decode(format!("{}: {e}", C::SIGNATURE)))
}
