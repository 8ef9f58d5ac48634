//! Error types for proof generation.

use thiserror::Error;

use crate::rpc::RpcError;
use crate::types::SettlementFamily;

/// Main error type for proof generation.
///
/// No variant is recovered internally; every error aborts the pipeline and
/// surfaces to the caller with the failing step's context attached.
#[derive(Debug, Error)]
pub enum ProverError {
    /// RPC transport or response error.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Received bytes do not match the expected length or ABI layout.
    #[error("decode error: {0}")]
    Decode(String),

    /// A contract returned no data where data is required.
    #[error("empty result: {0}")]
    EmptyResult(String),

    /// The registry reported a settlement family this prover cannot prove against.
    #[error("unsupported settlement family: {0}")]
    UnsupportedFamily(SettlementFamily),

    /// Scanning the settlement contract yielded no usable settled output.
    #[error("no resolved settlement: {0}")]
    NoResolvedSettlement(String),

    /// An `eth_getProof` reply lacks a requested slot or required account field.
    #[error("proof missing: {0}")]
    ProofMissing(String),

    /// Waiting for a new L1-origin epoch exhausted its allotted polls.
    #[error("timed out waiting for new epoch after {0} polls")]
    EpochTimeout(u32),

    /// The request was cancelled.
    #[error("operation cancelled")]
    Cancelled,

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for proof generation.
pub type ProverResult<T> = Result<T, ProverError>;
