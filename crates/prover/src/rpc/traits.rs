//! Async trait definition for chain RPC clients.

use alloy_primitives::{Address, Bytes, B256};
use alloy_rpc_types_eth::Header;
use async_trait::async_trait;

use super::error::RpcResult;
use crate::types::ProofResult;

/// RPC surface the proof pipeline consumes, one instance per chain.
///
/// All block-pinned methods take `Option<u64>`; `None` means the latest block.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Executes a contract call without creating a transaction.
    async fn call_contract(
        &self,
        to: Address,
        data: Bytes,
        block_number: Option<u64>,
    ) -> RpcResult<Bytes>;

    /// Gets a header by block number.
    async fn header_by_number(&self, number: Option<u64>) -> RpcResult<Header>;

    /// Gets a header by block hash.
    async fn header_by_hash(&self, hash: B256) -> RpcResult<Header>;

    /// Gets account and storage proofs via `eth_getProof`.
    async fn get_proof(
        &self,
        address: Address,
        slots: Vec<B256>,
        block_number: Option<u64>,
    ) -> RpcResult<ProofResult>;

    /// Reads a raw storage slot via `eth_getStorageAt`.
    async fn get_storage_at(
        &self,
        address: Address,
        slot: B256,
        block_number: Option<u64>,
    ) -> RpcResult<B256>;
}
