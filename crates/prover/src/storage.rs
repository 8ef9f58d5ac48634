//! Storage-proof fetching via `eth_getProof`.

use std::sync::Arc;

use alloy_primitives::{Address, B256};

use crate::error::ProverError;
use crate::rpc::ChainClient;
use crate::types::StorageProofBundle;

/// Fetches storage values and account/storage Merkle proofs from a chain.
#[derive(Debug)]
pub struct StorageProver<C> {
    client: Arc<C>,
}

impl<C: ChainClient> StorageProver<C> {
    /// Creates a new storage prover.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Reads the raw value stored at `slot`, pinned to `block_number` so the
    /// value matches the proof generated at the same height.
    pub async fn get_storage_at(
        &self,
        address: Address,
        slot: B256,
        block_number: Option<u64>,
    ) -> Result<B256, ProverError> {
        Ok(self.client.get_storage_at(address, slot, block_number).await?)
    }

    /// Generates the account and storage proofs for `slot` at `block_number`.
    pub async fn generate_storage_proof(
        &self,
        address: Address,
        slot: B256,
        block_number: Option<u64>,
    ) -> Result<StorageProofBundle, ProverError> {
        let proof = self.client.get_proof(address, vec![slot], block_number).await?;
        proof.to_bundle()
    }
}
