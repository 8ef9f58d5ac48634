//! L1-proof orchestration: proving a reference-chain storage slot directly.
//!
//! A strict subset of the destination-proof sequence: no settlement discovery
//! and no L2 header; the slot is proven under the L1 origin's own state root.

use std::sync::Arc;

use alloy_primitives::{Address, Bytes};
use alloy_rpc_types_eth::Header;
use tokio_util::sync::CancellationToken;

use crate::config::{ProveL1Config, ProveParams};
use crate::contracts::native_prover::{encode_prove_l1_calldata, ProveL1ScalarArgs};
use crate::error::ProverError;
use crate::l1_origin::L1OriginProver;
use crate::prover::{cancellable, to_hex};
use crate::registry::RegistryProver;
use crate::rpc::ChainClient;
use crate::storage::StorageProver;

/// Orchestrates proofs of reference-chain storage slots.
pub struct L1Prover<C: ChainClient> {
    l1_origin_prover: L1OriginProver<C>,
    storage_prover: StorageProver<C>,
    l1_block_hash_oracle: Address,
    cancel: CancellationToken,
}

impl<C: ChainClient> std::fmt::Debug for L1Prover<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("L1Prover")
            .field("l1_block_hash_oracle", &self.l1_block_hash_oracle)
            .finish_non_exhaustive()
    }
}

impl<C: ChainClient + 'static> L1Prover<C> {
    /// Initializes an L1 prover by resolving the destination chain's oracle.
    pub async fn new(
        l1_client: Arc<C>,
        dst_client: Arc<C>,
        config: &ProveL1Config,
        cancel: CancellationToken,
    ) -> Result<Self, ProverError> {
        let registry = RegistryProver::new(l1_client.clone(), config.registry_address);
        let l1_block_hash_oracle = registry.get_l1_block_hash_oracle(config.dst_chain_id).await?;

        Ok(Self {
            l1_origin_prover: L1OriginProver::new(l1_client.clone(), dst_client),
            storage_prover: StorageProver::new(l1_client),
            l1_block_hash_oracle,
            cancel,
        })
    }

    /// Generates the calldata for `NativeProver.proveL1()`.
    pub async fn generate_prove_l1_calldata(
        &self,
        params: &ProveParams,
    ) -> Result<String, ProverError> {
        let (rlp_encoded_l1_header, l1_header) = self.l1_origin(params).await?;
        let l1_block_number = l1_header.inner.number;

        let storage_value = cancellable(
            &self.cancel,
            self.storage_prover
                .get_storage_at(params.address, params.storage_slot, Some(l1_block_number)),
        )
        .await?;

        let bundle = cancellable(
            &self.cancel,
            self.storage_prover.generate_storage_proof(
                params.address,
                params.storage_slot,
                Some(l1_block_number),
            ),
        )
        .await?;

        let args = ProveL1ScalarArgs {
            contractAddr: params.address,
            storageSlot: params.storage_slot,
            storageValue: storage_value,
            l1WorldStateRoot: l1_header.inner.state_root,
        };

        let calldata = encode_prove_l1_calldata(
            args,
            rlp_encoded_l1_header,
            bundle.storage_proof,
            bundle.rlp_encoded_account,
            bundle.account_proof,
        );
        Ok(to_hex(&calldata))
    }

    async fn l1_origin(&self, params: &ProveParams) -> Result<(Bytes, Header), ProverError> {
        let hash = if params.wait_for_new_epoch {
            self.l1_origin_prover
                .wait_for_new_epoch(
                    self.l1_block_hash_oracle,
                    params.epoch_polling_frequency,
                    params.epoch_polling_tries,
                    &self.cancel,
                )
                .await?
        } else {
            cancellable(
                &self.cancel,
                self.l1_origin_prover.get_l1_origin_hash(self.l1_block_hash_oracle),
            )
            .await?
        };

        cancellable(&self.cancel, self.l1_origin_prover.get_l1_origin(hash)).await
    }
}
