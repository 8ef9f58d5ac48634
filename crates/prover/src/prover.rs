//! Destination-proof orchestration: proving a source-chain storage slot to a
//! verifier on the destination chain, anchored through the reference chain.

use std::future::Future;
use std::sync::Arc;

use alloy_primitives::{Address, Bytes, U256};
use alloy_rlp::Encodable;
use alloy_rpc_types_eth::Header;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::{ProveConfig, ProveParams};
use crate::contracts::native_prover::{
    encode_configure_and_prove_calldata, encode_prove_calldata, encode_update_and_prove_calldata,
    ProveScalarArgs, UpdateL2ConfigArgs,
};
use crate::error::ProverError;
use crate::l1_origin::L1OriginProver;
use crate::registry::RegistryProver;
use crate::rpc::ChainClient;
use crate::settlement::{self, SettledStateProver};
use crate::storage::StorageProver;
use crate::types::L2ConfigInfo;

/// Runs a pipeline step, aborting with [`ProverError::Cancelled`] as soon as
/// the token fires.
pub(crate) async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T, ProverError>>,
) -> Result<T, ProverError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ProverError::Cancelled),
        res = fut => res,
    }
}

/// Everything the verifier entry points need beyond the update args.
struct ProofInputs {
    scalar_args: ProveScalarArgs,
    rlp_encoded_l1_header: Bytes,
    rlp_encoded_l2_header: Bytes,
    settled_state_proof: Bytes,
    l2_storage_proof: Vec<Bytes>,
    rlp_encoded_contract_account: Bytes,
    l2_account_proof: Vec<Bytes>,
}

/// Orchestrates destination proofs for one source chain.
///
/// Construction performs the registry lookups and settlement discovery; each
/// `generate_*` call then assembles one proof against the oracle's current
/// (or next, in wait-for-new-epoch mode) L1 origin.
pub struct Prover<C: ChainClient> {
    l1_origin_prover: L1OriginProver<C>,
    storage_prover: StorageProver<C>,
    settled_state_prover: Box<dyn SettledStateProver>,
    l2_config: L2ConfigInfo,
    config_proof: UpdateL2ConfigArgs,
    l1_block_hash_oracle: Address,
    src_chain_id: u64,
    settlement_index: U256,
    anchor_address: Address,
    cancel: CancellationToken,
}

impl<C: ChainClient> std::fmt::Debug for Prover<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prover")
            .field("src_chain_id", &self.src_chain_id)
            .field("l2_config", &self.l2_config)
            .field("settlement_index", &self.settlement_index)
            .field("anchor_address", &self.anchor_address)
            .finish_non_exhaustive()
    }
}

impl<C: ChainClient + 'static> Prover<C> {
    /// Initializes a prover: looks up the destination oracle and source-chain
    /// configuration, pre-fetches the config-update proof, and locates the
    /// latest resolved settlement.
    pub async fn new(
        l1_client: Arc<C>,
        src_client: Arc<C>,
        dst_client: Arc<C>,
        config: &ProveConfig,
        cancel: CancellationToken,
    ) -> Result<Self, ProverError> {
        let registry = RegistryProver::new(l1_client.clone(), config.registry_address);

        let l1_block_hash_oracle = registry.get_l1_block_hash_oracle(config.dst_chain_id).await?;
        let l2_config = registry.get_l2_configuration(config.src_chain_id).await?;

        // Reject unprovable families before any proof work.
        let settled_state_prover =
            settlement::prover_for_family(l2_config.family, l1_client.clone(), src_client.clone())?;

        let config_proof = registry
            .generate_update_l2_config_args(config.src_chain_id)
            .await?;

        let (settlement_index, anchor_address) =
            settled_state_prover.find_latest_resolved(&l2_config).await?;
        info!(
            family = %l2_config.family,
            index = %settlement_index,
            anchor = %anchor_address,
            "Located latest resolved settlement"
        );

        Ok(Self {
            l1_origin_prover: L1OriginProver::new(l1_client, dst_client),
            storage_prover: StorageProver::new(src_client),
            settled_state_prover,
            l2_config,
            config_proof,
            l1_block_hash_oracle,
            src_chain_id: config.src_chain_id,
            settlement_index,
            anchor_address,
            cancel,
        })
    }

    /// Generates the calldata for `NativeProver.prove()`.
    pub async fn generate_prove_calldata(&self, params: &ProveParams) -> Result<String, ProverError> {
        let inputs = self.assemble_proof_inputs(params).await?;
        let calldata = encode_prove_calldata(
            inputs.scalar_args,
            inputs.rlp_encoded_l1_header,
            inputs.rlp_encoded_l2_header,
            inputs.settled_state_proof,
            inputs.l2_storage_proof,
            inputs.rlp_encoded_contract_account,
            inputs.l2_account_proof,
        );
        Ok(to_hex(&calldata))
    }

    /// Generates the calldata for `NativeProver.updateAndProve()`.
    pub async fn generate_update_and_prove_calldata(
        &self,
        params: &ProveParams,
    ) -> Result<String, ProverError> {
        let inputs = self.assemble_proof_inputs(params).await?;
        let calldata = encode_update_and_prove_calldata(
            self.config_proof.clone(),
            inputs.scalar_args,
            inputs.rlp_encoded_l1_header,
            inputs.rlp_encoded_l2_header,
            inputs.settled_state_proof,
            inputs.l2_storage_proof,
            inputs.rlp_encoded_contract_account,
            inputs.l2_account_proof,
        );
        Ok(to_hex(&calldata))
    }

    /// Generates the calldata for `NativeProver.configureAndProve()`.
    pub async fn generate_configure_and_prove_calldata(
        &self,
        params: &ProveParams,
    ) -> Result<String, ProverError> {
        let inputs = self.assemble_proof_inputs(params).await?;
        let calldata = encode_configure_and_prove_calldata(
            self.config_proof.clone(),
            inputs.scalar_args,
            inputs.rlp_encoded_l1_header,
            inputs.rlp_encoded_l2_header,
            inputs.settled_state_proof,
            inputs.l2_storage_proof,
            inputs.rlp_encoded_contract_account,
            inputs.l2_account_proof,
        );
        Ok(to_hex(&calldata))
    }

    /// Resolves the L1 origin to build against, honouring wait-for-new-epoch.
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

    /// Runs steps 4-7 of the destination-proof sequence: L1 origin, settled
    /// state proof, slot value, and the storage proof at the settled height.
    async fn assemble_proof_inputs(&self, params: &ProveParams) -> Result<ProofInputs, ProverError> {
        let (rlp_encoded_l1_header, l1_header) = self.l1_origin(params).await?;

        let (settled_state_proof, l2_header) = cancellable(
            &self.cancel,
            self.settled_state_prover.generate_settled_state_proof(
                l1_header.inner.number,
                self.settlement_index,
                self.anchor_address,
                &self.l2_config,
            ),
        )
        .await?;

        let l2_block_number = l2_header.inner.number;
        let storage_value = cancellable(
            &self.cancel,
            self.storage_prover
                .get_storage_at(params.address, params.storage_slot, Some(l2_block_number)),
        )
        .await?;

        let bundle = cancellable(
            &self.cancel,
            self.storage_prover.generate_storage_proof(
                params.address,
                params.storage_slot,
                Some(l2_block_number),
            ),
        )
        .await?;

        let mut rlp_encoded_l2_header = Vec::new();
        l2_header.inner.encode(&mut rlp_encoded_l2_header);

        let scalar_args = ProveScalarArgs {
            chainID: U256::from(self.src_chain_id),
            contractAddr: params.address,
            storageSlot: params.storage_slot,
            storageValue: storage_value,
            l2WorldStateRoot: l2_header.inner.state_root,
        };

        Ok(ProofInputs {
            scalar_args,
            rlp_encoded_l1_header,
            rlp_encoded_l2_header: Bytes::from(rlp_encoded_l2_header),
            settled_state_proof,
            l2_storage_proof: bundle.storage_proof,
            rlp_encoded_contract_account: bundle.rlp_encoded_account,
            l2_account_proof: bundle.account_proof,
        })
    }
}

/// Formats calldata as a 0x-prefixed hex string.
pub(crate) fn to_hex(calldata: &Bytes) -> String {
    format!("0x{}", hex::encode(calldata))
}
