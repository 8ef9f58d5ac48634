//! Registry lookups on the reference chain.

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;
use tracing::debug;

use crate::constants::REGISTRY_L2_CONFIG_MAPPING_SLOT;
use crate::contracts::decode_returns;
use crate::contracts::native_prover::{L2Configuration, UpdateL2ConfigArgs};
use crate::contracts::registry::IRegistry;
use crate::error::ProverError;
use crate::rpc::ChainClient;
use crate::slots::mapping_value_slot;
use crate::types::{L2ConfigInfo, SettlementFamily, StorageProofBundle};

/// Reads per-chain settlement configuration from the on-chain registry and
/// produces the proofs needed to refresh the verifier's cached copy.
#[derive(Debug)]
pub struct RegistryProver<C> {
    l1_client: Arc<C>,
    registry_address: Address,
}

impl<C: ChainClient> RegistryProver<C> {
    /// Creates a new registry prover for the registry at `registry_address`.
    pub fn new(l1_client: Arc<C>, registry_address: Address) -> Self {
        Self {
            l1_client,
            registry_address,
        }
    }

    async fn view<T: SolCall>(&self, call: &T) -> Result<T::Return, ProverError> {
        let data = self
            .l1_client
            .call_contract(self.registry_address, Bytes::from(call.abi_encode()), None)
            .await?;
        decode_returns::<T>(&data)
    }

    /// Returns the L1 block-hash oracle the given destination chain trusts.
    pub async fn get_l1_block_hash_oracle(&self, chain_id: u64) -> Result<Address, ProverError> {
        self.view(&IRegistry::getL1BlockHashOracleCall {
            chainID: U256::from(chain_id),
        })
        .await
    }

    /// Fetches the settlement configuration for the given source chain.
    pub async fn get_l2_configuration(&self, chain_id: u64) -> Result<L2ConfigInfo, ProverError> {
        let chain = U256::from(chain_id);
        let l2_type = self.view(&IRegistry::getL2ConfigTypeCall { chainID: chain }).await?;
        let addresses = self
            .view(&IRegistry::getL2ConfigAddressesCall { chainID: chain })
            .await?;
        let storage_slots = self
            .view(&IRegistry::getL2ConfigStorageSlotsCall { chainID: chain })
            .await?;

        let family = SettlementFamily::from_l2_type(l2_type);
        debug!(chain_id, %family, "Fetched L2 configuration from registry");

        Ok(L2ConfigInfo {
            family,
            addresses,
            storage_slots,
        })
    }

    /// Fetches the full canonical configuration record for the given chain,
    /// in the form the verifier's update entry points consume.
    pub async fn get_l2_configuration_for_update(
        &self,
        chain_id: u64,
    ) -> Result<L2Configuration, ProverError> {
        let chain = U256::from(chain_id);
        let record = self
            .view(&IRegistry::l2ChainConfigurationsCall { chainID: chain })
            .await?;
        let addresses = self
            .view(&IRegistry::getL2ConfigAddressesCall { chainID: chain })
            .await?;
        let storage_slots = self
            .view(&IRegistry::getL2ConfigStorageSlotsCall { chainID: chain })
            .await?;

        Ok(L2Configuration {
            prover: record.prover,
            addresses,
            storageSlots: storage_slots,
            versionNumber: record.versionNumber,
            finalityDelaySeconds: record.finalityDelaySeconds,
            l2Type: record.l2Type,
        })
    }

    /// Witnesses the chain's registry entry under the reference-chain state root.
    pub async fn get_registry_storage_proof(
        &self,
        chain_id: u64,
    ) -> Result<StorageProofBundle, ProverError> {
        let slot = registry_config_slot(chain_id);
        let proof = self
            .l1_client
            .get_proof(self.registry_address, vec![slot], None)
            .await?;
        proof.to_bundle()
    }

    /// Composes the canonical configuration record with its storage proof.
    pub async fn generate_update_l2_config_args(
        &self,
        chain_id: u64,
    ) -> Result<UpdateL2ConfigArgs, ProverError> {
        let config = self.get_l2_configuration_for_update(chain_id).await?;
        let bundle = self.get_registry_storage_proof(chain_id).await?;

        Ok(UpdateL2ConfigArgs {
            config,
            l1StorageProof: bundle.storage_proof,
            rlpEncodedRegistryAccountData: bundle.rlp_encoded_account,
            l1RegistryProof: bundle.account_proof,
        })
    }
}

/// Storage slot of the registry's configuration record for `chain_id`.
pub fn registry_config_slot(chain_id: u64) -> B256 {
    mapping_value_slot(
        B256::from(U256::from(chain_id)),
        B256::from(U256::from(REGISTRY_L2_CONFIG_MAPPING_SLOT)),
    )
}
