//! Per-invocation configuration, built from CLI arguments.

use alloy_primitives::{Address, B256};

use crate::cli::{L1ProveArgs, ProveArgs};

/// Configuration for destination proofs.
#[derive(Debug, Clone)]
pub struct ProveConfig {
    /// Chain id of the source chain (the chain whose state is proven).
    pub src_chain_id: u64,
    /// Chain id of the destination chain (where the verifier runs).
    pub dst_chain_id: u64,
    /// Address of the configuration registry on the reference chain.
    pub registry_address: Address,
}

impl From<&ProveArgs> for ProveConfig {
    fn from(args: &ProveArgs) -> Self {
        Self {
            src_chain_id: args.src_chain_id,
            dst_chain_id: args.dst_chain_id,
            registry_address: args.registry_address,
        }
    }
}

/// Configuration for reference-chain proofs.
#[derive(Debug, Clone)]
pub struct ProveL1Config {
    /// Chain id of the destination chain (where the verifier runs).
    pub dst_chain_id: u64,
    /// Address of the configuration registry on the reference chain.
    pub registry_address: Address,
}

impl From<&L1ProveArgs> for ProveL1Config {
    fn from(args: &L1ProveArgs) -> Self {
        Self {
            dst_chain_id: args.dst_chain_id,
            registry_address: args.registry_address,
        }
    }
}

/// Per-proof parameters: the proven slot and the epoch-polling behaviour.
#[derive(Debug, Clone)]
pub struct ProveParams {
    /// Contract whose storage is proven.
    pub address: Address,
    /// Storage slot being proven.
    pub storage_slot: B256,
    /// Whether to wait for the oracle to attest to a new L1 epoch first.
    pub wait_for_new_epoch: bool,
    /// Seconds between epoch polls.
    pub epoch_polling_frequency: u64,
    /// Maximum number of epoch polls before giving up.
    pub epoch_polling_tries: u32,
}

impl From<&ProveArgs> for ProveParams {
    fn from(args: &ProveArgs) -> Self {
        Self {
            address: args.contract_address,
            storage_slot: args.storage_slot,
            wait_for_new_epoch: args.wait_for_new_epoch,
            epoch_polling_frequency: args.epoch_polling_frequency,
            epoch_polling_tries: args.epoch_polling_tries,
        }
    }
}

impl From<&L1ProveArgs> for ProveParams {
    fn from(args: &L1ProveArgs) -> Self {
        Self {
            address: args.contract_address,
            storage_slot: args.storage_slot,
            wait_for_new_epoch: args.wait_for_new_epoch,
            epoch_polling_frequency: args.epoch_polling_frequency,
            epoch_polling_tries: args.epoch_polling_tries,
        }
    }
}
