//! CLI argument definitions.

use alloy_primitives::{Address, B256};
use clap::{Args, Parser, Subcommand};
use url::Url;

use crate::constants::{DEFAULT_EPOCH_POLLING_FREQUENCY, DEFAULT_EPOCH_POLLING_TRIES};

/// native-prover - generates calldata for the `NativeProver` verifier contract.
#[derive(Debug, Parser)]
#[command(name = "native-prover")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The entry point to generate calldata for.
    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per verifier entry point.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate calldata for `NativeProver.prove()`.
    Prove(ProveArgs),
    /// Generate calldata for `NativeProver.updateAndProve()`.
    UpdateAndProve(ProveArgs),
    /// Generate calldata for `NativeProver.configureAndProve()`.
    ConfigureAndProve(ProveArgs),
    /// Generate calldata for `NativeProver.proveL1()`.
    ProveL1(L1ProveArgs),
}

/// Arguments for destination proofs.
#[derive(Debug, Args)]
pub struct ProveArgs {
    /// HTTP endpoint of a reference-chain (L1) node.
    #[arg(long, env = "NATIVE_PROVER_L1_RPC_URL")]
    pub l1_rpc_url: Url,

    /// HTTP endpoint of the source chain (the chain whose state is proven).
    #[arg(long, env = "NATIVE_PROVER_SRC_RPC_URL")]
    pub src_rpc_url: Url,

    /// HTTP endpoint of the destination chain (where the verifier runs).
    #[arg(long, env = "NATIVE_PROVER_DST_RPC_URL")]
    pub dst_rpc_url: Url,

    /// Chain id of the source chain.
    #[arg(long, env = "NATIVE_PROVER_SRC_CHAIN_ID")]
    pub src_chain_id: u64,

    /// Chain id of the destination chain.
    #[arg(long, env = "NATIVE_PROVER_DST_CHAIN_ID")]
    pub dst_chain_id: u64,

    /// Contract whose storage is proven, on the source chain.
    #[arg(long, env = "NATIVE_PROVER_CONTRACT_ADDRESS")]
    pub contract_address: Address,

    /// Storage slot to prove, on the source chain.
    #[arg(long, env = "NATIVE_PROVER_STORAGE_SLOT")]
    pub storage_slot: B256,

    /// Address of the configuration registry on the reference chain.
    #[arg(
        long,
        env = "NATIVE_PROVER_REGISTRY_ADDRESS",
        default_value = "0x0000000000000000000000000000000000000000"
    )]
    pub registry_address: Address,

    /// Wait until the destination oracle attests to a new L1 epoch before
    /// proving. A fresh attestation leaves more time to submit before the
    /// oracle advances again, at the cost of polling latency.
    #[arg(long, env = "NATIVE_PROVER_WAIT_FOR_NEW_EPOCH")]
    pub wait_for_new_epoch: bool,

    /// Seconds between epoch polls.
    #[arg(
        long,
        env = "NATIVE_PROVER_EPOCH_POLLING_FREQUENCY",
        default_value_t = DEFAULT_EPOCH_POLLING_FREQUENCY
    )]
    pub epoch_polling_frequency: u64,

    /// Maximum number of epoch polls before giving up.
    #[arg(
        long,
        env = "NATIVE_PROVER_EPOCH_POLLING_TRIES",
        default_value_t = DEFAULT_EPOCH_POLLING_TRIES
    )]
    pub epoch_polling_tries: u32,
}

/// Arguments for reference-chain proofs.
#[derive(Debug, Args)]
pub struct L1ProveArgs {
    /// HTTP endpoint of a reference-chain (L1) node.
    #[arg(long, env = "NATIVE_PROVER_L1_RPC_URL")]
    pub l1_rpc_url: Url,

    /// HTTP endpoint of the destination chain (where the verifier runs).
    #[arg(long, env = "NATIVE_PROVER_DST_RPC_URL")]
    pub dst_rpc_url: Url,

    /// Chain id of the destination chain.
    #[arg(long, env = "NATIVE_PROVER_DST_CHAIN_ID")]
    pub dst_chain_id: u64,

    /// Contract whose storage is proven, on the reference chain.
    #[arg(long, env = "NATIVE_PROVER_CONTRACT_ADDRESS")]
    pub contract_address: Address,

    /// Storage slot to prove, on the reference chain.
    #[arg(long, env = "NATIVE_PROVER_STORAGE_SLOT")]
    pub storage_slot: B256,

    /// Address of the configuration registry on the reference chain.
    #[arg(
        long,
        env = "NATIVE_PROVER_REGISTRY_ADDRESS",
        default_value = "0x0000000000000000000000000000000000000000"
    )]
    pub registry_address: Address,

    /// Wait until the destination oracle attests to a new L1 epoch before
    /// proving.
    #[arg(long, env = "NATIVE_PROVER_WAIT_FOR_NEW_EPOCH")]
    pub wait_for_new_epoch: bool,

    /// Seconds between epoch polls.
    #[arg(
        long,
        env = "NATIVE_PROVER_EPOCH_POLLING_FREQUENCY",
        default_value_t = DEFAULT_EPOCH_POLLING_FREQUENCY
    )]
    pub epoch_polling_frequency: u64,

    /// Maximum number of epoch polls before giving up.
    #[arg(
        long,
        env = "NATIVE_PROVER_EPOCH_POLLING_TRIES",
        default_value_t = DEFAULT_EPOCH_POLLING_TRIES
    )]
    pub epoch_polling_tries: u32,
}
