//! Protocol constants.

use alloy_primitives::{address, Address};

/// `L2ToL1MessagePasser` predeploy address, fixed across OP Stack chains.
pub const L2_TO_L1_MESSAGE_PASSER: Address = address!("4200000000000000000000000000000000000016");

/// Base slot of the registry's chain-id to L2-configuration mapping,
/// fixed by the registry contract's storage layout.
pub const REGISTRY_L2_CONFIG_MAPPING_SLOT: u64 = 2;

/// Dispute game status once the defender has won (the game is resolved).
pub const GAME_STATUS_DEFENDER_WINS: u8 = 2;

/// Game type identifier for fault dispute games.
pub const FAULT_DISPUTE_GAME_TYPE: u32 = 0;

/// Default interval between L1-origin epoch polls, in seconds.
pub const DEFAULT_EPOCH_POLLING_FREQUENCY: u64 = 1;

/// Default number of L1-origin epoch polls before giving up.
pub const DEFAULT_EPOCH_POLLING_TRIES: u32 = 10;

/// Default timeout for a single RPC request, in seconds.
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;
