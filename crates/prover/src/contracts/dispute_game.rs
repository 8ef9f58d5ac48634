//! Dispute-game contract bindings (OP Stack Cannon settlement).
//!
//! Covers the `DisputeGameFactory`, individual `FaultDisputeGame` contracts,
//! and the ABI-encoded proof-data structs the on-chain verifier decodes via
//! `abi.decode`.

use alloy_primitives::{Address, B256};
use alloy_sol_types::sol;

sol! {
    /// `DisputeGameFactory` contract interface.
    interface IDisputeGameFactory {
        /// Returns the total number of games created.
        function gameCount() external view returns (uint256);

        /// Returns the game at the given index.
        function gameAtIndex(uint256 _index) external view returns (
            uint32 gameType,
            uint64 timestamp,
            address proxy
        );
    }

    /// `FaultDisputeGame` contract interface.
    interface IFaultDisputeGame {
        /// Returns the game's root claim.
        function rootClaim() external view returns (bytes32);

        /// Returns the game status (0 in progress, 1 challenger wins, 2 defender wins).
        function status() external view returns (uint8);

        /// Returns the game's creation timestamp.
        function createdAt() external view returns (uint64);

        /// Returns the game's resolution timestamp.
        function resolvedAt() external view returns (uint64);

        /// Returns the L2 block number the game's claim commits to.
        function l2BlockNumber() external pure returns (uint256);
    }

    /// Proof data rooting the game record in the factory's storage.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct DisputeGameFactoryProofData {
        bytes32 messagePasserStateRoot;
        bytes32 latestBlockHash;
        uint256 gameIndex;
        bytes32 gameId;
        bytes[] disputeFaultGameStorageProof;
        bytes rlpEncodedDisputeGameFactoryData;
        bytes[] disputeGameFactoryAccountProof;
    }

    /// Packed contents of the game's status storage slot.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct FaultDisputeGameStatusSlotData {
        uint64 createdAt;
        uint64 resolvedAt;
        uint8 gameStatus;
        bool initialized;
        bool l2BlockNumberChallenged;
    }

    /// Proof data for the game contract's root claim and status slots.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct FaultDisputeGameProofData {
        bytes32 faultDisputeGameStateRoot;
        bytes[] faultDisputeGameRootClaimStorageProof;
        FaultDisputeGameStatusSlotData faultDisputeGameStatusSlotData;
        bytes[] faultDisputeGameStatusStorageProof;
        bytes rlpEncodedFaultDisputeGameData;
        bytes[] faultDisputeGameAccountProof;
    }
}

/// Constructs a `GameID` as packed by the dispute-game factory.
///
/// Layout (32 bytes, big-endian):
/// bytes 0..4 game type, bytes 4..12 creation timestamp, bytes 12..32 game address.
pub fn construct_game_id(game_type: u32, timestamp: u64, game_address: Address) -> B256 {
    let mut id = [0u8; 32];
    id[0..4].copy_from_slice(&game_type.to_be_bytes());
    id[4..12].copy_from_slice(&timestamp.to_be_bytes());
    id[12..32].copy_from_slice(game_address.as_slice());
    B256::from(id)
}

#[cfg(test)]
mod tests {
    use alloy_sol_types::SolValue;

    use super::*;

    #[test]
    fn test_game_id_layout() {
        let game_type = 0x01020304u32;
        let timestamp = 0x1122334455667788u64;
        let address = Address::repeat_byte(0xab);

        let id = construct_game_id(game_type, timestamp, address);

        assert_eq!(&id[0..4], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(&id[4..12], &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]);
        assert_eq!(&id[12..32], address.as_slice());
    }

    #[test]
    fn test_game_id_zero_type() {
        let address = Address::repeat_byte(0x42);
        let id = construct_game_id(0, 1_700_000_000, address);

        assert_eq!(&id[0..4], &[0u8; 4]);
        assert_eq!(&id[4..12], &1_700_000_000u64.to_be_bytes());
        assert_eq!(&id[12..32], address.as_slice());
    }

    #[test]
    fn test_status_slot_data_encodes_as_five_words() {
        let data = FaultDisputeGameStatusSlotData {
            createdAt: 1,
            resolvedAt: 2,
            gameStatus: 2,
            initialized: true,
            l2BlockNumberChallenged: true,
        };
        // Static struct: one 32-byte word per field.
        assert_eq!(data.abi_encode().len(), 5 * 32);
    }
}
