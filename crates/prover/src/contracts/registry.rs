//! Cross-chain configuration registry bindings.
//!
//! The registry lives on the reference chain and maps chain ids to L2
//! settlement configurations and trusted block-hash oracles.

use alloy_sol_types::sol;

sol! {
    /// Registry contract interface.
    interface IRegistry {
        /// Returns the settlement-family enum value for a chain id.
        function getL2ConfigType(uint256 chainID) external view returns (uint8);

        /// Returns the family-specific contract addresses for a chain id.
        function getL2ConfigAddresses(uint256 chainID) external view returns (address[] memory);

        /// Returns the family-specific base storage slots for a chain id.
        function getL2ConfigStorageSlots(uint256 chainID) external view returns (uint256[] memory);

        /// Returns the L1 block-hash oracle a destination chain trusts.
        function getL1BlockHashOracle(uint256 chainID) external view returns (address);

        /// Mapping accessor returning the static fields of a chain's
        /// canonical configuration record.
        function l2ChainConfigurations(uint256 chainID) external view returns (
            address prover,
            uint256 versionNumber,
            uint256 finalityDelaySeconds,
            uint8 l2Type
        );
    }
}
