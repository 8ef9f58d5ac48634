//! `L2OutputOracle` contract bindings (OP Stack Bedrock settlement).

use alloy_sol_types::sol;

sol! {
    /// Output proposal stored by the `L2OutputOracle`.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct OutputProposal {
        bytes32 outputRoot;
        uint128 timestamp;
        uint128 l2BlockNumber;
    }

    /// `L2OutputOracle` contract interface.
    interface IL2OutputOracle {
        /// Returns the index of the most recently submitted output.
        function latestOutputIndex() external view returns (uint256);

        /// Returns the output proposal at the given index.
        function getL2Output(uint256 _l2OutputIndex) external view returns (OutputProposal memory);
    }
}
