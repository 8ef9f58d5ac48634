//! `L1Block` oracle predeploy bindings.
//!
//! The destination chain trusts this contract's `hash()` attestation of a
//! reference-chain block hash.

use alloy_sol_types::sol;

sol! {
    /// L1 block-hash oracle interface.
    interface IL1Block {
        /// Returns the hash of the L1 block this oracle currently attests to.
        function hash() external view returns (bytes32);
    }
}
