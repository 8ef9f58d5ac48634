//! Solidity storage-slot derivation.

use alloy_primitives::{keccak256, B256, U256};

/// Slot of `mapping[key]` for a mapping rooted at `base`:
/// `keccak256(pad32(key) ++ pad32(base))`.
pub fn mapping_value_slot(key: B256, base: B256) -> B256 {
    let mut preimage = [0u8; 64];
    preimage[..32].copy_from_slice(key.as_slice());
    preimage[32..].copy_from_slice(base.as_slice());
    keccak256(preimage)
}

/// Slot of `array[index]` for a dynamic array rooted at `base`:
/// `keccak256(pad32(base)) + index` with 256-bit wrapping addition.
pub fn dynamic_array_element_slot(base: B256, index: U256) -> B256 {
    let start = U256::from_be_bytes(keccak256(base).0);
    B256::from(start.wrapping_add(index))
}
