//! Core data types shared across the proof pipeline.

use std::fmt;

use alloy_consensus::Account;
use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::error::ProverError;

/// A single storage-slot proof from an `eth_getProof` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageProofEntry {
    /// The storage key the proof witnesses.
    pub key: B256,
    /// The value stored at the key.
    pub value: U256,
    /// The Merkle-Patricia proof nodes for this slot.
    pub proof: Vec<Bytes>,
}

/// Typed `eth_getProof` reply.
///
/// Field names use camelCase to match the Ethereum JSON-RPC format. `nonce`
/// and `balance` are optional so that a reply missing either surfaces as a
/// [`ProverError::ProofMissing`] instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofResult {
    /// The proven account address.
    pub address: Address,
    /// The Merkle-Patricia proof for the account under the state root.
    pub account_proof: Vec<Bytes>,
    /// The account balance.
    pub balance: Option<U256>,
    /// The account's code hash.
    pub code_hash: B256,
    /// The account nonce.
    pub nonce: Option<U256>,
    /// The account's storage trie root.
    pub storage_hash: B256,
    /// Storage proofs for the requested slots.
    pub storage_proof: Vec<StorageProofEntry>,
}

impl ProofResult {
    /// RLP-encodes the account record carried by this reply.
    ///
    /// The encoding is the canonical four-field form
    /// `RLP([nonce, balance, storage_root, code_hash])`; the on-chain verifier
    /// hashes these bytes and compares them to the account trie leaf.
    pub fn account_rlp(&self) -> Result<Bytes, ProverError> {
        let nonce = self
            .nonce
            .ok_or_else(|| ProverError::ProofMissing(format!("nonce missing for account {}", self.address)))?;
        let balance = self
            .balance
            .ok_or_else(|| ProverError::ProofMissing(format!("balance missing for account {}", self.address)))?;

        let account = Account {
            nonce: nonce
                .try_into()
                .map_err(|_| ProverError::Decode(format!("nonce overflows u64 for account {}", self.address)))?,
            balance,
            storage_root: self.storage_hash,
            code_hash: self.code_hash,
        };
        Ok(alloy_rlp::encode(account).into())
    }

    /// Returns the proof nodes for the storage entry with the given key.
    pub fn storage_proof_for(&self, key: B256) -> Result<Vec<Bytes>, ProverError> {
        self.storage_proof
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.proof.clone())
            .ok_or_else(|| ProverError::ProofMissing(format!("no storage proof for slot {key}")))
    }

    /// Converts this reply into a [`StorageProofBundle`] for its first
    /// (and only requested) storage slot.
    pub fn to_bundle(&self) -> Result<StorageProofBundle, ProverError> {
        let entry = self.storage_proof.first().ok_or_else(|| {
            ProverError::ProofMissing(format!("no storage proof returned for account {}", self.address))
        })?;

        Ok(StorageProofBundle {
            storage_proof: entry.proof.clone(),
            rlp_encoded_account: self.account_rlp()?,
            account_proof: self.account_proof.clone(),
        })
    }
}

/// The triple every proof site produces: a slot proof under the account's
/// storage root, the RLP-encoded account record, and the account proof under
/// the enclosing state root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageProofBundle {
    /// Merkle-Patricia proof for the storage slot.
    pub storage_proof: Vec<Bytes>,
    /// Canonical RLP encoding of the account record.
    pub rlp_encoded_account: Bytes,
    /// Merkle-Patricia proof for the account.
    pub account_proof: Vec<Bytes>,
}

/// Settlement family a source chain uses, as reported by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementFamily {
    /// Not configured in the registry.
    Unknown,
    /// OP Stack chain settling through an `L2OutputOracle`.
    OpBedrock,
    /// OP Stack chain settling through fault dispute games.
    OpCannon,
    /// Arbitrum Nitro chain. Listed by the registry but not provable here.
    Nitro,
}

impl SettlementFamily {
    /// Decodes the registry's `l2Type` enum value.
    pub const fn from_l2_type(value: u8) -> Self {
        match value {
            1 => Self::OpBedrock,
            2 => Self::OpCannon,
            3 => Self::Nitro,
            _ => Self::Unknown,
        }
    }

    /// The registry's `l2Type` enum value for this family.
    pub const fn l2_type(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::OpBedrock => 1,
            Self::OpCannon => 2,
            Self::Nitro => 3,
        }
    }
}

impl fmt::Display for SettlementFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "Unknown",
            Self::OpBedrock => "OPStackBedrock",
            Self::OpCannon => "OPStackCannon",
            Self::Nitro => "Nitro",
        };
        f.write_str(name)
    }
}

/// Per-source-chain settlement configuration fetched from the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L2ConfigInfo {
    /// Settlement family the chain uses.
    pub family: SettlementFamily,
    /// Family-specific contract addresses (see the settlement provers).
    pub addresses: Vec<Address>,
    /// Family-specific base storage slots.
    pub storage_slots: Vec<U256>,
}
