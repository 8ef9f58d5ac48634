//! Shared test utilities: a programmable mock `ChainClient` and fixture builders.

use std::collections::HashMap;

use alloy_consensus::Header as ConsensusHeader;
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_rpc_types_eth::Header;
use async_trait::async_trait;

use crate::rpc::{ChainClient, RpcError, RpcResult};
use crate::types::{ProofResult, StorageProofEntry};

type CallHandler = Box<dyn Fn(Address, &[u8], Option<u64>) -> RpcResult<Bytes> + Send + Sync>;

/// Mock chain client: contract calls dispatch through a closure, everything
/// else resolves from fixture maps.
pub(crate) struct MockChainClient {
    call_handler: CallHandler,
    headers_by_number: HashMap<u64, Header>,
    headers_by_hash: HashMap<B256, Header>,
    proofs: HashMap<Address, ProofResult>,
    storage_values: HashMap<(Address, B256), B256>,
}

impl MockChainClient {
    pub(crate) fn new() -> Self {
        Self {
            call_handler: Box::new(|_to, _data, _block| {
                Err(RpcError::InvalidResponse("no call handler installed".into()))
            }),
            headers_by_number: HashMap::new(),
            headers_by_hash: HashMap::new(),
            proofs: HashMap::new(),
            storage_values: HashMap::new(),
        }
    }

    pub(crate) fn with_call_handler(
        mut self,
        handler: impl Fn(Address, &[u8], Option<u64>) -> RpcResult<Bytes> + Send + Sync + 'static,
    ) -> Self {
        self.call_handler = Box::new(handler);
        self
    }

    pub(crate) fn with_header_by_number(mut self, number: u64, header: Header) -> Self {
        self.headers_by_number.insert(number, header);
        self
    }

    pub(crate) fn with_header_by_hash(mut self, hash: B256, header: Header) -> Self {
        self.headers_by_hash.insert(hash, header);
        self
    }

    pub(crate) fn with_proof(mut self, address: Address, proof: ProofResult) -> Self {
        self.proofs.insert(address, proof);
        self
    }

    pub(crate) fn with_storage_value(mut self, address: Address, slot: B256, value: B256) -> Self {
        self.storage_values.insert((address, slot), value);
        self
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn call_contract(
        &self,
        to: Address,
        data: Bytes,
        block_number: Option<u64>,
    ) -> RpcResult<Bytes> {
        (self.call_handler)(to, &data, block_number)
    }

    async fn header_by_number(&self, number: Option<u64>) -> RpcResult<Header> {
        let number = number.unwrap_or_default();
        self.headers_by_number
            .get(&number)
            .cloned()
            .ok_or_else(|| RpcError::HeaderNotFound(format!("no header for block {number}")))
    }

    async fn header_by_hash(&self, hash: B256) -> RpcResult<Header> {
        self.headers_by_hash
            .get(&hash)
            .cloned()
            .ok_or_else(|| RpcError::HeaderNotFound(format!("no header for hash {hash}")))
    }

    async fn get_proof(
        &self,
        address: Address,
        _slots: Vec<B256>,
        _block_number: Option<u64>,
    ) -> RpcResult<ProofResult> {
        self.proofs
            .get(&address)
            .cloned()
            .ok_or_else(|| RpcError::InvalidResponse(format!("no proof fixture for {address}")))
    }

    async fn get_storage_at(
        &self,
        address: Address,
        slot: B256,
        _block_number: Option<u64>,
    ) -> RpcResult<B256> {
        self.storage_values
            .get(&(address, slot))
            .copied()
            .ok_or_else(|| RpcError::InvalidResponse(format!("no storage fixture for {address}:{slot}")))
    }
}

/// Extracts the 4-byte function selector from calldata.
pub(crate) fn selector_of(data: &[u8]) -> [u8; 4] {
    data[..4].try_into().expect("calldata shorter than a selector")
}

/// Builds an `eth_getProof` fixture for `address` with one storage entry per slot.
pub(crate) fn test_proof_result(address: Address, slots: &[B256]) -> ProofResult {
    let storage_proof = slots
        .iter()
        .enumerate()
        .map(|(i, slot)| StorageProofEntry {
            key: *slot,
            value: U256::from(0x42u64 + i as u64),
            proof: vec![Bytes::from(vec![slot_proof_byte(address, i); 3])],
        })
        .collect();

    ProofResult {
        address,
        account_proof: vec![Bytes::from(vec![0xac; 4]), Bytes::from(vec![0xad; 4])],
        balance: Some(U256::from(1_000u64)),
        code_hash: B256::repeat_byte(0xcc),
        nonce: Some(U256::from(7u64)),
        storage_hash: storage_hash_for(address),
        storage_proof,
    }
}

/// Deterministic per-account storage hash so fixtures are distinguishable.
fn storage_hash_for(address: Address) -> B256 {
    let mut bytes = [0u8; 32];
    bytes[..20].copy_from_slice(address.as_slice());
    bytes[31] = 0x51;
    B256::from(bytes)
}

fn slot_proof_byte(address: Address, index: usize) -> u8 {
    address.as_slice()[0] ^ (index as u8)
}

/// Builds an RPC header fixture with the given number and state root.
pub(crate) fn test_header(number: u64, state_root: B256) -> Header {
    let inner = ConsensusHeader {
        number,
        state_root,
        ..Default::default()
    };
    let hash = inner.hash_slow();

    Header {
        hash,
        inner,
        total_difficulty: None,
        size: None,
    }
}
