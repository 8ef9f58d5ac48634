//! HTTP chain client implementation using Alloy.

use std::time::Duration;

use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types_eth::{BlockId, Header, TransactionInput, TransactionRequest};
use alloy_transport_http::{reqwest::Client, Http};
use async_trait::async_trait;
use url::Url;

use super::{
    error::{RpcError, RpcResult},
    traits::ChainClient,
};
use crate::types::ProofResult;

fn block_id(number: Option<u64>) -> BlockId {
    BlockId::Number(number.map_or(BlockNumberOrTag::Latest, BlockNumberOrTag::Number))
}

fn block_tag(number: Option<u64>) -> BlockNumberOrTag {
    number.map_or(BlockNumberOrTag::Latest, BlockNumberOrTag::Number)
}

/// Chain RPC client backed by an HTTP provider.
pub struct HttpChainClient {
    provider: RootProvider,
}

impl std::fmt::Debug for HttpChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChainClient").finish_non_exhaustive()
    }
}

impl HttpChainClient {
    /// Creates a new client for the given endpoint with a per-request timeout.
    pub fn new(endpoint: Url, timeout: Duration) -> RpcResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RpcError::Connection(format!("failed to build HTTP client: {e}")))?;

        let http = Http::with_client(client, endpoint);
        let rpc_client = RpcClient::new(http, false);

        // Read-only operations; no fillers needed.
        Ok(Self {
            provider: RootProvider::new(rpc_client),
        })
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    async fn call_contract(
        &self,
        to: Address,
        data: Bytes,
        block_number: Option<u64>,
    ) -> RpcResult<Bytes> {
        let req = TransactionRequest::default()
            .to(to)
            .input(TransactionInput::new(data));

        self.provider
            .call(req)
            .block(block_id(block_number))
            .await
            .map_err(RpcError::from)
    }

    async fn header_by_number(&self, number: Option<u64>) -> RpcResult<Header> {
        let block = self
            .provider
            .get_block(block_id(number))
            .await
            .map_err(RpcError::from)?
            .ok_or_else(|| RpcError::HeaderNotFound(format!("block {number:?} not found")))?;

        Ok(block.header)
    }

    async fn header_by_hash(&self, hash: B256) -> RpcResult<Header> {
        let block = self
            .provider
            .get_block_by_hash(hash)
            .await
            .map_err(RpcError::from)?
            .ok_or_else(|| RpcError::HeaderNotFound(format!("block {hash} not found")))?;

        Ok(block.header)
    }

    async fn get_proof(
        &self,
        address: Address,
        slots: Vec<B256>,
        block_number: Option<u64>,
    ) -> RpcResult<ProofResult> {
        self.provider
            .raw_request::<_, ProofResult>(
                "eth_getProof".into(),
                (address, slots, block_tag(block_number)),
            )
            .await
            .map_err(RpcError::from)
    }

    async fn get_storage_at(
        &self,
        address: Address,
        slot: B256,
        block_number: Option<u64>,
    ) -> RpcResult<B256> {
        let value: U256 = self
            .provider
            .get_storage_at(address, U256::from_be_bytes(slot.0))
            .block_id(block_id(block_number))
            .await
            .map_err(RpcError::from)?;

        Ok(B256::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_tag_mapping() {
        assert_eq!(block_tag(None), BlockNumberOrTag::Latest);
        assert_eq!(block_tag(Some(12345)), BlockNumberOrTag::Number(12345));
    }
}
