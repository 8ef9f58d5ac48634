//! L1-origin discovery through the destination chain's block-hash oracle.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256};
use alloy_rlp::Encodable;
use alloy_rpc_types_eth::Header;
use alloy_sol_types::SolCall;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::contracts::l1_block::IL1Block;
use crate::error::ProverError;
use crate::rpc::ChainClient;

/// Resolves the reference-chain block the destination chain's oracle attests to.
#[derive(Debug)]
pub struct L1OriginProver<C> {
    l1_client: Arc<C>,
    dst_client: Arc<C>,
}

impl<C: ChainClient> L1OriginProver<C> {
    /// Creates a new L1-origin prover.
    pub fn new(l1_client: Arc<C>, dst_client: Arc<C>) -> Self {
        Self {
            l1_client,
            dst_client,
        }
    }

    /// Reads the oracle's current L1 block-hash attestation via `hash()`.
    pub async fn get_l1_origin_hash(&self, oracle: Address) -> Result<B256, ProverError> {
        let data = self
            .dst_client
            .call_contract(oracle, Bytes::from(IL1Block::hashCall {}.abi_encode()), None)
            .await?;

        if data.len() != 32 {
            return Err(ProverError::Decode(format!(
                "unexpected hash() result length: {}",
                data.len()
            )));
        }
        Ok(B256::from_slice(&data))
    }

    /// Fetches the attested L1 header and its RLP-encoded byte form.
    pub async fn get_l1_origin(&self, hash: B256) -> Result<(Bytes, Header), ProverError> {
        let header = self.l1_client.header_by_hash(hash).await?;

        let mut buf = Vec::new();
        header.inner.encode(&mut buf);
        Ok((Bytes::from(buf), header))
    }

    /// Polls the oracle until its attestation differs from the current one.
    ///
    /// The initial read counts as the first poll; at most `tries` polls are
    /// issued, `freq_secs` seconds apart, before [`ProverError::EpochTimeout`].
    /// Cancellation is honoured on every tick.
    pub async fn wait_for_new_epoch(
        &self,
        oracle: Address,
        freq_secs: u64,
        tries: u32,
        cancel: &CancellationToken,
    ) -> Result<B256, ProverError> {
        let initial = self.get_l1_origin_hash(oracle).await?;
        debug!(hash = %initial, "Observed current L1 origin attestation");

        let mut polls: u32 = 1;
        while polls < tries {
            tokio::select! {
                () = cancel.cancelled() => return Err(ProverError::Cancelled),
                () = sleep(Duration::from_secs(freq_secs)) => {}
            }

            let current = self.get_l1_origin_hash(oracle).await?;
            polls += 1;

            if current != initial {
                info!(hash = %current, polls, "L1 origin advanced to a new epoch");
                return Ok(current);
            }
        }

        Err(ProverError::EpochTimeout(tries))
    }
}
