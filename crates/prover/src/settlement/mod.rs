//! Settlement-family provers.
//!
//! Each supported family locates the latest resolved settlement on the
//! reference chain and assembles the byte string the verifier accepts as
//! evidence that an L2 header is canonical on the source chain.

mod bedrock;
mod cannon;

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, U256};
use alloy_rpc_types_eth::Header;
use async_trait::async_trait;

pub use bedrock::OpBedrockProver;
pub use cannon::OpCannonProver;

use crate::error::ProverError;
use crate::rpc::ChainClient;
use crate::types::{L2ConfigInfo, SettlementFamily};

/// Family-specific settlement proving strategy.
#[async_trait]
pub trait SettledStateProver: Send + Sync {
    /// Scans the reference chain and returns the identifier and anchor
    /// address of the most recent resolved settlement suitable for proving.
    async fn find_latest_resolved(
        &self,
        config: &L2ConfigInfo,
    ) -> Result<(U256, Address), ProverError>;

    /// At reference-chain block `l1_block_number`, assembles the settlement
    /// bundle for the settlement at `index` and returns it together with the
    /// settled L2 header.
    async fn generate_settled_state_proof(
        &self,
        l1_block_number: u64,
        index: U256,
        anchor: Address,
        config: &L2ConfigInfo,
    ) -> Result<(Bytes, Header), ProverError>;
}

/// Returns the prover for the given settlement family, or
/// [`ProverError::UnsupportedFamily`] for families this crate cannot prove
/// against.
pub fn prover_for_family<C: ChainClient + 'static>(
    family: SettlementFamily,
    l1_client: Arc<C>,
    l2_client: Arc<C>,
) -> Result<Box<dyn SettledStateProver>, ProverError> {
    match family {
        SettlementFamily::OpBedrock => Ok(Box::new(OpBedrockProver::new(l1_client, l2_client))),
        SettlementFamily::OpCannon => Ok(Box::new(OpCannonProver::new(l1_client, l2_client))),
        other => Err(ProverError::UnsupportedFamily(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockChainClient;

    #[test]
    fn test_unsupported_families_are_rejected() {
        for family in [SettlementFamily::Unknown, SettlementFamily::Nitro] {
            let client = Arc::new(MockChainClient::new());
            let err = prover_for_family(family, client.clone(), client).err().unwrap();
            assert!(matches!(err, ProverError::UnsupportedFamily(f) if f == family));
        }
    }
}
