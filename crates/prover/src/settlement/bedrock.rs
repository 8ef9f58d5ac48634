//! Settlement proving for OP Stack Bedrock chains (`L2OutputOracle`).

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_rlp::RlpEncodable;
use alloy_rpc_types_eth::Header;
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use tracing::debug;

use super::SettledStateProver;
use crate::constants::L2_TO_L1_MESSAGE_PASSER;
use crate::contracts::decode_returns;
use crate::contracts::output_oracle::IL2OutputOracle;
use crate::error::ProverError;
use crate::rpc::ChainClient;
use crate::slots::mapping_value_slot;
use crate::types::L2ConfigInfo;

/// RLP layout of the Bedrock settlement bundle: the message-passer root and
/// output index, plus the oracle's storage proof rooted in the L1 state.
#[derive(Debug, RlpEncodable)]
struct BedrockSettlementProof {
    message_passer_root: B256,
    output_index: B256,
    l1_storage_proof: Vec<Bytes>,
    rlp_encoded_oracle_account: Bytes,
    l1_account_proof: Vec<Bytes>,
}

/// Settlement prover for chains that post output roots to an `L2OutputOracle`.
#[derive(Debug)]
pub struct OpBedrockProver<C> {
    l1_client: Arc<C>,
    l2_client: Arc<C>,
}

impl<C: ChainClient> OpBedrockProver<C> {
    /// Creates a new Bedrock settlement prover.
    pub fn new(l1_client: Arc<C>, l2_client: Arc<C>) -> Self {
        Self {
            l1_client,
            l2_client,
        }
    }

    fn oracle_address(config: &L2ConfigInfo) -> Result<Address, ProverError> {
        if config.addresses.is_empty() || config.storage_slots.is_empty() {
            return Err(ProverError::Config(
                "Bedrock config requires an output oracle address and its outputs slot".into(),
            ));
        }
        Ok(config.addresses[0])
    }
}

#[async_trait]
impl<C: ChainClient> SettledStateProver for OpBedrockProver<C> {
    async fn find_latest_resolved(
        &self,
        config: &L2ConfigInfo,
    ) -> Result<(U256, Address), ProverError> {
        let oracle = Self::oracle_address(config)?;

        let data = self
            .l1_client
            .call_contract(
                oracle,
                Bytes::from(IL2OutputOracle::latestOutputIndexCall {}.abi_encode()),
                None,
            )
            .await?;
        let index = decode_returns::<IL2OutputOracle::latestOutputIndexCall>(&data)?;

        if index.is_zero() {
            return Err(ProverError::NoResolvedSettlement(
                "output oracle reports no settled outputs".into(),
            ));
        }

        debug!(%index, oracle = %oracle, "Found latest output index");
        Ok((index, oracle))
    }

    async fn generate_settled_state_proof(
        &self,
        l1_block_number: u64,
        index: U256,
        anchor: Address,
        config: &L2ConfigInfo,
    ) -> Result<(Bytes, Header), ProverError> {
        Self::oracle_address(config)?;
        let outputs_base_slot = B256::from(config.storage_slots[0]);

        // Outputs live in an array of two-word structs keyed by index; only
        // the first word (the output root) is witnessed.
        let output_slot = mapping_value_slot(B256::from(index), outputs_base_slot);

        let oracle_proof = self
            .l1_client
            .get_proof(anchor, vec![output_slot], Some(l1_block_number))
            .await?;
        let bundle = oracle_proof.to_bundle()?;

        let data = self
            .l1_client
            .call_contract(
                anchor,
                Bytes::from(IL2OutputOracle::getL2OutputCall { _l2OutputIndex: index }.abi_encode()),
                Some(l1_block_number),
            )
            .await?;
        let output = decode_returns::<IL2OutputOracle::getL2OutputCall>(&data)?;

        let l2_block_number: u64 = output
            .l2BlockNumber
            .try_into()
            .map_err(|_| ProverError::Decode("settled L2 block number overflows u64".into()))?;
        if l2_block_number == 0 {
            return Err(ProverError::Decode("settled L2 block number is zero".into()));
        }
        debug!(
            output_root = %output.outputRoot,
            timestamp = output.timestamp,
            l2_block_number,
            "Decoded settled output proposal"
        );

        let (l2_header, passer_proof) = tokio::try_join!(
            self.l2_client.header_by_number(Some(l2_block_number)),
            self.l2_client
                .get_proof(L2_TO_L1_MESSAGE_PASSER, vec![], Some(l2_block_number)),
        )?;

        let proof = BedrockSettlementProof {
            message_passer_root: passer_proof.storage_hash,
            output_index: B256::from(index),
            l1_storage_proof: bundle.storage_proof,
            rlp_encoded_oracle_account: bundle.rlp_encoded_account,
            l1_account_proof: bundle.account_proof,
        };

        Ok((Bytes::from(alloy_rlp::encode(&proof)), l2_header))
    }
}

#[cfg(test)]
mod tests {
    use alloy_rlp::RlpDecodable;
    use alloy_sol_types::SolValue;

    use super::*;
    use crate::contracts::output_oracle::OutputProposal;
    use crate::test_utils::{selector_of, test_header, test_proof_result, MockChainClient};

    #[derive(Debug, PartialEq, RlpDecodable)]
    struct DecodedBundle {
        message_passer_root: B256,
        output_index: B256,
        l1_storage_proof: Vec<Bytes>,
        rlp_encoded_oracle_account: Bytes,
        l1_account_proof: Vec<Bytes>,
    }

    fn bedrock_config(oracle: Address) -> L2ConfigInfo {
        L2ConfigInfo {
            family: crate::types::SettlementFamily::OpBedrock,
            addresses: vec![oracle],
            storage_slots: vec![U256::from(3u64)],
        }
    }

    #[tokio::test]
    async fn test_find_latest_resolved_returns_oracle_index() {
        let oracle = Address::repeat_byte(0x22);
        let mock = Arc::new(MockChainClient::new().with_call_handler(|_to, data, _block| {
            assert_eq!(
                selector_of(data),
                IL2OutputOracle::latestOutputIndexCall::SELECTOR
            );
            Ok(Bytes::from(U256::from(123u64).abi_encode()))
        }));
        let prover = OpBedrockProver::new(mock.clone(), mock);

        let (index, anchor) = prover
            .find_latest_resolved(&bedrock_config(oracle))
            .await
            .unwrap();

        assert_eq!(index, U256::from(123u64));
        assert_eq!(anchor, oracle);
    }

    #[tokio::test]
    async fn test_find_latest_resolved_rejects_zero_index() {
        let oracle = Address::repeat_byte(0x22);
        let mock = Arc::new(MockChainClient::new().with_call_handler(|_to, _data, _block| {
            Ok(Bytes::from(U256::ZERO.abi_encode()))
        }));
        let prover = OpBedrockProver::new(mock.clone(), mock);

        let err = prover
            .find_latest_resolved(&bedrock_config(oracle))
            .await
            .unwrap_err();
        assert!(matches!(err, ProverError::NoResolvedSettlement(_)));
    }

    #[tokio::test]
    async fn test_find_latest_resolved_requires_config() {
        let mock = Arc::new(MockChainClient::new());
        let prover = OpBedrockProver::new(mock.clone(), mock);
        let config = L2ConfigInfo {
            family: crate::types::SettlementFamily::OpBedrock,
            addresses: vec![],
            storage_slots: vec![],
        };

        let err = prover.find_latest_resolved(&config).await.unwrap_err();
        assert!(matches!(err, ProverError::Config(_)));
    }

    #[tokio::test]
    async fn test_generate_settled_state_proof_builds_rlp_bundle() {
        let oracle = Address::repeat_byte(0x22);
        let index = U256::from(123u64);
        let config = bedrock_config(oracle);

        let output_slot = mapping_value_slot(B256::from(index), B256::from(U256::from(3u64)));
        let oracle_proof = test_proof_result(oracle, &[output_slot]);
        let passer_proof = test_proof_result(L2_TO_L1_MESSAGE_PASSER, &[]);
        let l2_header = test_header(12_345, B256::repeat_byte(0x55));

        let l1_mock = Arc::new(
            MockChainClient::new()
                .with_call_handler(move |_to, data, block| {
                    assert_eq!(block, Some(500));
                    assert_eq!(selector_of(data), IL2OutputOracle::getL2OutputCall::SELECTOR);
                    let proposal = OutputProposal {
                        outputRoot: B256::repeat_byte(0x66),
                        timestamp: 1_000_000_000,
                        l2BlockNumber: 12_345,
                    };
                    Ok(Bytes::from(proposal.abi_encode()))
                })
                .with_proof(oracle, oracle_proof.clone()),
        );
        let l2_mock = Arc::new(
            MockChainClient::new()
                .with_header_by_number(12_345, l2_header.clone())
                .with_proof(L2_TO_L1_MESSAGE_PASSER, passer_proof.clone()),
        );

        let prover = OpBedrockProver::new(l1_mock, l2_mock);
        let (bundle, header) = prover
            .generate_settled_state_proof(500, index, oracle, &config)
            .await
            .unwrap();

        assert_eq!(header.inner.number, 12_345);

        let decoded = alloy_rlp::decode_exact::<DecodedBundle>(&bundle).unwrap();
        assert_eq!(decoded.message_passer_root, passer_proof.storage_hash);
        assert_eq!(decoded.output_index, B256::from(index));
        assert_eq!(decoded.l1_storage_proof, oracle_proof.storage_proof[0].proof);
        assert_eq!(
            decoded.rlp_encoded_oracle_account,
            oracle_proof.account_rlp().unwrap()
        );
        assert_eq!(decoded.l1_account_proof, oracle_proof.account_proof);
    }
}
