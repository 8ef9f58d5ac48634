//! Settlement proving for OP Stack Cannon chains (fault dispute games).

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_rpc_types_eth::Header;
use alloy_sol_types::{SolCall, SolValue};
use async_trait::async_trait;
use tracing::debug;

use super::SettledStateProver;
use crate::constants::{FAULT_DISPUTE_GAME_TYPE, GAME_STATUS_DEFENDER_WINS, L2_TO_L1_MESSAGE_PASSER};
use crate::contracts::decode_returns;
use crate::contracts::dispute_game::{
    construct_game_id, DisputeGameFactoryProofData, FaultDisputeGameProofData,
    FaultDisputeGameStatusSlotData, IDisputeGameFactory, IFaultDisputeGame,
};
use crate::error::ProverError;
use crate::rpc::ChainClient;
use crate::slots::dynamic_array_element_slot;
use crate::types::L2ConfigInfo;

/// Settlement prover for chains that settle through fault dispute games.
#[derive(Debug)]
pub struct OpCannonProver<C> {
    l1_client: Arc<C>,
    l2_client: Arc<C>,
}

impl<C: ChainClient> OpCannonProver<C> {
    /// Creates a new Cannon settlement prover.
    pub fn new(l1_client: Arc<C>, l2_client: Arc<C>) -> Self {
        Self {
            l1_client,
            l2_client,
        }
    }

    fn factory_address(config: &L2ConfigInfo) -> Result<Address, ProverError> {
        if config.addresses.is_empty() || config.storage_slots.len() < 3 {
            return Err(ProverError::Config(
                "Cannon config requires the factory address and three base slots".into(),
            ));
        }
        Ok(config.addresses[0])
    }

    async fn call_game<T: SolCall>(
        &self,
        game: Address,
        call: &T,
        block_number: Option<u64>,
    ) -> Result<T::Return, ProverError> {
        let data = self
            .l1_client
            .call_contract(game, Bytes::from(call.abi_encode()), block_number)
            .await?;
        decode_returns::<T>(&data)
    }
}

#[async_trait]
impl<C: ChainClient> SettledStateProver for OpCannonProver<C> {
    async fn find_latest_resolved(
        &self,
        config: &L2ConfigInfo,
    ) -> Result<(U256, Address), ProverError> {
        let factory = Self::factory_address(config)?;

        let count = self
            .call_game(factory, &IDisputeGameFactory::gameCountCall {}, None)
            .await?;
        if count.is_zero() {
            return Err(ProverError::EmptyResult(
                "dispute game factory has no games".into(),
            ));
        }

        // Walk from the newest game backwards; earlier games may still be in
        // progress or challenged.
        let mut index = count;
        while !index.is_zero() {
            index -= U256::from(1u64);

            let game = self
                .call_game(
                    factory,
                    &IDisputeGameFactory::gameAtIndexCall { _index: index },
                    None,
                )
                .await?
                .proxy;

            let status = self
                .call_game(game, &IFaultDisputeGame::statusCall {}, None)
                .await?;
            debug!(%index, game = %game, status, "Inspected dispute game");

            if status == GAME_STATUS_DEFENDER_WINS {
                return Ok((index, game));
            }
        }

        Err(ProverError::NoResolvedSettlement(
            "no resolved dispute games found".into(),
        ))
    }

    async fn generate_settled_state_proof(
        &self,
        l1_block_number: u64,
        index: U256,
        anchor: Address,
        config: &L2ConfigInfo,
    ) -> Result<(Bytes, Header), ProverError> {
        let factory = Self::factory_address(config)?;
        let games_base_slot = B256::from(config.storage_slots[0]);
        let root_claim_slot = B256::from(config.storage_slots[1]);
        let status_slot = B256::from(config.storage_slots[2]);

        // The factory's game list is a dynamic array.
        let game_slot = dynamic_array_element_slot(games_base_slot, index);

        let (factory_proof, game_proof) = tokio::try_join!(
            self.l1_client
                .get_proof(factory, vec![game_slot], Some(l1_block_number)),
            self.l1_client
                .get_proof(anchor, vec![root_claim_slot, status_slot], Some(l1_block_number)),
        )?;

        let (l2_block_number, created_at, resolved_at) = tokio::try_join!(
            self.call_game(anchor, &IFaultDisputeGame::l2BlockNumberCall {}, Some(l1_block_number)),
            self.call_game(anchor, &IFaultDisputeGame::createdAtCall {}, Some(l1_block_number)),
            self.call_game(anchor, &IFaultDisputeGame::resolvedAtCall {}, Some(l1_block_number)),
        )?;

        let l2_block_number: u64 = l2_block_number
            .try_into()
            .map_err(|_| ProverError::Decode("game L2 block number overflows u64".into()))?;
        if l2_block_number == 0 {
            return Err(ProverError::Decode("game reports a zero L2 block number".into()));
        }
        if created_at == 0 {
            return Err(ProverError::Decode("game reports a zero creation timestamp".into()));
        }
        if resolved_at == 0 {
            return Err(ProverError::Decode("game reports a zero resolution timestamp".into()));
        }
        debug!(l2_block_number, created_at, resolved_at, game = %anchor, "Read dispute game metadata");

        let factory_bundle = factory_proof.to_bundle()?;
        let root_claim_storage_proof = game_proof.storage_proof_for(root_claim_slot)?;
        let status_storage_proof = game_proof.storage_proof_for(status_slot)?;
        let rlp_encoded_game_account = game_proof.account_rlp()?;

        let (l2_header, passer_proof) = tokio::try_join!(
            self.l2_client.header_by_number(Some(l2_block_number)),
            self.l2_client
                .get_proof(L2_TO_L1_MESSAGE_PASSER, vec![], Some(l2_block_number)),
        )?;

        let factory_data = DisputeGameFactoryProofData {
            messagePasserStateRoot: passer_proof.storage_hash,
            latestBlockHash: l2_header.hash,
            gameIndex: index,
            gameId: construct_game_id(FAULT_DISPUTE_GAME_TYPE, created_at, anchor),
            disputeFaultGameStorageProof: factory_bundle.storage_proof,
            rlpEncodedDisputeGameFactoryData: factory_bundle.rlp_encoded_account,
            disputeGameFactoryAccountProof: factory_bundle.account_proof,
        };

        // The game resolved in the defender's favour, so the slot's
        // initialized and challenge flags are both set.
        let game_data = FaultDisputeGameProofData {
            faultDisputeGameStateRoot: game_proof.storage_hash,
            faultDisputeGameRootClaimStorageProof: root_claim_storage_proof,
            faultDisputeGameStatusSlotData: FaultDisputeGameStatusSlotData {
                createdAt: created_at,
                resolvedAt: resolved_at,
                gameStatus: GAME_STATUS_DEFENDER_WINS,
                initialized: true,
                l2BlockNumberChallenged: true,
            },
            faultDisputeGameStatusStorageProof: status_storage_proof,
            rlpEncodedFaultDisputeGameData: rlp_encoded_game_account,
            faultDisputeGameAccountProof: game_proof.account_proof.clone(),
        };

        // The verifier decodes this bundle with abi.decode, so it is
        // contract-ABI encoded rather than RLP.
        let bundle = (factory_data, game_data).abi_encode();
        Ok((Bytes::from(bundle), l2_header))
    }
}
