//! `NativeProver` verifier contract bindings and calldata encoders.
//!
//! The four entry points here are the final product of the proof pipeline:
//! everything else in this crate exists to populate their arguments.

use alloy_primitives::Bytes;
use alloy_sol_types::{sol, SolCall};

sol! {
    /// Scalar (non-proof) arguments for a cross-chain storage proof.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct ProveScalarArgs {
        uint256 chainID;
        address contractAddr;
        bytes32 storageSlot;
        bytes32 storageValue;
        bytes32 l2WorldStateRoot;
    }

    /// Scalar arguments for a reference-chain storage proof.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct ProveL1ScalarArgs {
        address contractAddr;
        bytes32 storageSlot;
        bytes32 storageValue;
        bytes32 l1WorldStateRoot;
    }

    /// Canonical registry configuration record for an L2 chain.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct L2Configuration {
        address prover;
        address[] addresses;
        uint256[] storageSlots;
        uint256 versionNumber;
        uint256 finalityDelaySeconds;
        uint8 l2Type;
    }

    /// Configuration record plus the registry storage proof witnessing it,
    /// used to refresh the verifier's cached configuration.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct UpdateL2ConfigArgs {
        L2Configuration config;
        bytes[] l1StorageProof;
        bytes rlpEncodedRegistryAccountData;
        bytes[] l1RegistryProof;
    }

    /// `NativeProver` verifier contract interface.
    interface INativeProver {
        /// Proves a source-chain storage slot against the cached configuration.
        function prove(
            ProveScalarArgs calldata args,
            bytes calldata rlpEncodedL1Header,
            bytes calldata rlpEncodedL2Header,
            bytes calldata settledStateProof,
            bytes[] calldata l2StorageProof,
            bytes calldata rlpEncodedContractAccount,
            bytes[] calldata l2AccountProof
        ) external;

        /// Refreshes the verifier's cached L2 configuration, then proves.
        function updateAndProve(
            UpdateL2ConfigArgs calldata updateArgs,
            ProveScalarArgs calldata proveArgs,
            bytes calldata rlpEncodedL1Header,
            bytes calldata rlpEncodedL2Header,
            bytes calldata settledStateProof,
            bytes[] calldata l2StorageProof,
            bytes calldata rlpEncodedContractAccount,
            bytes[] calldata l2AccountProof
        ) external;

        /// Installs a first-time L2 configuration, then proves.
        function configureAndProve(
            UpdateL2ConfigArgs calldata updateArgs,
            ProveScalarArgs calldata proveArgs,
            bytes calldata rlpEncodedL1Header,
            bytes calldata rlpEncodedL2Header,
            bytes calldata settledStateProof,
            bytes[] calldata l2StorageProof,
            bytes calldata rlpEncodedContractAccount,
            bytes[] calldata l2AccountProof
        ) external;

        /// Proves a storage slot directly on the reference chain.
        function proveL1(
            ProveL1ScalarArgs calldata args,
            bytes calldata rlpEncodedL1Header,
            bytes[] calldata l1StorageProof,
            bytes calldata rlpEncodedContractAccount,
            bytes[] calldata l1AccountProof
        ) external;
    }
}

/// Encodes the calldata for `NativeProver.prove()`.
pub fn encode_prove_calldata(
    args: ProveScalarArgs,
    rlp_encoded_l1_header: Bytes,
    rlp_encoded_l2_header: Bytes,
    settled_state_proof: Bytes,
    l2_storage_proof: Vec<Bytes>,
    rlp_encoded_contract_account: Bytes,
    l2_account_proof: Vec<Bytes>,
) -> Bytes {
    let call = INativeProver::proveCall {
        args,
        rlpEncodedL1Header: rlp_encoded_l1_header,
        rlpEncodedL2Header: rlp_encoded_l2_header,
        settledStateProof: settled_state_proof,
        l2StorageProof: l2_storage_proof,
        rlpEncodedContractAccount: rlp_encoded_contract_account,
        l2AccountProof: l2_account_proof,
    };
    Bytes::from(call.abi_encode())
}

/// Encodes the calldata for `NativeProver.updateAndProve()`.
#[allow(clippy::too_many_arguments)]
pub fn encode_update_and_prove_calldata(
    update_args: UpdateL2ConfigArgs,
    prove_args: ProveScalarArgs,
    rlp_encoded_l1_header: Bytes,
    rlp_encoded_l2_header: Bytes,
    settled_state_proof: Bytes,
    l2_storage_proof: Vec<Bytes>,
    rlp_encoded_contract_account: Bytes,
    l2_account_proof: Vec<Bytes>,
) -> Bytes {
    let call = INativeProver::updateAndProveCall {
        updateArgs: update_args,
        proveArgs: prove_args,
        rlpEncodedL1Header: rlp_encoded_l1_header,
        rlpEncodedL2Header: rlp_encoded_l2_header,
        settledStateProof: settled_state_proof,
        l2StorageProof: l2_storage_proof,
        rlpEncodedContractAccount: rlp_encoded_contract_account,
        l2AccountProof: l2_account_proof,
    };
    Bytes::from(call.abi_encode())
}

/// Encodes the calldata for `NativeProver.configureAndProve()`.
#[allow(clippy::too_many_arguments)]
pub fn encode_configure_and_prove_calldata(
    update_args: UpdateL2ConfigArgs,
    prove_args: ProveScalarArgs,
    rlp_encoded_l1_header: Bytes,
    rlp_encoded_l2_header: Bytes,
    settled_state_proof: Bytes,
    l2_storage_proof: Vec<Bytes>,
    rlp_encoded_contract_account: Bytes,
    l2_account_proof: Vec<Bytes>,
) -> Bytes {
    let call = INativeProver::configureAndProveCall {
        updateArgs: update_args,
        proveArgs: prove_args,
        rlpEncodedL1Header: rlp_encoded_l1_header,
        rlpEncodedL2Header: rlp_encoded_l2_header,
        settledStateProof: settled_state_proof,
        l2StorageProof: l2_storage_proof,
        rlpEncodedContractAccount: rlp_encoded_contract_account,
        l2AccountProof: l2_account_proof,
    };
    Bytes::from(call.abi_encode())
}

/// Encodes the calldata for `NativeProver.proveL1()`.
pub fn encode_prove_l1_calldata(
    args: ProveL1ScalarArgs,
    rlp_encoded_l1_header: Bytes,
    l1_storage_proof: Vec<Bytes>,
    rlp_encoded_contract_account: Bytes,
    l1_account_proof: Vec<Bytes>,
) -> Bytes {
    let call = INativeProver::proveL1Call {
        args,
        rlpEncodedL1Header: rlp_encoded_l1_header,
        l1StorageProof: l1_storage_proof,
        rlpEncodedContractAccount: rlp_encoded_contract_account,
        l1AccountProof: l1_account_proof,
    };
    Bytes::from(call.abi_encode())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{keccak256, Address, B256, U256};

    use super::*;

    fn sample_prove_args() -> ProveScalarArgs {
        ProveScalarArgs {
            chainID: U256::from(10u64),
            contractAddr: Address::repeat_byte(0x12),
            storageSlot: B256::repeat_byte(0xab),
            storageValue: B256::repeat_byte(0xcd),
            l2WorldStateRoot: B256::repeat_byte(0xef),
        }
    }

    fn sample_prove_calldata() -> Bytes {
        encode_prove_calldata(
            sample_prove_args(),
            Bytes::from(vec![0x01; 10]),
            Bytes::from(vec![0x02; 10]),
            Bytes::from(vec![0x03; 10]),
            vec![Bytes::from(vec![0x04; 4])],
            Bytes::from(vec![0x05; 6]),
            vec![Bytes::from(vec![0x06; 4])],
        )
    }

    #[test]
    fn test_selectors_match_canonical_signatures() {
        for (signature, selector) in [
            (INativeProver::proveCall::SIGNATURE, INativeProver::proveCall::SELECTOR),
            (
                INativeProver::updateAndProveCall::SIGNATURE,
                INativeProver::updateAndProveCall::SELECTOR,
            ),
            (
                INativeProver::configureAndProveCall::SIGNATURE,
                INativeProver::configureAndProveCall::SELECTOR,
            ),
            (INativeProver::proveL1Call::SIGNATURE, INativeProver::proveL1Call::SELECTOR),
        ] {
            assert_eq!(&keccak256(signature.as_bytes())[..4], selector);
        }
    }

    #[test]
    fn test_prove_signature_shape() {
        assert_eq!(
            INativeProver::proveCall::SIGNATURE,
            "prove((uint256,address,bytes32,bytes32,bytes32),bytes,bytes,bytes,bytes[],bytes,bytes[])"
        );
        // proveL1 carries no L2 header and no settlement proof.
        assert_eq!(
            INativeProver::proveL1Call::SIGNATURE,
            "proveL1((address,bytes32,bytes32,bytes32),bytes,bytes[],bytes,bytes[])"
        );
    }

    #[test]
    fn test_prove_calldata_starts_with_selector_and_is_deterministic() {
        let first = sample_prove_calldata();
        let second = sample_prove_calldata();

        assert_eq!(&first[..4], &INativeProver::proveCall::SELECTOR);
        assert_eq!(first, second);
    }

    #[test]
    fn test_prove_calldata_round_trips_scalar_args() {
        let calldata = sample_prove_calldata();
        let decoded = INativeProver::proveCall::abi_decode(&calldata).unwrap();

        assert_eq!(decoded.args, sample_prove_args());
        assert_eq!(decoded.rlpEncodedL1Header, Bytes::from(vec![0x01; 10]));
        assert_eq!(decoded.rlpEncodedL2Header, Bytes::from(vec![0x02; 10]));
        assert_eq!(decoded.settledStateProof, Bytes::from(vec![0x03; 10]));
        assert_eq!(decoded.l2StorageProof, vec![Bytes::from(vec![0x04; 4])]);
        assert_eq!(decoded.rlpEncodedContractAccount, Bytes::from(vec![0x05; 6]));
        assert_eq!(decoded.l2AccountProof, vec![Bytes::from(vec![0x06; 4])]);
    }

    #[test]
    fn test_update_and_prove_round_trips_update_args() {
        let update_args = UpdateL2ConfigArgs {
            config: L2Configuration {
                prover: Address::repeat_byte(0x98),
                addresses: vec![Address::repeat_byte(0x11)],
                storageSlots: vec![U256::from(3u64)],
                versionNumber: U256::from(10u64),
                finalityDelaySeconds: U256::from(37_800u64),
                l2Type: 1,
            },
            l1StorageProof: vec![Bytes::from(vec![0x0a])],
            rlpEncodedRegistryAccountData: Bytes::from(vec![0x0b, 0x0c]),
            l1RegistryProof: vec![Bytes::from(vec![0x0d])],
        };

        let calldata = encode_update_and_prove_calldata(
            update_args.clone(),
            sample_prove_args(),
            Bytes::new(),
            Bytes::new(),
            Bytes::new(),
            vec![],
            Bytes::new(),
            vec![],
        );

        assert_eq!(&calldata[..4], &INativeProver::updateAndProveCall::SELECTOR);
        let decoded = INativeProver::updateAndProveCall::abi_decode(&calldata).unwrap();
        assert_eq!(decoded.updateArgs, update_args);
        assert_eq!(decoded.proveArgs, sample_prove_args());
    }

    #[test]
    fn test_prove_l1_calldata_round_trips() {
        let args = ProveL1ScalarArgs {
            contractAddr: Address::repeat_byte(0x12),
            storageSlot: B256::repeat_byte(0xab),
            storageValue: B256::repeat_byte(0xcd),
            l1WorldStateRoot: B256::repeat_byte(0x77),
        };

        let calldata = encode_prove_l1_calldata(
            args.clone(),
            Bytes::from(vec![0x01; 8]),
            vec![Bytes::from(vec![0x02; 4])],
            Bytes::from(vec![0x03; 6]),
            vec![Bytes::from(vec![0x04; 4])],
        );

        assert_eq!(&calldata[..4], &INativeProver::proveL1Call::SELECTOR);
        assert_ne!(INativeProver::proveL1Call::SELECTOR, INativeProver::proveCall::SELECTOR);

        let decoded = INativeProver::proveL1Call::abi_decode(&calldata).unwrap();
        assert_eq!(decoded.args, args);
    }
}
