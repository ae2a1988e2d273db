// Copyright (c) 2024 The Arx Foundation

//! Consensus validation: the full "slow check" a node runs on a
//! candidate block before accepting it onto the chain.
//!
//! The pipeline in [`BlockValidator::validate`] orders its rules
//! cheapest first: height window, difficulty floor, chain linkage,
//! proof of access, difficulty retarget, proof of work, independent
//! hash, wallet solvency, field sizes, the transaction set, and the
//! structural roots. The first failed rule decides the rejection
//! reason.
//!
//! Everything here is pure and synchronous; blocking collaborators are
//! injected through the [`BlockHasher`], [`PowHasher`] and
//! [`SignatureVerifier`] traits.

#![deny(missing_docs)]

mod block_checks;
mod block_txs;
mod config;
mod error;
mod interfaces;
mod poa;
mod pow;
mod retarget;
mod tx_validate;
mod validate;
mod wallets;

pub use crate::{
    block_checks::{
        block_field_size_limit, compute_tx_root, verify_block_index_root, verify_tx_root,
        verify_weave_size,
    },
    block_txs::validate_block_txs,
    config::ValidationConfig,
    error::{
        OracleError, PoaError, RetargetError, ReturnCode, TxError, ValidationError,
        ValidationResult,
    },
    interfaces::{BlockHasher, Ed25519Verifier, PowHasher, SignatureVerifier},
    poa::{modify_diff, validate_poa},
    pow::{validate_pow, verify_dep_hash},
    retarget::{calculate_difficulty, is_retarget_height, validate_difficulty},
    tx_validate::{min_tx_fee, verify_tx},
    validate::BlockValidator,
    wallets::{inflation_reward, split_reward_pool, WalletLedger},
};
