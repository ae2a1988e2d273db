// Copyright (c) 2024 The Arx Foundation

//! The full slow check of a candidate block.

use crate::{
    block_checks::{
        block_field_size_limit, verify_block_index_root, verify_tx_root, verify_weave_size,
    },
    block_txs::validate_block_txs,
    config::ValidationConfig,
    error::{ReturnCode, ValidationError, ValidationResult},
    interfaces::{BlockHasher, PowHasher, SignatureVerifier},
    poa::{modify_diff, validate_poa},
    pow::{validate_pow, verify_dep_hash},
    retarget::validate_difficulty,
    wallets::WalletLedger,
};
use arx_blockchain_types::{Block, BlockIndex, BlockTxsPairs, WalletSnapshot};
use tracing::{debug, info};

/// Validates candidate blocks against the current tip.
///
/// Stateless between calls: every input describing the chain as of the
/// tip is passed per call, so one validator can serve concurrent forks.
pub struct BlockValidator<H, P, S> {
    config: ValidationConfig,
    block_hasher: H,
    pow_hasher: P,
    sig_verifier: S,
}

impl<H: BlockHasher, P: PowHasher, S: SignatureVerifier> BlockValidator<H, P, S> {
    /// Build a validator around its collaborators.
    pub fn new(config: ValidationConfig, block_hasher: H, pow_hasher: P, sig_verifier: S) -> Self {
        Self {
            config,
            block_hasher,
            pow_hasher,
            sig_verifier,
        }
    }

    /// Run the slow check, cheapest rules first.
    ///
    /// `wallets`, `block_index` and `block_txs_pairs` describe the
    /// chain as of `previous`; none of them are mutated.
    pub fn validate(
        &self,
        block: &Block,
        previous: &Block,
        wallets: &WalletSnapshot,
        block_index: &BlockIndex,
        block_txs_pairs: &BlockTxsPairs,
    ) -> ValidationResult<()> {
        let forks = &self.config.forks;

        if block.height > previous.height + self.config.height_window {
            return Err(ValidationError::HeightTooFarAhead);
        }
        if block.height + self.config.height_window < previous.height {
            return Err(ValidationError::HeightTooFarBehind);
        }

        if block.diff < forks.min_difficulty(block.height) {
            debug!(height = block.height, diff = %block.diff, "difficulty below the fork floor");
            return Err(ValidationError::DifficultyTooLow);
        }

        if block.height != previous.height + 1 {
            return Err(ValidationError::InvalidPreviousHeight);
        }
        if block.previous_block != previous.indep_hash {
            return Err(ValidationError::InvalidPreviousBlockHash);
        }

        validate_poa(&previous.indep_hash, previous.weave_size, block_index, &block.poa)?;

        validate_difficulty(block, previous, forks)?;

        let data_segment = self.block_hasher.data_segment(block, previous)?;
        let digest = self
            .pow_hasher
            .compute(&data_segment, &block.nonce, block.height)?;
        if !verify_dep_hash(block, &digest) {
            return Err(ValidationError::InvalidDependentHash);
        }
        let pow_diff = modify_diff(block.diff, block.poa.option);
        if !validate_pow(&digest, pow_diff, block.height, forks) {
            debug!(height = block.height, option = block.poa.option, "proof of work below threshold");
            return Err(ValidationError::InvalidPow);
        }

        if self.block_hasher.indep_hash(block)? != block.indep_hash {
            return Err(ValidationError::InvalidIndependentHash);
        }

        let mut ledger = WalletLedger::from_snapshot(wallets);
        ledger.apply_block(block, previous);
        if !block.txs.iter().all(|tx| ledger.is_wallet_valid(tx)) {
            return Err(ValidationError::InvalidWalletList);
        }

        block_field_size_limit(block)?;

        validate_block_txs(
            &block.txs,
            block.diff,
            previous.height,
            wallets,
            block_txs_pairs,
            forks,
            &self.sig_verifier,
        )?;

        if !verify_tx_root(block) {
            return Err(ValidationError::InvalidTxRoot);
        }
        if !verify_weave_size(block, previous) {
            return Err(ValidationError::InvalidWeaveSize);
        }
        if !verify_block_index_root(block, previous) {
            return Err(ValidationError::InvalidBlockIndexRoot);
        }

        info!(height = block.height, hash = %block.indep_hash, "block passed the slow check");
        Ok(())
    }

    /// [`Self::validate`] folded into the gateway-facing outcome.
    pub fn validate_return(
        &self,
        block: &Block,
        previous: &Block,
        wallets: &WalletSnapshot,
        block_index: &BlockIndex,
        block_txs_pairs: &BlockTxsPairs,
    ) -> ReturnCode {
        match self.validate(block, previous, wallets, block_index, block_txs_pairs) {
            Ok(()) => ReturnCode::accepted(),
            Err(err) => {
                debug!(height = block.height, %err, "block rejected");
                err.into()
            }
        }
    }
}
