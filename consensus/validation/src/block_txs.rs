// Copyright (c) 2024 The Arx Foundation

//! Block-level transaction set validation.
//!
//! On top of the per-transaction checks this enforces the set rules: no
//! duplicates within the block or against the recent-block window,
//! block-hash anchors must point into the window, and the count and
//! format-1 payload ceilings hold.
//!
//! Every transaction is checked against the same predecessor snapshot;
//! the per-transaction overspend check deliberately does not see
//! earlier transactions in the block. The replayed-ledger solvency
//! check catches the combined effect.

use crate::{
    error::{ValidationError, ValidationResult},
    interfaces::SignatureVerifier,
    tx_validate::verify_tx,
};
use arx_blockchain_types::{
    Anchor, BlockTxsPairs, Difficulty, ForkSchedule, Tx, TxFormat, TxId, WalletSnapshot,
    BLOCK_TX_COUNT_LIMIT, BLOCK_TX_DATA_SIZE_LIMIT,
};
use std::collections::HashSet;
use tracing::debug;

/// Validate a candidate block's transaction set.
///
/// `prev_height` is the predecessor's height; the fee curve is keyed by
/// the chain state the transactions were accepted under, not by the
/// candidate's own height.
pub fn validate_block_txs<S: SignatureVerifier>(
    txs: &[Tx],
    diff: Difficulty,
    prev_height: u64,
    wallets: &WalletSnapshot,
    block_txs_pairs: &BlockTxsPairs,
    forks: &ForkSchedule,
    verifier: &S,
) -> ValidationResult<()> {
    if txs.len() > BLOCK_TX_COUNT_LIMIT {
        return Err(ValidationError::TxCountExceeded);
    }

    let window: HashSet<&TxId> = block_txs_pairs.values().flatten().collect();
    let mut verified: HashSet<TxId> = HashSet::with_capacity(txs.len());
    let mut v1_data_size: u64 = 0;

    for tx in txs {
        if !verified.insert(tx.id) {
            debug!(id = %tx.id, "tx duplicated within the block");
            return Err(ValidationError::TxAlreadyVerified);
        }
        if window.contains(&tx.id) {
            debug!(id = %tx.id, "tx replayed from a recent block");
            return Err(ValidationError::TxAlreadyInWindow);
        }
        if let Anchor::BlockHash(hash) = tx.last_tx {
            if !block_txs_pairs.contains_key(&hash) {
                return Err(ValidationError::AnchorNotInWindow);
            }
        }
        if tx.format == TxFormat::V1 {
            v1_data_size = v1_data_size.saturating_add(tx.data.len() as u64);
            if v1_data_size > BLOCK_TX_DATA_SIZE_LIMIT {
                return Err(ValidationError::TxDataSizeExceeded);
            }
        }
        verify_tx(tx, wallets, diff, prev_height, forks, verifier)?;
    }
    Ok(())
}
