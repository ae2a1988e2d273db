// Copyright (c) 2024 The Arx Foundation

//! Single-transaction validation against a wallet snapshot.

use crate::{error::TxError, interfaces::SignatureVerifier};
use arx_blockchain_types::{
    max_diff, Anchor, Difficulty, ForkSchedule, Tx, TxFormat, TxId, Wallet, WalletSnapshot,
    TX_DATA_SIZE_LIMIT, TX_SIZE_BASE,
};
use sha2::{Digest, Sha256};
use tracing::debug;

/// The smallest acceptable fee for a transaction of `data_size` bytes
/// under difficulty `diff`.
///
/// Flat base plus a per-byte rate, discounted as the network gets
/// harder: the divisor grows with the difficulty's leading-one run, so
/// storage gets cheaper as hashpower (and presumably capacity) grows.
pub fn min_tx_fee(data_size: u64, diff: Difficulty, height: u64, forks: &ForkSchedule) -> u128 {
    let hardness = 257 - (max_diff() - diff.widened()).bits() as u128;
    let byte_cost =
        (TX_SIZE_BASE as u128 + data_size as u128) * forks.tx_price_per_byte(height);
    forks.tx_base_fee(height) + byte_cost / (1 + hardness)
}

/// Validate one transaction against `wallets`, the snapshot as of the
/// candidate's predecessor.
///
/// Ordered cheapest first; the first failure wins. Block-hash anchors
/// are not resolvable from a wallet snapshot and are deferred to the
/// block-level check against the recent-block window.
pub fn verify_tx<S: SignatureVerifier>(
    tx: &Tx,
    wallets: &WalletSnapshot,
    diff: Difficulty,
    height: u64,
    forks: &ForkSchedule,
    verifier: &S,
) -> Result<(), TxError> {
    if tx.quantity < 0 {
        return Err(TxError::QuantityNegative);
    }

    if tx.target == Some(tx.owner_address()) {
        return Err(TxError::OwnerIsTarget);
    }

    if tx.format == TxFormat::V1 && tx.data.len() as u64 > TX_DATA_SIZE_LIMIT {
        return Err(TxError::DataTooBig);
    }

    let computed_id = TxId(Sha256::digest(&tx.signature).into());
    if tx.id != computed_id
        || !verifier
            .verify(&tx.signature_message(), &tx.signature, &tx.owner)
            .map_err(TxError::Oracle)?
    {
        debug!(id = %tx.id, "tx signature rejected");
        return Err(TxError::InvalidSignature);
    }

    let never_spent = Wallet::with_balance(0);
    let wallet = wallets.get(&tx.owner_address()).unwrap_or(&never_spent);

    // quantity is non-negative here; a spend too large for u128 is an
    // overspend by definition.
    let spend = (tx.quantity as u128).checked_add(tx.reward);
    if spend.is_none_or(|total| wallet.balance < total) {
        return Err(TxError::Overspend);
    }

    if tx.reward < min_tx_fee(tx.data_size(), diff, height, forks) {
        debug!(id = %tx.id, reward = tx.reward, "tx fee below the floor");
        return Err(TxError::RewardTooCheap);
    }

    match tx.last_tx {
        Anchor::NeverSpent | Anchor::TxId(_) => {
            if tx.last_tx != wallet.last_tx {
                return Err(TxError::AnchorNotFound);
            }
        }
        Anchor::BlockHash(_) => {}
    }

    Ok(())
}
