// Copyright (c) 2024 The Arx Foundation

use crate::{
    digest::{Address, BlockHash, TxId},
    tx::Anchor,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One wallet's ledger state.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    /// Balance in base units.
    pub balance: u128,
    /// Anchor of the wallet's most recent transaction, or
    /// [`Anchor::NeverSpent`].
    pub last_tx: Anchor,
}

impl Wallet {
    /// A funded wallet that has never transacted.
    pub fn with_balance(balance: u128) -> Self {
        Self {
            balance,
            last_tx: Anchor::NeverSpent,
        }
    }
}

/// An immutable address-keyed balance snapshot, as of some block.
///
/// Validation never mutates a snapshot; it works on a private copy.
pub type WalletSnapshot = HashMap<Address, Wallet>;

/// Transaction ids of the trailing window of prior blocks, keyed by
/// block hash. Consulted for replay detection and block-hash anchor
/// reachability.
pub type BlockTxsPairs = HashMap<BlockHash, Vec<TxId>>;
