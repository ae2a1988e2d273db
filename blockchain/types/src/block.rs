// Copyright (c) 2024 The Arx Foundation

use crate::{
    difficulty::Difficulty,
    digest::{Address, BlockHash, PowDigest, TxRoot},
    poa::ProofOfAccess,
    tx::Tx,
};
use serde::{Deserialize, Serialize};

/// A block, with its transaction list resolved.
///
/// Invariants a legal successor must satisfy (enforced by the
/// validation pipeline, not by construction): `height` is exactly one
/// above its predecessor's, `previous_block` equals the predecessor's
/// `indep_hash`, and `weave_size` equals the predecessor's plus the sum
/// of this block's transactions' data sizes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block height; the genesis block is height 0.
    pub height: u64,
    /// This block's independent (self-identifying) hash.
    pub indep_hash: BlockHash,
    /// The predecessor's independent hash.
    pub previous_block: BlockHash,
    /// Unix timestamp (seconds) the block claims it was produced at.
    pub timestamp: u64,
    /// Timestamp of the most recent retarget block on this chain.
    pub last_retarget: u64,
    /// The difficulty threshold this block claims was in force.
    pub diff: Difficulty,
    /// The PoW-dependent hash field: the externally computed
    /// proof-of-work digest this block commits to.
    pub hash: PowDigest,
    /// Mining nonce.
    pub nonce: Vec<u8>,
    /// Wallet credited with the mining reward.
    pub reward_addr: Address,
    /// The endowment pool balance after this block.
    pub reward_pool: u128,
    /// Cumulative bytes ever committed to the weave, including this
    /// block's transactions.
    pub weave_size: u128,
    /// Merkle root over this block's size-tagged transaction list.
    pub tx_root: TxRoot,
    /// Root of the checkpoint index extended by the predecessor.
    pub block_index_root: BlockHash,
    /// Proof of access to a recall byte of the weave.
    pub poa: ProofOfAccess,
    /// The ordered transaction list.
    pub txs: Vec<Tx>,
}

impl Block {
    /// Sum of the data sizes this block's transactions commit to the
    /// weave.
    pub fn block_data_size(&self) -> u128 {
        self.txs.iter().map(|tx| tx.data_size() as u128).sum()
    }
}
