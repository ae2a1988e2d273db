// Copyright (c) 2024 The Arx Foundation

use crate::digest::{BlockHash, TxRoot};
use serde::{Deserialize, Serialize};

/// One checkpoint-index entry: the footprint of one historical block.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlockIndexEntry {
    /// The block's independent hash.
    pub block_hash: BlockHash,
    /// Cumulative weave size as of this block.
    pub weave_size: u128,
    /// Merkle root over the block's size-tagged transaction list.
    pub tx_root: TxRoot,
}

/// The checkpoint index: one entry per historical block, newest first.
///
/// Invariant: `weave_size` is strictly decreasing from index 0 toward
/// the tail (reverse-chronological order; each indexed block grew the
/// weave). Used only for locating the block that encloses an arbitrary
/// weave offset.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlockIndex(pub Vec<BlockIndexEntry>);

impl BlockIndex {
    /// Number of entries (blocks) in the index.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The entries, newest first.
    pub fn entries(&self) -> &[BlockIndexEntry] {
        &self.0
    }
}
