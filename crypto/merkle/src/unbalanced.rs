// Copyright (c) 2024 The Arx Foundation

//! Unbalanced hash-list accumulator used for the block index root.
//!
//! Each block appends one entry: the new root is the SHA-384 of the old
//! root followed by the SHA-384 of the entry's fields. Appending is
//! O(1) and the root commits to the full history in order.

use sha2::{Digest, Sha384};

/// Size of the accumulator root and of every entry hash.
pub const ROOT_SIZE: usize = 48;

/// Fold one entry hash into the accumulator root.
pub fn extend_root(root: &[u8; ROOT_SIZE], entry_hash: &[u8; ROOT_SIZE]) -> [u8; ROOT_SIZE] {
    let mut hasher = Sha384::new();
    hasher.update(root);
    hasher.update(entry_hash);
    hasher.finalize().into()
}

/// Hash of a single block index entry: the block's hash, the weave size
/// as it stood at that block, and the block's transaction root.
pub fn hash_block_index_entry(
    block_hash: &[u8; ROOT_SIZE],
    weave_size: u128,
    tx_root: &[u8; 32],
) -> [u8; ROOT_SIZE] {
    let mut hasher = Sha384::new();
    hasher.update(block_hash);
    hasher.update(weave_size.to_be_bytes());
    hasher.update(tx_root);
    hasher.finalize().into()
}
