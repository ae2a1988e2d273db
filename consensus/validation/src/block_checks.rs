// Copyright (c) 2024 The Arx Foundation

//! Structural block checks: field sizes, the transaction root, the
//! weave size, and the checkpoint index root.

use crate::error::{ValidationError, ValidationResult};
use arx_blockchain_types::{
    Block, Tx, TxRoot, DATA_CHUNK_SIZE, MAX_NONCE_SIZE, MAX_PATH_SIZE, MAX_SIG_SIZE,
};
use arx_crypto_merkle::{tree, unbalanced};
use tracing::debug;

/// Reject blocks whose variable-width fields exceed the protocol
/// bounds. Fixed-width fields are bounded by their types.
pub fn block_field_size_limit(block: &Block) -> ValidationResult<()> {
    if block.nonce.len() > MAX_NONCE_SIZE {
        return Err(ValidationError::InvalidFieldSize("nonce".into()));
    }
    if block.poa.tx_path.len() > MAX_PATH_SIZE {
        return Err(ValidationError::InvalidFieldSize("poa.tx_path".into()));
    }
    if block.poa.data_path.len() > MAX_PATH_SIZE {
        return Err(ValidationError::InvalidFieldSize("poa.data_path".into()));
    }
    if block.poa.chunk.len() > DATA_CHUNK_SIZE {
        return Err(ValidationError::InvalidFieldSize("poa.chunk".into()));
    }
    for tx in &block.txs {
        if tx.owner.len() > MAX_SIG_SIZE {
            return Err(ValidationError::InvalidFieldSize("tx.owner".into()));
        }
        if tx.signature.len() > MAX_SIG_SIZE {
            return Err(ValidationError::InvalidFieldSize("tx.signature".into()));
        }
    }
    Ok(())
}

/// The Merkle root over a block's size-tagged transaction list.
///
/// Leaves are `(data root, cumulative end offset)` in block order;
/// zero-data transactions contribute a leaf whose interval is empty.
/// An empty list has the zero root.
pub fn compute_tx_root(txs: &[Tx]) -> TxRoot {
    let mut end_offset: u128 = 0;
    let leaves: Vec<([u8; 32], u128)> = txs
        .iter()
        .map(|tx| {
            end_offset += tx.data_size() as u128;
            (tx.data_root().0, end_offset)
        })
        .collect();
    TxRoot(tree::compute_root(&leaves))
}

/// Whether the block's claimed transaction root matches its
/// transaction list.
pub fn verify_tx_root(block: &Block) -> bool {
    let computed = compute_tx_root(&block.txs);
    if block.tx_root != computed {
        debug!(height = block.height, claimed = %block.tx_root, %computed, "tx root mismatch");
        return false;
    }
    true
}

/// Whether the block's claimed weave size is the predecessor's plus
/// exactly the data this block commits.
pub fn verify_weave_size(block: &Block, previous: &Block) -> bool {
    block.weave_size == previous.weave_size + block.block_data_size()
}

/// Whether the block extends the checkpoint index root with exactly
/// the predecessor's entry.
pub fn verify_block_index_root(block: &Block, previous: &Block) -> bool {
    let entry = unbalanced::hash_block_index_entry(
        previous.indep_hash.as_bytes(),
        previous.weave_size,
        previous.tx_root.as_bytes(),
    );
    let expected = unbalanced::extend_root(previous.block_index_root.as_bytes(), &entry);
    block.block_index_root.as_bytes() == &expected
}
