// Copyright (c) 2024 The Arx Foundation

//! Proof of access.
//!
//! A miner must prove it holds a pseudorandom "recall byte" of the
//! weave before its proof of work counts. The recall byte is derived
//! from the predecessor's independent hash, located in the checkpoint
//! index, and justified by two chained Merkle proofs: through the
//! challenge block's transaction tree to a transaction's data root,
//! then through that transaction's chunk tree to the chunk that
//! contains the byte.

use crate::error::PoaError;
use arx_blockchain_types::{
    digest_mod_weave, multiply_difficulty, BlockHash, BlockIndex, BlockIndexEntry, Difficulty,
    ProofOfAccess, ALTERNATIVE_POA_DIFF_MULTIPLIER, POA_MIN_MAX_OPTION_DEPTH,
};
use arx_crypto_merkle::validate_path;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Raise the proof-of-work bar for alternative recall options.
///
/// Option 1 is free; each further option doubles the remaining
/// distance to the maximum difficulty.
pub fn modify_diff(diff: Difficulty, option: u64) -> Difficulty {
    let mut modified = diff;
    for _ in 1..option {
        modified = multiply_difficulty(modified, ALTERNATIVE_POA_DIFF_MULTIPLIER);
    }
    modified
}

/// The weave offset challenged for `option`, derived by hashing the
/// predecessor's independent hash `option` times.
fn challenge_byte(prev_indep_hash: &BlockHash, option: u64, weave_size: u128) -> u128 {
    let mut digest = Sha256::digest(prev_indep_hash.as_bytes());
    for _ in 1..option {
        digest = Sha256::digest(digest);
    }
    digest_mod_weave(&digest, weave_size)
}

/// Locate the historical block whose data interval contains `byte`.
///
/// The index is newest first with strictly decreasing weave sizes; the
/// match is the entry whose predecessor's weave size is the byte's
/// floor. Returns the entry and the interval's start offset. A byte
/// no entry encloses means the caller's index is inconsistent with the
/// weave size the byte was reduced by, a hard fault rather than a bad
/// proof.
fn find_challenge_block(
    byte: u128,
    index: &BlockIndex,
) -> Result<(&BlockIndexEntry, u128), PoaError> {
    let entries = index.entries();
    for (i, entry) in entries.iter().enumerate() {
        let lower = entries.get(i + 1).map_or(0, |next| next.weave_size);
        if byte >= lower && byte < entry.weave_size {
            return Ok((entry, lower));
        }
    }
    Err(PoaError::ByteOutOfBounds)
}

/// Validate a proof of access against the predecessor's state.
pub fn validate_poa(
    prev_indep_hash: &BlockHash,
    prev_weave_size: u128,
    index: &BlockIndex,
    poa: &ProofOfAccess,
) -> Result<(), PoaError> {
    // Nothing has been committed yet, so there is nothing to recall.
    if prev_weave_size == 0 {
        return Ok(());
    }

    if poa.option > index.len() as u64 && poa.option > POA_MIN_MAX_OPTION_DEPTH {
        debug!(option = poa.option, depth = index.len(), "poa option too deep");
        return Err(PoaError::OptionDepthExceeded);
    }

    let byte = challenge_byte(prev_indep_hash, poa.option, prev_weave_size);
    let (challenge, block_start) = find_challenge_block(byte, index)?;
    let block_size = challenge.weave_size - block_start;

    let tx_leaf = validate_path(
        challenge.tx_root.0,
        byte - block_start,
        0,
        block_size,
        &poa.tx_path,
    )
    .ok_or_else(|| {
        debug!(byte, "poa tx path rejected");
        PoaError::InvalidTxPath
    })?;

    let tx_size = tx_leaf.right_bound - tx_leaf.left_bound;
    let data_leaf = validate_path(
        tx_leaf.data,
        byte - block_start - tx_leaf.left_bound,
        0,
        tx_size,
        &poa.data_path,
    )
    .ok_or_else(|| {
        debug!(byte, "poa data path rejected");
        PoaError::InvalidDataPath
    })?;

    let chunk_id: [u8; 32] = Sha256::digest(&poa.chunk).into();
    if chunk_id != data_leaf.data {
        debug!(byte, "poa chunk does not hash to the proven leaf");
        return Err(PoaError::ChunkMismatch);
    }
    Ok(())
}
