// Copyright (c) 2024 The Arx Foundation

//! Proof-of-work acceptance rules.

use arx_blockchain_types::{buffer_to_u256, Block, Difficulty, ForkSchedule, PowDigest};
use primitive_types::U512;
use tracing::debug;

/// Whether `digest` satisfies `diff` under the rules live at `height`.
///
/// Under the linear rules the digest, read as a big-endian integer,
/// must reach the threshold. The legacy rules count leading zero bits
/// instead: the digest must fall below `2^(256 - diff)`.
pub fn validate_pow(
    digest: &PowDigest,
    diff: Difficulty,
    height: u64,
    forks: &ForkSchedule,
) -> bool {
    let value = buffer_to_u256(digest.as_bytes());
    if forks.linear_difficulty_active(height) {
        value >= diff.value()
    } else {
        let zero_bits = diff.value().low_u64().min(256);
        let ceiling = U512::one() << (256 - zero_bits as usize);
        U512::from(value) < ceiling
    }
}

/// Whether the block's committed hash field matches the recomputed
/// proof-of-work digest.
pub fn verify_dep_hash(block: &Block, digest: &PowDigest) -> bool {
    if block.hash != *digest {
        debug!(
            height = block.height,
            claimed = %block.hash,
            computed = %digest,
            "dependent hash mismatch"
        );
        return false;
    }
    true
}
