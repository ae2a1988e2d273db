// Copyright (c) 2024 The Arx Foundation

//! Difficulty retargeting.
//!
//! Every [`RETARGET_BLOCKS`]th block rescales the difficulty so one
//! retarget interval takes [`RETARGET_BLOCK_TIME`] seconds. The
//! schedule is deterministic from the predecessor, so a candidate's
//! claimed difficulty is recomputed and compared, never trusted.

use crate::error::RetargetError;
use arx_blockchain_types::{
    max_diff, Block, Difficulty, ForkSchedule, DIFF_ADJUSTMENT_DOWN_COMPARATOR,
    DIFF_ADJUSTMENT_UP_COMPARATOR, RETARGET_BLOCKS, RETARGET_BLOCK_TIME, RETARGET_TOLERANCE,
};
use primitive_types::{U256, U512};
use tracing::debug;

/// Whether `height` is a retarget boundary under `forks`.
pub fn is_retarget_height(height: u64, forks: &ForkSchedule) -> bool {
    height % RETARGET_BLOCKS == 0 && forks.retarget_active(height)
}

/// The difficulty a retarget block at `height` must carry, given the
/// predecessor's difficulty and the elapsed interval.
pub fn calculate_difficulty(
    old_diff: Difficulty,
    timestamp: u64,
    last_retarget: u64,
    height: u64,
    forks: &ForkSchedule,
) -> Result<Difficulty, RetargetError> {
    if timestamp <= last_retarget {
        return Err(RetargetError::InvalidTimestamp);
    }
    let elapsed = timestamp - last_retarget;
    if elapsed.abs_diff(RETARGET_BLOCK_TIME) < RETARGET_TOLERANCE {
        return Ok(old_diff);
    }

    // Scale the threshold's distance from MAX_DIFF by the elapsed
    // interval, with the interval clamped so one retarget can at most
    // quadruple the hashpower demand or halve it.
    let scale = elapsed.clamp(DIFF_ADJUSTMENT_UP_COMPARATOR, DIFF_ADJUSTMENT_DOWN_COMPARATOR);
    let gap = max_diff() - old_diff.widened();
    let scaled_gap = gap * U512::from(scale) / U512::from(RETARGET_BLOCK_TIME);
    let candidate = max_diff() - scaled_gap.max(U512::one());

    let floor = forks.min_difficulty(height).widened();
    let bounded = candidate.clamp(floor, max_diff() - U512::one());
    Ok(Difficulty::new(
        U256::try_from(bounded).expect("below 2^256 by construction"),
    ))
}

/// Check a candidate's difficulty and `last_retarget` against the
/// deterministic schedule.
pub fn validate_difficulty(
    block: &Block,
    previous: &Block,
    forks: &ForkSchedule,
) -> Result<(), RetargetError> {
    if !is_retarget_height(block.height, forks) {
        // Off-boundary blocks carry the interval state forward
        // unchanged.
        if block.diff != previous.diff {
            debug!(
                height = block.height,
                "difficulty changed off a retarget boundary"
            );
            return Err(RetargetError::DifficultyMismatch);
        }
        if block.last_retarget != previous.last_retarget {
            return Err(RetargetError::LastRetargetMismatch);
        }
        return Ok(());
    }

    if block.last_retarget != block.timestamp {
        return Err(RetargetError::LastRetargetMismatch);
    }
    let expected = calculate_difficulty(
        previous.diff,
        block.timestamp,
        previous.last_retarget,
        block.height,
        forks,
    )?;
    if block.diff != expected {
        debug!(
            height = block.height,
            claimed = %block.diff,
            expected = %expected,
            "retarget difficulty mismatch"
        );
        return Err(RetargetError::DifficultyMismatch);
    }
    Ok(())
}
