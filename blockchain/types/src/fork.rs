// Copyright (c) 2024 The Arx Foundation

//! The hard-fork rule table.
//!
//! Historical protocol changes are keyed by activation height, never by
//! wall-clock time: a validator replaying old blocks must apply the
//! rules that were live at each block's height. Keeping the switches in
//! one table keeps the rule set auditable.

use crate::{
    constants::{DEFAULT_DIFF, FORK_HEIGHT_1_7, FORK_HEIGHT_1_8, FORK_HEIGHT_1_9, FORK_HEIGHT_2_0, FORK_HEIGHT_2_2},
    difficulty::{min_diff_fork_1_8, Difficulty},
};
use serde::{Deserialize, Serialize};

/// Activation heights of the protocol's hard forks.
///
/// Constructible at arbitrary heights so tests can exercise every rule
/// set; production nodes use [`ForkSchedule::mainnet`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ForkSchedule {
    /// Activation height of the 1.7 rules.
    pub fork_1_7: u64,
    /// Activation height of the linear-difficulty rules.
    pub fork_1_8: u64,
    /// Activation height of the revised fee schedule.
    pub fork_1_9: u64,
    /// Activation height of the 2.0 weave format.
    pub fork_2_0: u64,
    /// Activation height of the 2.2 rules.
    pub fork_2_2: u64,
}

impl ForkSchedule {
    /// The canonical mainnet schedule.
    pub const fn mainnet() -> Self {
        Self {
            fork_1_7: FORK_HEIGHT_1_7,
            fork_1_8: FORK_HEIGHT_1_8,
            fork_1_9: FORK_HEIGHT_1_9,
            fork_2_0: FORK_HEIGHT_2_0,
            fork_2_2: FORK_HEIGHT_2_2,
        }
    }

    /// A schedule with every fork active from genesis (test networks).
    pub const fn all_active() -> Self {
        Self {
            fork_1_7: 0,
            fork_1_8: 0,
            fork_1_9: 0,
            fork_2_0: 0,
            fork_2_2: 0,
        }
    }

    /// Whether the linear difficulty representation (threshold near
    /// `MAX_DIFF`) is live at `height`. Below it, difficulty counts
    /// leading zero bits.
    pub fn linear_difficulty_active(&self, height: u64) -> bool {
        height >= self.fork_1_8
    }

    /// Whether retarget boundaries are validated at `height`. Legacy
    /// heights require the difficulty to be carried over unchanged.
    pub fn retarget_active(&self, height: u64) -> bool {
        height >= self.fork_1_8
    }

    /// The minimum difficulty floor live at `height`.
    pub fn min_difficulty(&self, height: u64) -> Difficulty {
        if self.linear_difficulty_active(height) {
            min_diff_fork_1_8()
        } else {
            Difficulty::from(DEFAULT_DIFF)
        }
    }

    /// Flat fee floor per transaction, in base units.
    pub fn tx_base_fee(&self, _height: u64) -> u128 {
        10
    }

    /// Per-byte fee rate before the difficulty discount. The 1.9 fee
    /// schedule halved the rate.
    pub fn tx_price_per_byte(&self, height: u64) -> u128 {
        if height >= self.fork_1_9 {
            10
        } else {
            20
        }
    }
}

impl Default for ForkSchedule {
    fn default() -> Self {
        Self::mainnet()
    }
}
