// Copyright (c) 2024 The Arx Foundation

use arx_blockchain_types::{ForkSchedule, STORE_BLOCKS_AROUND_CURRENT};
use serde::{Deserialize, Serialize};

/// Validator configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Candidate heights further than this from the tip are discarded
    /// without validating anything else.
    pub height_window: u64,
    /// Hard-fork activation heights in force on this network.
    pub forks: ForkSchedule,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            height_window: STORE_BLOCKS_AROUND_CURRENT,
            forks: ForkSchedule::mainnet(),
        }
    }
}
