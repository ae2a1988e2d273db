// Copyright (c) 2024 The Arx Foundation

//! Protocol constants.
//!
//! Values are consensus-critical; changing any of them forks the node
//! off the network.

/// How far (in blocks) a candidate's height may deviate from the next
/// expected height before it is discarded without further work.
pub const STORE_BLOCKS_AROUND_CURRENT: u64 = 50;

/// The maximum allowed size in bytes for the data field of a
/// format-1 transaction.
pub const TX_DATA_SIZE_LIMIT: u64 = 10 * 1024 * 1024;

/// The maximum allowed size in bytes for the combined data fields of
/// the format-1 transactions included in one block. Must be greater
/// than or equal to [`TX_DATA_SIZE_LIMIT`].
pub const BLOCK_TX_DATA_SIZE_LIMIT: u64 = TX_DATA_SIZE_LIMIT;

/// The maximum number of transactions (either format) in a block.
pub const BLOCK_TX_COUNT_LIMIT: usize = 1000;

/// Hard-fork activation heights.
pub const FORK_HEIGHT_1_7: u64 = 235_200;
/// Activation height of the linear-difficulty rules.
pub const FORK_HEIGHT_1_8: u64 = 269_510;
/// Activation height of the revised fee schedule.
pub const FORK_HEIGHT_1_9: u64 = 315_700;
/// Activation height of the 2.0 weave format.
pub const FORK_HEIGHT_2_0: u64 = 422_250;
/// Activation height of the 2.2 rules.
pub const FORK_HEIGHT_2_2: u64 = 500_000;

/// Alternative PoA options beyond the checkpoint-index depth are
/// rejected past this cap.
pub const POA_MIN_MAX_OPTION_DEPTH: u64 = 100;

/// How much harder each subsequent alternative PoA option must be.
pub const ALTERNATIVE_POA_DIFF_MULTIPLIER: u64 = 2;

/// The pre-fork-1.8 default difficulty (counted in leading zero bits).
pub const DEFAULT_DIFF: u64 = 8;

/// A difficulty retarget happens every this many blocks.
pub const RETARGET_BLOCKS: u64 = 10;

/// Target seconds between blocks.
pub const TARGET_TIME: u64 = 120;

/// Target seconds for one whole retarget interval
/// (`RETARGET_BLOCKS * TARGET_TIME`).
pub const RETARGET_BLOCK_TIME: u64 = RETARGET_BLOCKS * TARGET_TIME;

/// Elapsed intervals within this many seconds of the target keep the
/// difficulty unchanged.
pub const RETARGET_TOLERANCE: u64 = 120;

/// Max allowed difficulty multiplication factor per retarget.
pub const DIFF_ADJUSTMENT_UP_LIMIT: u64 = 4;

/// Max allowed difficulty division factor per retarget. Lower than the
/// up limit: stalls are preferred over forks when hashpower drops.
pub const DIFF_ADJUSTMENT_DOWN_LIMIT: u64 = 2;

/// Elapsed-seconds floor for the retarget scale
/// (`RETARGET_BLOCK_TIME / DIFF_ADJUSTMENT_UP_LIMIT`).
pub const DIFF_ADJUSTMENT_UP_COMPARATOR: u64 = RETARGET_BLOCK_TIME / DIFF_ADJUSTMENT_UP_LIMIT;

/// Elapsed-seconds ceiling for the retarget scale
/// (`RETARGET_BLOCK_TIME * DIFF_ADJUSTMENT_DOWN_LIMIT`).
pub const DIFF_ADJUSTMENT_DOWN_COMPARATOR: u64 = RETARGET_BLOCK_TIME * DIFF_ADJUSTMENT_DOWN_LIMIT;

/// Maximum byte length of a block nonce.
pub const MAX_NONCE_SIZE: usize = 512;

/// Maximum byte length of a transaction owner key or signature.
pub const MAX_SIG_SIZE: usize = 512;

/// Maximum byte length of a serialized Merkle proof.
pub const MAX_PATH_SIZE: usize = 256 * 1024;

/// Maximum byte length of a PoA data chunk.
pub const DATA_CHUNK_SIZE: usize = 256 * 1024;

/// Flat byte overhead attributed to every transaction when pricing its
/// minimum fee.
pub const TX_SIZE_BASE: u64 = 3210;

/// Share divisor of the reward pool paid out to the miner each block.
pub const MINING_REWARD_POOL_DIVIDER: u128 = 10;

/// Inflation reward of the genesis block, in base units.
pub const GENESIS_BLOCK_REWARD: u128 = 5_000_000_000_000;

/// Inflation halving interval in blocks (roughly one year of target
/// block time).
pub const REWARD_HALVING_INTERVAL: u64 = 262_800;

/// Floor on the inflation reward once halvings have run their course.
pub const TAIL_EMISSION: u128 = 100_000_000;
