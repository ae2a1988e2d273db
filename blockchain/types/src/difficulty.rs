// Copyright (c) 2024 The Arx Foundation

//! The mining difficulty threshold and its exact arithmetic.
//!
//! Difficulty under the linear rules is a 256-bit threshold close to
//! `MAX_DIFF = 2^256`; a proof of work is acceptable when its digest,
//! read as a big-endian integer, is at least the threshold. `MAX_DIFF`
//! itself needs 257 bits, so the arithmetic runs in `U512` and
//! truncates back (every legal difficulty is strictly below 2^256).

use crate::buffer::{buffer_to_u256, u256_to_buffer};
use core::fmt;
use primitive_types::{U256, U512};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A block's difficulty threshold.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct Difficulty(U256);

impl Difficulty {
    /// Wrap a raw 256-bit threshold.
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// The raw 256-bit threshold.
    pub fn value(&self) -> U256 {
        self.0
    }

    /// The threshold widened for exact arithmetic against `MAX_DIFF`.
    pub fn widened(&self) -> U512 {
        U512::from(self.0)
    }
}

impl From<u64> for Difficulty {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Serialized as the fixed-width 32-byte buffer the protocol uses
// everywhere else.
impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&u256_to_buffer(self.0))
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let buf = <[u8; 32]>::deserialize(deserializer)?;
        Ok(Self(buffer_to_u256(&buf)))
    }
}

/// The exclusive upper bound on all difficulties: 2^256.
pub fn max_diff() -> U512 {
    U512::one() << 256
}

/// The linear-rule minimum difficulty floor: `2^256 - 2^239`.
pub fn min_diff_fork_1_8() -> Difficulty {
    let floor = max_diff() - (U512::one() << 239);
    Difficulty(U256::try_from(floor).expect("fits by construction"))
}

/// Move a difficulty toward `MAX_DIFF` by dividing its distance from
/// the maximum by `multiplier`. Result is capped just below `MAX_DIFF`
/// so it stays representable (and satisfiable).
pub fn multiply_difficulty(diff: Difficulty, multiplier: u64) -> Difficulty {
    debug_assert!(multiplier > 1);
    let gap = max_diff() - diff.widened();
    let reduced = core::cmp::max(gap / U512::from(multiplier), U512::one());
    let raised = max_diff() - reduced;
    Difficulty(U256::try_from(raised).expect("below 2^256 by construction"))
}
