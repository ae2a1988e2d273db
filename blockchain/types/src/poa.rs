// Copyright (c) 2024 The Arx Foundation

use serde::{Deserialize, Serialize};

/// A succinct proof of access to a recall byte somewhere in the weave.
///
/// Owned by (and immutable within) the block that carries it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProofOfAccess {
    /// The recall-byte option (a sequence number, >= 1) chosen.
    pub option: u64,
    /// Serialized Merkle path through the challenge block's
    /// transaction tree.
    pub tx_path: Vec<u8>,
    /// Serialized Merkle path through the transaction's chunk tree to
    /// the required chunk.
    pub data_path: Vec<u8>,
    /// The required data chunk.
    pub chunk: Vec<u8>,
}

impl Default for ProofOfAccess {
    fn default() -> Self {
        Self {
            option: 1,
            tx_path: Vec::new(),
            data_path: Vec::new(),
            chunk: Vec::new(),
        }
    }
}
