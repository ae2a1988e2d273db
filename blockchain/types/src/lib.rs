// Copyright (c) 2024 The Arx Foundation

//! Blockchain data structures for the Arx consensus core.

#![deny(missing_docs)]

mod block;
mod block_index;
mod buffer;
mod constants;
mod difficulty;
mod digest;
mod error;
mod fork;
mod poa;
mod tx;
mod wallet;

pub use crate::{
    block::Block,
    block_index::{BlockIndex, BlockIndexEntry},
    buffer::{buffer_to_u256, digest_mod_weave, offset_note, u256_to_buffer},
    constants::*,
    difficulty::{max_diff, min_diff_fork_1_8, multiply_difficulty, Difficulty},
    digest::{Address, BlockHash, ChunkId, DataRoot, PowDigest, TxId, TxRoot},
    error::ConvertError,
    fork::ForkSchedule,
    poa::ProofOfAccess,
    tx::{Anchor, Tx, TxFormat},
    wallet::{BlockTxsPairs, Wallet, WalletSnapshot},
};
