// Copyright (c) 2024 The Arx Foundation

//! Offset-interval Merkle trees.
//!
//! The weave addresses data by cumulative byte offset, so its Merkle
//! trees carry interval markers ("notes") alongside hashes: every
//! branch node records the split offset between its children, and every
//! leaf records its end offset. A serialized proof is the root-to-leaf
//! run of `(left, right, note)` branch triples followed by one
//! `(data, note)` leaf pair, 32 bytes per element.
//!
//! [`validate_path`] verifies such a proof and is the foundation of the
//! proof-of-access check; [`tree`] builds trees (and extracts proofs)
//! for transaction-root verification and for proof construction;
//! [`unbalanced`] is the hash-list root used for the checkpoint index.

mod path;
pub mod tree;
pub mod unbalanced;

pub use path::{validate_path, PathLeaf, HASH_SIZE, NOTE_SIZE};
