// Copyright (c) 2024 The Arx Foundation

use sha2::{Digest, Sha256};

/// Width of every hash element in a serialized proof.
pub const HASH_SIZE: usize = 32;

/// Width of every interval marker ("note") in a serialized proof.
pub const NOTE_SIZE: usize = 32;

const BRANCH_SIZE: usize = 2 * HASH_SIZE + NOTE_SIZE;
const LEAF_SIZE: usize = HASH_SIZE + NOTE_SIZE;

/// The payload a valid proof justifies.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathLeaf {
    /// The leaf's payload digest.
    pub data: [u8; 32],
    /// Inclusive left edge of the leaf's byte interval.
    pub left_bound: u128,
    /// Exclusive right edge of the leaf's byte interval.
    pub right_bound: u128,
}

/// Verify an inclusion proof of a leaf at byte offset `target` against
/// `root`, inside the interval `[left_bound, right_bound)`.
///
/// Walks the proof from root to leaf: at each branch the expected hash
/// is recomputed from the two children and the split note, and the
/// interval narrows by the branch taken (left iff `target` is below the
/// split). Returns `None` — the caller must treat it as proof
/// rejection, never as a crash — if any recomputed hash mismatches, the
/// proof is malformed, or the surviving interval stops containing
/// `target`. Tree depth is proof-length-determined.
pub fn validate_path(
    root: [u8; 32],
    target: u128,
    left_bound: u128,
    right_bound: u128,
    path: &[u8],
) -> Option<PathLeaf> {
    if right_bound <= left_bound || target < left_bound || target >= right_bound {
        return None;
    }

    let mut expected = root;
    let mut left = left_bound;
    let mut right = right_bound;
    let mut rest = path;

    while rest.len() > LEAF_SIZE {
        if rest.len() < BRANCH_SIZE {
            return None;
        }
        let (branch, remainder) = rest.split_at(BRANCH_SIZE);
        let left_id: [u8; 32] = branch[..HASH_SIZE].try_into().ok()?;
        let right_id: [u8; 32] = branch[HASH_SIZE..2 * HASH_SIZE].try_into().ok()?;
        let note = &branch[2 * HASH_SIZE..];

        if branch_id(&left_id, &right_id, note) != expected {
            return None;
        }

        let split = note_offset(note);
        if target < split {
            expected = left_id;
            right = right.min(split);
        } else {
            expected = right_id;
            left = left.max(split);
        }
        if right <= left {
            return None;
        }
        rest = remainder;
    }

    if rest.len() != LEAF_SIZE {
        return None;
    }
    let data: [u8; 32] = rest[..HASH_SIZE].try_into().ok()?;
    let note = &rest[HASH_SIZE..];
    if leaf_id(&data, note) != expected {
        return None;
    }

    Some(PathLeaf {
        data,
        left_bound: left,
        right_bound: right,
    })
}

pub(crate) fn branch_id(left: &[u8; 32], right: &[u8; 32], note: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(Sha256::digest(left));
    hasher.update(Sha256::digest(right));
    hasher.update(Sha256::digest(note));
    hasher.finalize().into()
}

pub(crate) fn leaf_id(data: &[u8; 32], note: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(Sha256::digest(data));
    hasher.update(Sha256::digest(note));
    hasher.finalize().into()
}

pub(crate) fn offset_note(offset: u128) -> [u8; NOTE_SIZE] {
    let mut note = [0u8; NOTE_SIZE];
    note[16..].copy_from_slice(&offset.to_be_bytes());
    note
}

pub(crate) fn note_offset(note: &[u8]) -> u128 {
    note.iter().fold(0u128, |acc, &byte| {
        acc.saturating_mul(256).saturating_add(byte as u128)
    })
}
