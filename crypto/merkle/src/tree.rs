// Copyright (c) 2024 The Arx Foundation

//! Construction side of the offset-interval Merkle tree.
//!
//! Built from `(payload digest, end offset)` leaves in weave order;
//! produces the root (transaction-root verification) and serialized
//! root-to-leaf proofs in the exact format [`crate::validate_path`]
//! consumes.

use crate::path::{branch_id, leaf_id, offset_note};

enum Node {
    Leaf {
        id: [u8; 32],
        data: [u8; 32],
        max: u128,
    },
    Branch {
        id: [u8; 32],
        split: u128,
        max: u128,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn id(&self) -> [u8; 32] {
        match self {
            Node::Leaf { id, .. } | Node::Branch { id, .. } => *id,
        }
    }

    fn max(&self) -> u128 {
        match self {
            Node::Leaf { max, .. } | Node::Branch { max, .. } => *max,
        }
    }
}

/// An offset-interval Merkle tree over an ordered leaf set.
pub struct MerkleTree {
    root: Node,
}

impl MerkleTree {
    /// Build a tree from `(payload digest, end offset)` pairs in weave
    /// order; end offsets must be non-decreasing. Returns `None` for an
    /// empty leaf set.
    pub fn from_leaves(leaves: &[([u8; 32], u128)]) -> Option<Self> {
        if leaves.is_empty() {
            return None;
        }
        let mut layer: Vec<Node> = leaves
            .iter()
            .map(|&(data, end)| Node::Leaf {
                id: leaf_id(&data, &offset_note(end)),
                data,
                max: end,
            })
            .collect();

        while layer.len() > 1 {
            let mut next = Vec::with_capacity(layer.len() / 2 + 1);
            let mut nodes = layer.into_iter();
            while let Some(left) = nodes.next() {
                match nodes.next() {
                    Some(right) => {
                        let split = left.max();
                        let id = branch_id(&left.id(), &right.id(), &offset_note(split));
                        next.push(Node::Branch {
                            id,
                            split,
                            max: right.max(),
                            left: Box::new(left),
                            right: Box::new(right),
                        });
                    }
                    // Odd node is promoted unchanged.
                    None => next.push(left),
                }
            }
            layer = next;
        }
        Some(Self {
            root: layer.into_iter().next().expect("non-empty"),
        })
    }

    /// The root id.
    pub fn root_id(&self) -> [u8; 32] {
        self.root.id()
    }

    /// Serialize the root-to-leaf proof for the leaf whose interval
    /// contains `target`.
    pub fn path_for(&self, target: u128) -> Vec<u8> {
        let mut proof = Vec::new();
        let mut node = &self.root;
        loop {
            match node {
                Node::Branch {
                    split, left, right, ..
                } => {
                    proof.extend_from_slice(&left.id());
                    proof.extend_from_slice(&right.id());
                    proof.extend_from_slice(&offset_note(*split));
                    node = if target < *split { left.as_ref() } else { right.as_ref() };
                }
                Node::Leaf { data, max, .. } => {
                    proof.extend_from_slice(data);
                    proof.extend_from_slice(&offset_note(*max));
                    return proof;
                }
            }
        }
    }
}

/// The root over `(payload digest, end offset)` pairs, or the all-zero
/// digest for an empty set.
pub fn compute_root(leaves: &[([u8; 32], u128)]) -> [u8; 32] {
    MerkleTree::from_leaves(leaves).map_or([0u8; 32], |tree| tree.root_id())
}
