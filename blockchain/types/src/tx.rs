// Copyright (c) 2024 The Arx Foundation

//! Transactions.

use crate::digest::{Address, BlockHash, DataRoot, TxId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Transaction wire format generation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TxFormat {
    /// Format 1: the data bytes ride inside the transaction.
    V1,
    /// Format 2: only a Merkle root over off-chain chunks is carried.
    V2,
}

/// A transaction's recency anchor.
///
/// Wallets record the id of their latest transaction here; transactions
/// reference either that id or a recent block hash to prove recency and
/// defeat indefinite replay.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Anchor {
    /// The sentinel for a wallet that has never transacted.
    NeverSpent,
    /// A prior transaction id.
    TxId(TxId),
    /// A recent block's independent hash.
    BlockHash(BlockHash),
}

impl Anchor {
    fn message_bytes(&self) -> Vec<u8> {
        match self {
            Self::NeverSpent => Vec::new(),
            Self::TxId(id) => id.as_ref().to_vec(),
            Self::BlockHash(hash) => hash.as_ref().to_vec(),
        }
    }
}

/// A transaction.
///
/// `quantity` is signed at this boundary on purpose: a hostile peer can
/// hand us a negative transfer and the validator must reject it with
/// its own reason rather than fail at parse time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tx {
    /// Wire format generation.
    pub format: TxFormat,
    /// Transaction id; must equal the hash of the signature.
    pub id: TxId,
    /// Recency anchor.
    pub last_tx: Anchor,
    /// Owner public key.
    pub owner: Vec<u8>,
    /// Transfer recipient, if any.
    pub target: Option<Address>,
    /// Transfer amount in base units.
    pub quantity: i128,
    /// Format-1 payload bytes (empty for format 2).
    pub data: Vec<u8>,
    /// Format-2 declared payload size.
    pub data_size: u64,
    /// Format-2 Merkle root over the off-chain chunks.
    pub data_root: DataRoot,
    /// Mining fee in base units.
    pub reward: u128,
    /// Signature over [`Tx::signature_message`] by `owner`.
    pub signature: Vec<u8>,
}

impl Tx {
    /// The number of weave bytes this transaction commits.
    pub fn data_size(&self) -> u64 {
        match self.format {
            TxFormat::V1 => self.data.len() as u64,
            TxFormat::V2 => self.data_size,
        }
    }

    /// The Merkle root over this transaction's data chunks.
    ///
    /// Format-1 data is treated as a single chunk; format 2 carries the
    /// root explicitly.
    pub fn data_root(&self) -> DataRoot {
        match self.format {
            TxFormat::V1 => {
                if self.data.is_empty() {
                    DataRoot::zero()
                } else {
                    let chunk_id: [u8; 32] = Sha256::digest(&self.data).into();
                    DataRoot(single_chunk_root(
                        &chunk_id,
                        self.data.len() as u128,
                    ))
                }
            }
            TxFormat::V2 => self.data_root,
        }
    }

    /// The wallet address of the transaction owner.
    pub fn owner_address(&self) -> Address {
        Address(Sha256::digest(&self.owner).into())
    }

    /// The canonical byte string the owner signs.
    ///
    /// Concatenation of the signed fields in protocol order; format 2
    /// substitutes `data_root` and `data_size` for the payload bytes.
    pub fn signature_message(&self) -> Vec<u8> {
        let mut message = Vec::new();
        message.push(match self.format {
            TxFormat::V1 => 1u8,
            TxFormat::V2 => 2u8,
        });
        message.extend_from_slice(&self.owner);
        if let Some(target) = &self.target {
            message.extend_from_slice(target.as_ref());
        }
        message.extend_from_slice(&self.quantity.to_be_bytes());
        message.extend_from_slice(&self.reward.to_be_bytes());
        message.extend_from_slice(&self.last_tx.message_bytes());
        match self.format {
            TxFormat::V1 => message.extend_from_slice(&self.data),
            TxFormat::V2 => {
                message.extend_from_slice(self.data_root.as_ref());
                message.extend_from_slice(&self.data_size.to_be_bytes());
            }
        }
        message
    }
}

// Leaf id of a one-chunk Merkle tree: H(H(chunk_id) || H(note)), with
// the note encoding the chunk's end offset. Mirrors the tree builder in
// arx-crypto-merkle for the degenerate single-leaf case.
fn single_chunk_root(chunk_id: &[u8; 32], end_offset: u128) -> [u8; 32] {
    let note = crate::buffer::offset_note(end_offset);
    let mut hasher = Sha256::new();
    hasher.update(Sha256::digest(chunk_id));
    hasher.update(Sha256::digest(note));
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx(format: TxFormat) -> Tx {
        Tx {
            format,
            id: TxId([1; 32]),
            last_tx: Anchor::NeverSpent,
            owner: vec![2; 32],
            target: Some(Address([3; 32])),
            quantity: 5,
            data: b"hello weave".to_vec(),
            data_size: 1024,
            data_root: DataRoot([4; 32]),
            reward: 7,
            signature: vec![5; 64],
        }
    }

    #[test]
    fn data_size_by_format() {
        assert_eq!(sample_tx(TxFormat::V1).data_size(), 11);
        assert_eq!(sample_tx(TxFormat::V2).data_size(), 1024);
    }

    #[test]
    fn signature_message_binds_the_payload() {
        let tx = sample_tx(TxFormat::V1);
        let mut tampered = tx.clone();
        tampered.data[0] ^= 0xff;
        assert_ne!(tx.signature_message(), tampered.signature_message());
    }

    #[test]
    fn v1_data_root_is_deterministic_and_binds_data() {
        let tx = sample_tx(TxFormat::V1);
        let mut tampered = tx.clone();
        tampered.data[0] ^= 0x01;
        assert_eq!(tx.data_root(), tx.data_root());
        assert_ne!(tx.data_root(), tampered.data_root());
    }
}
