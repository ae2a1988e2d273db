// Copyright (c) 2024 The Arx Foundation

//! Collaborator seams of the validation pipeline.
//!
//! Hashing the block data segment and the independent hash are
//! node-version-dependent and live outside this crate, as does the
//! proof-of-work kernel. The pipeline reaches them through these traits
//! and fails closed: an [`OracleError`] rejects the block.

use crate::error::OracleError;
use arx_blockchain_types::{Block, BlockHash, PowDigest};
use ed25519_dalek::{Signature, VerifyingKey};

/// Produces the two canonical hashes of a block.
pub trait BlockHasher {
    /// The byte string the proof of work was computed over.
    fn data_segment(&self, block: &Block, previous: &Block) -> Result<Vec<u8>, OracleError>;

    /// The block's self-identifying hash.
    fn indep_hash(&self, block: &Block) -> Result<BlockHash, OracleError>;
}

/// The proof-of-work kernel.
pub trait PowHasher {
    /// Hash a data segment and nonce under the rules live at `height`.
    fn compute(
        &self,
        data_segment: &[u8],
        nonce: &[u8],
        height: u64,
    ) -> Result<PowDigest, OracleError>;
}

/// Verifies transaction signatures.
pub trait SignatureVerifier {
    /// Whether `signature` over `message` verifies under the `owner`
    /// public key. Malformed keys and signatures are `Ok(false)`, not
    /// errors: they come from the adversary, not from a collaborator.
    fn verify(&self, message: &[u8], signature: &[u8], owner: &[u8])
        -> Result<bool, OracleError>;
}

/// Ed25519 signature verification.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        owner: &[u8],
    ) -> Result<bool, OracleError> {
        let key_bytes: [u8; 32] = match owner.try_into() {
            Ok(bytes) => bytes,
            Err(_) => return Ok(false),
        };
        let key = match VerifyingKey::from_bytes(&key_bytes) {
            Ok(key) => key,
            Err(_) => return Ok(false),
        };
        let sig_bytes: [u8; 64] = match signature.try_into() {
            Ok(bytes) => bytes,
            Err(_) => return Ok(false),
        };
        let signature = Signature::from_bytes(&sig_bytes);
        Ok(key.verify_strict(message, &signature).is_ok())
    }
}
