// Copyright (c) 2024 The Arx Foundation

use displaydoc::Display;
use serde::{Deserialize, Serialize};

/// Type alias for block validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A collaborator (hasher, signature backend) failed to produce an
/// answer. Always treated as rejection, never as acceptance.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum OracleError {
    /// the collaborator timed out
    Timeout,

    /// the collaborator is unavailable
    Unavailable,
}

/// Reasons why a single transaction fails against the current wallet
/// snapshot.
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum TxError {
    /// tx quantity negative
    QuantityNegative,

    /// tx owner same as tx target
    OwnerIsTarget,

    /// tx data bigger than TX_DATA_SIZE_LIMIT
    DataTooBig,

    /// invalid signature or txid. Hash mismatch
    InvalidSignature,

    /// last_tx anchor not found
    AnchorNotFound,

    /// overspend in tx
    Overspend,

    /// tx reward too cheap
    RewardTooCheap,

    /// oracle failure: {0}
    Oracle(OracleError),
}

/// Reasons why a proof of access fails.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum PoaError {
    /// option exceeds the checkpoint depth
    OptionDepthExceeded,

    /// recall byte out of the bounds of the checkpoint index
    ByteOutOfBounds,

    /// invalid tx path
    InvalidTxPath,

    /// invalid data path
    InvalidDataPath,

    /// chunk does not match the data path
    ChunkMismatch,
}

/// Reasons why a claimed difficulty fails revalidation.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum RetargetError {
    /// timestamp not ahead of the last retarget
    InvalidTimestamp,

    /// difficulty does not match the schedule
    DifficultyMismatch,

    /// last_retarget does not match the schedule
    LastRetargetMismatch,
}

/// Reasons why a candidate block is rejected.
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    /// Height is too far ahead
    HeightTooFarAhead,

    /// Height is too far behind
    HeightTooFarBehind,

    /// Difficulty too low
    DifficultyTooLow,

    /// Invalid previous height
    InvalidPreviousHeight,

    /// Invalid previous block hash
    InvalidPreviousBlockHash,

    /// Invalid proof of access: {0}
    Poa(PoaError),

    /// Invalid difficulty retarget: {0}
    Retarget(RetargetError),

    /// Invalid dependent hash
    InvalidDependentHash,

    /// Invalid proof of work
    InvalidPow,

    /// Invalid independent hash
    InvalidIndependentHash,

    /// Invalid wallet list
    InvalidWalletList,

    /// Invalid field size: {0}
    InvalidFieldSize(String),

    /// BLOCK_TX_COUNT_LIMIT exceeded
    TxCountExceeded,

    /// BLOCK_TX_DATA_SIZE_LIMIT exceeded
    TxDataSizeExceeded,

    /// tx already in verifiedTxs
    TxAlreadyVerified,

    /// tx already in blockTxsPairs
    TxAlreadyInWindow,

    /// last_tx anchor not in blockTxsPairs
    AnchorNotInWindow,

    /// Invalid tx: {0}
    Tx(TxError),

    /// Invalid tx root
    InvalidTxRoot,

    /// Invalid weave size
    InvalidWeaveSize,

    /// Invalid block index root
    InvalidBlockIndexRoot,

    /// Oracle failure: {0}
    Oracle(OracleError),
}

impl From<PoaError> for ValidationError {
    fn from(err: PoaError) -> Self {
        Self::Poa(err)
    }
}

impl From<RetargetError> for ValidationError {
    fn from(err: RetargetError) -> Self {
        Self::Retarget(err)
    }
}

impl From<TxError> for ValidationError {
    fn from(err: TxError) -> Self {
        match err {
            TxError::Oracle(inner) => Self::Oracle(inner),
            other => Self::Tx(other),
        }
    }
}

impl From<OracleError> for ValidationError {
    fn from(err: OracleError) -> Self {
        Self::Oracle(err)
    }
}

/// The gateway-facing outcome of a slow check, mirroring the HTTP
/// surface that reports it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReturnCode {
    /// Whether the block passed.
    pub accepted: bool,
    /// HTTP-style status code: 200 on acceptance, 400 on rejection.
    pub code: u16,
    /// Human-readable outcome.
    pub message: String,
}

impl ReturnCode {
    /// The unique acceptance outcome.
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            code: 200,
            message: "Block slow check OK".into(),
        }
    }
}

impl From<ValidationError> for ReturnCode {
    fn from(err: ValidationError) -> Self {
        Self {
            accepted: false,
            code: 400,
            message: err.to_string(),
        }
    }
}
