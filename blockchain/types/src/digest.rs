// Copyright (c) 2024 The Arx Foundation

//! Fixed-width digest newtypes.
//!
//! Every hash/address field in the protocol has a mandated byte width;
//! representing each as its own type makes the width checks of the
//! block-field-size rules mostly compile-time.

use crate::error::ConvertError;
use core::fmt;
use serde::{
    de::{Error as DeError, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

macro_rules! impl_digest {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Protocol-mandated width of this digest in bytes.
            pub const LEN: usize = $len;

            /// The all-zero digest.
            pub const fn zero() -> Self {
                Self([0u8; $len])
            }

            /// Borrow the raw bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = ConvertError;

            fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
                let bytes: [u8; $len] =
                    src.try_into().map_err(|_| ConvertError::LengthMismatch {
                        expected: $len,
                        found: src.len(),
                    })?;
                Ok(Self(bytes))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), hex::encode(self.0))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_bytes(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct BytesVisitor;

                impl<'de> Visitor<'de> for BytesVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, "{} bytes", $len)
                    }

                    fn visit_bytes<E: DeError>(self, v: &[u8]) -> Result<Self::Value, E> {
                        $name::try_from(v).map_err(E::custom)
                    }

                    fn visit_seq<A: SeqAccess<'de>>(
                        self,
                        mut seq: A,
                    ) -> Result<Self::Value, A::Error> {
                        let mut bytes = [0u8; $len];
                        for (i, byte) in bytes.iter_mut().enumerate() {
                            *byte = seq
                                .next_element()?
                                .ok_or_else(|| A::Error::invalid_length(i, &self))?;
                        }
                        Ok($name(bytes))
                    }
                }

                deserializer.deserialize_bytes(BytesVisitor)
            }
        }
    };
}

impl_digest!(
    /// A block's independent hash (also: previous-block references and
    /// the checkpoint-index root). SHA-384 width.
    BlockHash,
    48
);

impl_digest!(
    /// The externally computed proof-of-work digest; also the width of
    /// the block's PoW-dependent hash field.
    PowDigest,
    32
);

impl_digest!(
    /// A transaction id.
    TxId,
    32
);

impl_digest!(
    /// The Merkle root over a block's size-tagged transaction list.
    TxRoot,
    32
);

impl_digest!(
    /// The Merkle root over one transaction's data chunks.
    DataRoot,
    32
);

impl_digest!(
    /// A chunk id: the hash of a data chunk's raw bytes.
    ChunkId,
    32
);

impl_digest!(
    /// A wallet address: the hash of the owner public key.
    Address,
    32
);
