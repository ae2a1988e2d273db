// Copyright (c) 2024 The Arx Foundation

//! Exact big-unsigned-integer encode/decode against fixed-width byte
//! buffers. Every hash and offset comparison in the consensus core
//! goes through these.

use primitive_types::{U256, U512};

/// Encode a 256-bit unsigned integer as a 32-byte big-endian buffer.
pub fn u256_to_buffer(value: U256) -> [u8; 32] {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    buf
}

/// Decode a 32-byte big-endian buffer as a 256-bit unsigned integer.
pub fn buffer_to_u256(buf: &[u8; 32]) -> U256 {
    U256::from_big_endian(buf)
}

/// Interpret an arbitrary-width digest as a big-endian unsigned
/// integer and reduce it modulo the weave size.
///
/// The reduction result always fits `u128` because `weave_size` does.
pub fn digest_mod_weave(digest: &[u8], weave_size: u128) -> u128 {
    debug_assert!(weave_size > 0);
    let value = U512::from_big_endian(digest);
    (value % U512::from(weave_size)).low_u128()
}

/// Encode a byte offset as a 32-byte big-endian "note", the interval
/// marker format carried inside Merkle proofs.
pub fn offset_note(offset: u128) -> [u8; 32] {
    let mut note = [0u8; 32];
    note[16..].copy_from_slice(&offset.to_be_bytes());
    note
}
