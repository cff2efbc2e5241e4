use crate::{Error, Result};

/// Multicodec code of a compressed secp256k1 public key.
pub const SECP256K1_PUB: u64 = 0xe7;
/// Multicodec code of an X25519 public key.
pub const X25519_PUB: u64 = 0xec;
/// Multicodec code of an Ed25519 public key.
pub const ED25519_PUB: u64 = 0xed;
/// Multicodec code of a DAG-CBOR block.
pub const DAG_CBOR: u64 = 0x71;
/// Multihash code of SHA2-256.
pub const SHA2_256: u64 = 0x12;

const LSB_7: u8 = 0x7f;
const MSB: u8 = 0x80;
/// Longest unsigned varint accepted; enough for any u64.
const MAX_UVARINT_LEN: usize = 10;

/// Decodes a multiformats unsigned varint from the front of `bytes`, returning the value and the
/// number of bytes it occupied.
pub fn decode_uvarint(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;
    for (i, &b) in bytes.iter().enumerate().take(MAX_UVARINT_LEN) {
        value |= ((b & LSB_7) as u64) << (7 * i);
        if b & MSB == 0 {
            if i > 0 && b == 0 {
                return Err(Error::DecodeError(
                    "unsigned varint is not minimally encoded".into(),
                ));
            }
            return Ok((value, i + 1));
        }
    }
    Err(Error::DecodeError(
        "unsigned varint is truncated or too long".into(),
    ))
}

pub fn encode_uvarint(mut value: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MAX_UVARINT_LEN);
    while value >= MSB as u64 {
        buf.push((value as u8 & LSB_7) | MSB);
        value >>= 7;
    }
    buf.push(value as u8);
    buf
}

/// Splits multicodec-prefixed key bytes into the key-type code and the raw key.  Only key types
/// whose code encodes to exactly 2 bytes are accepted.
pub fn split_key_type_prefix(bytes: &[u8]) -> Result<(u64, &[u8])> {
    let (key_type, prefix_len) = decode_uvarint(bytes)?;
    if prefix_len != 2 {
        return Err(Error::DecodeError(
            format!(
                "expected a 2-byte multicodec key-type prefix, but it was {} byte(s)",
                prefix_len
            )
            .into(),
        ));
    }
    Ok((key_type, &bytes[prefix_len..]))
}
