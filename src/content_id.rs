use crate::{
    decode_uvarint, encode_uvarint, multicodec::DAG_CBOR, multicodec::SHA2_256, Error, Result,
};
use sha2::Digest;

const CID_V1: u64 = 1;
const SHA2_256_LEN: usize = 32;

/// CIDv1 content identifier of a DAG-CBOR block hashed with SHA2-256.  The string form is
/// multibase base32-lower, e.g. `bafyrei...`.
#[derive(
    Clone, Debug, serde_with::DeserializeFromStr, Eq, Hash, PartialEq, serde_with::SerializeDisplay,
)]
pub struct ContentId {
    digest: [u8; SHA2_256_LEN],
}

impl ContentId {
    pub fn for_dag_cbor_block(block: &[u8]) -> Self {
        Self {
            digest: sha2::Sha256::digest(block).into(),
        }
    }
    pub fn digest(&self) -> &[u8] {
        self.digest.as_slice()
    }
    /// `0x01 0x71 0x12 0x20 || sha256(block)`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = encode_uvarint(CID_V1);
        bytes.extend(encode_uvarint(DAG_CBOR));
        bytes.extend(encode_uvarint(SHA2_256));
        bytes.extend(encode_uvarint(SHA2_256_LEN as u64));
        bytes.extend_from_slice(self.digest.as_slice());
        bytes
    }
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut remaining = bytes;
        for (expected, what) in [
            (CID_V1, "CID version"),
            (DAG_CBOR, "CID codec"),
            (SHA2_256, "multihash code"),
            (SHA2_256_LEN as u64, "multihash length"),
        ] {
            let (value, len) = decode_uvarint(remaining)?;
            if value != expected {
                return Err(Error::DecodeError(
                    format!("expected {} 0x{:x}, but got 0x{:x}", what, expected, value).into(),
                ));
            }
            remaining = &remaining[len..];
        }
        let digest = <[u8; SHA2_256_LEN]>::try_from(remaining).map_err(|_| {
            Error::DecodeError(
                format!(
                    "expected a {}-byte SHA2-256 digest, but got {} bytes",
                    SHA2_256_LEN,
                    remaining.len()
                )
                .into(),
            )
        })?;
        Ok(Self { digest })
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&multibase::encode(multibase::Base::Base32Lower, self.to_bytes()))
    }
}

impl std::str::FromStr for ContentId {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (base, bytes) = multibase::decode(s).map_err(|e| {
            Error::DecodeError(format!("CID {:?} is not multibase: {}", s, e).into())
        })?;
        if base != multibase::Base::Base32Lower {
            return Err(Error::DecodeError(
                format!("CID {:?} must be base32-lower, but was {:?}", s, base).into(),
            ));
        }
        Self::try_from_bytes(bytes.as_slice())
    }
}

/// Encodes `value` as a canonical DAG-CBOR block: map keys are ordered by the length of their
/// encoding, then bytewise, at every depth, and floats are always written as 64-bit.
pub fn encode_dag_cbor<T: serde::Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let value = ciborium::Value::serialized(value).map_err(|e| {
        Error::Serialization(format!("payload is not representable as CBOR: {}", e).into())
    })?;
    let value = canonicalize(value)?;
    let mut block = Vec::new();
    write_value(&value, &mut ciborium_ll::Encoder::from(&mut block))?;
    Ok(block)
}

fn canonicalize(value: ciborium::Value) -> Result<ciborium::Value> {
    use ciborium::Value;
    Ok(match value {
        Value::Array(element_v) => Value::Array(
            element_v
                .into_iter()
                .map(canonicalize)
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Map(entry_v) => {
            let mut keyed_entry_v = Vec::with_capacity(entry_v.len());
            for (key, value) in entry_v {
                let mut encoded_key = Vec::new();
                write_value(&key, &mut ciborium_ll::Encoder::from(&mut encoded_key))?;
                keyed_entry_v.push((encoded_key, key, canonicalize(value)?));
            }
            keyed_entry_v.sort_by(|(a, _, _), (b, _, _)| a.len().cmp(&b.len()).then(a.cmp(b)));
            Value::Map(
                keyed_entry_v
                    .into_iter()
                    .map(|(_, key, value)| (key, value))
                    .collect(),
            )
        }
        Value::Tag(tag, inner_b) => Value::Tag(tag, Box::new(canonicalize(*inner_b)?)),
        other => other,
    })
}

/// Major type 7, additional info 27: an IEEE 754 double follows.
const FLOAT64_INITIAL_BYTE: u8 = 0xfb;

fn write_value(
    value: &ciborium::Value,
    encoder: &mut ciborium_ll::Encoder<&mut Vec<u8>>,
) -> Result<()> {
    use ciborium::Value;
    use ciborium_io::Write;
    use ciborium_ll::{simple, Header};

    let write_result = match value {
        Value::Integer(integer) => {
            let n = i128::from(*integer);
            if n >= 0 {
                encoder.push(Header::Positive(n as u64))
            } else {
                encoder.push(Header::Negative((-1 - n) as u64))
            }
        }
        Value::Bytes(bytes) => encoder.bytes(bytes.as_slice(), None::<usize>),
        Value::Float(float) => encoder
            .write_all(&[FLOAT64_INITIAL_BYTE])
            .and_then(|_| encoder.write_all(&float.to_be_bytes())),
        Value::Text(text) => encoder.text(text.as_str(), None::<usize>),
        Value::Bool(false) => encoder.push(Header::Simple(simple::FALSE)),
        Value::Bool(true) => encoder.push(Header::Simple(simple::TRUE)),
        Value::Null => encoder.push(Header::Simple(simple::NULL)),
        Value::Tag(tag, inner_b) => {
            encoder.push(Header::Tag(*tag)).map_err(|e| {
                Error::Serialization(format!("failed to write CBOR tag: {:?}", e).into())
            })?;
            return write_value(inner_b, encoder);
        }
        Value::Array(element_v) => {
            encoder
                .push(Header::Array(Some(element_v.len())))
                .map_err(|e| {
                    Error::Serialization(format!("failed to write CBOR array: {:?}", e).into())
                })?;
            for element in element_v.iter() {
                write_value(element, encoder)?;
            }
            return Ok(());
        }
        Value::Map(entry_v) => {
            encoder.push(Header::Map(Some(entry_v.len()))).map_err(|e| {
                Error::Serialization(format!("failed to write CBOR map: {:?}", e).into())
            })?;
            for (key, value) in entry_v.iter() {
                write_value(key, encoder)?;
                write_value(value, encoder)?;
            }
            return Ok(());
        }
        other => {
            return Err(Error::Serialization(
                format!("{:?} has no DAG-CBOR encoding", other).into(),
            ));
        }
    };
    write_result
        .map_err(|e| Error::Serialization(format!("failed to write CBOR block: {:?}", e).into()))
}
