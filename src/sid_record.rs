use crate::{Error, Result};
use std::collections::BTreeMap;

/// Shortest accepted key encoding; key names are the last this-many characters of the encoding.
pub const SID_KEY_NAME_LEN: usize = 15;

/// A version of a `did:sid` key set as published on the ledger.
#[derive(Clone, Debug, Default, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SIDRecord {
    /// Key name -> base58btc multibase encoding of the multicodec-prefixed public key.
    pub keys: BTreeMap<String, String>,
    #[serde(
        rename = "created",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub created_o: Option<time::OffsetDateTime>,
    #[serde(
        rename = "updated",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub updated_o: Option<time::OffsetDateTime>,
    #[serde(
        rename = "nextUpdate",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub next_update_o: Option<time::OffsetDateTime>,
    #[serde(
        rename = "nextVersionId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_version_id_o: Option<String>,
}

impl SIDRecord {
    /// Record holding a signing and an encryption key, each named by the last 15 characters of its
    /// encoding.
    pub fn from_signing_and_encryption_keys(signing: &str, encryption: &str) -> Result<Self> {
        let mut keys = BTreeMap::new();
        for encoded_key in [signing, encryption] {
            keys.insert(Self::key_name(encoded_key)?.to_string(), encoded_key.to_string());
        }
        Ok(Self {
            keys,
            ..Default::default()
        })
    }
    pub fn key_name(encoded_key: &str) -> Result<&str> {
        if encoded_key.len() < SID_KEY_NAME_LEN || !encoded_key.is_ascii() {
            return Err(Error::DecodeError(
                format!("invalid sid key {:?}", encoded_key).into(),
            ));
        }
        Ok(&encoded_key[encoded_key.len() - SID_KEY_NAME_LEN..])
    }
}
