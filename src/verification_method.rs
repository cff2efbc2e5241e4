use crate::{Error, Result};

/// Verification method type of keys derived from a `did:key`.
pub const SECP256K1_VERIFICATION_KEY_2018: &str = "Secp256k1VerificationKey2018";
/// Verification method type of secp256k1 signing keys published on the ledger.
pub const ECDSA_SECP256K1_SIGNATURE_2019: &str = "EcdsaSecp256k1Signature2019";
/// Verification method type of X25519 key-agreement keys published on the ledger.
pub const X25519_KEY_AGREEMENT_KEY_2019: &str = "X25519KeyAgreementKey2019";

/// Exactly one of `public_key_base58_o` and `public_key_multibase_o` is populated by the
/// resolvers in this crate.
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    pub id: String,
    pub r#type: String,
    pub controller: String,
    #[serde(
        rename = "publicKeyBase58",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub public_key_base58_o: Option<String>,
    #[serde(
        rename = "publicKeyMultibase",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub public_key_multibase_o: Option<String>,
}

impl VerificationMethod {
    pub fn with_public_key_base58(
        id: String,
        r#type: &str,
        controller: String,
        public_key_base58: String,
    ) -> Self {
        Self {
            id,
            r#type: r#type.to_string(),
            controller,
            public_key_base58_o: Some(public_key_base58),
            public_key_multibase_o: None,
        }
    }
    pub fn with_public_key_multibase(
        id: String,
        r#type: &str,
        controller: String,
        public_key_multibase: String,
    ) -> Self {
        Self {
            id,
            r#type: r#type.to_string(),
            controller,
            public_key_base58_o: None,
            public_key_multibase_o: Some(public_key_multibase),
        }
    }
    /// Decodes the raw public key bytes, preferring `publicKeyBase58` over `publicKeyMultibase`.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>> {
        if let Some(public_key_base58) = self.public_key_base58_o.as_deref() {
            bs58::decode(public_key_base58).into_vec().map_err(|e| {
                Error::DecodeError(
                    format!(
                        "publicKeyBase58 of verification method {:?} is not base58: {}",
                        self.id, e
                    )
                    .into(),
                )
            })
        } else if let Some(public_key_multibase) = self.public_key_multibase_o.as_deref() {
            let (_base, bytes) = multibase::decode(public_key_multibase).map_err(|e| {
                Error::DecodeError(
                    format!(
                        "publicKeyMultibase of verification method {:?} is not multibase: {}",
                        self.id, e
                    )
                    .into(),
                )
            })?;
            Ok(bytes)
        } else {
            Err(Error::DecodeError(
                format!("verification method {:?} has no public key", self.id).into(),
            ))
        }
    }
}
