use crate::{
    DIDDocument, Error, KeyToDIDDocument, Result, VerificationMethod,
    SECP256K1_VERIFICATION_KEY_2018,
};

/// Single-key document of a secp256k1 `did:key`.  The key is published as base16 multibase and
/// listed under `authentication`.
pub struct Secp256k1KeyToDIDDocument;

impl KeyToDIDDocument for Secp256k1KeyToDIDDocument {
    fn resolve_key(&self, public_key_bytes: &[u8], fingerprint: &str) -> Result<DIDDocument> {
        k256::PublicKey::from_sec1_bytes(public_key_bytes).map_err(|e| {
            Error::DecodeError(
                format!("did:key {:?} does not hold a secp256k1 point: {}", fingerprint, e).into(),
            )
        })?;
        let did = format!("did:key:{}", fingerprint);
        let key_id = format!("{}#{}", did, fingerprint);
        let public_key_multibase = multibase::encode(multibase::Base::Base16Lower, public_key_bytes);
        let mut did_document = DIDDocument::new(did.clone());
        did_document.add_authentication_method(VerificationMethod::with_public_key_multibase(
            key_id,
            SECP256K1_VERIFICATION_KEY_2018,
            did,
            public_key_multibase,
        ));
        Ok(did_document)
    }
}
