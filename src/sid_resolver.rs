use crate::{
    multicodec, DIDDocument, DIDDocumentMetadata, DIDResolutionError, DIDResolutionOptions,
    DIDResolutionResult, DIDResolver, Error, Representation, Result, SIDDocumentLookup, SIDRecord,
    VerificationMethod, DID, ECDSA_SECP256K1_SIGNATURE_2019, X25519_KEY_AGREEMENT_KEY_2019,
};

pub const SID_METHOD: &str = "sid";

/// Resolves `did:sid` DIDs through a ledger lookup.
pub struct SIDResolver {
    lookup_b: Box<dyn SIDDocumentLookup>,
}

impl SIDResolver {
    pub fn new(lookup_b: Box<dyn SIDDocumentLookup>) -> Self {
        Self { lookup_b }
    }
}

/// Builds the DID document of `did` from a ledger record.  Keys must be base58btc multibase.
/// secp256k1 keys become authentication methods and X25519 keys become key-agreement methods;
/// other key types are left out.
pub fn to_did_document(sid_record: &SIDRecord, did: &str) -> Result<DIDDocument> {
    let mut did_document = DIDDocument::new(did.to_string());
    for (key_name, encoded_key) in sid_record.keys.iter() {
        let (base, key_bytes) = multibase::decode(encoded_key).map_err(|e| {
            Error::DecodeError(format!("sid key {:?} is not multibase: {}", key_name, e).into())
        })?;
        if base != multibase::Base::Base58Btc {
            return Err(Error::DecodeError(
                format!(
                    "sid key {:?} must be base58btc, but was {:?}",
                    key_name, base
                )
                .into(),
            ));
        }
        if key_bytes.len() < 2 {
            return Err(Error::DecodeError(
                format!("sid key {:?} is too short for a key-type prefix", key_name).into(),
            ));
        }
        let (key_type_prefix, public_key_bytes) = key_bytes.split_at(2);
        let verification_method_id = format!("{}#{}", did, key_name);
        let public_key_base58 = bs58::encode(public_key_bytes).into_string();
        match key_type_prefix[0] as u64 {
            multicodec::SECP256K1_PUB => {
                did_document.add_authentication_method(
                    VerificationMethod::with_public_key_base58(
                        verification_method_id,
                        ECDSA_SECP256K1_SIGNATURE_2019,
                        did.to_string(),
                        public_key_base58,
                    ),
                );
            }
            multicodec::X25519_PUB => {
                did_document.add_key_agreement_method(VerificationMethod::with_public_key_base58(
                    verification_method_id,
                    X25519_KEY_AGREEMENT_KEY_2019,
                    did.to_string(),
                    public_key_base58,
                ));
            }
            other => {
                tracing::debug!(
                    "skipping sid key {:?} with unrecognized key type 0x{:x}",
                    key_name,
                    other
                );
            }
        }
    }
    Ok(did_document)
}

impl DIDResolver for SIDResolver {
    fn resolve(&self, did_url: &str, options: &DIDResolutionOptions) -> DIDResolutionResult {
        let did = match DID::parse(did_url) {
            Ok(did) => did,
            Err(e) => {
                tracing::debug!("did:sid resolution of {:?} failed: {}", did_url, e);
                return DIDResolutionResult::failure(DIDResolutionError::InvalidDid);
            }
        };
        if did.method() != SID_METHOD {
            return DIDResolutionResult::failure(DIDResolutionError::UnsupportedMethod);
        }

        let bare_did = did.bare();
        let version_id_o = did.version_id_o();
        tracing::debug!(
            "querying ledger for {} at versionId {:?}",
            bare_did,
            version_id_o
        );
        let sid_record = match self.lookup_b.query(&bare_did, version_id_o) {
            Ok(Some(sid_record)) => sid_record,
            Ok(None) => {
                tracing::debug!("ledger has no record of {} at {:?}", bare_did, version_id_o);
                return DIDResolutionResult::failure(DIDResolutionError::InvalidDid);
            }
            Err(e) => {
                tracing::debug!("ledger lookup of {} failed: {}", bare_did, e);
                return DIDResolutionResult::failure(DIDResolutionError::InvalidDid);
            }
        };
        let mut did_document = match to_did_document(&sid_record, bare_did.to_string().as_str()) {
            Ok(did_document) => did_document,
            Err(e) => {
                tracing::debug!("ledger record of {} is invalid: {}", bare_did, e);
                return DIDResolutionResult::failure(DIDResolutionError::InvalidDid);
            }
        };
        let did_document_metadata = DIDDocumentMetadata {
            created_o: sid_record.created_o,
            updated_o: sid_record.updated_o,
            next_update_o: sid_record.next_update_o,
            version_id_o: version_id_o.map(str::to_string),
            next_version_id_o: sid_record.next_version_id_o.clone(),
            deactivated: false,
        };

        let representation = match Representation::from_accept(options.accept_o.as_deref()) {
            Ok(representation) => representation,
            Err(error) => return DIDResolutionResult::failure(error),
        };
        representation.apply(&mut did_document);
        DIDResolutionResult::success(
            did_document,
            did_document_metadata,
            representation.content_type(),
        )
    }
}
