use crate::{
    multicodec, DIDDocumentMetadata, DIDResolutionError, DIDResolutionOptions, DIDResolutionResult,
    DIDResolver, KeyToDIDDocument, Representation, Secp256k1KeyToDIDDocument, DID,
};
use std::collections::HashMap;

pub const KEY_METHOD: &str = "key";

/// Resolves `did:key` DIDs by decoding the document from the DID itself; no I/O is involved.
/// Documents carry no `updated`/`nextUpdate` metadata, so did:key keys are never revoked.
pub struct DIDKeyResolver {
    key_to_did_document_m: HashMap<u64, Box<dyn KeyToDIDDocument>>,
}

impl DIDKeyResolver {
    /// A resolver for secp256k1 keys.
    pub fn new() -> Self {
        Self {
            key_to_did_document_m: HashMap::new(),
        }
        .with(multicodec::SECP256K1_PUB, Box::new(Secp256k1KeyToDIDDocument))
    }
    /// Registers the document builder for the multicodec `key_type`.
    pub fn with(
        mut self,
        key_type: u64,
        key_to_did_document_b: Box<dyn KeyToDIDDocument>,
    ) -> Self {
        self.key_to_did_document_m
            .insert(key_type, key_to_did_document_b);
        self
    }
}

impl Default for DIDKeyResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DIDResolver for DIDKeyResolver {
    fn resolve(&self, did_url: &str, options: &DIDResolutionOptions) -> DIDResolutionResult {
        let did = match DID::parse(did_url) {
            Ok(did) => did,
            Err(e) => {
                tracing::debug!("did:key resolution of {:?} failed: {}", did_url, e);
                return DIDResolutionResult::failure(DIDResolutionError::InvalidDid);
            }
        };
        if did.method() != KEY_METHOD {
            return DIDResolutionResult::failure(DIDResolutionError::UnsupportedMethod);
        }

        let key_bytes = match multibase::decode(did.id()) {
            Ok((_base, key_bytes)) => key_bytes,
            Err(e) => {
                tracing::debug!("did:key id {:?} is not multibase: {}", did.id(), e);
                return DIDResolutionResult::failure(DIDResolutionError::InvalidDid);
            }
        };
        let (key_type, public_key_bytes) =
            match multicodec::split_key_type_prefix(key_bytes.as_slice()) {
                Ok(split) => split,
                Err(e) => {
                    tracing::debug!("did:key id {:?} has a bad key-type prefix: {}", did.id(), e);
                    return DIDResolutionResult::failure(DIDResolutionError::InvalidDid);
                }
            };
        let key_to_did_document = match self.key_to_did_document_m.get(&key_type) {
            Some(key_to_did_document) => key_to_did_document,
            None => {
                tracing::debug!("did:key key type 0x{:x} is not supported", key_type);
                return DIDResolutionResult::failure(DIDResolutionError::InvalidDid);
            }
        };
        let mut did_document = match key_to_did_document.resolve_key(public_key_bytes, did.id()) {
            Ok(did_document) => did_document,
            Err(e) => {
                tracing::debug!("did:key {:?} could not be resolved: {}", did.id(), e);
                return DIDResolutionResult::failure(DIDResolutionError::InvalidDid);
            }
        };

        let representation = match Representation::from_accept(options.accept_o.as_deref()) {
            Ok(representation) => representation,
            Err(error) => return DIDResolutionResult::failure(error),
        };
        representation.apply(&mut did_document);
        DIDResolutionResult::success(
            did_document,
            DIDDocumentMetadata::default(),
            representation.content_type(),
        )
    }
}
