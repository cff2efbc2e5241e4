mod auth_challenge;
mod auth_payload;
mod config;
mod content_id;
mod detached_jws;
mod did;
mod did_document;
mod did_document_metadata;
mod did_key_resolver;
mod did_manager;
mod did_provider;
mod did_resolution_metadata;
mod did_resolution_options;
mod did_resolution_result;
mod did_resolver;
mod did_resolver_map;
mod did_uri_components;
mod error;
mod jws_header;
mod jws_section;
mod jws_signer;
mod jws_verification;
mod key_to_did_document;
mod linked_jws;
pub mod multicodec;
mod nonce;
mod representation;
mod secp256k1_key_to_did_document;
mod secp256k1_provider;
mod sid_document_lookup;
mod sid_record;
mod sid_resolver;
mod verification_method;

pub use crate::{
    auth_challenge::AuthChallenge,
    auth_payload::AuthPayload,
    config::AuthConfig,
    content_id::{encode_dag_cbor, ContentId},
    detached_jws::{DetachedJWS, JWSSignature},
    did::DID,
    did_document::DIDDocument,
    did_document_metadata::DIDDocumentMetadata,
    did_key_resolver::{DIDKeyResolver, KEY_METHOD},
    did_manager::{DIDManager, Identity},
    did_provider::DIDProvider,
    did_resolution_metadata::{DIDResolutionError, DIDResolutionMetadata},
    did_resolution_options::DIDResolutionOptions,
    did_resolution_result::DIDResolutionResult,
    did_resolver::DIDResolver,
    did_resolver_map::DIDResolverMap,
    did_uri_components::DIDURIComponents,
    error::Error,
    jws_header::JWSHeader,
    jws_section::{
        decode_section, decode_section_as_json, encode_section, encode_section_as_json,
        signing_input,
    },
    jws_signer::{verify_es256k, JWSSigner, ES256K},
    jws_verification::verify_jws_signature,
    key_to_did_document::KeyToDIDDocument,
    linked_jws::LinkedJWS,
    multicodec::{decode_uvarint, encode_uvarint},
    nonce::random_nonce,
    representation::{Representation, DEFAULT_CONTEXT, DID_JSON, DID_LD_JSON},
    secp256k1_key_to_did_document::Secp256k1KeyToDIDDocument,
    secp256k1_provider::Secp256k1Provider,
    sid_document_lookup::SIDDocumentLookup,
    sid_record::{SIDRecord, SID_KEY_NAME_LEN},
    sid_resolver::{to_did_document, SIDResolver, SID_METHOD},
    verification_method::{
        VerificationMethod, ECDSA_SECP256K1_SIGNATURE_2019, SECP256K1_VERIFICATION_KEY_2018,
        X25519_KEY_AGREEMENT_KEY_2019,
    },
};

pub type Result<T> = std::result::Result<T, Error>;
