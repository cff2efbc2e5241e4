use std::sync::Arc;

use sao_did::{
    decode_section, decode_section_as_json, encode_section, encode_section_as_json,
    verify_es256k, AuthConfig, DIDDocument, DIDDocumentMetadata, DIDKeyResolver, DIDManager,
    DIDProvider, DIDResolutionError, DIDResolutionOptions, DIDResolutionResult, DIDResolver,
    DIDResolverMap, DetachedJWS, Error, Identity, JWSHeader, JWSSignature, SIDRecord, SIDResolver,
    Secp256k1Provider, VerificationMethod, DID, DID_JSON, DID_LD_JSON,
    ECDSA_SECP256K1_SIGNATURE_2019,
};

/// This will run once at load time (i.e. presumably before main function is called).
#[ctor::ctor]
fn overall_init() {
    // It's necessary to specify EnvFilter::from_default_env in order to use RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_target(true)
        .with_line_number(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .init();
}

fn random_provider() -> Secp256k1Provider {
    Secp256k1Provider::new(k256::ecdsa::SigningKey::random(&mut rand::rngs::OsRng)).expect("pass")
}

fn did_key_manager(provider: Secp256k1Provider) -> DIDManager {
    DIDManager::new(Arc::new(provider), Arc::new(DIDKeyResolver::new()))
}

fn did_key_with_prefix(prefix: &[u8], key_bytes: &[u8]) -> String {
    let mut bytes = prefix.to_vec();
    bytes.extend_from_slice(key_bytes);
    format!(
        "did:key:{}",
        multibase::encode(multibase::Base::Base58Btc, bytes)
    )
}

/// Wraps a resolver, replacing the verification methods of every successfully resolved document.
struct VerificationMethodsOverridingResolver {
    inner: DIDKeyResolver,
    verification_method_v: Vec<VerificationMethod>,
}

impl DIDResolver for VerificationMethodsOverridingResolver {
    fn resolve(&self, did_url: &str, options: &DIDResolutionOptions) -> DIDResolutionResult {
        let mut result = self.inner.resolve(did_url, options);
        if result.error_o().is_none() {
            result.did_document.verification_method_v = self.verification_method_v.clone();
        }
        result
    }
}

/// Wraps a resolver, overriding the document metadata of every successful resolution.
struct MetadataOverridingResolver {
    inner: DIDKeyResolver,
    did_document_metadata: DIDDocumentMetadata,
}

impl DIDResolver for MetadataOverridingResolver {
    fn resolve(&self, did_url: &str, options: &DIDResolutionOptions) -> DIDResolutionResult {
        let mut result = self.inner.resolve(did_url, options);
        if result.error_o().is_none() {
            result.did_document_metadata = self.did_document_metadata.clone();
        }
        result
    }
}

#[test]
fn test_did_parse() {
    let did = DID::parse("did:sid:abc123/some/path?versionId=3&x=y#key-1").expect("pass");
    assert_eq!(did.method(), "sid");
    assert_eq!(did.id(), "abc123");
    assert_eq!(did.path_o(), Some("/some/path"));
    assert_eq!(did.query_o(), Some("versionId=3&x=y"));
    assert_eq!(did.fragment_o(), Some("key-1"));
    assert_eq!(did.query_param("x"), Some("y"));
    assert_eq!(did.version_id_o(), Some("3"));
    assert_eq!(
        did.to_string(),
        "did:sid:abc123/some/path?versionId=3&x=y#key-1"
    );
    assert_eq!(did.bare().to_string(), "did:sid:abc123");
    assert!(did.bare().is_bare());

    let legacy = DID::parse("did:sid:abc123?version-id=7").expect("pass");
    assert_eq!(legacy.version_id_o(), Some("7"));
    assert_eq!(legacy.fragment_o(), None);

    let with_fragment = legacy.bare().with_fragment("abc123").expect("pass");
    assert_eq!(with_fragment.to_string(), "did:sid:abc123#abc123");

    // serde goes through the string form.
    let json = serde_json::to_string(&did).expect("pass");
    assert_eq!(json, "\"did:sid:abc123/some/path?versionId=3&x=y#key-1\"");
    let did_from_json: DID = serde_json::from_str(json.as_str()).expect("pass");
    assert_eq!(did_from_json, did);

    for malformed in [
        "",
        "did",
        "did:",
        "did:key",
        "did::abc",
        "did:key:",
        "did:Key:abc",
        "did:k3y:abc",
        "DID:key:abc",
        "did:key:abc#",
        "did:key:?versionId=1",
    ] {
        match DID::parse(malformed) {
            Err(Error::MalformedDID(_)) => {}
            other => panic!("expected MalformedDID for {:?}, got {:?}", malformed, other),
        }
    }
}

#[test]
fn test_section_codec() {
    let header = JWSHeader::new("did:key:zQ3sabc#zQ3sabc".to_string(), "ES256K");
    let section = encode_section_as_json(&header).expect("pass");
    assert!(!section.contains('='));
    assert!(!section.contains('+'));
    assert!(!section.contains('/'));
    let decoded: JWSHeader = decode_section_as_json(section.as_str()).expect("pass");
    assert_eq!(decoded, header);

    assert!(matches!(
        decode_section_as_json::<JWSHeader>("not base64!"),
        Err(Error::DecodeError(_))
    ));
    assert!(matches!(
        decode_section_as_json::<JWSHeader>(encode_section(b"{\"kid\":").as_str()),
        Err(Error::DecodeError(_))
    ));
    assert_eq!(
        decode_section(encode_section(&[0xfb, 0xff]).as_str()).expect("pass"),
        vec![0xfb, 0xff]
    );
}

#[test]
fn test_signing_input_is_header_dot_payload() {
    let provider = random_provider();
    let jws = provider.create_jws(b"hippo").expect("pass");
    let signature = jws.first_signature().expect("pass");
    assert_eq!(
        jws.signing_input().expect("pass"),
        format!("{}.{}", signature.protected, jws.payload)
    );

    let public_key_bytes = provider.verifying_key().to_encoded_point(true);
    let signature_bytes = decode_section(signature.signature.as_str()).expect("pass");
    assert!(verify_es256k(
        public_key_bytes.as_bytes(),
        jws.signing_input().expect("pass").as_bytes(),
        signature_bytes.as_slice()
    )
    .expect("pass"));
    // Using the payload in place of the header must not verify.
    let payload_twice = format!("{}.{}", jws.payload, jws.payload);
    assert!(!verify_es256k(
        public_key_bytes.as_bytes(),
        payload_twice.as_bytes(),
        signature_bytes.as_slice()
    )
    .expect("pass"));

    let header = jws.header().expect("pass");
    assert_eq!(header.alg, "ES256K");
    assert_eq!(header.kid, provider.key_id().to_string());
    assert_eq!(
        jws.header_did().expect("pass"),
        Some(provider.did().clone())
    );
}

#[test]
fn test_did_key_authenticate() {
    let provider = random_provider();
    let did = provider.did().clone();
    assert!(did.to_string().starts_with("did:key:zQ3s"));
    assert_eq!(provider.key_id().to_string(), format!("{}#{}", did, did.id()));

    let manager = did_key_manager(provider);
    assert_eq!(*manager.identity(), Identity::Unauthenticated);
    let (authenticated_manager, authenticated_did) =
        manager.authenticate(&["a", "b"], "svc1").expect("pass");
    assert_eq!(authenticated_did, did);
    assert_eq!(
        *authenticated_manager.identity(),
        Identity::Authenticated(did.clone())
    );
    // The original manager is untouched.
    assert_eq!(*manager.identity(), Identity::Unauthenticated);

    // The authenticated manager can re-authenticate as the same DID and verify its own JWSes.
    let (_, again) = authenticated_manager
        .authenticate(&[], "svc2")
        .expect("pass");
    assert_eq!(again, did);
    let jws = authenticated_manager.create_jws(b"hippo").expect("pass");
    let kid = authenticated_manager.verify_jws(&jws).expect("pass");
    assert_eq!(kid.bare(), did);
    assert!(kid.to_string().contains(did.to_string().as_str()));
}

#[test]
fn test_authenticate_expired() {
    let provider = random_provider().with_auth_ttl(time::Duration::seconds(-5));
    let manager = did_key_manager(provider);
    match manager.authenticate(&["a"], "svc1") {
        Err(Error::Expired(_)) => {}
        other => panic!("expected Expired, got {:?}", other.map(|(_, did)| did)),
    }
}

#[test]
fn test_tampered_jws_fails_verification() {
    let provider = random_provider();
    let jws = provider.create_jws(b"{\"amount\":5}").expect("pass");
    let manager = DIDManager::verifier_only(Arc::new(DIDKeyResolver::new()));
    manager.verify_jws(&jws).expect("pass");

    // Tampered payload.
    {
        let mut tampered = jws.clone();
        tampered.payload = encode_section(b"{\"amount\":6}");
        assert!(matches!(
            manager.verify_jws(&tampered),
            Err(Error::InvalidSignature(_))
        ));
    }
    // Tampered protected header (same kid and alg, extra member).
    {
        let mut header_value: serde_json::Value =
            decode_section_as_json(jws.signatures[0].protected.as_str()).expect("pass");
        header_value["typ"] = serde_json::Value::String("JWT".to_string());
        let mut tampered = jws.clone();
        tampered.signatures[0].protected = encode_section_as_json(&header_value).expect("pass");
        assert!(matches!(
            manager.verify_jws(&tampered),
            Err(Error::InvalidSignature(_))
        ));
    }
    // Tampered signature.
    {
        let mut signature_bytes =
            decode_section(jws.signatures[0].signature.as_str()).expect("pass");
        signature_bytes[10] ^= 0x01;
        let mut tampered = jws.clone();
        tampered.signatures[0].signature = encode_section(signature_bytes.as_slice());
        assert!(matches!(
            manager.verify_jws(&tampered),
            Err(Error::InvalidSignature(_))
        ));
    }
    // Malleated signature: (r, s) replaced by (r, n - s), which is the high-s twin of a valid
    // signature.
    {
        let signature_bytes = decode_section(jws.signatures[0].signature.as_str()).expect("pass");
        let signature =
            k256::ecdsa::Signature::from_slice(signature_bytes.as_slice()).expect("pass");
        let (r, s) = signature.split_scalars();
        let malleated = k256::ecdsa::Signature::from_scalars(r, -*s).expect("pass");
        let mut tampered = jws.clone();
        tampered.signatures[0].signature = encode_section(malleated.to_bytes().as_slice());
        assert!(matches!(
            manager.verify_jws(&tampered),
            Err(Error::InvalidSignature(_))
        ));
    }
    // Signed by a different key than the kid claims.
    {
        let other_provider = random_provider();
        let forged = DetachedJWS::signed(
            provider.key_id().to_string(),
            b"{\"amount\":5}",
            &k256::ecdsa::SigningKey::random(&mut rand::rngs::OsRng),
        )
        .expect("pass");
        assert!(matches!(
            manager.verify_jws(&forged),
            Err(Error::InvalidSignature(_))
        ));
        manager
            .verify_jws(&other_provider.create_jws(b"{}").expect("pass"))
            .expect("pass");
    }
}

#[test]
fn test_verify_jws_header_checks() {
    let signing_key = k256::ecdsa::SigningKey::random(&mut rand::rngs::OsRng);
    let provider = Secp256k1Provider::new(signing_key.clone()).expect("pass");
    let manager = DIDManager::verifier_only(Arc::new(DIDKeyResolver::new()));

    let no_kid = DetachedJWS::signed(String::new(), b"{}", &signing_key).expect("pass");
    assert!(matches!(
        manager.verify_jws(&no_kid),
        Err(Error::MissingKid(_))
    ));
    assert_eq!(no_kid.header_did().expect("pass"), None);

    let no_fragment =
        DetachedJWS::signed(provider.did().to_string(), b"{}", &signing_key).expect("pass");
    assert!(matches!(
        manager.verify_jws(&no_fragment),
        Err(Error::MalformedDID(_))
    ));

    let not_a_did = DetachedJWS::signed("hippo#1".to_string(), b"{}", &signing_key).expect("pass");
    assert!(matches!(
        manager.verify_jws(&not_a_did),
        Err(Error::MalformedDID(_))
    ));

    let wrong_method = DetachedJWS::signed(
        format!("did:web:example.com#{}", provider.did().id()),
        b"{}",
        &signing_key,
    )
    .expect("pass");
    assert!(matches!(
        manager.verify_jws(&wrong_method),
        Err(Error::UnsupportedMethod(_))
    ));

    let no_signatures = DetachedJWS {
        payload: encode_section(b"{}"),
        signatures: Vec::new(),
    };
    assert!(matches!(
        manager.verify_jws(&no_signatures),
        Err(Error::DecodeError(_))
    ));
}

#[test]
fn test_revocation_window() {
    let provider = random_provider();
    let jws = provider.create_jws(b"{}").expect("pass");
    let now = time::OffsetDateTime::now_utc();
    let verifier = |did_document_metadata: DIDDocumentMetadata| {
        DIDManager::verifier_only(Arc::new(MetadataOverridingResolver {
            inner: DIDKeyResolver::new(),
            did_document_metadata,
        }))
    };

    // Superseded an hour ago.
    let revoked = verifier(DIDDocumentMetadata {
        updated_o: Some(now - time::Duration::hours(2)),
        next_update_o: Some(now - time::Duration::hours(1)),
        next_version_id_o: Some("1".to_string()),
        ..Default::default()
    });
    assert!(matches!(
        revoked.verify_jws(&jws),
        Err(Error::RevokedKey(_))
    ));

    // Only effective an hour from now.
    let not_yet_valid = verifier(DIDDocumentMetadata {
        updated_o: Some(now + time::Duration::hours(1)),
        ..Default::default()
    });
    assert!(matches!(
        not_yet_valid.verify_jws(&jws),
        Err(Error::NotYetValid(_))
    ));

    // Inside the window.
    let window = DIDDocumentMetadata {
        updated_o: Some(now - time::Duration::hours(1)),
        next_update_o: Some(now + time::Duration::hours(1)),
        ..Default::default()
    };
    verifier(window.clone()).verify_jws(&jws).expect("pass");

    // The window bounds are inclusive.
    let manager = verifier(window.clone());
    manager
        .verify_jws_at(&jws, now - time::Duration::hours(1))
        .expect("pass");
    manager
        .verify_jws_at(&jws, now + time::Duration::hours(1))
        .expect("pass");
    assert!(matches!(
        manager.verify_jws_at(&jws, now + time::Duration::hours(2)),
        Err(Error::RevokedKey(_))
    ));
    assert!(matches!(
        manager.verify_jws_at(&jws, now - time::Duration::hours(2)),
        Err(Error::NotYetValid(_))
    ));
}

#[test]
fn test_identity_mismatch() {
    let manager = did_key_manager(random_provider());
    let (authenticated_manager, _) = manager.authenticate(&["a"], "svc1").expect("pass");

    let other_jws = random_provider().create_jws(b"{}").expect("pass");
    // An unbound verifier accepts it.
    manager.verify_jws(&other_jws).expect("pass");
    assert!(matches!(
        authenticated_manager.verify_jws(&other_jws),
        Err(Error::IdentityMismatch(_))
    ));

    // Rebinding to another DID makes the original provider's responses mismatch.
    let stranger = random_provider().did().clone();
    let rebound = authenticated_manager.with_identity(Identity::Authenticated(stranger));
    assert!(matches!(
        rebound.authenticate(&["a"], "svc1"),
        Err(Error::IdentityMismatch(_))
    ));
}

#[test]
fn test_missing_capability() {
    let verifier = DIDManager::verifier_only(Arc::new(DIDKeyResolver::new()));
    assert!(matches!(
        verifier.authenticate(&["a"], "svc1"),
        Err(Error::MissingCapability(_))
    ));
    assert!(matches!(
        verifier.create_jws(b"{}"),
        Err(Error::MissingCapability(_))
    ));

    let provider_only = DIDManager::empty().with_provider(Arc::new(random_provider()));
    assert!(matches!(
        provider_only.authenticate(&["a"], "svc1"),
        Err(Error::MissingCapability(_))
    ));
    let jws = provider_only.create_jws(b"{}").expect("pass");
    assert!(matches!(
        provider_only.verify_jws(&jws),
        Err(Error::MissingCapability(_))
    ));

    provider_only
        .with_resolver(Arc::new(DIDKeyResolver::new()))
        .authenticate(&["a"], "svc1")
        .expect("pass");
}

#[test]
fn test_compact_serialization() {
    let provider = random_provider();
    let jws = provider.create_jws(b"{\"x\":1}").expect("pass");
    let compact = jws.to_compact().expect("pass");
    assert_eq!(compact.split('.').count(), 3);
    let parsed: DetachedJWS = compact.parse().expect("pass");
    assert_eq!(parsed, jws);

    let manager = DIDManager::verifier_only(Arc::new(DIDKeyResolver::new()));
    let kid = manager.verify_compact_jws(compact.as_str()).expect("pass");
    assert_eq!(kid, *provider.key_id());

    assert!(matches!(
        "a.b".parse::<DetachedJWS>(),
        Err(Error::DecodeError(_))
    ));
    let mut two_signatures = jws.clone();
    two_signatures.signatures.push(JWSSignature {
        protected: jws.signatures[0].protected.clone(),
        signature: jws.signatures[0].signature.clone(),
    });
    assert!(two_signatures.to_compact().is_err());
    // The general form with extra signatures still verifies against the first.
    manager.verify_jws(&two_signatures).expect("pass");
}

#[test]
fn test_did_key_resolver() {
    let provider = random_provider();
    let did = provider.did().to_string();
    let resolver = DIDKeyResolver::new();

    let result = resolver.resolve(did.as_str(), &DIDResolutionOptions::default());
    assert_eq!(result.error_o(), None);
    assert_eq!(
        result.did_resolution_metadata.content_type_o.as_deref(),
        Some(DID_JSON)
    );
    let did_document = &result.did_document;
    assert_eq!(did_document.id, did);
    assert!(did_document.context_v.is_empty());
    assert_eq!(did_document.verification_method_v.len(), 1);
    let verification_method = &did_document.verification_method_v[0];
    assert_eq!(verification_method.r#type, "Secp256k1VerificationKey2018");
    assert_eq!(verification_method.id, provider.key_id().to_string());
    assert_eq!(verification_method.controller, did);
    assert!(verification_method.public_key_base58_o.is_none());
    assert_eq!(
        verification_method.public_key_bytes().expect("pass"),
        provider
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec()
    );
    assert_eq!(did_document.authentication_v, vec![verification_method.id.clone()]);
    assert!(did_document.key_agreement_v.is_empty());
    // did:key keys are never revoked.
    assert_eq!(result.did_document_metadata, DIDDocumentMetadata::default());

    // Resolving the key id gives the same document.
    let by_key_id = resolver.resolve(
        provider.key_id().to_string().as_str(),
        &DIDResolutionOptions::default(),
    );
    assert_eq!(by_key_id.did_document, result.did_document);

    let ld = resolver.resolve(did.as_str(), &DIDResolutionOptions::with_accept(DID_LD_JSON));
    assert_eq!(ld.error_o(), None);
    assert_eq!(
        ld.did_document.context_v,
        vec!["https://w3id.org/did/v1".to_string()]
    );
    let ld_json = serde_json::to_value(&ld.did_document).expect("pass");
    assert_eq!(ld_json["@context"][0], "https://w3id.org/did/v1");
    assert_eq!(
        ld.did_resolution_metadata.content_type_o.as_deref(),
        Some(DID_LD_JSON)
    );

    let empty_accept = resolver.resolve(did.as_str(), &DIDResolutionOptions::with_accept(""));
    assert_eq!(empty_accept.error_o(), None);

    let unsupported =
        resolver.resolve(did.as_str(), &DIDResolutionOptions::with_accept("text/html"));
    assert_eq!(
        unsupported.error_o(),
        Some(DIDResolutionError::RepresentationNotSupported)
    );
    assert_eq!(unsupported.did_document, DIDDocument::default());
}

#[test]
fn test_did_key_resolver_failures() {
    let resolver = DIDKeyResolver::new();
    let options = DIDResolutionOptions::default();
    let key_bytes = random_provider()
        .verifying_key()
        .to_encoded_point(true)
        .as_bytes()
        .to_vec();

    let not_a_point = &key_bytes[..32];
    for (did_url, expected_error) in [
        ("hippo".to_string(), DIDResolutionError::InvalidDid),
        (
            "did:sid:abc".to_string(),
            DIDResolutionError::UnsupportedMethod,
        ),
        // Not a multibase string.
        ("did:key:!abc".to_string(), DIDResolutionError::InvalidDid),
        // 1-byte multicodec prefix.
        (
            did_key_with_prefix(&[0x12], key_bytes.as_slice()),
            DIDResolutionError::InvalidDid,
        ),
        // Ed25519 is not a registered key type.
        (
            did_key_with_prefix(&[0xed, 0x01], &[7u8; 32]),
            DIDResolutionError::InvalidDid,
        ),
        // secp256k1 tag, but a truncated point.
        (
            did_key_with_prefix(&[0xe7, 0x01], not_a_point),
            DIDResolutionError::InvalidDid,
        ),
    ] {
        let result = resolver.resolve(did_url.as_str(), &options);
        assert_eq!(result.error_o(), Some(expected_error), "{}", did_url);
        assert_eq!(result.did_document, DIDDocument::default());
        assert_eq!(result.did_resolution_metadata.content_type_o, None);
    }

    let valid = did_key_with_prefix(&[0xe7, 0x01], key_bytes.as_slice());
    assert_eq!(resolver.resolve(valid.as_str(), &options).error_o(), None);
}

#[test]
fn test_sid_resolver() {
    let signing_key = random_provider()
        .verifying_key()
        .to_encoded_point(true)
        .as_bytes()
        .to_vec();
    let signing = did_key_with_prefix(&[0xe7, 0x01], signing_key.as_slice())
        .trim_start_matches("did:key:")
        .to_string();
    let encryption = did_key_with_prefix(&[0xec, 0x01], &[9u8; 32])
        .trim_start_matches("did:key:")
        .to_string();
    let ed25519 = did_key_with_prefix(&[0xed, 0x01], &[7u8; 32])
        .trim_start_matches("did:key:")
        .to_string();

    let mut sid_record =
        SIDRecord::from_signing_and_encryption_keys(signing.as_str(), encryption.as_str())
            .expect("pass");
    sid_record
        .keys
        .insert("unknown-type".to_string(), ed25519.clone());
    let record = sid_record.clone();
    let lookup = move |did: &DID, version_id_o: Option<&str>| -> anyhow::Result<Option<SIDRecord>> {
        match (did.id(), version_id_o) {
            ("alice", None) | ("alice", Some("1")) => Ok(Some(record.clone())),
            ("alice", Some(_)) => Ok(None),
            _ => anyhow::bail!("ledger unreachable"),
        }
    };
    let resolver = SIDResolver::new(Box::new(lookup));
    let options = DIDResolutionOptions::default();

    let result = resolver.resolve("did:sid:alice?versionId=1#whatever", &options);
    assert_eq!(result.error_o(), None);
    let did_document = &result.did_document;
    assert_eq!(did_document.id, "did:sid:alice");
    assert_eq!(did_document.verification_method_v.len(), 2);
    assert_eq!(did_document.authentication_v.len(), 1);
    assert_eq!(did_document.key_agreement_v.len(), 1);

    let signing_key_name = SIDRecord::key_name(signing.as_str()).expect("pass");
    let authentication_method = did_document
        .verification_method(did_document.authentication_v[0].as_str())
        .expect("pass");
    assert_eq!(
        authentication_method.id,
        format!("did:sid:alice#{}", signing_key_name)
    );
    assert_eq!(authentication_method.r#type, "EcdsaSecp256k1Signature2019");
    assert_eq!(authentication_method.controller, "did:sid:alice");
    assert_eq!(
        authentication_method.public_key_base58_o.as_deref(),
        Some(bs58::encode(&signing_key).into_string().as_str())
    );
    let key_agreement_method = did_document
        .verification_method(did_document.key_agreement_v[0].as_str())
        .expect("pass");
    assert_eq!(key_agreement_method.r#type, "X25519KeyAgreementKey2019");
    assert_eq!(
        key_agreement_method.public_key_bytes().expect("pass"),
        vec![9u8; 32]
    );
    assert_eq!(
        result.did_document_metadata.version_id_o.as_deref(),
        Some("1")
    );

    let latest = resolver.resolve("did:sid:alice", &options);
    assert_eq!(latest.error_o(), None);
    assert_eq!(latest.did_document_metadata.version_id_o, None);

    let legacy = resolver.resolve("did:sid:alice?version-id=1", &options);
    assert_eq!(
        legacy.did_document_metadata.version_id_o.as_deref(),
        Some("1")
    );

    let ld = resolver.resolve(
        "did:sid:alice",
        &DIDResolutionOptions::with_accept(DID_LD_JSON),
    );
    assert_eq!(
        ld.did_document.context_v,
        vec!["https://w3id.org/did/v1".to_string()]
    );

    for (did_url, expected_error) in [
        ("did:sid:alice?versionId=2", DIDResolutionError::InvalidDid),
        ("did:sid:bob", DIDResolutionError::InvalidDid),
        ("did:key:alice", DIDResolutionError::UnsupportedMethod),
        ("sid:alice", DIDResolutionError::InvalidDid),
    ] {
        assert_eq!(
            resolver.resolve(did_url, &options).error_o(),
            Some(expected_error),
            "{}",
            did_url
        );
    }
    assert_eq!(
        resolver
            .resolve(
                "did:sid:alice",
                &DIDResolutionOptions::with_accept("application/json")
            )
            .error_o(),
        Some(DIDResolutionError::RepresentationNotSupported)
    );
}

#[test]
fn test_sid_resolver_rejects_non_base58btc_keys() {
    let mut key_bytes = vec![0xe7, 0x01];
    key_bytes.extend_from_slice(
        random_provider()
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes(),
    );
    let base64_key = multibase::encode(multibase::Base::Base64, key_bytes);
    let mut sid_record = SIDRecord::default();
    sid_record.keys.insert("signing".to_string(), base64_key);
    let lookup = move |_: &DID, _: Option<&str>| -> anyhow::Result<Option<SIDRecord>> {
        Ok(Some(sid_record.clone()))
    };
    let resolver = SIDResolver::new(Box::new(lookup));
    let result = resolver.resolve("did:sid:carol", &DIDResolutionOptions::default());
    assert_eq!(result.error_o(), Some(DIDResolutionError::InvalidDid));
    assert_eq!(result.did_document, DIDDocument::default());

    assert!(SIDRecord::from_signing_and_encryption_keys("zshort", "zalsoshort").is_err());
}

#[test]
fn test_resolver_map() {
    let lookup = |_: &DID, _: Option<&str>| -> anyhow::Result<Option<SIDRecord>> { Ok(None) };
    let resolver_map = DIDResolverMap::new()
        .with("key", Box::new(DIDKeyResolver::new()))
        .with("sid", Box::new(SIDResolver::new(Box::new(lookup))));
    assert!(resolver_map.supports_method("key"));
    assert!(!resolver_map.supports_method("web"));
    let options = DIDResolutionOptions::default();

    let provider = random_provider();
    assert_eq!(
        resolver_map
            .resolve(provider.did().to_string().as_str(), &options)
            .error_o(),
        None
    );
    assert_eq!(
        resolver_map.resolve("did:sid:nobody", &options).error_o(),
        Some(DIDResolutionError::InvalidDid)
    );
    assert_eq!(
        resolver_map.resolve("did:web:example.com", &options).error_o(),
        Some(DIDResolutionError::UnsupportedMethod)
    );
    assert_eq!(
        resolver_map.resolve("not a did", &options).error_o(),
        Some(DIDResolutionError::InvalidDid)
    );

    // A manager over the map authenticates did:key providers.
    let manager = DIDManager::new(Arc::new(provider), Arc::new(resolver_map));
    manager.authenticate(&["a", "b"], "svc1").expect("pass");
}

#[test]
fn test_resolution_error_mapping() {
    let cases = [
        (DIDResolutionError::InvalidDid, "invalidDid"),
        (DIDResolutionError::NotFound, "notFound"),
        (
            DIDResolutionError::RepresentationNotSupported,
            "representationNotSupported",
        ),
        (DIDResolutionError::UnsupportedMethod, "unsupportedMethod"),
    ];
    for (error, name) in cases {
        assert_eq!(error.to_string(), name);
        assert_eq!(
            serde_json::to_value(error).expect("pass"),
            serde_json::Value::String(name.to_string())
        );
    }
    assert!(matches!(
        DIDResolutionResult::failure(DIDResolutionError::NotFound).into_result("did:sid:x"),
        Err(Error::LookupFailure(_))
    ));
    match DIDResolutionResult::failure(DIDResolutionError::InvalidDid).into_result("did:sid:x") {
        Err(Error::MalformedDID(message)) => {
            assert!(message.contains("did:sid:x"));
            assert!(message.contains("registry lookup"));
        }
        other => panic!("expected MalformedDID, got {:?}", other),
    }

    // A manager configured to request an unsupported representation can't verify anything.
    let provider = random_provider();
    let jws = provider.create_jws(b"{}").expect("pass");
    let manager = DIDManager::verifier_only(Arc::new(DIDKeyResolver::new())).with_config(
        AuthConfig {
            accept: Some("text/html".to_string()),
            ..Default::default()
        },
    );
    assert!(matches!(
        manager.verify_jws(&jws),
        Err(Error::RepresentationNotSupported(_))
    ));
}

#[test]
fn test_from_secret_is_deterministic() {
    let a = Secp256k1Provider::from_secret(b"correct horse battery staple").expect("pass");
    let b = Secp256k1Provider::from_secret(b"correct horse battery staple").expect("pass");
    let c = Secp256k1Provider::from_secret(b"another secret").expect("pass");
    assert_eq!(a.did(), b.did());
    assert_ne!(a.did(), c.did());

    // A did:key provider answers challenges that a did:key manager verifies.
    let manager = did_key_manager(a);
    let (_, did) = manager.authenticate(&["x"], "aud").expect("pass");
    assert_eq!(did, *b.did());
}

#[derive(serde::Serialize)]
struct Transfer {
    to: String,
    amount: u64,
    memo_o: Option<String>,
}

#[test]
fn test_linked_jws() {
    let provider = random_provider();
    let transfer = Transfer {
        to: "did:sid:bob".to_string(),
        amount: 42,
        memo_o: None,
    };
    let linked_jws = provider.create_linked_jws(&transfer).expect("pass");
    linked_jws.verify_linked_block().expect("pass");
    let link = linked_jws.link_o.as_ref().expect("pass");
    assert!(link.to_string().starts_with("bafyrei"));
    assert_eq!(
        linked_jws.jws.decoded_payload_bytes().expect("pass"),
        link.to_bytes()
    );

    // The linked JWS is an ordinary JWS as far as signature verification is concerned.
    let manager = DIDManager::verifier_only(Arc::new(DIDKeyResolver::new()));
    manager.verify_jws(&linked_jws.jws).expect("pass");

    // Same content gives the same link.
    let again = provider.create_linked_jws(&transfer).expect("pass");
    assert_eq!(again.link_o, linked_jws.link_o);
    assert_eq!(again.linked_block, linked_jws.linked_block);

    let mut tampered = linked_jws.clone();
    tampered.linked_block.push(0x00);
    assert!(tampered.verify_linked_block().is_err());
}

#[test]
fn test_auth_config() {
    let config = AuthConfig::default();
    assert_eq!(config.nonce_length, 16);
    assert_eq!(config.auth_ttl_seconds, 600);
    assert_eq!(config.accept, None);
    let from_empty: AuthConfig = serde_json::from_str("{}").expect("pass");
    assert_eq!(from_empty, config);
    let partial: AuthConfig =
        serde_json::from_str("{\"nonce_length\":32,\"accept\":\"application/did+ld+json\"}")
            .expect("pass");
    assert_eq!(partial.nonce_length, 32);
    assert_eq!(partial.auth_ttl_seconds, 600);
    assert_eq!(partial.accept.as_deref(), Some(DID_LD_JSON));

    // A manager with an LD accept type still verifies.
    let manager = did_key_manager(random_provider()).with_config(partial);
    manager.authenticate(&["p"], "svc").expect("pass");
}

#[test]
#[serial_test::serial]
fn test_auth_config_sources() {
    let config_path = std::env::temp_dir().join(format!(
        "sao-did-auth-config-{}.toml",
        sao_did::random_nonce(8)
    ));
    std::fs::write(&config_path, "nonce_length = 24\n").expect("pass");
    let config_path_str = config_path.to_str().expect("pass");

    // File only.
    let config = AuthConfig::new(Some(config_path_str)).expect("pass");
    assert_eq!(config.nonce_length, 24);
    assert_eq!(config.auth_ttl_seconds, 600);
    assert_eq!(config.accept, None);

    // Environment variables are strings, coerced to the field types; the file overrides them.
    std::env::set_var("SAO_DID_NONCE_LENGTH", "8");
    std::env::set_var("SAO_DID_AUTH_TTL_SECONDS", "900");
    std::env::set_var("SAO_DID_ACCEPT", DID_LD_JSON);
    let from_env = AuthConfig::new(None);
    let layered = AuthConfig::new(Some(config_path_str));
    std::env::remove_var("SAO_DID_NONCE_LENGTH");
    std::env::remove_var("SAO_DID_AUTH_TTL_SECONDS");
    std::env::remove_var("SAO_DID_ACCEPT");

    let from_env = from_env.expect("pass");
    assert_eq!(from_env.nonce_length, 8);
    assert_eq!(from_env.auth_ttl(), time::Duration::seconds(900));
    assert_eq!(from_env.accept.as_deref(), Some(DID_LD_JSON));
    let layered = layered.expect("pass");
    assert_eq!(layered.nonce_length, 24);
    assert_eq!(layered.auth_ttl_seconds, 900);

    // Nothing set at all gives the defaults.
    assert_eq!(AuthConfig::new(None).expect("pass"), AuthConfig::default());

    std::fs::remove_file(&config_path).expect("pass");
    assert!(AuthConfig::new(Some(config_path_str)).is_err());
}

#[test]
fn test_undecodable_verification_methods() {
    let provider = random_provider();
    let jws = provider.create_jws(b"{}").expect("pass");
    let kid = provider.key_id().to_string();
    let base58_key_of = |provider: &Secp256k1Provider| {
        bs58::encode(provider.verifying_key().to_encoded_point(true).as_bytes()).into_string()
    };
    let method = |id: &str, public_key_base58_o: Option<String>| VerificationMethod {
        id: format!("{}-{}", kid, id),
        r#type: ECDSA_SECP256K1_SIGNATURE_2019.to_string(),
        controller: provider.did().to_string(),
        public_key_base58_o,
        public_key_multibase_o: None,
    };
    let good = method("good", Some(base58_key_of(&provider)));
    // '0', 'O', 'I' and 'l' are not in the base58 alphabet.
    let undecodable = method("undecodable", Some("0OIl0OIl".to_string()));
    let unrelated = method("unrelated", Some(base58_key_of(&random_provider())));
    let keyless = method("keyless", None);
    let verifier_for = |verification_method_v: Vec<VerificationMethod>| {
        DIDManager::verifier_only(Arc::new(VerificationMethodsOverridingResolver {
            inner: DIDKeyResolver::new(),
            verification_method_v,
        }))
    };

    // An undecodable key that isn't the last candidate is skipped.
    verifier_for(vec![undecodable.clone(), good.clone()])
        .verify_jws(&jws)
        .expect("pass");
    // So is a verification method with no key at all.
    verifier_for(vec![keyless.clone(), good.clone()])
        .verify_jws(&jws)
        .expect("pass");
    // The last candidate's decode error is what gets reported.
    assert!(matches!(
        verifier_for(vec![unrelated.clone(), undecodable]).verify_jws(&jws),
        Err(Error::DecodeError(_))
    ));
    assert!(matches!(
        verifier_for(vec![unrelated.clone(), keyless]).verify_jws(&jws),
        Err(Error::DecodeError(_))
    ));
    // Keys that decode but don't verify end in InvalidSignature.
    assert!(matches!(
        verifier_for(vec![unrelated]).verify_jws(&jws),
        Err(Error::InvalidSignature(_))
    ));
}

#[test]
fn test_random_nonce() {
    let nonce = sao_did::random_nonce(16);
    assert_eq!(nonce.len(), 16);
    assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(nonce, sao_did::random_nonce(16));
}
