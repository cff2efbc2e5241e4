use crate::{
    random_nonce, verify_jws_signature, AuthChallenge, AuthConfig, AuthPayload, DIDProvider,
    DIDResolutionOptions, DIDResolver, DetachedJWS, Error, LinkedJWS, Result, DID, ES256K,
};
use std::sync::Arc;

/// Which DID, if any, a `DIDManager` is bound to.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Identity {
    #[default]
    Unauthenticated,
    Authenticated(DID),
}

impl Identity {
    pub fn did_o(&self) -> Option<&DID> {
        match self {
            Self::Unauthenticated => None,
            Self::Authenticated(did) => Some(did),
        }
    }
}

/// Drives the challenge-response handshake and verifies JWSes.  Authentication does not mutate
/// the manager; it returns the authenticated manager alongside the DID.  Verification only reads
/// the manager and is safe to run concurrently.
#[derive(Clone)]
pub struct DIDManager {
    identity: Identity,
    provider_o: Option<Arc<dyn DIDProvider>>,
    resolver_o: Option<Arc<dyn DIDResolver>>,
    config: AuthConfig,
}

impl DIDManager {
    pub fn new(provider: Arc<dyn DIDProvider>, resolver: Arc<dyn DIDResolver>) -> Self {
        Self {
            identity: Identity::Unauthenticated,
            provider_o: Some(provider),
            resolver_o: Some(resolver),
            config: AuthConfig::default(),
        }
    }
    /// A manager that can verify JWSes but not authenticate or sign.
    pub fn verifier_only(resolver: Arc<dyn DIDResolver>) -> Self {
        Self {
            identity: Identity::Unauthenticated,
            provider_o: None,
            resolver_o: Some(resolver),
            config: AuthConfig::default(),
        }
    }
    /// A manager with neither capability; mostly useful as the starting point of the builders.
    pub fn empty() -> Self {
        Self {
            identity: Identity::Unauthenticated,
            provider_o: None,
            resolver_o: None,
            config: AuthConfig::default(),
        }
    }
    pub fn with_provider(mut self, provider: Arc<dyn DIDProvider>) -> Self {
        self.provider_o = Some(provider);
        self
    }
    pub fn with_resolver(mut self, resolver: Arc<dyn DIDResolver>) -> Self {
        self.resolver_o = Some(resolver);
        self
    }
    pub fn with_config(mut self, config: AuthConfig) -> Self {
        self.config = config;
        self
    }
    /// Binds the manager to `identity`, e.g. one restored from a previous session.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
    fn provider(&self) -> Result<&dyn DIDProvider> {
        self.provider_o
            .as_deref()
            .ok_or(Error::MissingCapability("DIDManager has no DIDProvider"))
    }
    fn resolver(&self) -> Result<&dyn DIDResolver> {
        self.resolver_o
            .as_deref()
            .ok_or(Error::MissingCapability("DIDManager has no DIDResolver"))
    }

    /// Issues a fresh challenge for `paths` and `audience` to the provider, verifies the response,
    /// and returns this manager authenticated as the responding DID, along with that DID.
    pub fn authenticate(&self, paths: &[&str], audience: &str) -> Result<(Self, DID)> {
        let provider = self.provider()?;
        self.resolver()?;

        let challenge = AuthChallenge {
            audience: audience.to_string(),
            nonce: random_nonce(self.config.nonce_length),
            paths: paths.iter().map(|path| path.to_string()).collect(),
        };
        let jws = provider.authenticate(&challenge)?;
        let auth_payload: AuthPayload = jws.decoded_payload()?;

        let now = time::OffsetDateTime::now_utc();
        let kid = self.verify_jws_at(&jws, now)?;
        if !kid.to_string().contains(auth_payload.did.as_str()) {
            return Err(Error::KidMismatch(
                format!(
                    "key id {} does not belong to claimed DID {:?}",
                    kid, auth_payload.did
                )
                .into(),
            ));
        }
        if auth_payload.nonce != challenge.nonce {
            return Err(Error::NonceMismatch(
                format!(
                    "expected nonce {:?}, but got {:?}",
                    challenge.nonce, auth_payload.nonce
                )
                .into(),
            ));
        }
        if auth_payload.aud != challenge.audience {
            return Err(Error::AudienceMismatch(
                format!(
                    "expected aud {:?}, but got {:?}",
                    challenge.audience, auth_payload.aud
                )
                .into(),
            ));
        }
        if auth_payload.is_expired_at(now) {
            return Err(Error::Expired(
                format!(
                    "auth payload expired at {}, before {}",
                    auth_payload.exp,
                    now.unix_timestamp()
                )
                .into(),
            ));
        }

        let did = DID::parse(auth_payload.did.as_str())?;
        tracing::debug!("authenticated as {} for audience {:?}", did, audience);
        let authenticated = self
            .clone()
            .with_identity(Identity::Authenticated(did.clone()));
        Ok((authenticated, did))
    }

    pub fn create_jws(&self, payload_bytes: &[u8]) -> Result<DetachedJWS> {
        self.provider()?.create_jws(payload_bytes)
    }
    pub fn create_linked_jws<T: serde::Serialize + ?Sized>(&self, payload: &T) -> Result<LinkedJWS> {
        LinkedJWS::create(payload, self.provider()?)
    }

    /// Verifies `jws` as of now, returning the key id (not the bare DID) it was signed with.
    pub fn verify_jws(&self, jws: &DetachedJWS) -> Result<DID> {
        self.verify_jws_at(jws, time::OffsetDateTime::now_utc())
    }
    /// Verifies a JWS in compact serialization.
    pub fn verify_compact_jws(&self, compact_jws: &str) -> Result<DID> {
        self.verify_jws(&compact_jws.parse::<DetachedJWS>()?)
    }
    /// Verifies `jws` as of `now`: the key must resolve, must have been in force at `now`, and must
    /// verify the first signature.  Returns the key id from the header.
    pub fn verify_jws_at(&self, jws: &DetachedJWS, now: time::OffsetDateTime) -> Result<DID> {
        let resolver = self.resolver()?;

        let header = jws.header()?;
        if header.kid.is_empty() {
            return Err(Error::MissingKid("JWS header has an empty kid"));
        }
        if header.alg != ES256K {
            return Err(Error::InvalidSignature(
                format!("unsupported JWS alg {:?}; expected {:?}", header.alg, ES256K).into(),
            ));
        }
        let kid = DID::parse(header.kid.as_str())?;
        if kid.fragment_o().is_none() {
            return Err(Error::MalformedDID(
                format!("JWS kid {} does not name a key (no fragment)", kid).into(),
            ));
        }
        if let Identity::Authenticated(did) = &self.identity {
            if kid.bare() != *did {
                return Err(Error::IdentityMismatch(
                    format!("JWS was signed by {}, but manager is bound to {}", kid, did).into(),
                ));
            }
        }

        let options = DIDResolutionOptions {
            accept_o: self.config.accept.clone(),
        };
        let (did_document, did_document_metadata) = resolver
            .resolve(header.kid.as_str(), &options)
            .into_result(header.kid.as_str())?;
        did_document_metadata.check_key_validity_at(now)?;
        let verification_method_id =
            verify_jws_signature(jws, did_document.verification_method_v.as_slice())?;
        tracing::debug!(
            "JWS with kid {} verified by verification method {:?}",
            kid,
            verification_method_id
        );

        Ok(kid)
    }
}
