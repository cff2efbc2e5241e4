use crate::{
    multicodec, AuthChallenge, AuthConfig, AuthPayload, DIDProvider, DetachedJWS, Error,
    LinkedJWS, Result, DID, KEY_METHOD,
};
use sha2::Digest;

/// A `DIDProvider` that signs with a secp256k1 key (ES256K).
pub struct Secp256k1Provider {
    did: DID,
    key_id: DID,
    signing_key: k256::ecdsa::SigningKey,
    auth_ttl: time::Duration,
}

impl Secp256k1Provider {
    /// Provider for the `did:key` of `signing_key`, whose key id is `<did>#<method-specific id>`.
    pub fn new(signing_key: k256::ecdsa::SigningKey) -> Result<Self> {
        let did = Self::did_key_of(signing_key.verifying_key())?;
        let key_id = did.with_fragment(did.id())?;
        Ok(Self {
            did,
            key_id,
            signing_key,
            auth_ttl: AuthConfig::default().auth_ttl(),
        })
    }
    /// Provider whose key is derived from SHA-256 of `secret`.
    pub fn from_secret(secret: &[u8]) -> Result<Self> {
        let digest = sha2::Sha256::digest(secret);
        let signing_key = k256::ecdsa::SigningKey::from_slice(digest.as_slice()).map_err(|e| {
            Error::SigningError(format!("secret does not derive a valid secp256k1 key: {}", e).into())
        })?;
        Self::new(signing_key)
    }
    /// Provider acting as controller of whatever DID `key_id` belongs to, e.g. a `did:sid` key.
    pub fn for_key_id(key_id: DID, signing_key: k256::ecdsa::SigningKey) -> Result<Self> {
        if key_id.fragment_o().is_none() {
            return Err(Error::MalformedDID(
                format!("key id {} has no fragment", key_id).into(),
            ));
        }
        Ok(Self {
            did: key_id.bare(),
            key_id,
            signing_key,
            auth_ttl: AuthConfig::default().auth_ttl(),
        })
    }
    pub fn with_auth_ttl(mut self, auth_ttl: time::Duration) -> Self {
        self.auth_ttl = auth_ttl;
        self
    }
    /// `did:key:z...` of a secp256k1 public key: base58btc of `0xe7 0x01 || compressed point`.
    pub fn did_key_of(verifying_key: &k256::ecdsa::VerifyingKey) -> Result<DID> {
        let mut key_bytes = multicodec::encode_uvarint(multicodec::SECP256K1_PUB);
        key_bytes.extend_from_slice(verifying_key.to_encoded_point(true).as_bytes());
        DID::new(
            KEY_METHOD,
            multibase::encode(multibase::Base::Base58Btc, key_bytes).as_str(),
        )
    }
    pub fn did(&self) -> &DID {
        &self.did
    }
    pub fn key_id(&self) -> &DID {
        &self.key_id
    }
    pub fn verifying_key(&self) -> &k256::ecdsa::VerifyingKey {
        self.signing_key.verifying_key()
    }
    /// Signs the content identifier of `payload` encoded as a canonical CBOR block.
    pub fn create_linked_jws<T: serde::Serialize + ?Sized>(&self, payload: &T) -> Result<LinkedJWS> {
        LinkedJWS::create(payload, self)
    }
}

impl DIDProvider for Secp256k1Provider {
    fn authenticate(&self, challenge: &AuthChallenge) -> Result<DetachedJWS> {
        let auth_payload = AuthPayload::for_challenge(
            &self.did,
            challenge,
            time::OffsetDateTime::now_utc(),
            self.auth_ttl,
        );
        let payload_bytes = serde_json::to_vec(&auth_payload).map_err(|e| {
            Error::SigningError(format!("failed to serialize auth payload: {}", e).into())
        })?;
        self.create_jws(payload_bytes.as_slice())
    }
    fn create_jws(&self, payload_bytes: &[u8]) -> Result<DetachedJWS> {
        DetachedJWS::signed(self.key_id.to_string(), payload_bytes, &self.signing_key)
    }
}
