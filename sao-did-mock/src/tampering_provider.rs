use sao_did::{
    AuthChallenge, AuthPayload, DIDProvider, DetachedJWS, Error, Result, Secp256k1Provider,
};

/// Ways in which `TamperingProvider` deviates from an honest response.
#[derive(Clone, Debug)]
pub enum Tampering {
    /// Signs a response carrying this nonce instead of the issued one.
    Nonce(String),
    /// Signs a response addressed to this audience instead of the requested one.
    Audience(String),
    /// Signs a response claiming to be this DID.
    ClaimedDID(String),
    /// Signs a response whose `exp` is this many seconds from now.
    ExpiresIn(i64),
}

/// Provider that holds a valid key but signs a doctored `AuthPayload`.  The signature is good; the
/// content is not.
pub struct TamperingProvider {
    inner: Secp256k1Provider,
    tampering: Tampering,
}

impl TamperingProvider {
    pub fn new(inner: Secp256k1Provider, tampering: Tampering) -> Self {
        Self { inner, tampering }
    }
}

impl DIDProvider for TamperingProvider {
    fn authenticate(&self, challenge: &AuthChallenge) -> Result<DetachedJWS> {
        let now = time::OffsetDateTime::now_utc();
        let mut auth_payload = AuthPayload::for_challenge(
            self.inner.did(),
            challenge,
            now,
            time::Duration::seconds(600),
        );
        match &self.tampering {
            Tampering::Nonce(nonce) => auth_payload.nonce = nonce.clone(),
            Tampering::Audience(aud) => auth_payload.aud = aud.clone(),
            Tampering::ClaimedDID(did) => auth_payload.did = did.clone(),
            Tampering::ExpiresIn(seconds) => {
                auth_payload.exp = (now + time::Duration::seconds(*seconds)).unix_timestamp()
            }
        }
        let payload_bytes = serde_json::to_vec(&auth_payload).map_err(|e| {
            Error::SigningError(format!("failed to serialize auth payload: {}", e).into())
        })?;
        self.inner.create_jws(payload_bytes.as_slice())
    }
    fn create_jws(&self, payload_bytes: &[u8]) -> Result<DetachedJWS> {
        self.inner.create_jws(payload_bytes)
    }
}
