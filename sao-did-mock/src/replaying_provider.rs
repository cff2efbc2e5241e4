use sao_did::{AuthChallenge, DIDProvider, DetachedJWS, Error, Result};
use std::sync::Mutex;

/// Answers the first challenge honestly and replays that same response to every later challenge,
/// the way an eavesdropper re-submitting a captured token would.
pub struct ReplayingProvider<P: DIDProvider> {
    inner: P,
    captured_o: Mutex<Option<DetachedJWS>>,
}

impl<P: DIDProvider> ReplayingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            captured_o: Mutex::new(None),
        }
    }
}

impl<P: DIDProvider> DIDProvider for ReplayingProvider<P> {
    fn authenticate(&self, challenge: &AuthChallenge) -> Result<DetachedJWS> {
        let mut captured_o = self
            .captured_o
            .lock()
            .map_err(|_| Error::SigningError("replay lock was poisoned".into()))?;
        if let Some(captured) = captured_o.as_ref() {
            tracing::debug!("replaying captured response");
            return Ok(captured.clone());
        }
        let jws = self.inner.authenticate(challenge)?;
        *captured_o = Some(jws.clone());
        Ok(jws)
    }
    fn create_jws(&self, payload_bytes: &[u8]) -> Result<DetachedJWS> {
        self.inner.create_jws(payload_bytes)
    }
}
