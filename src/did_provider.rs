use crate::{AuthChallenge, DetachedJWS, Result};

/// The authenticating side: holds signing material for some DID.
pub trait DIDProvider: Send + Sync {
    /// Signs an `AuthPayload` answering `challenge`.
    fn authenticate(&self, challenge: &AuthChallenge) -> Result<DetachedJWS>;
    /// Signs arbitrary payload bytes under this provider's key id.
    fn create_jws(&self, payload_bytes: &[u8]) -> Result<DetachedJWS>;
}
