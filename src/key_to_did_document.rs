use crate::{DIDDocument, Result};

/// Builds the DID document of a `did:key` from its raw public key bytes, for one key type.
pub trait KeyToDIDDocument: Send + Sync {
    /// `public_key_bytes` has the multicodec prefix stripped; `fingerprint` is the full
    /// method-specific id of the DID.
    fn resolve_key(&self, public_key_bytes: &[u8], fingerprint: &str) -> Result<DIDDocument>;
}
