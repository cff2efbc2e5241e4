use sao_did::{AuthChallenge, DIDProvider, DetachedJWS, JWSSignature, Result};

/// Provider that returns the same unsigned placeholder JWS regardless of input.  Useful for
/// exercising the plumbing around a provider without any key material.
pub struct MockProvider;

impl MockProvider {
    pub fn fixed_jws() -> DetachedJWS {
        DetachedJWS {
            payload: "234".to_string(),
            signatures: vec![JWSSignature {
                protected: "5678".to_string(),
                signature: "4324".to_string(),
            }],
        }
    }
}

impl DIDProvider for MockProvider {
    fn authenticate(&self, _challenge: &AuthChallenge) -> Result<DetachedJWS> {
        Ok(Self::fixed_jws())
    }
    fn create_jws(&self, _payload_bytes: &[u8]) -> Result<DetachedJWS> {
        Ok(Self::fixed_jws())
    }
}
