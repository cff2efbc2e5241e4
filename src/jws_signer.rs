use crate::{Error, Result};

/// JOSE name of ECDSA over secp256k1 with SHA-256.
pub const ES256K: &str = "ES256K";

/// Anything that can produce the signature section of a JWS.
pub trait JWSSigner: Send + Sync {
    /// The JOSE `alg` value written into the protected header.
    fn jws_alg(&self) -> &'static str;
    /// Signs the JWS signing input, returning raw signature bytes.
    fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>>;
}

impl JWSSigner for k256::ecdsa::SigningKey {
    fn jws_alg(&self) -> &'static str {
        ES256K
    }
    fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>> {
        use k256::ecdsa::signature::Signer;
        let signature: k256::ecdsa::Signature = self
            .try_sign(message)
            .map_err(|e| Error::SigningError(format!("ES256K signing failed: {}", e).into()))?;
        Ok(signature.to_bytes().to_vec())
    }
}

/// Verifies a 64-byte ES256K signature over `message` with a SEC1-encoded secp256k1 public key.
/// Returns `Ok(false)` for a well-formed key whose signature does not verify.  High-s signatures
/// are rejected.
pub fn verify_es256k(public_key_bytes: &[u8], message: &[u8], signature_bytes: &[u8]) -> Result<bool> {
    use k256::ecdsa::signature::Verifier;
    let verifying_key = k256::ecdsa::VerifyingKey::from_sec1_bytes(public_key_bytes).map_err(|e| {
        Error::DecodeError(format!("invalid secp256k1 public key: {}", e).into())
    })?;
    let signature = match k256::ecdsa::Signature::from_slice(signature_bytes) {
        Ok(signature) => signature,
        Err(_) => return Ok(false),
    };
    Ok(verifying_key.verify(message, &signature).is_ok())
}
