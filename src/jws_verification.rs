use crate::{decode_section, verify_es256k, DetachedJWS, Error, Result, VerificationMethod};

/// Verifies the first signature of `jws` against each verification method in order, returning the
/// id of the first one whose key verifies it.  A candidate whose key can't be decoded is skipped,
/// unless it is the last one, in which case its decode error is returned.  Keys that decode but are
/// not secp256k1 points simply don't match.
pub fn verify_jws_signature<'a>(
    jws: &DetachedJWS,
    verification_method_v: &'a [VerificationMethod],
) -> Result<&'a str> {
    let signing_input = jws.signing_input()?;
    let signature_bytes = decode_section(jws.first_signature()?.signature.as_str())?;

    for (i, verification_method) in verification_method_v.iter().enumerate() {
        let is_last = i + 1 == verification_method_v.len();
        let public_key_bytes = match verification_method.public_key_bytes() {
            Ok(public_key_bytes) => public_key_bytes,
            Err(e) if is_last => return Err(e),
            Err(e) => {
                tracing::warn!(
                    "skipping verification method {:?}: {}",
                    verification_method.id,
                    e
                );
                continue;
            }
        };
        match verify_es256k(
            public_key_bytes.as_slice(),
            signing_input.as_bytes(),
            signature_bytes.as_slice(),
        ) {
            Ok(true) => {
                tracing::debug!(
                    "JWS signature verified with {:?}",
                    verification_method.id
                );
                return Ok(verification_method.id.as_str());
            }
            Ok(false) => {
                tracing::trace!(
                    "JWS signature did not verify with {:?}",
                    verification_method.id
                );
            }
            // Not a secp256k1 key, e.g. an X25519 key-agreement key.
            Err(e) => {
                tracing::debug!(
                    "verification method {:?} can't verify ES256K: {}",
                    verification_method.id,
                    e
                );
            }
        }
    }

    Err(Error::InvalidSignature(
        format!(
            "no key among {} verification method(s) verifies the JWS signature",
            verification_method_v.len()
        )
        .into(),
    ))
}
