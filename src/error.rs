use std::borrow::Cow;

use crate::DIDResolutionError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Audience mismatch: {0}")]
    AudienceMismatch(Cow<'static, str>),
    #[error("Decode error: {0}")]
    DecodeError(Cow<'static, str>),
    #[error("Expired: {0}")]
    Expired(Cow<'static, str>),
    #[error("Identity mismatch: {0}")]
    IdentityMismatch(Cow<'static, str>),
    #[error("Invalid signature: {0}")]
    InvalidSignature(Cow<'static, str>),
    #[error("Kid mismatch: {0}")]
    KidMismatch(Cow<'static, str>),
    #[error("Lookup failure: {0}")]
    LookupFailure(Cow<'static, str>),
    #[error("Malformed DID: {0}")]
    MalformedDID(Cow<'static, str>),
    #[error("Missing capability: {0}")]
    MissingCapability(&'static str),
    #[error("Missing kid: {0}")]
    MissingKid(&'static str),
    #[error("Nonce mismatch: {0}")]
    NonceMismatch(Cow<'static, str>),
    #[error("Not yet valid: {0}")]
    NotYetValid(Cow<'static, str>),
    #[error("Representation not supported: {0}")]
    RepresentationNotSupported(Cow<'static, str>),
    #[error("Revoked key: {0}")]
    RevokedKey(Cow<'static, str>),
    #[error("Serialization error: {0}")]
    Serialization(Cow<'static, str>),
    #[error("Signing error: {0}")]
    SigningError(Cow<'static, str>),
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(Cow<'static, str>),
}

impl Error {
    /// Turns a failed resolution of `did_url` into the error a verifier reports.  The bundled
    /// resolvers report a DID their registry has no record of (or whose lookup failed) as
    /// `invalidDid`, so that case surfaces as `MalformedDID`; `LookupFailure` is what `notFound`
    /// maps to.
    pub fn from_resolution_error(error: DIDResolutionError, did_url: &str) -> Self {
        let context = Cow::Owned(format!("resolution of {:?} failed with {}", did_url, error));
        match error {
            DIDResolutionError::InvalidDid => Self::MalformedDID(
                format!(
                    "{} (the DID is malformed, or its registry lookup found nothing or failed)",
                    context
                )
                .into(),
            ),
            DIDResolutionError::NotFound => Self::LookupFailure(context),
            DIDResolutionError::RepresentationNotSupported => {
                Self::RepresentationNotSupported(context)
            }
            DIDResolutionError::UnsupportedMethod => Self::UnsupportedMethod(context),
        }
    }
}
