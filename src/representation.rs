use crate::{DIDDocument, DIDResolutionError};

pub const DID_JSON: &str = "application/did+json";
pub const DID_LD_JSON: &str = "application/did+ld+json";
/// `@context` of a JSON-LD DID document.
pub const DEFAULT_CONTEXT: &str = "https://w3id.org/did/v1";

/// The DID document representations the resolvers can produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Representation {
    DIDJSON,
    DIDLDJSON,
}

impl Representation {
    /// Absent or empty `accept` selects `application/did+json`.
    pub fn from_accept(accept_o: Option<&str>) -> Result<Self, DIDResolutionError> {
        match accept_o {
            None | Some("") | Some(DID_JSON) => Ok(Self::DIDJSON),
            Some(DID_LD_JSON) => Ok(Self::DIDLDJSON),
            Some(accept) => {
                tracing::debug!("unsupported DID document representation {:?}", accept);
                Err(DIDResolutionError::RepresentationNotSupported)
            }
        }
    }
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::DIDJSON => DID_JSON,
            Self::DIDLDJSON => DID_LD_JSON,
        }
    }
    /// Sets `@context` on `did_document` for the JSON-LD representation.
    pub fn apply(&self, did_document: &mut DIDDocument) {
        if *self == Self::DIDLDJSON {
            did_document.context_v = vec![DEFAULT_CONTEXT.to_string()];
        }
    }
}
