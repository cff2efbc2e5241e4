use crate::{DIDResolutionOptions, DIDResolutionResult};

/// Turns a DID or DID URL into a DID document.  Implementations never fail outright; errors are
/// reported through the result's resolution metadata.
pub trait DIDResolver: Send + Sync {
    fn resolve(&self, did_url: &str, options: &DIDResolutionOptions) -> DIDResolutionResult;
}
