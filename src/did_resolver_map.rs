use crate::{DIDResolutionError, DIDResolutionOptions, DIDResolutionResult, DIDResolver, DID};
use std::collections::HashMap;

/// This provides a DIDResolver impl which dispatches on the DID method to one of several
/// registered DIDResolvers.
#[derive(Default)]
pub struct DIDResolverMap {
    did_resolver_m: HashMap<String, Box<dyn DIDResolver>>,
}

impl DIDResolverMap {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with(mut self, method: &str, did_resolver_b: Box<dyn DIDResolver>) -> Self {
        self.did_resolver_m
            .insert(method.to_owned(), did_resolver_b);
        self
    }
    pub fn supports_method(&self, method: &str) -> bool {
        self.did_resolver_m.contains_key(method)
    }
}

impl DIDResolver for DIDResolverMap {
    fn resolve(&self, did_url: &str, options: &DIDResolutionOptions) -> DIDResolutionResult {
        let did = match DID::parse(did_url) {
            Ok(did) => did,
            Err(e) => {
                tracing::debug!("could not parse {:?}: {}", did_url, e);
                return DIDResolutionResult::failure(DIDResolutionError::InvalidDid);
            }
        };
        match self.did_resolver_m.get(did.method()) {
            Some(did_resolver) => did_resolver.resolve(did_url, options),
            None => {
                tracing::debug!("no resolver registered for method {:?}", did.method());
                DIDResolutionResult::failure(DIDResolutionError::UnsupportedMethod)
            }
        }
    }
}
