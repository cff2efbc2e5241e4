use crate::{SIDRecord, DID};

/// The ledger query behind the sid resolver.  It may block on I/O; timeouts and retries are the
/// implementor's business.
pub trait SIDDocumentLookup: Send + Sync {
    /// Returns the record of `did` at `version_id_o` (the latest version if None), or None if there
    /// is no such record.
    fn query(&self, did: &DID, version_id_o: Option<&str>) -> anyhow::Result<Option<SIDRecord>>;
}

impl<F> SIDDocumentLookup for F
where
    F: Fn(&DID, Option<&str>) -> anyhow::Result<Option<SIDRecord>> + Send + Sync,
{
    fn query(&self, did: &DID, version_id_o: Option<&str>) -> anyhow::Result<Option<SIDRecord>> {
        self(did, version_id_o)
    }
}
