use sao_did::{SIDDocumentLookup, SIDRecord, DID};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

/// Purely in-memory, intra-process stand-in for the ledger that hosts `did:sid` key sets.  Clones
/// share the same ledger, so one clone can be handed to a `SIDResolver` while another publishes.
/// Version ids are "0", "1", ... in publication order.
#[derive(Clone, Debug, Default)]
pub struct MockSIDLedger {
    record_vm: Arc<RwLock<HashMap<DID, Vec<SIDRecord>>>>,
}

impl MockSIDLedger {
    pub fn new() -> Self {
        Self::default()
    }
    /// Publishes `sid_record` as the new latest version of `did`, effective now.
    pub fn publish(&self, did: &DID, sid_record: SIDRecord) -> anyhow::Result<String> {
        self.publish_at(did, sid_record, time::OffsetDateTime::now_utc())
    }
    /// Publishes `sid_record` as the new latest version of `did`, effective at `updated`.  The
    /// previous version, if any, is stamped as superseded at `updated`.
    pub fn publish_at(
        &self,
        did: &DID,
        mut sid_record: SIDRecord,
        updated: time::OffsetDateTime,
    ) -> anyhow::Result<String> {
        let did = did.bare();
        let mut record_vm = self
            .record_vm
            .write()
            .map_err(|_| anyhow::anyhow!("mock ledger lock was poisoned"))?;
        let record_v = record_vm.entry(did.clone()).or_default();
        let version_id = record_v.len().to_string();

        if let Some(prev_record) = record_v.last_mut() {
            if prev_record.updated_o.is_some_and(|prev_updated| updated < prev_updated) {
                anyhow::bail!(
                    "version {} of {} can't take effect before version {}",
                    version_id,
                    did,
                    record_v.len() - 1
                );
            }
            prev_record.next_update_o = Some(updated);
            prev_record.next_version_id_o = Some(version_id.clone());
        }
        sid_record.created_o = Some(
            record_v
                .first()
                .and_then(|root_record| root_record.created_o)
                .unwrap_or(updated),
        );
        sid_record.updated_o = Some(updated);
        sid_record.next_update_o = None;
        sid_record.next_version_id_o = None;
        tracing::debug!("publishing version {} of {}", version_id, did);
        record_v.push(sid_record);

        Ok(version_id)
    }
    pub fn latest_version_id(&self, did: &DID) -> Option<String> {
        let record_vm = self.record_vm.read().ok()?;
        let record_v = record_vm.get(&did.bare())?;
        record_v.len().checked_sub(1).map(|i| i.to_string())
    }
}

impl SIDDocumentLookup for MockSIDLedger {
    fn query(&self, did: &DID, version_id_o: Option<&str>) -> anyhow::Result<Option<SIDRecord>> {
        let record_vm = self
            .record_vm
            .read()
            .map_err(|_| anyhow::anyhow!("mock ledger lock was poisoned"))?;
        let record_v = match record_vm.get(did) {
            Some(record_v) => record_v,
            None => return Ok(None),
        };
        match version_id_o {
            None => Ok(record_v.last().cloned()),
            Some(version_id) => {
                let index: usize = version_id
                    .parse()
                    .map_err(|e| anyhow::anyhow!("malformed versionId {:?}: {}", version_id, e))?;
                Ok(record_v.get(index).cloned())
            }
        }
    }
}
