use crate::{Error, Result};

/// Metadata accompanying a resolved DID document.  `updated` is when the document's key set became
/// valid, and `next_update_o`, if set, is when it was (or will be) superseded.
#[derive(Clone, Debug, Default, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DIDDocumentMetadata {
    #[serde(
        rename = "created",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub created_o: Option<time::OffsetDateTime>,
    #[serde(
        rename = "updated",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub updated_o: Option<time::OffsetDateTime>,
    #[serde(
        rename = "nextUpdate",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub next_update_o: Option<time::OffsetDateTime>,
    #[serde(rename = "versionId", default, skip_serializing_if = "Option::is_none")]
    pub version_id_o: Option<String>,
    #[serde(
        rename = "nextVersionId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_version_id_o: Option<String>,
    #[serde(default)]
    pub deactivated: bool,
}

impl DIDDocumentMetadata {
    /// Checks that the document's keys were in force at `now`: not superseded (`nextUpdate` not
    /// in the past) and already effective (`updated` not in the future).
    pub fn check_key_validity_at(&self, now: time::OffsetDateTime) -> Result<()> {
        if let Some(next_update) = self.next_update_o {
            if next_update < now {
                return Err(Error::RevokedKey(
                    format!(
                        "key was superseded at {} (versionId {:?}), before {}",
                        next_update, self.next_version_id_o, now
                    )
                    .into(),
                ));
            }
        }
        if let Some(updated) = self.updated_o {
            if now < updated {
                return Err(Error::NotYetValid(
                    format!("key only becomes valid at {}, after {}", updated, now).into(),
                ));
            }
        }
        Ok(())
    }
}
