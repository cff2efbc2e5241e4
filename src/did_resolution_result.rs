use crate::{
    DIDDocument, DIDDocumentMetadata, DIDResolutionError, DIDResolutionMetadata, Error, Result,
};

/// Outcome of a resolution.  Failures are carried in `did_resolution_metadata.error_o`, and a
/// failed result always has an empty document and metadata.
#[derive(Clone, Debug, Default, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DIDResolutionResult {
    pub did_resolution_metadata: DIDResolutionMetadata,
    pub did_document: DIDDocument,
    pub did_document_metadata: DIDDocumentMetadata,
}

impl DIDResolutionResult {
    pub fn failure(error: DIDResolutionError) -> Self {
        Self {
            did_resolution_metadata: DIDResolutionMetadata {
                content_type_o: None,
                error_o: Some(error),
            },
            ..Default::default()
        }
    }
    pub fn success(
        did_document: DIDDocument,
        did_document_metadata: DIDDocumentMetadata,
        content_type: &str,
    ) -> Self {
        Self {
            did_resolution_metadata: DIDResolutionMetadata {
                content_type_o: Some(content_type.to_string()),
                error_o: None,
            },
            did_document,
            did_document_metadata,
        }
    }
    pub fn error_o(&self) -> Option<DIDResolutionError> {
        self.did_resolution_metadata.error_o
    }
    /// Converts a failed resolution of `did_url` into an `Error`, and a successful one into the
    /// document and its metadata.
    pub fn into_result(self, did_url: &str) -> Result<(DIDDocument, DIDDocumentMetadata)> {
        if let Some(error) = self.did_resolution_metadata.error_o {
            return Err(Error::from_resolution_error(error, did_url));
        }
        Ok((self.did_document, self.did_document_metadata))
    }
}
