/// Error codes a resolver reports in its resolution metadata instead of failing.
#[derive(Clone, Copy, Debug, serde::Deserialize, Eq, Hash, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DIDResolutionError {
    InvalidDid,
    NotFound,
    RepresentationNotSupported,
    UnsupportedMethod,
}

impl DIDResolutionError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidDid => "invalidDid",
            Self::NotFound => "notFound",
            Self::RepresentationNotSupported => "representationNotSupported",
            Self::UnsupportedMethod => "unsupportedMethod",
        }
    }
}

impl std::fmt::Display for DIDResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DIDResolutionMetadata {
    #[serde(rename = "contentType", default, skip_serializing_if = "Option::is_none")]
    pub content_type_o: Option<String>,
    #[serde(rename = "error", default, skip_serializing_if = "Option::is_none")]
    pub error_o: Option<DIDResolutionError>,
}
