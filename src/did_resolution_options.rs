#[derive(Clone, Debug, Default, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DIDResolutionOptions {
    /// Requested representation; None or empty means `application/did+json`.
    #[serde(rename = "accept", default, skip_serializing_if = "Option::is_none")]
    pub accept_o: Option<String>,
}

impl DIDResolutionOptions {
    pub fn with_accept(accept: &str) -> Self {
        Self {
            accept_o: Some(accept.to_string()),
        }
    }
}
