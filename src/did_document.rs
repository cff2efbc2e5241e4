use crate::VerificationMethod;

/// DID document as produced by the resolvers.  `Default` is the empty document that accompanies a
/// failed resolution.
#[derive(Clone, Debug, Default, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DIDDocument {
    #[serde(rename = "@context", default, skip_serializing_if = "Vec::is_empty")]
    pub context_v: Vec<String>,
    pub id: String,
    #[serde(rename = "verificationMethod", default)]
    pub verification_method_v: Vec<VerificationMethod>,
    /// Ids of the entries of `verification_method_v` usable for authentication.
    #[serde(rename = "authentication", default)]
    pub authentication_v: Vec<String>,
    /// Ids of the entries of `verification_method_v` usable for key agreement.
    #[serde(rename = "keyAgreement", default)]
    pub key_agreement_v: Vec<String>,
}

impl DIDDocument {
    pub fn new(id: String) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
    pub fn add_authentication_method(&mut self, verification_method: VerificationMethod) {
        self.authentication_v.push(verification_method.id.clone());
        self.verification_method_v.push(verification_method);
    }
    pub fn add_key_agreement_method(&mut self, verification_method: VerificationMethod) {
        self.key_agreement_v.push(verification_method.id.clone());
        self.verification_method_v.push(verification_method);
    }
    pub fn verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_method_v
            .iter()
            .find(|verification_method| verification_method.id == id)
    }
}
