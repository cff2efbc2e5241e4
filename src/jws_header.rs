/// Protected header of a JWS.  See RFC 7515, https://datatracker.ietf.org/doc/html/rfc7515
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct JWSHeader {
    /// Fully qualified DID URL (`did:<method>:<id>#<fragment>`) of the signing key.  An empty kid
    /// is representable on the wire so that it can be rejected with a specific error.
    #[serde(default)]
    pub kid: String,
    /// Signature algorithm used to sign the JWS.
    pub alg: String,
}

impl JWSHeader {
    pub fn new(kid: String, alg: &str) -> Self {
        Self {
            kid,
            alg: alg.to_string(),
        }
    }
}
