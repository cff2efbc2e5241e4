use crate::{
    decode_section, decode_section_as_json, encode_section, encode_section_as_json, signing_input,
    Error, JWSHeader, JWSSigner, Result, DID,
};

/// One entry of the `signatures` array of a general JWS.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct JWSSignature {
    /// Base64url-encoded JSON of the `JWSHeader`.
    pub protected: String,
    /// Base64url-encoded raw signature bytes.
    pub signature: String,
}

/// JWS in the general JSON serialization (RFC 7515 section 7.2.1) with a base64url payload.
/// Producers here emit exactly one signature, but any number is accepted on the wire; the
/// first one is the one that is verified.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DetachedJWS {
    pub payload: String,
    pub signatures: Vec<JWSSignature>,
}

impl DetachedJWS {
    /// Builds the header for `kid`, encodes header and payload, and signs the signing input.
    pub fn signed(kid: String, payload_bytes: &[u8], signer: &dyn JWSSigner) -> Result<Self> {
        let header = JWSHeader::new(kid, signer.jws_alg());
        let protected = encode_section_as_json(&header)?;
        let payload = encode_section(payload_bytes);
        let signature_bytes = signer.sign_message(signing_input(&protected, &payload).as_bytes())?;
        tracing::trace!(kid = %header.kid, "signed JWS payload {:?}", payload);
        Ok(Self {
            payload,
            signatures: vec![JWSSignature {
                protected,
                signature: encode_section(signature_bytes.as_slice()),
            }],
        })
    }
    pub fn first_signature(&self) -> Result<&JWSSignature> {
        self.signatures
            .first()
            .ok_or_else(|| Error::DecodeError("JWS has no signatures".into()))
    }
    /// Decodes the protected header of the first signature.
    pub fn header(&self) -> Result<JWSHeader> {
        decode_section_as_json(self.first_signature()?.protected.as_str())
    }
    /// The bare DID of the header's key id, or None if the key id is empty.
    pub fn header_did(&self) -> Result<Option<DID>> {
        let header = self.header()?;
        if header.kid.is_empty() {
            return Ok(None);
        }
        Ok(Some(DID::parse(header.kid.as_str())?.bare()))
    }
    pub fn decoded_payload_bytes(&self) -> Result<Vec<u8>> {
        decode_section(self.payload.as_str())
    }
    /// Parses the payload as JSON of the given type.
    pub fn decoded_payload<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        decode_section_as_json(self.payload.as_str())
    }
    /// Signing input for the first signature.
    pub fn signing_input(&self) -> Result<String> {
        Ok(signing_input(
            self.first_signature()?.protected.as_str(),
            self.payload.as_str(),
        ))
    }
    /// Renders `<protected>.<payload>.<signature>`.  Only a single-signature JWS has a compact form.
    pub fn to_compact(&self) -> Result<String> {
        if self.signatures.len() != 1 {
            return Err(Error::Serialization(
                format!(
                    "compact serialization requires exactly 1 signature, but JWS has {}",
                    self.signatures.len()
                )
                .into(),
            ));
        }
        let signature = &self.signatures[0];
        Ok(format!(
            "{}.{}.{}",
            signature.protected, self.payload, signature.signature
        ))
    }
}

impl std::str::FromStr for DetachedJWS {
    type Err = Error;
    /// Parses the compact serialization.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut section_i = s.split('.');
        let (protected, payload, signature) =
            match (section_i.next(), section_i.next(), section_i.next(), section_i.next()) {
                (Some(protected), Some(payload), Some(signature), None) => {
                    (protected, payload, signature)
                }
                _ => {
                    return Err(Error::DecodeError(
                        "compact JWS must have exactly 3 '.'-separated sections".into(),
                    ));
                }
            };
        Ok(Self {
            payload: payload.to_string(),
            signatures: vec![JWSSignature {
                protected: protected.to_string(),
                signature: signature.to_string(),
            }],
        })
    }
}
