use crate::{Error, Result};
use base64::Engine;

/// Encodes bytes as a JWS section: base64url without padding.
pub fn encode_section(bytes: &[u8]) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Encodes `value` as JSON and then as a JWS section.
pub fn encode_section_as_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value).map_err(|e| {
        Error::Serialization(format!("failed to serialize JWS section as JSON: {}", e).into())
    })?;
    Ok(encode_section(json.as_slice()))
}

pub fn decode_section(section: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(section)
        .map_err(|e| {
            Error::DecodeError(format!("JWS section {:?} is not base64url: {}", section, e).into())
        })
}

/// Base64url-decodes `section` and then parses it as JSON.
pub fn decode_section_as_json<T: serde::de::DeserializeOwned>(section: &str) -> Result<T> {
    let bytes = decode_section(section)?;
    serde_json::from_slice(bytes.as_slice()).map_err(|e| {
        Error::DecodeError(format!("JWS section {:?} is not the expected JSON: {}", section, e).into())
    })
}

/// The exact string that is signed and verified: `<protected header>.<payload>`.
pub fn signing_input(protected_header_section: &str, payload_section: &str) -> String {
    let mut signing_input =
        String::with_capacity(protected_header_section.len() + 1 + payload_section.len());
    signing_input.push_str(protected_header_section);
    signing_input.push('.');
    signing_input.push_str(payload_section);
    signing_input
}
