use crate::{AuthChallenge, DID};

/// The JSON payload a provider signs in response to an `AuthChallenge`.
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
pub struct AuthPayload {
    /// DID of the responding party.
    pub did: String,
    pub aud: String,
    pub nonce: String,
    pub paths: Vec<String>,
    /// Unix timestamp (seconds) after which the payload is no longer accepted.
    pub exp: i64,
}

impl AuthPayload {
    pub fn for_challenge(
        did: &DID,
        challenge: &AuthChallenge,
        issued_at: time::OffsetDateTime,
        ttl: time::Duration,
    ) -> Self {
        Self {
            did: did.bare_string(),
            aud: challenge.audience.clone(),
            nonce: challenge.nonce.clone(),
            paths: challenge.paths.clone(),
            exp: (issued_at + ttl).unix_timestamp(),
        }
    }
    /// Expired iff `exp` is strictly before `now`; a payload expiring this very second is valid.
    pub fn is_expired_at(&self, now: time::OffsetDateTime) -> bool {
        self.exp < now.unix_timestamp()
    }
}
