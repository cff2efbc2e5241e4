/// What a verifier asks a provider to sign: a fresh nonce bound to an audience and a set of paths.
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
pub struct AuthChallenge {
    pub audience: String,
    pub nonce: String,
    pub paths: Vec<String>,
}
