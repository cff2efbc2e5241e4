use ::config::{Config, ConfigError, Environment, File};
use serde_inline_default::serde_inline_default;

/// Tunables of the authentication handshake.
#[serde_inline_default]
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
pub struct AuthConfig {
    /// Length of the nonce issued with every challenge.
    #[serde_inline_default(16)]
    pub nonce_length: usize,
    /// How long an `AuthPayload` stays valid after it is issued.
    #[serde_inline_default(600)]
    pub auth_ttl_seconds: i64,
    /// Content type requested from the resolver during verification.  None means the resolver's
    /// default, `application/did+json`.
    #[serde(default)]
    pub accept: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            nonce_length: 16,
            auth_ttl_seconds: 600,
            accept: None,
        }
    }
}

impl AuthConfig {
    /// Reads `SAO_DID_*` environment variables, overridden by the config file at `path_o` if given.
    pub fn new(path_o: Option<&str>) -> Result<Self, ConfigError> {
        let builder = if let Some(path) = path_o {
            Config::builder()
                // later sources override earlier ones
                .add_source(Environment::with_prefix("SAO_DID").prefix_separator("_"))
                .add_source(File::with_name(path))
        } else {
            Config::builder().add_source(Environment::with_prefix("SAO_DID").prefix_separator("_"))
        };

        builder.build()?.try_deserialize()
    }
    pub fn auth_ttl(&self) -> time::Duration {
        time::Duration::seconds(self.auth_ttl_seconds)
    }
}
