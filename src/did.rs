use crate::{DIDURIComponents, Error, Result};

/// A parsed DID or DID URL.  The canonical DID is `did:<method>:<id>`; path, query and fragment
/// are retained so that key ids and versioned references survive a parse/display round trip.
#[derive(
    Clone, Debug, serde_with::DeserializeFromStr, Eq, Hash, PartialEq, serde_with::SerializeDisplay,
)]
pub struct DID {
    method: String,
    id: String,
    path_o: Option<String>,
    query_o: Option<String>,
    fragment_o: Option<String>,
}

impl DID {
    /// Construct the bare DID `did:<method>:<id>`.
    pub fn new(method: &str, id: &str) -> Result<Self> {
        Self::parse(&format!("did:{}:{}", method, id))
    }
    pub fn parse(s: &str) -> Result<Self> {
        let components = DIDURIComponents::try_from(s)?;
        Ok(Self {
            method: components.method.to_string(),
            id: components.method_specific_id.to_string(),
            path_o: components.path_o.map(str::to_string),
            query_o: components.query_o.map(str::to_string),
            fragment_o: components.fragment_o.map(str::to_string),
        })
    }
    pub fn method(&self) -> &str {
        self.method.as_str()
    }
    /// The method-specific id.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }
    pub fn path_o(&self) -> Option<&str> {
        self.path_o.as_deref()
    }
    pub fn query_o(&self) -> Option<&str> {
        self.query_o.as_deref()
    }
    pub fn fragment_o(&self) -> Option<&str> {
        self.fragment_o.as_deref()
    }
    /// True if this has no path, query or fragment.
    pub fn is_bare(&self) -> bool {
        self.path_o.is_none() && self.query_o.is_none() && self.fragment_o.is_none()
    }
    /// The canonical DID with path, query and fragment stripped.
    pub fn bare(&self) -> DID {
        Self {
            method: self.method.clone(),
            id: self.id.clone(),
            path_o: None,
            query_o: None,
            fragment_o: None,
        }
    }
    /// Canonical string form `did:<method>:<id>`.
    pub fn bare_string(&self) -> String {
        format!("did:{}:{}", self.method, self.id)
    }
    /// Returns a copy of self with the fragment replaced.
    pub fn with_fragment(&self, fragment: &str) -> Result<DID> {
        if fragment.is_empty() {
            return Err(Error::MalformedDID("DID fragment must not be empty".into()));
        }
        if fragment.contains('#') {
            return Err(Error::MalformedDID(
                format!("DID fragment {:?} must not contain '#'", fragment).into(),
            ));
        }
        let mut did = self.clone();
        did.fragment_o = Some(fragment.to_string());
        Ok(did)
    }
    /// Returns the value of the first `name=value` pair in the query.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_o
            .as_deref()?
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _value)| *key == name)
            .map(|(_key, value)| value)
    }
    /// The `versionId` query parameter, falling back to the older `version-id` spelling.
    pub fn version_id_o(&self) -> Option<&str> {
        self.query_param("versionId")
            .or_else(|| self.query_param("version-id"))
    }
}

impl std::fmt::Display for DID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "did:{}:{}", self.method, self.id)?;
        if let Some(path) = self.path_o.as_deref() {
            f.write_str(path)?;
        }
        if let Some(query) = self.query_o.as_deref() {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = self.fragment_o.as_deref() {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for DID {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for DID {
    type Error = Error;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        Self::parse(s)
    }
}
