use crate::Error;

/// Borrowed view of the pieces of `did:<method>:<method-specific-id>[/<path>][?<query>][#<fragment>]`.
#[derive(Debug)]
pub struct DIDURIComponents<'a> {
    pub method: &'a str,
    pub method_specific_id: &'a str,
    /// Includes the leading '/'.
    pub path_o: Option<&'a str>,
    pub query_o: Option<&'a str>,
    pub fragment_o: Option<&'a str>,
}

impl<'a> TryFrom<&'a str> for DIDURIComponents<'a> {
    type Error = Error;
    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        let s = s.strip_prefix("did:").ok_or_else(|| {
            Error::MalformedDID(format!("DID URI {:?} does not start with 'did:'", s).into())
        })?;
        let (method, post_method_str) = s.split_once(':').ok_or_else(|| {
            Error::MalformedDID(
                format!("DID URI \"did:{}\" has no method-specific id", s).into(),
            )
        })?;
        if method.is_empty() {
            return Err(Error::MalformedDID("DID method must not be empty".into()));
        }
        if !method.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(Error::MalformedDID(
                format!("DID method {:?} must consist of lowercase letters", method).into(),
            ));
        }

        let (pre_fragment_str, fragment_o) = match post_method_str.split_once('#') {
            Some((pre_fragment_str, fragment)) => (pre_fragment_str, Some(fragment)),
            None => (post_method_str, None),
        };
        let (pre_query_str, query_o) = match pre_fragment_str.split_once('?') {
            Some((pre_query_str, query)) => (pre_query_str, Some(query)),
            None => (pre_fragment_str, None),
        };
        let (method_specific_id, path_o) = match pre_query_str.find('/') {
            Some(index) => (&pre_query_str[..index], Some(&pre_query_str[index..])),
            None => (pre_query_str, None),
        };

        if method_specific_id.is_empty() {
            return Err(Error::MalformedDID(
                "DID method-specific id must not be empty".into(),
            ));
        }
        if fragment_o.is_some_and(str::is_empty) {
            return Err(Error::MalformedDID("DID fragment must not be empty".into()));
        }

        Ok(Self {
            method,
            method_specific_id,
            path_o,
            query_o,
            fragment_o,
        })
    }
}
