use crate::{encode_dag_cbor, ContentId, DIDProvider, DetachedJWS, Error, Result};

/// A JWS whose payload is the content identifier of a separately carried CBOR block.
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedJWS {
    pub jws: DetachedJWS,
    /// Content identifier of `linked_block`; absent for a JWS that was not created as linked.
    #[serde(rename = "link", default, skip_serializing_if = "Option::is_none")]
    pub link_o: Option<ContentId>,
    #[serde(default)]
    pub linked_block: Vec<u8>,
}

impl LinkedJWS {
    /// Encodes `payload` as a canonical CBOR block and has `provider` sign its content identifier.
    pub fn create<T: serde::Serialize + ?Sized>(
        payload: &T,
        provider: &dyn DIDProvider,
    ) -> Result<Self> {
        let linked_block = encode_dag_cbor(payload)?;
        let link = ContentId::for_dag_cbor_block(linked_block.as_slice());
        tracing::debug!(%link, "creating linked JWS");
        let jws = provider.create_jws(link.to_bytes().as_slice())?;
        Ok(Self {
            jws,
            link_o: Some(link),
            linked_block,
        })
    }
    /// Checks that `linked_block` hashes to `link` and that `link` is what was signed.  This does
    /// not verify the signature itself.
    pub fn verify_linked_block(&self) -> Result<()> {
        let computed = ContentId::for_dag_cbor_block(self.linked_block.as_slice());
        let link = self
            .link_o
            .as_ref()
            .ok_or_else(|| Error::DecodeError("linked JWS has no link".into()))?;
        if *link != computed {
            return Err(Error::InvalidSignature(
                format!(
                    "linked block hashes to {}, but link is {}",
                    computed, link
                )
                .into(),
            ));
        }
        let signed = ContentId::try_from_bytes(self.jws.decoded_payload_bytes()?.as_slice())?;
        if signed != computed {
            return Err(Error::InvalidSignature(
                format!(
                    "linked block hashes to {}, but the JWS payload is {}",
                    computed, signed
                )
                .into(),
            ));
        }
        Ok(())
    }
}

impl From<DetachedJWS> for LinkedJWS {
    fn from(jws: DetachedJWS) -> Self {
        Self {
            jws,
            link_o: None,
            linked_block: Vec::new(),
        }
    }
}
