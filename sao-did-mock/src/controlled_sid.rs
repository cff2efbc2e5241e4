use crate::MockSIDLedger;
use rand::RngCore;
use sao_did::{multicodec, Secp256k1Provider, SIDRecord, DID};

/// The controller side of a `did:sid`: holds the current signing key and publishes key rotations
/// to a `MockSIDLedger`.
pub struct ControlledSID {
    did: DID,
    signing_key: k256::ecdsa::SigningKey,
    signing_key_name: String,
    version_id: String,
}

impl ControlledSID {
    /// Creates `did:sid:<id>` with a fresh signing key and X25519 key, and publishes it.
    pub fn create(id: &str, ledger: &MockSIDLedger) -> anyhow::Result<Self> {
        Self::create_at(id, ledger, time::OffsetDateTime::now_utc())
    }
    pub fn create_at(
        id: &str,
        ledger: &MockSIDLedger,
        updated: time::OffsetDateTime,
    ) -> anyhow::Result<Self> {
        let did = DID::new(sao_did::SID_METHOD, id)?;
        let (signing_key, signing_key_name, sid_record) = Self::generate_new_keys()?;
        let version_id = ledger.publish_at(&did, sid_record, updated)?;
        Ok(Self {
            did,
            signing_key,
            signing_key_name,
            version_id,
        })
    }
    /// Rotates in fresh keys, superseding the current version as of `updated`.
    pub fn rotate_at(
        &mut self,
        ledger: &MockSIDLedger,
        updated: time::OffsetDateTime,
    ) -> anyhow::Result<()> {
        let (signing_key, signing_key_name, sid_record) = Self::generate_new_keys()?;
        self.version_id = ledger.publish_at(&self.did, sid_record, updated)?;
        self.signing_key = signing_key;
        self.signing_key_name = signing_key_name;
        Ok(())
    }
    pub fn rotate(&mut self, ledger: &MockSIDLedger) -> anyhow::Result<()> {
        self.rotate_at(ledger, time::OffsetDateTime::now_utc())
    }
    pub fn did(&self) -> &DID {
        &self.did
    }
    pub fn version_id(&self) -> &str {
        self.version_id.as_str()
    }
    /// Key id of the current signing key, pinned to the current version.
    pub fn key_id(&self) -> anyhow::Result<DID> {
        let key_id = DID::parse(
            format!(
                "{}?versionId={}#{}",
                self.did, self.version_id, self.signing_key_name
            )
            .as_str(),
        )?;
        Ok(key_id)
    }
    /// Provider signing with the current key under `key_id()`.
    pub fn provider(&self) -> anyhow::Result<Secp256k1Provider> {
        Ok(Secp256k1Provider::for_key_id(
            self.key_id()?,
            self.signing_key.clone(),
        )?)
    }

    fn generate_new_keys() -> anyhow::Result<(k256::ecdsa::SigningKey, String, SIDRecord)> {
        let signing_key = k256::ecdsa::SigningKey::random(&mut rand::rngs::OsRng);
        let signing = encode_key(
            multicodec::SECP256K1_PUB,
            signing_key.verifying_key().to_encoded_point(true).as_bytes(),
        );
        let mut x25519_public_key = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut x25519_public_key);
        let encryption = encode_key(multicodec::X25519_PUB, &x25519_public_key);

        let signing_key_name = SIDRecord::key_name(signing.as_str())?.to_string();
        let sid_record =
            SIDRecord::from_signing_and_encryption_keys(signing.as_str(), encryption.as_str())?;
        Ok((signing_key, signing_key_name, sid_record))
    }
}

/// base58btc multibase of the multicodec-prefixed key, as published on the ledger.
pub fn encode_key(key_type: u64, public_key_bytes: &[u8]) -> String {
    let mut key_bytes = multicodec::encode_uvarint(key_type);
    key_bytes.extend_from_slice(public_key_bytes);
    multibase::encode(multibase::Base::Base58Btc, key_bytes)
}
