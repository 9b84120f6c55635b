use anyhow::Result;

use crate::{error::CredentialError, storage::LocalStorage};

/// Storage key the API key lives under.
pub const CREDENTIAL_KEY: &str = "openweather_api_key";

/// The upstream API key. Opaque; only checked for being non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Trim `raw` and reject it if nothing is left.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CredentialError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CredentialError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<Credential>>;

    /// Overwrites whatever was stored before.
    fn save(&self, credential: &Credential) -> Result<()>;
}

/// Keeps the API key in plain text under [`CREDENTIAL_KEY`] of a [`LocalStorage`] file.
#[derive(Debug, Clone)]
pub struct LocalCredentialStore {
    storage: LocalStorage,
}

impl LocalCredentialStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }
}

impl CredentialStore for LocalCredentialStore {
    fn load(&self) -> Result<Option<Credential>> {
        // A blank stored value is as good as none.
        Ok(self
            .storage
            .get_item(CREDENTIAL_KEY)?
            .and_then(|raw| Credential::new(raw).ok()))
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        self.storage.set_item(CREDENTIAL_KEY, credential.expose())?;
        tracing::info!(path = %self.storage.path().display(), "Stored API key");
        Ok(())
    }
}
