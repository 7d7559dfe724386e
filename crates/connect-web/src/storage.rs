//! Local storage token store

use connect_core::session::{TOKEN_STORAGE_KEY, TokenStore};
use connect_core::{ConsoleError, Result};

/// Keeps the bearer token under `jwtToken` in `window.localStorage`
pub struct LocalStorageTokenStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStorageTokenStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("localStorage unavailable; token will not persist");
        }
        Self { storage }
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        self.storage
            .as_ref()?
            .get_item(TOKEN_STORAGE_KEY)
            .ok()
            .flatten()
    }

    fn save(&self, token: &str) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        storage
            .set_item(TOKEN_STORAGE_KEY, token)
            .map_err(|e| ConsoleError::Validation(format!("could not store token: {e:?}")))
    }
}
