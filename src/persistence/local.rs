//! Browser LocalStorage backend

use wasm_bindgen::JsValue;
use web_sys::Storage;

use super::{KeyValueStore, StorageError, StorageResult};

fn backend_error(err: JsValue) -> StorageError {
    StorageError::Backend(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// `window.localStorage`, if the browser grants it
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable; scores will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> StorageResult<&Storage> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage()?.get_item(key).map_err(backend_error)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.storage()?.set_item(key, value).map_err(backend_error)
    }
}
