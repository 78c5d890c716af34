//! localStorage バックエンド

use msecho_common::{Error, KeyValueStorage, Result};
use wasm_bindgen::JsValue;
use web_sys::Storage;

fn js_error(action: &str, e: JsValue) -> Error {
    Error::Storage(format!("{}: {:?}", action, e))
}

/// `window.localStorage` を使うストレージ
pub struct LocalStorage {
    inner: Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| Error::Storage("window が存在しません".into()))?;
        let inner = window
            .local_storage()
            .map_err(|e| js_error("localStorage", e))?
            .ok_or_else(|| Error::Storage("localStorage が利用できません".into()))?;
        Ok(Self { inner })
    }
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_item(key).map_err(|e| js_error("getItem", e))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.inner.set_item(key, value).map_err(|e| js_error("setItem", e))
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.inner.remove_item(key).map_err(|e| js_error("removeItem", e))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_local_storage_roundtrip() {
        let mut storage = LocalStorage::open().unwrap();
        storage.set_item("msecho-test", "[]").unwrap();
        assert_eq!(storage.get_item("msecho-test").unwrap().as_deref(), Some("[]"));
        storage.remove_item("msecho-test").unwrap();
        assert_eq!(storage.get_item("msecho-test").unwrap(), None);
    }
}
