//! キー・バリューストレージ抽象
//!
//! ブラウザの localStorage、CLI のファイル保存、テスト用のメモリ保存を
//! 同じインターフェースで扱う。値は常にテキスト全体で読み書きする。

use crate::error::Result;
use std::collections::HashMap;

pub trait KeyValueStorage {
    /// キーが存在しなければ `None`
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// 値全体を置き換える
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// 存在しないキーの削除はエラーにしない
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// メモリ上のストレージ
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
