//! 永続化先の抽象化
//!
//! ブラウザのlocalStorage相当のキー/値ストア。
//! 実体（ファイル等）は呼び出し側が注入する。

use crate::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;

/// 解析履歴のキー
pub const HISTORY_KEY: &str = "afi_history";
/// ダークモード設定のキー
pub const DARK_MODE_KEY: &str = "afi_dark_mode";
/// ログインセッションのキー
pub const SESSION_KEY: &str = "user";

/// 文字列のキー/値ストア
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// メモリ上のストア（テスト・一時利用）
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
