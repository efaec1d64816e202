//! ファイル保存のキー/値ストア
//!
//! キーごとに `<dir>/<key>.json` を1ファイル作る。

use fetal_care_common::storage::KeyValueStore;
use fetal_care_common::{Error, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// キーに対応するファイルパス
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(Error::Storage(format!("不正なキー: {}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path)?;
        // UTF-8 でない内容は置換文字入りの文字列として返し、解釈は呼び出し側に任せる
        match String::from_utf8(bytes) {
            Ok(text) => Ok(Some(text)),
            Err(e) => {
                tracing::warn!("UTF-8 でない保存データ: {}", path.display());
                Ok(Some(String::from_utf8_lossy(e.as_bytes()).into_owned()))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, value)?;
        tracing::debug!("保存: {}", path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));

        assert_eq!(store.get("afi_history").unwrap(), None);
        store.set("afi_history", "[]").unwrap();
        assert_eq!(store.get("afi_history").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("data").join("afi_history.json").exists());

        store.remove("afi_history").unwrap();
        assert_eq!(store.get("afi_history").unwrap(), None);
        // 存在しないキーの削除はエラーにしない
        store.remove("afi_history").unwrap();
    }

    #[test]
    fn test_non_utf8_content_is_returned_lossy() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("afi_history.json"), [0xff, 0xfe, b'[']).unwrap();
        let store = FileStore::new(dir.path());

        let raw = store.get("afi_history").unwrap().unwrap();
        assert!(raw.ends_with('['));
        assert!(raw.contains('\u{FFFD}'));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let store = FileStore::new("/tmp");
        assert!(store.path_for("../etc/passwd").is_err());
        assert!(store.path_for("").is_err());
    }
}
