//! 表示テーマの設定

use crate::error::Result;
use crate::storage::{KeyValueStore, DARK_MODE_KEY};

/// 表示テーマ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

/// 保存済みのテーマを読み込む（未設定・不正値はLight）
pub fn load_theme<S: KeyValueStore + ?Sized>(store: &S) -> Result<Theme> {
    let theme = match store.get(DARK_MODE_KEY)?.as_deref() {
        Some("true") => Theme::Dark,
        _ => Theme::Light,
    };
    Ok(theme)
}

pub fn save_theme<S: KeyValueStore + ?Sized>(store: &S, theme: Theme) -> Result<()> {
    store.set(DARK_MODE_KEY, if theme.is_dark() { "true" } else { "false" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_theme_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(load_theme(&store).unwrap(), Theme::Light);

        save_theme(&store, Theme::Dark).unwrap();
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
        assert_eq!(load_theme(&store).unwrap(), Theme::Dark);
    }

    #[test]
    fn test_invalid_value_is_light() {
        let store = MemoryStore::new();
        store.set(DARK_MODE_KEY, "yes").unwrap();
        assert_eq!(load_theme(&store).unwrap(), Theme::Light);
    }
}
