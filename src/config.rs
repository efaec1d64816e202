use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 予測APIのデフォルトURL
pub const DEFAULT_PREDICTION_URL: &str = "http://localhost:8000/api";
/// 画像解析サーバーのデフォルトURL
pub const DEFAULT_IMAGE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub prediction_url: String,
    pub image_url: String,
    /// 未設定ならreqwestの既定（タイムアウトなし）
    pub timeout_seconds: Option<u64>,
    /// 履歴・セッションの保存先（未設定ならデータディレクトリ）
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prediction_url: DEFAULT_PREDICTION_URL.into(),
            image_url: DEFAULT_IMAGE_URL.into(),
            timeout_seconds: None,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ClientError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("fetal-care").join("config.json"))
    }

    /// 予測APIのURL（環境変数を優先）
    pub fn prediction_url(&self) -> String {
        std::env::var("FETAL_CARE_API_URL").unwrap_or_else(|_| self.prediction_url.clone())
    }

    /// 画像解析サーバーのURL（環境変数を優先）
    pub fn image_url(&self) -> String {
        std::env::var("FETAL_CARE_IMAGE_URL").unwrap_or_else(|_| self.image_url.clone())
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir()
            .ok_or_else(|| ClientError::Config("データディレクトリが見つかりません".into()))?;
        Ok(base.join("fetal-care"))
    }
}
