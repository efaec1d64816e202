//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 未登録のフィールド名
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// 必須フィールドの未入力・数値変換失敗（送信前に検出）
    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
