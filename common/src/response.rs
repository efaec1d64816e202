//! APIレスポンスの型定義
//!
//! ステータスコードで成功・失敗を振り分け、
//! 描画側が任意フィールドを直接調べなくて済むようにする。

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 予測結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: String,
    /// 0〜100
    pub confidence: f64,
    #[serde(default)]
    pub probabilities: BTreeMap<String, f64>,
}

/// 画像1枚ごとのAFI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AfiFileResult {
    pub filename: String,
    pub afi: f64,
}

/// AFI解析結果（作成後は変更しない）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub results: Vec<AfiFileResult>,
    pub average_afi: f64,
}

/// ログイン中ユーザー情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    pub role: String,
}

/// ログイン応答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// 失敗時のボディ `{ detail?: ... }`
#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// サーバー応答（成功/失敗）
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Success(T),
    Failure { status: u16, detail: Option<String> },
}

impl<T: DeserializeOwned> Reply<T> {
    /// ステータスとボディから応答を組み立てる
    ///
    /// 成功時のボディが型に合わない場合はエラー。
    /// 失敗時のボディは壊れていても `detail: None` として扱う。
    pub fn from_parts(status: u16, body: &[u8]) -> Result<Self> {
        if (200..300).contains(&status) {
            let value = serde_json::from_slice(body)?;
            return Ok(Reply::Success(value));
        }

        let detail = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(detail_message);

        Ok(Reply::Failure { status, detail })
    }
}

/// `detail` を表示用文字列にする
///
/// 文字列はそのまま、検証エラー配列は各 `msg` を連結する。
fn detail_message(detail: serde_json::Value) -> Option<String> {
    match detail {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(str::to_string)
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
