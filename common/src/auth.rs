//! ログイン・登録フォームとセッション

use crate::error::{Error, Result};
use crate::response::TokenResponse;
use crate::storage::{KeyValueStore, SESSION_KEY};
use serde::{Deserialize, Serialize};

/// 利用者の役割
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Patient,
    Doctor,
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            _ => Err(format!("Unknown role: {}. Use patient or doctor", s)),
        }
    }
}

/// ログイン入力
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// 登録入力
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

impl Credentials {
    pub fn validate(&self) -> Result<()> {
        require(&[("Email", &self.email), ("Password", &self.password)])
    }
}

impl Registration {
    pub fn validate(&self) -> Result<()> {
        require(&[
            ("Full Name", &self.full_name),
            ("Email", &self.email),
            ("Password", &self.password),
        ])
    }
}

fn require(fields: &[(&str, &String)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| *label)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "Please fill in all fields. Missing: {}",
            missing.join(", ")
        )))
    }
}

/// 保存されるログインセッション
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
}

fn bearer() -> String {
    "bearer".to_string()
}

impl From<TokenResponse> for Session {
    fn from(token: TokenResponse) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
        }
    }
}

impl Session {
    /// 保存済みのセッション（壊れている場合はNone）
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Self>> {
        let Some(raw) = store.get(SESSION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("セッション情報が不正です: {}", e);
                Ok(None)
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<()> {
        store.set(SESSION_KEY, &serde_json::to_string(self)?)
    }

    /// ログアウト（セッション破棄）
    pub fn clear<S: KeyValueStore + ?Sized>(store: &S) -> Result<()> {
        store.remove(SESSION_KEY)
    }
}
