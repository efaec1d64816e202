//! バックエンドAPI連携
//!
//! - 予測サービス: /predict, /predict-simple, /auth/me, /auth/login, /auth/register
//! - 画像解析サービス: /upload（multipart）
//!
//! 失敗ステータスは `detail` があればそのまま、なければ用途別の定型文にする。

use crate::config::Config;
use crate::error::ApiError;
use fetal_care_common::{
    AnalysisResult, Credentials, ImageFile, PredictionPayload, PredictionResponse, Registration,
    Reply, SubmissionMode, TokenResponse, UserProfile,
};
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// 予測失敗時の定型文
pub const PREDICTION_FALLBACK: &str =
    "Server error occurred. Please check if all values are within valid ranges.";
/// アップロード失敗時の定型文
pub const UPLOAD_FALLBACK: &str = "Upload failed";
/// 本人確認失敗時の定型文
pub const PROFILE_FALLBACK: &str = "Failed to fetch user details";
const AUTH_FALLBACK: &str = "Authentication failed";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    prediction_url: String,
    image_url: String,
}

impl ApiClient {
    pub fn new(prediction_url: &str, image_url: &str, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            prediction_url: prediction_url.trim_end_matches('/').to_string(),
            image_url: image_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Self::new(
            &config.prediction_url(),
            &config.image_url(),
            config.timeout_seconds.map(Duration::from_secs),
        )
    }

    /// 予測（モードでエンドポイントを切り替える）
    pub async fn predict(
        &self,
        payload: &PredictionPayload,
        mode: SubmissionMode,
        token: &str,
    ) -> Result<PredictionResponse, ApiError> {
        let endpoint = match mode {
            SubmissionMode::Simple => "predict-simple",
            SubmissionMode::Advanced => "predict",
        };
        tracing::info!("予測リクエスト: /{} ({}項目)", endpoint, payload.len());

        let request = self
            .http
            .post(format!("{}/{}", self.prediction_url, endpoint))
            .bearer_auth(token)
            .json(payload);
        send(request, PREDICTION_FALLBACK).await
    }

    /// ログイン中ユーザー（401はセッション切れ）
    pub async fn me(&self, token: &str) -> Result<UserProfile, ApiError> {
        let request = self
            .http
            .get(format!("{}/auth/me", self.prediction_url))
            .bearer_auth(token);
        match send(request, PROFILE_FALLBACK).await {
            Err(ApiError::Server { status: 401, .. }) => Err(ApiError::Session),
            other => other,
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        let request = self
            .http
            .post(format!("{}/auth/login", self.prediction_url))
            .json(credentials);
        send(request, AUTH_FALLBACK).await
    }

    pub async fn register(&self, registration: &Registration) -> Result<serde_json::Value, ApiError> {
        let request = self
            .http
            .post(format!("{}/auth/register", self.prediction_url))
            .json(registration);
        send(request, AUTH_FALLBACK).await
    }

    /// 画像を選択順に `files` パートとして送る
    pub async fn upload(&self, files: &[ImageFile]) -> Result<AnalysisResult, ApiError> {
        let mut form = Form::new();
        for file in files {
            let data = tokio::fs::read(&file.path)
                .await
                .map_err(|source| ApiError::ReadFile { name: file.name.clone(), source })?;
            let part = Part::bytes(data)
                .file_name(file.name.clone())
                .mime_str(&file.mime_type)
                .map_err(|_| ApiError::InvalidFileType {
                    name: file.name.clone(),
                    mime: file.mime_type.clone(),
                })?;
            form = form.part("files", part);
        }
        tracing::info!("アップロード: {}枚", files.len());

        let request = self
            .http
            .post(format!("{}/upload", self.image_url))
            .multipart(form);
        send(request, UPLOAD_FALLBACK).await
    }
}

/// リクエスト送信と応答の振り分け（共通処理）
async fn send<T: DeserializeOwned>(request: RequestBuilder, fallback: &str) -> Result<T, ApiError> {
    let response = request.send().await.map_err(|e| {
        tracing::warn!("通信エラー: {}", e);
        ApiError::Transport(e.to_string())
    })?;

    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(|e| {
        tracing::warn!("応答の受信に失敗: {}", e);
        ApiError::Transport(e.to_string())
    })?;

    // 空の成功応答（201など）は null として扱う
    let payload: &[u8] = if body.is_empty() { b"null" } else { &body };

    match Reply::<T>::from_parts(status, payload) {
        Ok(Reply::Success(value)) => Ok(value),
        Ok(Reply::Failure { status, detail }) => {
            tracing::warn!("サーバーエラー: status={} detail={:?}", status, detail);
            Err(ApiError::Server {
                status,
                message: detail.unwrap_or_else(|| fallback.to_string()),
            })
        }
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}
