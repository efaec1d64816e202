//! ログインセッションの管理

use crate::api::ApiClient;
use crate::error::{ApiError, ClientError, Result};
use fetal_care_common::storage::KeyValueStore;
use fetal_care_common::{Credentials, Registration, Session, UserProfile};

pub const TOKEN_ENV: &str = "FETAL_CARE_TOKEN";

/// セッションの出どころ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    Env,
    Stored,
}

fn env_token() -> Option<String> {
    std::env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty())
}

fn resolve_session<S: KeyValueStore + ?Sized>(
    store: &S,
    env_token: Option<String>,
) -> Result<(Session, SessionSource)> {
    if let Some(token) = env_token {
        let session = Session { access_token: token, token_type: "bearer".into() };
        return Ok((session, SessionSource::Env));
    }
    let session = Session::load(store)?.ok_or(ClientError::NotLoggedIn)?;
    Ok((session, SessionSource::Stored))
}

/// 現在のセッション（環境変数 `FETAL_CARE_TOKEN` を優先）
pub fn current_session<S: KeyValueStore + ?Sized>(store: &S) -> Result<Session> {
    resolve_session(store, env_token()).map(|(session, _)| session)
}

pub async fn login<S: KeyValueStore + ?Sized>(
    client: &ApiClient,
    store: &S,
    credentials: &Credentials,
) -> Result<Session> {
    credentials.validate()?;
    let session: Session = client.login(credentials).await?.into();
    session.save(store)?;
    tracing::info!("ログイン: {}", credentials.email);
    Ok(session)
}

pub async fn register(client: &ApiClient, registration: &Registration) -> Result<()> {
    registration.validate()?;
    client.register(registration).await?;
    tracing::info!("登録: {} ({:?})", registration.email, registration.role);
    Ok(())
}

pub fn logout<S: KeyValueStore + ?Sized>(store: &S) -> Result<()> {
    Session::clear(store)?;
    Ok(())
}

/// 本人確認。401ならセッションを破棄してエラー
pub async fn verify<S: KeyValueStore + ?Sized>(
    client: &ApiClient,
    store: &S,
) -> Result<(Session, UserProfile)> {
    verify_with(client, store, env_token()).await
}

/// `env_token` を明示して本人確認する
///
/// 環境変数のトークンが期限切れでも保存済みセッションは消さない。
pub async fn verify_with<S: KeyValueStore + ?Sized>(
    client: &ApiClient,
    store: &S,
    env_token: Option<String>,
) -> Result<(Session, UserProfile)> {
    let (session, source) = resolve_session(store, env_token)?;
    match client.me(&session.access_token).await {
        Ok(profile) => Ok((session, profile)),
        Err(ApiError::Session) => match source {
            SessionSource::Env => {
                tracing::warn!("{} のトークンが期限切れです", TOKEN_ENV);
                Err(ClientError::EnvTokenExpired)
            }
            SessionSource::Stored => {
                tracing::warn!("セッション切れのためログアウトします");
                Session::clear(store)?;
                Err(ApiError::Session.into())
            }
        },
        Err(e) => Err(e.into()),
    }
}
