//! 予測フロー
//!
//! 入力（ファイル・引数・対話）→ 入力チェック → 送信 → 結果

use crate::api::ApiClient;
use crate::error::{ClientError, Result};
use dialoguer::Input;
use fetal_care_common::{FormAction, PredictionForm, SubmissionMode, SubmitRequest};
use std::path::Path;

/// `name=value` 形式の引数を分解
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| ClientError::Input(format!("name=value 形式で指定してください: {}", raw)))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

/// JSONファイルから入力値を読み込む（数値・文字列どちらも可）
pub fn load_form_file(path: &Path) -> Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    let object = value
        .as_object()
        .ok_or_else(|| ClientError::Input("入力ファイルはJSONオブジェクトにしてください".into()))?;

    let entries = object
        .iter()
        .map(|(name, v)| {
            let raw = match v {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            (name.clone(), raw)
        })
        .collect();
    Ok(entries)
}

/// フォームに入力値を反映する
pub fn fill_form(
    form: &mut PredictionForm,
    file_entries: Option<Vec<(String, String)>>,
    assignments: &[String],
) -> Result<()> {
    if let Some(entries) = file_entries {
        form.reduce(FormAction::ReplaceAll(entries))?;
    }
    for raw in assignments {
        let (name, value) = parse_assignment(raw)?;
        form.reduce(FormAction::SetField { name, value })?;
    }
    Ok(())
}

/// 対話式で必須フィールドを入力
pub fn prompt_fields(form: &mut PredictionForm) -> Result<()> {
    let disclosure = form.disclosure();
    for field in disclosure.primary.iter().chain(disclosure.advanced.iter()) {
        let current = form.form().get(field.name).to_string();
        let value: String = Input::new()
            .with_prompt(field.label())
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?;
        form.reduce(FormAction::SetField {
            name: field.name.to_string(),
            value,
        })?;
    }
    Ok(())
}

/// 送信して結果を反映する
///
/// 入力不備・サーバーエラーはフォームの `error()` に入る。
pub async fn submit(client: &ApiClient, form: &mut PredictionForm, token: &str) -> Result<()> {
    let (ticket, mode, payload) = match form.begin_submit() {
        SubmitRequest::Ready { ticket, mode, payload } => (ticket, mode, payload),
        SubmitRequest::Blocked(message) => {
            tracing::debug!("送信中止: {}", message);
            return Ok(());
        }
        SubmitRequest::Busy => return Ok(()),
    };

    let action = match client.predict(&payload, mode, token).await {
        Ok(response) => FormAction::SubmitSucceeded(ticket, response),
        Err(e) => FormAction::SubmitFailed(ticket, e.to_string()),
    };
    form.reduce(action)?;
    Ok(())
}

pub fn new_form(mode: SubmissionMode, expand_advanced: bool) -> Result<PredictionForm> {
    let mut form = PredictionForm::new(mode);
    if expand_advanced {
        form.reduce(FormAction::ToggleAdvanced)?;
    }
    Ok(form)
}
