//! 予測画面の状態
//!
//! 状態は `reduce` でのみ更新する。画面（コマンド）ごとに生成し、
//! プロセス全体で共有しない。

use crate::error::{Error, Result};
use crate::fields::{fields_for_mode, FieldGroup, FieldSpec, SubmissionMode};
use crate::form::FormState;
use crate::payload::{build_prediction_payload, PredictionPayload};
use crate::response::PredictionResponse;
use crate::submission::{SubmissionPhase, SubmissionTracker, Ticket};

/// 予測画面への操作
#[derive(Debug, Clone)]
pub enum FormAction {
    SetField { name: String, value: String },
    SetMode(SubmissionMode),
    ToggleAdvanced,
    Reset,
    ReplaceAll(Vec<(String, String)>),
    SubmitSucceeded(Ticket, PredictionResponse),
    SubmitFailed(Ticket, String),
}

/// 送信開始の結果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRequest {
    Ready {
        ticket: Ticket,
        mode: SubmissionMode,
        payload: PredictionPayload,
    },
    /// 入力不備（メッセージは `error` にも設定済み）
    Blocked(String),
    /// 送信中のため無視
    Busy,
}

/// 入力欄の表示区分
#[derive(Debug, Clone, PartialEq)]
pub struct Disclosure {
    pub primary: Vec<&'static FieldSpec>,
    pub advanced: Vec<&'static FieldSpec>,
    /// 詳細欄を展開しているか
    pub expanded: bool,
}

/// 予測画面の状態
#[derive(Debug, Clone, Default)]
pub struct PredictionForm {
    form: FormState,
    mode: SubmissionMode,
    show_advanced: bool,
    tracker: SubmissionTracker,
    result: Option<PredictionResponse>,
    error: Option<String>,
}

impl PredictionForm {
    pub fn new(mode: SubmissionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// 状態を更新する
    ///
    /// 完了通知が古い送信のものであれば `Ok(false)` を返し、状態は変えない。
    pub fn reduce(&mut self, action: FormAction) -> Result<bool> {
        match action {
            FormAction::SetField { name, value } => {
                self.form.set_field(&name, value)?;
            }
            FormAction::SetMode(mode) => {
                self.mode = mode;
            }
            FormAction::ToggleAdvanced => {
                self.show_advanced = !self.show_advanced;
            }
            FormAction::Reset => {
                self.form.reset();
                self.tracker.abandon();
                self.result = None;
                self.error = None;
            }
            FormAction::ReplaceAll(entries) => {
                self.form.replace_all(entries)?;
            }
            FormAction::SubmitSucceeded(ticket, response) => {
                if !self.tracker.complete(ticket, true) {
                    return Ok(false);
                }
                self.result = Some(response);
                self.error = None;
            }
            FormAction::SubmitFailed(ticket, message) => {
                if !self.tracker.complete(ticket, false) {
                    return Ok(false);
                }
                self.result = None;
                self.error = Some(message);
            }
        }
        Ok(true)
    }

    /// 入力チェックして送信を開始する
    pub fn begin_submit(&mut self) -> SubmitRequest {
        if self.tracker.is_submitting() {
            return SubmitRequest::Busy;
        }

        match build_prediction_payload(&self.form, self.mode) {
            Ok(payload) => match self.tracker.begin() {
                Some(ticket) => SubmitRequest::Ready {
                    ticket,
                    mode: self.mode,
                    payload,
                },
                None => SubmitRequest::Busy,
            },
            Err(Error::Validation(message)) => {
                self.error = Some(message.clone());
                SubmitRequest::Blocked(message)
            }
            Err(e) => {
                let message = e.to_string();
                self.error = Some(message.clone());
                SubmitRequest::Blocked(message)
            }
        }
    }

    /// 表示区分（必須判定と同じ導出）
    pub fn disclosure(&self) -> Disclosure {
        let (primary, advanced): (Vec<_>, Vec<_>) = fields_for_mode(self.mode)
            .into_iter()
            .partition(|f| f.group == FieldGroup::Primary);
        Disclosure {
            primary,
            advanced,
            expanded: self.show_advanced,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn mode(&self) -> SubmissionMode {
        self.mode
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.tracker.phase()
    }

    pub fn result(&self) -> Option<&PredictionResponse> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
