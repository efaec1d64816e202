//! 送信前の入力チェック

use crate::fields::{fields_for_mode, SubmissionMode};
use crate::form::FormState;

/// 入力チェック結果（送信のたびに作り直す）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// `missing_fields` と `invalid_fields` が両方空のときだけ true
    ///
    /// 数値にならない値（NaN・無限大を含む）も送信不可として扱う。
    pub ok: bool,
    /// 未入力フィールドのラベル（宣言順）
    pub missing_fields: Vec<String>,
    /// 数値として解釈できないフィールドのラベル（宣言順）
    pub invalid_fields: Vec<String>,
}

impl ValidationResult {
    /// 利用者に表示するメッセージ（okならNone）
    pub fn message(&self) -> Option<String> {
        if !self.missing_fields.is_empty() {
            return Some(format!(
                "Please fill in all fields. Missing: {}",
                self.missing_fields.join(", ")
            ));
        }
        if !self.invalid_fields.is_empty() {
            return Some(format!(
                "Please enter numeric values. Invalid: {}",
                self.invalid_fields.join(", ")
            ));
        }
        None
    }
}

/// 入力値を数値として解釈する（NaN・無限大は不可）
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// モードで必須のフィールドをチェック
pub fn validate(form: &FormState, mode: SubmissionMode) -> ValidationResult {
    let mut missing_fields = Vec::new();
    let mut invalid_fields = Vec::new();

    for field in fields_for_mode(mode) {
        let raw = form.get(field.name);
        if raw.trim().is_empty() {
            missing_fields.push(field.label());
        } else if parse_number(raw).is_none() {
            invalid_fields.push(field.label());
        }
    }

    ValidationResult {
        ok: missing_fields.is_empty() && invalid_fields.is_empty(),
        missing_fields,
        invalid_fields,
    }
}
