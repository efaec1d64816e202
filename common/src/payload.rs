//! 予測リクエストの組み立て
//!
//! アクティブなモードの必須フィールドだけを数値に変換して送る。
//! 簡易モードではadvancedの値が残っていても含めない。

use crate::error::{Error, Result};
use crate::fields::{fields_for_mode, SubmissionMode};
use crate::form::FormState;
use crate::validate::{parse_number, validate};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// フィールド名 → 数値（宣言順を保持）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionPayload {
    entries: Vec<(&'static str, f64)>,
}

impl PredictionPayload {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }
}

impl Serialize for PredictionPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// 入力チェック後にペイロードを作成
///
/// 未入力・数値変換失敗はいずれも `Error::Validation`（0には置き換えない）。
pub fn build_prediction_payload(form: &FormState, mode: SubmissionMode) -> Result<PredictionPayload> {
    let validation = validate(form, mode);
    if let Some(message) = validation.message() {
        return Err(Error::Validation(message));
    }

    let mut entries = Vec::new();
    for field in fields_for_mode(mode) {
        let value = parse_number(form.get(field.name))
            .ok_or_else(|| Error::Validation(format!("Invalid number: {}", field.label())))?;
        entries.push((field.name, value));
    }

    Ok(PredictionPayload { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::PREDICTION_FIELDS;

    #[test]
    fn test_simple_payload_end_to_end() {
        let mut form = FormState::new();
        form.set_field("accelerations", "3").unwrap();
        form.set_field("fetal_movement", "0").unwrap();
        form.set_field("uterine_contractions", "4").unwrap();
        // 古いadvancedの値は含めない
        form.set_field("histogram_width", "64").unwrap();

        let payload = build_prediction_payload(&form, SubmissionMode::Simple).unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "accelerations": 3.0,
                "fetal_movement": 0.0,
                "uterine_contractions": 4.0
            })
        );
        assert_eq!(payload.len(), 3);
    }

    #[test]
    fn test_advanced_payload_has_every_field() {
        let mut form = FormState::new();
        for (i, field) in PREDICTION_FIELDS.iter().enumerate() {
            form.set_field(field.name, i.to_string()).unwrap();
        }

        let payload = build_prediction_payload(&form, SubmissionMode::Advanced).unwrap();
        let keys: Vec<&str> = payload.keys().collect();
        let declared: Vec<&str> = PREDICTION_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(keys, declared);
        assert_eq!(payload.get("histogram_tendency"), Some(19.0));
    }

    #[test]
    fn test_non_numeric_fails_whole_payload() {
        let mut form = FormState::new();
        form.set_field("accelerations", "3").unwrap();
        form.set_field("fetal_movement", "x").unwrap();
        form.set_field("uterine_contractions", "4").unwrap();

        let err = build_prediction_payload(&form, SubmissionMode::Simple).unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("Fetal Movement")));
    }

    #[test]
    fn test_missing_fails_payload() {
        let form = FormState::new();
        let err = build_prediction_payload(&form, SubmissionMode::Simple).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please fill in all fields. Missing: Accelerations, Fetal Movement, Uterine Contractions"
        );
    }
}
