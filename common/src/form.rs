//! フォーム入力値
//!
//! 値は入力されたままの文字列で保持し、数値変換は送信時に行う。

use crate::error::{Error, Result};
use crate::fields::{find_field, FieldSpec, PREDICTION_FIELDS};

/// フィールド名 → 入力文字列（宣言順）
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    values: Vec<(&'static FieldSpec, String)>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            values: PREDICTION_FIELDS.iter().map(|f| (f, String::new())).collect(),
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1フィールドだけ上書きする
    pub fn set_field(&mut self, name: &str, raw_value: impl Into<String>) -> Result<()> {
        let slot = self
            .values
            .iter_mut()
            .find(|(spec, _)| spec.name == name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))?;
        slot.1 = raw_value.into();
        Ok(())
    }

    /// 入力値を取得（未登録の名前は空文字）
    pub fn get(&self, name: &str) -> &str {
        self.values
            .iter()
            .find(|(spec, _)| spec.name == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// 全フィールドを空に戻す
    pub fn reset(&mut self) {
        for (_, value) in &mut self.values {
            value.clear();
        }
    }

    /// 入力値を丸ごと置き換える
    ///
    /// 未登録の名前が含まれる場合は何も変更せずにエラーを返す。
    pub fn replace_all<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut next = Self::default();
        for (name, value) in entries {
            let name = name.as_ref();
            if find_field(name).is_none() {
                return Err(Error::UnknownField(name.to_string()));
            }
            next.set_field(name, value)?;
        }
        *self = next;
        Ok(())
    }

    /// (フィールド定義, 入力値) を宣言順に返す
    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldSpec, &str)> {
        self.values.iter().map(|(spec, v)| (*spec, v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_field_only_touches_one_entry() {
        let mut form = FormState::new();
        form.set_field("accelerations", "3").unwrap();
        form.set_field("fetal_movement", "0").unwrap();
        form.set_field("accelerations", "4").unwrap();

        assert_eq!(form.get("accelerations"), "4");
        assert_eq!(form.get("fetal_movement"), "0");
        assert_eq!(form.get("uterine_contractions"), "");
    }

    #[test]
    fn test_set_unknown_field() {
        let mut form = FormState::new();
        let err = form.set_field("baseline_value", "120").unwrap_err();
        assert!(matches!(err, Error::UnknownField(_)));
        assert_eq!(form, FormState::new());
    }

    #[test]
    fn test_reset() {
        let mut form = FormState::new();
        form.set_field("histogram_mean", "137").unwrap();
        form.reset();
        assert!(form.iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_replace_all_rejects_unknown_without_mutation() {
        let mut form = FormState::new();
        form.set_field("accelerations", "1").unwrap();

        let result = form.replace_all(vec![("fetal_movement", "2"), ("nope", "3")]);
        assert!(result.is_err());
        assert_eq!(form.get("accelerations"), "1");
        assert_eq!(form.get("fetal_movement"), "");
    }

    #[test]
    fn test_replace_all_clears_missing_entries() {
        let mut form = FormState::new();
        form.set_field("histogram_min", "50").unwrap();
        form.replace_all(vec![("accelerations", "0.003")]).unwrap();

        assert_eq!(form.get("accelerations"), "0.003");
        assert_eq!(form.get("histogram_min"), "");
    }

    #[test]
    fn test_iter_in_declaration_order() {
        let form = FormState::new();
        let names: Vec<&str> = form.iter().map(|(spec, _)| spec.name).collect();
        let declared: Vec<&str> = PREDICTION_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names, declared);
    }
}
