//! 予測フォームのフィールド定義
//!
//! 全フィールドは宣言順に並び、primary（簡易モード）と
//! advanced（詳細モード）に分かれる。
//! 表示の切り替えと送信時の必須判定は同じ `fields_for_mode` を使う。

use serde::{Deserialize, Serialize};

/// フィールドのグループ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    Primary,
    Advanced,
}

/// フィールド定義（値はすべて数値）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub group: FieldGroup,
}

impl FieldSpec {
    const fn primary(name: &'static str) -> Self {
        Self { name, group: FieldGroup::Primary }
    }

    const fn advanced(name: &'static str) -> Self {
        Self { name, group: FieldGroup::Advanced }
    }

    /// 表示用ラベル（`fetal_movement` → `Fetal Movement`）
    pub fn label(&self) -> String {
        field_label(self.name)
    }
}

/// 送信モード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMode {
    #[default]
    Simple,
    Advanced,
}

impl std::str::FromStr for SubmissionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" | "s" => Ok(SubmissionMode::Simple),
            "advanced" | "full" | "a" => Ok(SubmissionMode::Advanced),
            _ => Err(format!("Unknown mode: {}. Use simple or advanced", s)),
        }
    }
}

impl std::fmt::Display for SubmissionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionMode::Simple => write!(f, "simple"),
            SubmissionMode::Advanced => write!(f, "advanced"),
        }
    }
}

/// 予測フォームの全フィールド（宣言順）
pub const PREDICTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::primary("accelerations"),
    FieldSpec::primary("fetal_movement"),
    FieldSpec::primary("uterine_contractions"),
    FieldSpec::advanced("light_decelerations"),
    FieldSpec::advanced("severe_decelerations"),
    FieldSpec::advanced("prolongued_decelerations"),
    FieldSpec::advanced("abnormal_short_term_variability"),
    FieldSpec::advanced("mean_value_of_short_term_variability"),
    FieldSpec::advanced("percentage_of_time_with_abnormal_long_term_variability"),
    FieldSpec::advanced("mean_value_of_long_term_variability"),
    FieldSpec::advanced("histogram_width"),
    FieldSpec::advanced("histogram_min"),
    FieldSpec::advanced("histogram_max"),
    FieldSpec::advanced("histogram_number_of_peaks"),
    FieldSpec::advanced("histogram_number_of_zeroes"),
    FieldSpec::advanced("histogram_mode"),
    FieldSpec::advanced("histogram_mean"),
    FieldSpec::advanced("histogram_median"),
    FieldSpec::advanced("histogram_variance"),
    FieldSpec::advanced("histogram_tendency"),
];

/// モードで必須となるフィールド（primary、または primary ++ advanced）
pub fn fields_for_mode(mode: SubmissionMode) -> Vec<&'static FieldSpec> {
    PREDICTION_FIELDS
        .iter()
        .filter(|f| match mode {
            SubmissionMode::Simple => f.group == FieldGroup::Primary,
            SubmissionMode::Advanced => true,
        })
        .collect()
}

/// 名前からフィールド定義を検索
pub fn find_field(name: &str) -> Option<&'static FieldSpec> {
    PREDICTION_FIELDS.iter().find(|f| f.name == name)
}

/// アンダースコアを空白にし、各単語の先頭を大文字にする
pub fn field_label(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
