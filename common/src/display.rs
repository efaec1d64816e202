//! 応答から表示用モデルへの変換

use crate::band::{meter_percentage, AfiBand};
use crate::response::{AnalysisResult, PredictionResponse};

/// 予測結果の表示
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    pub status: String,
    /// 例: "87.25%"
    pub confidence: String,
    /// (クラス名, 確率表示)。サーバーは百分率で返す
    pub probabilities: Vec<(String, String)>,
}

impl From<&PredictionResponse> for PredictionView {
    fn from(response: &PredictionResponse) -> Self {
        Self {
            status: response.prediction.clone(),
            confidence: format!("{:.2}%", response.confidence),
            probabilities: response
                .probabilities
                .iter()
                .map(|(class, p)| (class.clone(), format!("{:.2}%", p)))
                .collect(),
        }
    }
}

/// 画像1枚分の行
#[derive(Debug, Clone, PartialEq)]
pub struct FileRow {
    pub filename: String,
    pub afi: String,
    pub band: AfiBand,
}

/// AFI解析結果の表示
#[derive(Debug, Clone, PartialEq)]
pub struct AfiReport {
    pub rows: Vec<FileRow>,
    pub average: String,
    pub average_band: AfiBand,
    /// 平均値のみ解説文を付ける
    pub interpretation: &'static str,
    pub meter_percent: f64,
}

impl From<&AnalysisResult> for AfiReport {
    fn from(result: &AnalysisResult) -> Self {
        let average_band = AfiBand::classify(result.average_afi);
        Self {
            rows: result
                .results
                .iter()
                .map(|r| FileRow {
                    filename: r.filename.clone(),
                    afi: format_cm(r.afi),
                    band: AfiBand::classify(r.afi),
                })
                .collect(),
            average: format_cm(result.average_afi),
            average_band,
            interpretation: average_band.interpretation(),
            meter_percent: meter_percentage(result.average_afi),
        }
    }
}

/// "12.50 cm" 形式
pub fn format_cm(value: f64) -> String {
    format!("{:.2} cm", value)
}
