//! AFI値の分類
//!
//! 個別画像の結果と平均値の両方でこの分類だけを使う。
//! 境界: 5未満 / 5以上8未満 / 8以上18以下 / 18超24以下 / 24超

use serde::{Deserialize, Serialize};

/// 分類の大まかな水準（バッジの色分けに使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandLevel {
    Low,
    Normal,
    High,
}

impl BandLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BandLevel::Low => "low",
            BandLevel::Normal => "normal",
            BandLevel::High => "high",
        }
    }
}

/// AFI分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AfiBand {
    Oligohydramnios,
    BorderlineLow,
    Normal,
    BorderlineHigh,
    Polyhydramnios,
}

/// メーター表示の上限（cm）
pub const METER_MAX_CM: f64 = 30.0;

impl AfiBand {
    /// 値から分類を決める（下側を先に判定）
    pub fn classify(value: f64) -> Self {
        if value < 5.0 {
            AfiBand::Oligohydramnios
        } else if value < 8.0 {
            AfiBand::BorderlineLow
        } else if value <= 18.0 {
            AfiBand::Normal
        } else if value <= 24.0 {
            AfiBand::BorderlineHigh
        } else {
            AfiBand::Polyhydramnios
        }
    }

    /// バッジ表示名
    pub fn name(&self) -> &'static str {
        match self {
            AfiBand::Oligohydramnios => "Oligohydramnios",
            AfiBand::BorderlineLow => "Borderline Low",
            AfiBand::Normal => "Normal",
            AfiBand::BorderlineHigh => "Borderline High",
            AfiBand::Polyhydramnios => "Polyhydramnios",
        }
    }

    pub fn level(&self) -> BandLevel {
        match self {
            AfiBand::Oligohydramnios | AfiBand::BorderlineLow => BandLevel::Low,
            AfiBand::Normal => BandLevel::Normal,
            AfiBand::BorderlineHigh | AfiBand::Polyhydramnios => BandLevel::High,
        }
    }

    /// 平均値に対する解説文
    pub fn interpretation(&self) -> &'static str {
        match self {
            AfiBand::Oligohydramnios => "AFI below 5 cm indicates oligohydramnios (low amniotic fluid). Consider clinical correlation and potential causes. May require closer monitoring and specialist consultation.",
            AfiBand::BorderlineLow => "AFI between 5-8 cm is borderline low. Monitor closely and consider clinical context. May warrant increased surveillance.",
            AfiBand::Normal => "AFI within normal range (8-18 cm). Continue routine prenatal care and monitoring as appropriate for gestational age.",
            AfiBand::BorderlineHigh => "AFI between 18-24 cm is borderline high. Continue routine monitoring while staying alert for signs of polyhydramnios.",
            AfiBand::Polyhydramnios => "AFI above 24 cm indicates polyhydramnios (excess amniotic fluid). Investigate potential causes including fetal anomalies, maternal diabetes, or other conditions.",
        }
    }
}

impl std::fmt::Display for AfiBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// メーター位置（0〜100%）
pub fn meter_percentage(value: f64) -> f64 {
    (value / METER_MAX_CM * 100.0).clamp(0.0, 100.0)
}
