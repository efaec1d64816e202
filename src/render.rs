//! 端末への結果表示

use fetal_care_common::band::{AfiBand, BandLevel};
use fetal_care_common::dashboard::Disclosure;
use fetal_care_common::display::{format_cm, AfiReport, PredictionView};
use fetal_care_common::{HistoryEntry, Theme, UserProfile};
use std::io::IsTerminal;

pub struct Renderer {
    theme: Theme,
    color: bool,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            color: std::io::stdout().is_terminal(),
        }
    }

    /// 色なし（テスト・パイプ出力用）
    pub fn plain() -> Self {
        Self { theme: Theme::Light, color: false }
    }

    /// 分類バッジ
    pub fn badge(&self, band: AfiBand) -> String {
        if !self.color {
            return format!("[{}]", band.name());
        }
        let code = match (band.level(), self.theme) {
            (BandLevel::Low, Theme::Light) => "33",
            (BandLevel::Normal, Theme::Light) => "32",
            (BandLevel::High, Theme::Light) => "31",
            (BandLevel::Low, Theme::Dark) => "93",
            (BandLevel::Normal, Theme::Dark) => "92",
            (BandLevel::High, Theme::Dark) => "91",
        };
        format!("\x1b[{}m[{}]\x1b[0m", code, band.name())
    }

    pub fn profile(&self, profile: &UserProfile) {
        println!("User Information");
        println!("  Name:  {}", profile.full_name);
        println!("  Email: {}", profile.email);
        println!("  Role:  {}", profile.role);
    }

    pub fn disclosure(&self, disclosure: &Disclosure) {
        let names: Vec<String> = disclosure.primary.iter().map(|f| f.label()).collect();
        println!("  入力項目: {}", names.join(", "));
        if !disclosure.advanced.is_empty() {
            if disclosure.expanded {
                let names: Vec<String> = disclosure.advanced.iter().map(|f| f.label()).collect();
                println!("  詳細項目: {}", names.join(", "));
            } else {
                println!("  詳細項目: {}件", disclosure.advanced.len());
            }
        }
    }

    pub fn prediction(&self, view: &PredictionView) {
        println!("Prediction Result");
        println!("  Status: {}", view.status);
        println!("  Confidence: {}", view.confidence);
        if !view.probabilities.is_empty() {
            println!("  Probabilities:");
            for (class, probability) in &view.probabilities {
                println!("    {}: {}", class, probability);
            }
        }
    }

    pub fn afi_report(&self, report: &AfiReport) {
        for row in &report.rows {
            println!("  {:<32} {:>10} {}", row.filename, row.afi, self.badge(row.band));
        }
        println!();
        println!("Average AFI: {} {}", report.average, self.badge(report.average_band));
        println!("{}", meter(report.meter_percent));
        println!("{}", report.interpretation);
    }

    pub fn history(&self, entries: &[HistoryEntry]) {
        if entries.is_empty() {
            println!("No previous analyses.");
            return;
        }
        for entry in entries {
            println!(
                "  {}  Avg AFI: {}",
                format_timestamp(entry.ts),
                format_cm(entry.result.average_afi)
            );
        }
    }

    pub fn notification(&self, message: &str) {
        eprintln!("! {}", message);
    }
}

/// メーター（0〜30cmを40文字で表示）
pub fn meter(percent: f64) -> String {
    const WIDTH: usize = 40;
    let filled = ((percent / 100.0) * WIDTH as f64).round() as usize;
    let filled = filled.min(WIDTH);
    format!("0 |{}{}| 30 cm", "#".repeat(filled), "-".repeat(WIDTH - filled))
}

/// エポックミリ秒をローカル時刻の文字列にする
pub fn format_timestamp(ts: i64) -> String {
    use chrono::{Local, TimeZone};
    match Local.timestamp_millis_opt(ts).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ts.to_string(),
    }
}
