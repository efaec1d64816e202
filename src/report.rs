//! 解析結果レポートの保存

use crate::error::Result;
use fetal_care_common::AnalysisResult;
use std::path::{Path, PathBuf};

/// 直近の解析結果をJSONで保存
///
/// `output` がフォルダ（または未指定）なら `afi_report_<ミリ秒>.json` を作る。
pub fn write_report(result: &AnalysisResult, output: Option<&Path>, now_millis: i64) -> Result<PathBuf> {
    let file_name = format!("afi_report_{}.json", now_millis);
    let path = match output {
        Some(p) if p.is_dir() => p.join(file_name),
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(file_name),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(&path, json)?;
    tracing::info!("レポート保存: {}", path.display());
    Ok(path)
}
