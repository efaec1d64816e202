//! AFI解析フロー
//!
//! 画像選択 → アップロード → 結果表示 → 履歴保存

use crate::api::ApiClient;
use crate::error::{ClientError, Result};
use crate::progress;
use fetal_care_common::storage::KeyValueStore;
use fetal_care_common::{AfiAnalyzer, AnalysisRequest, AnalyzerAction, HistoryStore, ImageFile};

/// 候補ファイルを選択し、解析まで実行する
///
/// 通知（除外・切り捨て・失敗）は `take_notifications` で取り出す。
pub async fn run_analysis<S: KeyValueStore + ?Sized>(
    client: &ApiClient,
    store: &S,
    candidates: Vec<ImageFile>,
    show_progress: bool,
) -> Result<AfiAnalyzer> {
    let mut analyzer = AfiAnalyzer::new();
    analyzer.reduce(AnalyzerAction::Select(candidates));

    let (ticket, files) = match analyzer.begin_analysis() {
        AnalysisRequest::Ready { ticket, files } => (ticket, files),
        AnalysisRequest::Empty => {
            let notes = analyzer.take_notifications();
            let detail = if notes.is_empty() {
                "選択された画像がありません".to_string()
            } else {
                notes.join("; ")
            };
            return Err(ClientError::NoImagesFound(detail));
        }
        AnalysisRequest::Busy => return Ok(analyzer),
    };

    let bar = progress::progress_bar(show_progress);
    let (outcome, _) = tokio::join!(client.upload(&files), async {
        if show_progress {
            progress::simulate(&bar).await;
        }
    });
    bar.finish_and_clear();

    match outcome {
        Ok(result) => {
            let snapshot = result.clone();
            if analyzer.reduce(AnalyzerAction::AnalysisSucceeded(ticket, result)) {
                let now = chrono::Utc::now().timestamp_millis();
                // 保存に失敗しても解析結果は残す
                if let Err(e) = HistoryStore::new(store).record(snapshot, now) {
                    tracing::warn!("履歴の保存に失敗: {}", e);
                    analyzer.notify(format!("Could not save history: {}", e));
                }
            }
        }
        Err(e) => {
            analyzer.reduce(AnalyzerAction::AnalysisFailed(ticket, e.to_string()));
        }
    }

    Ok(analyzer)
}
