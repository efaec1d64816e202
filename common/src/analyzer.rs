//! AFI解析画面の状態

use crate::batch::{ImageBatch, ImageFile, SelectionOutcome};
use crate::response::AnalysisResult;
use crate::submission::{SubmissionPhase, SubmissionTracker, Ticket};

/// 解析画面への操作
#[derive(Debug, Clone)]
pub enum AnalyzerAction {
    Select(Vec<ImageFile>),
    Remove(usize),
    ClearSelection,
    AnalysisSucceeded(Ticket, AnalysisResult),
    AnalysisFailed(Ticket, String),
}

/// 解析開始の結果
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    Ready { ticket: Ticket, files: Vec<ImageFile> },
    /// 画像が未選択
    Empty,
    Busy,
}

/// 解析画面の状態
#[derive(Debug, Clone, Default)]
pub struct AfiAnalyzer {
    batch: ImageBatch,
    tracker: SubmissionTracker,
    last_response: Option<AnalysisResult>,
    error: Option<String>,
    notifications: Vec<String>,
}

impl AfiAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 状態を更新する（古い送信の完了通知は `false`）
    pub fn reduce(&mut self, action: AnalyzerAction) -> bool {
        match action {
            AnalyzerAction::Select(files) => {
                let outcome: SelectionOutcome = self.batch.select(files);
                tracing::debug!(
                    "選択: 追加{}枚 除外{}枚 切り捨て{}枚",
                    outcome.accepted,
                    outcome.rejected.len(),
                    outcome.dropped
                );
                self.notifications.extend(outcome.notifications());
            }
            AnalyzerAction::Remove(index) => {
                self.batch.remove(index);
            }
            AnalyzerAction::ClearSelection => {
                self.batch.clear();
            }
            AnalyzerAction::AnalysisSucceeded(ticket, result) => {
                if !self.tracker.complete(ticket, true) {
                    return false;
                }
                self.last_response = Some(result);
                self.error = None;
            }
            AnalyzerAction::AnalysisFailed(ticket, message) => {
                if !self.tracker.complete(ticket, false) {
                    return false;
                }
                self.last_response = None;
                self.error = Some(message.clone());
                self.notifications.push(message);
            }
        }
        true
    }

    pub fn begin_analysis(&mut self) -> AnalysisRequest {
        if self.batch.is_empty() {
            return AnalysisRequest::Empty;
        }
        match self.tracker.begin() {
            Some(ticket) => AnalysisRequest::Ready {
                ticket,
                files: self.batch.files().to_vec(),
            },
            None => AnalysisRequest::Busy,
        }
    }

    /// 状態を変えずに通知だけ追加する
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notifications.push(message.into());
    }

    /// 溜まった通知を取り出す
    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }

    pub fn batch(&self) -> &ImageBatch {
        &self.batch
    }

    /// 直近の成功結果（レポート出力用）
    pub fn last_response(&self) -> Option<&AnalysisResult> {
        self.last_response.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.tracker.phase()
    }
}
