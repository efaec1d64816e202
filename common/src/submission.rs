//! 送信状態と連番管理
//!
//! Idle → Submitting → {Succeeded | Failed} → Idle
//! 送信中の再送信は無視し、古い連番の完了通知は捨てる。

/// 送信状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// 1回の送信を識別する連番
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// 送信の連番管理
#[derive(Debug, Clone, Default)]
pub struct SubmissionTracker {
    last_issued: u64,
    in_flight: Option<Ticket>,
    last_outcome: SubmissionPhase,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 送信開始。送信中ならNone（無視）
    pub fn begin(&mut self) -> Option<Ticket> {
        if self.in_flight.is_some() {
            return None;
        }
        self.last_issued += 1;
        let ticket = Ticket(self.last_issued);
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// 完了通知。最新の送信であればtrue
    pub fn complete(&mut self, ticket: Ticket, succeeded: bool) -> bool {
        if self.in_flight != Some(ticket) {
            tracing::debug!("古い応答を破棄: seq={}", ticket.seq());
            return false;
        }
        self.in_flight = None;
        self.last_outcome = if succeeded {
            SubmissionPhase::Succeeded
        } else {
            SubmissionPhase::Failed
        };
        true
    }

    /// 送信中の応答を待たずに破棄する（画面遷移・リセット時）
    pub fn abandon(&mut self) {
        self.in_flight = None;
    }

    pub fn phase(&self) -> SubmissionPhase {
        if self.in_flight.is_some() {
            SubmissionPhase::Submitting
        } else {
            SubmissionPhase::Idle
        }
    }

    /// 直近の完了結果（未送信ならIdle）
    pub fn last_outcome(&self) -> SubmissionPhase {
        self.last_outcome
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }
}
