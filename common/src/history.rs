//! AFI解析履歴
//!
//! 新しい順に最大20件。容量を超えた古いものから捨てる。
//! 個別削除はなく、全消去のみ。

use crate::error::Result;
use crate::response::AnalysisResult;
use crate::storage::{KeyValueStore, HISTORY_KEY};
use serde::{Deserialize, Serialize};

/// 履歴の最大件数
pub const HISTORY_CAPACITY: usize = 20;

/// 履歴エントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 記録時刻（UNIXエポックからのミリ秒）
    pub ts: i64,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// 履歴ログ（新しい順）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 先頭に追加して容量まで切り詰める
    pub fn record(&mut self, result: AnalysisResult, ts: i64) {
        self.entries.insert(0, HistoryEntry { ts, result });
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// キー/値ストアに保存される履歴
pub struct HistoryStore<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> HistoryStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// 保存済みの履歴を読み込む（壊れている場合は空）
    pub fn load(&self) -> Result<HistoryLog> {
        let Some(raw) = self.store.get(HISTORY_KEY)? else {
            return Ok(HistoryLog::new());
        };
        match serde_json::from_str(&raw) {
            Ok(log) => Ok(log),
            Err(e) => {
                tracing::warn!("履歴の読み込みに失敗、空として扱います: {}", e);
                Ok(HistoryLog::new())
            }
        }
    }

    pub fn record(&self, result: AnalysisResult, ts: i64) -> Result<()> {
        let mut log = self.load()?;
        log.record(result, ts);
        self.store.set(HISTORY_KEY, &serde_json::to_string(&log)?)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(HISTORY_KEY)
    }

    pub fn list(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.load()?.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::AfiFileResult;
    use crate::storage::MemoryStore;

    fn result(avg: f64) -> AnalysisResult {
        AnalysisResult {
            results: vec![AfiFileResult { filename: "scan.png".to_string(), afi: avg }],
            average_afi: avg,
        }
    }

    #[test]
    fn test_capacity_after_25_records() {
        let mut log = HistoryLog::new();
        for i in 1..=25 {
            log.record(result(i as f64), i);
        }
        assert_eq!(log.len(), 20);
        assert_eq!(log.list()[0].result.average_afi, 25.0);
        assert_eq!(log.list()[19].result.average_afi, 6.0);
    }

    #[test]
    fn test_store_round_trip_newest_first() {
        let store = MemoryStore::new();
        let history = HistoryStore::new(&store);

        history.record(result(10.0), 1_000).unwrap();
        history.record(result(20.0), 2_000).unwrap();

        let entries = history.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].ts, 2_000);
        assert_eq!(entries[1].result.average_afi, 10.0);
    }

    #[test]
    fn test_stored_format_is_flat() {
        let store = MemoryStore::new();
        HistoryStore::new(&store).record(result(9.5), 42).unwrap();

        let raw = store.get(HISTORY_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["ts"], 42);
        assert_eq!(value[0]["average_afi"], 9.5);
        assert_eq!(value[0]["results"][0]["filename"], "scan.png");
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::new();
        let history = HistoryStore::new(&store);
        history.record(result(10.0), 1).unwrap();
        history.clear().unwrap();
        assert!(history.list().unwrap().is_empty());
    }

    #[test]
    fn test_corrupted_history_is_empty() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, "{ invalid json }").unwrap();
        assert!(HistoryStore::new(&store).list().unwrap().is_empty());
    }
}
