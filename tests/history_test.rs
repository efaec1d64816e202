//! 解析履歴テスト
//!
//! ファイル保存された履歴の件数・順序・破損時の動作を検証

use fetal_care::storage::FileStore;
use fetal_care_common::response::AfiFileResult;
use fetal_care_common::storage::{KeyValueStore, HISTORY_KEY};
use fetal_care_common::{AnalysisResult, HistoryStore};
use tempfile::tempdir;

fn result(average: f64) -> AnalysisResult {
    AnalysisResult {
        results: vec![
            AfiFileResult { filename: "q1.png".to_string(), afi: average - 1.0 },
            AfiFileResult { filename: "q2.png".to_string(), afi: average + 1.0 },
        ],
        average_afi: average,
    }
}

/// 空の履歴
#[test]
fn test_history_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path());

    assert!(HistoryStore::new(&store).list().unwrap().is_empty());
}

/// 25件記録しても20件、先頭は最新
#[test]
fn test_history_capacity() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path());
    let history = HistoryStore::new(&store);

    for i in 1..=25 {
        history.record(result(i as f64), 1_000 * i).unwrap();
    }

    let entries = history.list().unwrap();
    assert_eq!(entries.len(), 20);
    assert_eq!(entries[0].result.average_afi, 25.0);
    assert_eq!(entries[0].ts, 25_000);
    assert_eq!(entries[19].result.average_afi, 6.0);
}

/// 再読み込みしても同じ内容
#[test]
fn test_history_persists_across_stores() {
    let dir = tempdir().expect("Failed to create temp dir");
    {
        let store = FileStore::new(dir.path());
        HistoryStore::new(&store).record(result(10.0), 42).unwrap();
    }

    let store = FileStore::new(dir.path());
    let entries = HistoryStore::new(&store).list().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].result, result(10.0));
}

/// 全消去
#[test]
fn test_history_clear() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path());
    let history = HistoryStore::new(&store);

    history.record(result(8.0), 1).unwrap();
    history.clear().unwrap();

    assert!(history.list().unwrap().is_empty());
    assert!(store.get(HISTORY_KEY).unwrap().is_none());
}

/// 履歴ファイルが破損している場合は空として扱う
#[test]
fn test_history_corrupted_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("afi_history.json"), "{ invalid json }").unwrap();

    let store = FileStore::new(dir.path());
    let history = HistoryStore::new(&store);
    assert!(history.list().unwrap().is_empty());

    // 破損後も記録できる
    history.record(result(12.0), 7).unwrap();
    assert_eq!(history.list().unwrap().len(), 1);
}

/// UTF-8 でない履歴ファイルも破損として空扱い
#[test]
fn test_history_non_utf8_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("afi_history.json"), [0xff, 0xfe, 0x00]).unwrap();

    let store = FileStore::new(dir.path());
    let history = HistoryStore::new(&store);
    assert!(history.list().unwrap().is_empty());

    history.record(result(12.0), 7).unwrap();
    let entries = history.list().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].result.average_afi, 12.0);
}
