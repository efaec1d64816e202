//! アップロード対象画像の選択
//!
//! - MIMEタイプが `image/` で始まること
//! - 1ファイル20MB以下
//! - 最大10枚（既存の選択 ++ 新規の有効ファイル を先頭から切り詰め）

use std::path::PathBuf;

/// 最大枚数
pub const MAX_FILES: usize = 10;

/// 1ファイルの最大サイズ（20MB）
pub const MAX_FILE_BYTES: u64 = 20 * 1024 * 1024;

/// 選択された画像ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    pub path: PathBuf,
}

/// 除外理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Unsupported(String),
    TooLarge(String),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Unsupported(name) => write!(f, "Unsupported file: {}", name),
            Rejection::TooLarge(name) => write!(f, "Too large (>20MB): {}", name),
        }
    }
}

/// 1回の選択操作の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub accepted: usize,
    pub rejected: Vec<Rejection>,
    /// 上限を超えて切り捨てた枚数
    pub dropped: usize,
}

impl SelectionOutcome {
    /// 利用者への通知メッセージ（除外・切り捨てがあった場合のみ）
    pub fn notifications(&self) -> Vec<String> {
        let mut messages: Vec<String> = self.rejected.iter().map(|r| r.to_string()).collect();
        if self.dropped > 0 {
            messages.push(format!("Only first {} images kept", MAX_FILES));
        }
        messages
    }
}

/// 選択中の画像（選択順を保持）
#[derive(Debug, Clone, Default)]
pub struct ImageBatch {
    files: Vec<ImageFile>,
}

impl ImageBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しく選ばれたファイルを追加
    pub fn select(&mut self, candidates: impl IntoIterator<Item = ImageFile>) -> SelectionOutcome {
        let mut outcome = SelectionOutcome::default();

        for file in candidates {
            if let Some(rejection) = check_file(&file) {
                tracing::debug!("除外: {}", rejection);
                outcome.rejected.push(rejection);
                continue;
            }
            if self.files.len() < MAX_FILES {
                self.files.push(file);
                outcome.accepted += 1;
            } else {
                outcome.dropped += 1;
            }
        }

        outcome
    }

    /// 指定位置のファイルを除外
    pub fn remove(&mut self, index: usize) -> Option<ImageFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[ImageFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn check_file(file: &ImageFile) -> Option<Rejection> {
    if !file.mime_type.starts_with("image/") {
        return Some(Rejection::Unsupported(file.name.clone()));
    }
    if file.byte_size > MAX_FILE_BYTES {
        return Some(Rejection::TooLarge(file.name.clone()));
    }
    None
}

/// 拡張子からMIMEタイプを推定
pub fn mime_from_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "txt" => "text/plain",
        "json" => "application/json",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> ImageFile {
        ImageFile {
            name: name.to_string(),
            byte_size: 1024,
            mime_type: "image/png".to_string(),
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn test_truncates_to_ten() {
        let mut batch = ImageBatch::new();
        let outcome = batch.select((1..=12).map(|i| image(&format!("scan_{:02}.png", i))));

        assert_eq!(batch.len(), 10);
        assert_eq!(outcome.accepted, 10);
        assert_eq!(outcome.dropped, 2);
        assert_eq!(outcome.notifications(), vec!["Only first 10 images kept"]);
        assert_eq!(batch.files()[9].name, "scan_10.png");
    }

    #[test]
    fn test_rejects_only_unsupported_file() {
        let mut batch = ImageBatch::new();
        let mut notes = image("notes.txt");
        notes.mime_type = "text/plain".to_string();

        let outcome = batch.select(vec![image("a.png"), notes, image("b.png")]);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.files()[0].name, "a.png");
        assert_eq!(batch.files()[1].name, "b.png");
        assert_eq!(outcome.rejected, vec![Rejection::Unsupported("notes.txt".to_string())]);
        assert_eq!(outcome.notifications(), vec!["Unsupported file: notes.txt"]);
    }

    #[test]
    fn test_rejects_oversized_file() {
        let mut batch = ImageBatch::new();
        let mut big = image("big.jpg");
        big.byte_size = MAX_FILE_BYTES + 1;
        let mut limit = image("limit.jpg");
        limit.byte_size = MAX_FILE_BYTES;

        let outcome = batch.select(vec![big, limit]);
        assert_eq!(batch.len(), 1);
        assert_eq!(outcome.notifications(), vec!["Too large (>20MB): big.jpg"]);
    }

    #[test]
    fn test_appends_to_existing_selection() {
        let mut batch = ImageBatch::new();
        batch.select((1..=8).map(|i| image(&format!("{}.png", i))));
        let outcome = batch.select(vec![image("9.png"), image("10.png"), image("11.png")]);

        assert_eq!(batch.len(), 10);
        assert_eq!(outcome.dropped, 1);
        let names: Vec<&str> = batch.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names[0], "1.png");
        assert_eq!(names[9], "10.png");
    }

    #[test]
    fn test_remove_and_clear() {
        let mut batch = ImageBatch::new();
        batch.select(vec![image("a.png"), image("b.png"), image("c.png")]);

        assert_eq!(batch.remove(1).map(|f| f.name), Some("b.png".to_string()));
        assert!(batch.remove(5).is_none());
        assert_eq!(batch.files()[1].name, "c.png");

        batch.clear();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension("JPG"), "image/jpeg");
        assert_eq!(mime_from_extension("png"), "image/png");
        assert_eq!(mime_from_extension("txt"), "text/plain");
        assert_eq!(mime_from_extension("xyz"), "application/octet-stream");
    }
}
