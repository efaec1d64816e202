use crate::error::{ClientError, Result};
use fetal_care_common::batch::mime_from_extension;
use fetal_care_common::ImageFile;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

/// 指定パスを選択候補に変換
///
/// - ファイル: 拡張子に関係なく候補にする（種類チェックは選択時）
/// - フォルダ: 直下の画像ファイルをファイル名順に追加
pub fn scan_paths(paths: &[PathBuf]) -> Result<Vec<ImageFile>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(scan_folder(path)?);
        } else if path.is_file() {
            files.push(image_file(path)?);
        } else {
            return Err(ClientError::FileNotFound(path.display().to_string()));
        }
    }

    Ok(files)
}

pub fn scan_folder(folder: &Path) -> Result<Vec<ImageFile>> {
    if !folder.exists() {
        return Err(ClientError::FileNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_image = path
            .extension()
            .map(|ext| is_image_extension(&ext.to_string_lossy()))
            .unwrap_or(false);
        if is_image {
            images.push(image_file(path)?);
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(images)
}

fn image_file(path: &Path) -> Result<ImageFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mime_type = path
        .extension()
        .map(|ext| mime_from_extension(&ext.to_string_lossy()))
        .unwrap_or("application/octet-stream");
    let byte_size = std::fs::metadata(path)?.len();

    Ok(ImageFile {
        name,
        byte_size,
        mime_type: mime_type.to_string(),
        path: path.to_path_buf(),
    })
}

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("png"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("pdf"));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(ClientError::FileNotFound(_))));
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let dir = tempdir().unwrap();

        File::create(dir.path().join("c.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("a.PNG")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("b.jpeg")).unwrap();
        File::create(dir.path().join("readme.txt")).unwrap().write_all(b"text").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let result = scan_folder(dir.path()).unwrap();
        let names: Vec<&str> = result.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.PNG", "b.jpeg", "c.jpg"]);
        assert_eq!(result[0].mime_type, "image/png");
        assert_eq!(result[0].byte_size, 5);
    }

    #[test]
    fn test_explicit_file_keeps_its_type() {
        let dir = tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "hello").unwrap();

        let result = scan_paths(&[notes]).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].mime_type, "text/plain");
    }

    #[test]
    fn test_scan_paths_missing() {
        let result = scan_paths(&[PathBuf::from("/nonexistent/scan.png")]);
        assert!(result.is_err());
    }
}
