use crate::error::{Result, VideoBatchError};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const VIDEO_EXTENSIONS: &[&str] = &["mkv", "mp4", "avi", "mov", "webm", "flv", "m4v", "wmv"];

/// フォルダ直下の動画ファイルを列挙
///
/// 正規化した絶対パスで重複を除き、パス順にソートして返す。
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(VideoBatchError::FolderNotFound(folder.display().to_string()));
    }

    let mut videos = BTreeSet::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() || !is_video_file(path) {
            continue;
        }

        match path.canonicalize() {
            Ok(abs) => {
                videos.insert(abs);
            }
            Err(e) => tracing::debug!(path = %path.display(), error = %e, "canonicalize failed, skipping"),
        }
    }

    Ok(videos.into_iter().collect())
}

/// 拡張子が対象の動画形式か（大文字小文字無視）
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            VIDEO_EXTENSIONS.iter().any(|v| ext.eq_ignore_ascii_case(v))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("a.mp4")));
        assert!(is_video_file(Path::new("a.MKV")));
        assert!(is_video_file(Path::new("a.Webm")));
        assert!(!is_video_file(Path::new("a.txt")));
        assert!(!is_video_file(Path::new("mp4")));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(result.is_err());
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let temp_dir = dir.path();

        File::create(temp_dir.join("c.mp4")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("a.MKV")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("b.webm")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("notes.txt")).unwrap().write_all(b"text").unwrap();
        fs::create_dir_all(temp_dir.join("nested.mp4")).unwrap();

        let result = scan_folder(temp_dir).unwrap();
        let names: Vec<String> = result
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.MKV", "b.webm", "c.mp4"]);
        assert!(result.iter().all(|p| p.is_absolute()));
    }
}
