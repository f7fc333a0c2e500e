//! バッチ処理の型定義
//!
//! CLIとレポート出力で共有される型:
//! - WorkItem: 処理対象（ファイルパスまたはURL）
//! - ProcessResult: 1件ごとの処理結果
//! - RunSummary: 実行全体の集計
//! - VideoMetadata / DownloadInfo: アクションごとの抽出フィールド

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// 処理対象
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkItem {
    /// ローカルの動画ファイル
    File(PathBuf),
    /// ダウンロード元URL（空・nan・none除去以外の検証はしない）
    Url(String),
}

impl WorkItem {
    /// 結果・ログに記録する識別子
    pub fn id(&self) -> String {
        match self {
            WorkItem::File(path) => path.display().to_string(),
            WorkItem::Url(url) => url.clone(),
        }
    }

    /// 進捗表示用の短い名前（ファイルはファイル名のみ）
    pub fn display_name(&self) -> String {
        match self {
            WorkItem::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            WorkItem::Url(url) => url.clone(),
        }
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// 1件分の処理結果
///
/// `fields` は成功時のみ持ち、JSONではレコードに平坦化される。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessResult<T> {
    pub item: String,
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub fields: Option<T>,
}

impl<T> ProcessResult<T> {
    pub fn success(item: impl Into<String>, message: impl Into<String>, fields: T) -> Self {
        Self {
            item: item.into(),
            success: true,
            message: message.into(),
            fields: Some(fields),
        }
    }

    pub fn failure(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            success: false,
            message: message.into(),
            fields: None,
        }
    }

    /// 失敗レポート用の表示名（パスならファイル名）
    pub fn item_name(&self) -> String {
        Path::new(&self.item)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.item.clone())
    }
}

/// 実行集計（結果列から導出、保存しない）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_results<T>(results: &[ProcessResult<T>]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            acc.attempted += 1;
            if r.success {
                acc.succeeded += 1;
            } else {
                acc.failed += 1;
            }
            acc
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// ffprobeから抽出した動画メタデータ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoMetadata {
    pub filepath: String,
    pub filename: String,
    pub file_size_bytes: u64,
    pub file_size_mb: f64,
    pub duration_seconds: f64,
    pub format_name: String,
    pub format_long_name: String,
    pub bit_rate: u64,
    pub video_codec: String,
    pub video_codec_long: String,
    pub resolution: String,
    pub width: u32,
    pub height: u32,
    pub frame_rate: String,
    pub aspect_ratio: String,
    pub pixel_format: String,
    pub video_bitrate: String,
    pub audio_codec: String,
    pub audio_codec_long: String,
    pub audio_channels: u32,
    pub audio_channel_layout: String,
    pub audio_sample_rate: String,
    pub audio_bitrate: String,
    pub has_video: bool,
    pub has_audio: bool,
    pub has_subtitles: bool,
    pub subtitle_count: u32,
    /// 抽出時刻（%Y-%m-%d %H:%M:%S）
    pub extraction_timestamp: String,
}

impl VideoMetadata {
    /// 進捗表示用の1行サマリ
    pub fn summary_line(&self) -> String {
        format!(
            "{} | {}s | {} MB | {} / {}",
            self.resolution, self.duration_seconds, self.file_size_mb, self.video_codec, self.audio_codec
        )
    }
}

/// ダウンロード成功時の付帯情報
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadInfo {
    /// 画質プリセット名（1080p / 1440p）
    pub quality: String,
    pub output_dir: String,
    pub finished_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_item_id_and_display_name() {
        let file = WorkItem::File(PathBuf::from("videos/clip.mp4"));
        assert_eq!(file.id(), "videos/clip.mp4");
        assert_eq!(file.display_name(), "clip.mp4");

        let url = WorkItem::Url("https://x/a".to_string());
        assert_eq!(url.id(), "https://x/a");
        assert_eq!(url.to_string(), "https://x/a");
    }

    #[test]
    fn test_run_summary_fold() {
        let results = vec![
            ProcessResult::success("a", "Success", ()),
            ProcessResult::failure("b", "boom"),
            ProcessResult::success("c", "Success", ()),
        ];
        let summary = RunSummary::from_results(&results);
        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert!(summary.has_failures());
    }

    #[test]
    fn test_run_summary_empty() {
        let results: Vec<ProcessResult<()>> = vec![];
        assert_eq!(RunSummary::from_results(&results), RunSummary::default());
    }

    #[test]
    fn test_process_result_json_is_flat() {
        let meta = VideoMetadata {
            filename: "a.mp4".to_string(),
            width: 1920,
            ..Default::default()
        };
        let ok = ProcessResult::success("/v/a.mp4", "ok", meta);
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["item"], "/v/a.mp4");
        assert_eq!(value["success"], true);
        assert_eq!(value["filename"], "a.mp4");
        assert_eq!(value["width"], 1920);

        let failed: ProcessResult<VideoMetadata> = ProcessResult::failure("/v/b.mp4", "File not found");
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("filename").is_none());
    }

    #[test]
    fn test_item_name_uses_file_name() {
        let r: ProcessResult<()> = ProcessResult::failure("/videos/broken.mkv", "x");
        assert_eq!(r.item_name(), "broken.mkv");
    }
}
