//! ffprobe によるメタデータ抽出

mod parse;

pub use parse::parse_probe_output;

use crate::error::{Result, VideoBatchError};
use crate::runner::Completed;
use crate::tools::describe_exit;
use std::path::{Path, PathBuf};
use std::process::Command;
use video_batch_common::{truncate_display, VideoMetadata, WorkItem};

/// ffprobe のエラー出力を記録する上限（文字数）
const STDERR_LIMIT: usize = 200;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct Prober {
    program: PathBuf,
}

impl Prober {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 1ファイルを解析
    pub fn probe(&self, path: &Path) -> Result<VideoMetadata> {
        let output = Command::new(&self.program)
            .args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(path)
            .output()
            .map_err(|e| VideoBatchError::ToolFailed(format!("ffprobe実行エラー: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() || stdout.trim().is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let message = if stderr.is_empty() {
                format!("Failed to extract metadata ({})", describe_exit(&output.status))
            } else {
                format!("FFprobe error: {}", truncate_display(stderr, STDERR_LIMIT))
            };
            return Err(VideoBatchError::ToolFailed(message));
        }

        let extracted_at = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        parse_probe_output(&stdout, path, &extracted_at)
    }

    /// バッチ用アクション（ファイル以外は失敗扱い）
    pub fn action(&self, item: &WorkItem) -> Result<Completed<VideoMetadata>> {
        let WorkItem::File(path) = item else {
            return Err(VideoBatchError::ToolFailed(format!("ファイルではありません: {}", item)));
        };
        let meta = self.probe(path)?;
        Ok(Completed::new(meta.summary_line(), meta))
    }
}
