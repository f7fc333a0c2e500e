//! yt-dlp による動画ダウンロード

use crate::cli::Quality;
use crate::error::{Result, VideoBatchError};
use crate::runner::Completed;
use std::path::{Path, PathBuf};
use std::process::Command;
use video_batch_common::{DownloadInfo, WorkItem};

/// 出力ファイル名テンプレート（動画タイトル基準）
const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct Downloader {
    program: PathBuf,
    cookies: PathBuf,
    output_dir: PathBuf,
    quality: Quality,
}

impl Downloader {
    /// Cookieファイルの存在を確認し、保存先フォルダを作成する
    pub fn new(
        program: impl Into<PathBuf>,
        cookies: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        quality: Quality,
    ) -> Result<Self> {
        let cookies = cookies.into();
        if !cookies.is_file() {
            return Err(VideoBatchError::CookieFileNotFound(cookies.display().to_string()));
        }

        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;

        Ok(Self {
            program: program.into(),
            cookies,
            output_dir,
            quality,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// yt-dlp に渡す引数
    pub fn build_args(&self, url: &str) -> Vec<String> {
        let mut args = vec![
            "--cookies".to_string(),
            self.cookies.display().to_string(),
            "-f".to_string(),
            self.quality.format_selector().to_string(),
            "--merge-output-format".to_string(),
            self.quality.merge_format().to_string(),
            "-o".to_string(),
            self.output_dir.join(OUTPUT_TEMPLATE).display().to_string(),
        ];
        args.extend(self.quality.extra_args().iter().map(|a| a.to_string()));
        args.push("--no-warnings".to_string());
        args.push(url.to_string());
        args
    }

    /// 1件ダウンロード（終了コード0で成功）
    pub fn download(&self, url: &str) -> Result<DownloadInfo> {
        tracing::debug!(url, quality = %self.quality, "starting yt-dlp");

        let output = Command::new(&self.program)
            .args(self.build_args(url))
            .output()
            .map_err(|e| VideoBatchError::ToolFailed(format!("yt-dlp実行エラー: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let message = if stderr.is_empty() {
                "Unknown error".to_string()
            } else {
                stderr.to_string()
            };
            return Err(VideoBatchError::ToolFailed(message));
        }

        Ok(DownloadInfo {
            quality: self.quality.to_string(),
            output_dir: self.output_dir.display().to_string(),
            finished_at: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        })
    }

    /// バッチ用アクション
    pub fn action(&self, item: &WorkItem) -> Result<Completed<DownloadInfo>> {
        let info = self.download(&item.id())?;
        Ok(Completed::new("Success", info))
    }
}

/// 利用可能なフォーマット一覧（yt-dlp -F）
pub fn list_formats(program: &Path, cookies: &Path, url: &str) -> Result<String> {
    if !cookies.is_file() {
        return Err(VideoBatchError::CookieFileNotFound(cookies.display().to_string()));
    }

    let output = Command::new(program)
        .arg("--cookies")
        .arg(cookies)
        .arg("-F")
        .arg(url)
        .output()
        .map_err(|e| VideoBatchError::ToolFailed(format!("yt-dlp実行エラー: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VideoBatchError::ToolFailed(stderr.trim().to_string()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
