//! 外部ツールの事前確認
//!
//! ツールが起動できなければ実行全体を中止する（1件目の処理前に判定）。

use crate::error::{Result, VideoBatchError};
use std::path::Path;
use std::process::{Command, ExitStatus};

pub const FFPROBE_INSTALL_GUIDE: &str = "\
======================================================================
INSTALLATION INSTRUCTIONS
======================================================================

Windows:
  1. Visit: https://www.gyan.dev/ffmpeg/builds/
  2. Download 'ffmpeg-release-essentials.zip'
  3. Extract and add the 'bin' folder to System PATH
  4. Restart terminal and run this command again

Linux/Ubuntu:
  sudo apt-get update
  sudo apt-get install ffmpeg

macOS:
  brew install ffmpeg

After installation, verify with: ffprobe -version
======================================================================";

pub const YTDLP_INSTALL_GUIDE: &str = "\
======================================================================
INSTALLATION INSTRUCTIONS
======================================================================

All platforms:
  pip install -U yt-dlp

macOS:
  brew install yt-dlp

Windows:
  winget install yt-dlp

After installation, verify with: yt-dlp --version
======================================================================";

/// ffprobe -version の1行目を返す
pub fn check_ffprobe(program: &Path) -> Result<String> {
    check_tool(program, "-version", FFPROBE_INSTALL_GUIDE)
}

/// yt-dlp --version の1行目を返す
pub fn check_ytdlp(program: &Path) -> Result<String> {
    check_tool(program, "--version", YTDLP_INSTALL_GUIDE)
}

fn check_tool(program: &Path, version_flag: &str, guidance: &'static str) -> Result<String> {
    let tool = program.display().to_string();
    let output = Command::new(program)
        .arg(version_flag)
        .output()
        .map_err(|e| VideoBatchError::ToolNotFound {
            tool: tool.clone(),
            reason: e.to_string(),
            guidance,
        })?;

    if !output.status.success() {
        return Err(VideoBatchError::ToolNotFound {
            tool,
            reason: format!("{} が失敗 ({})", version_flag, describe_exit(&output.status)),
            guidance,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.lines().next().unwrap_or_default().trim().to_string();
    tracing::debug!(tool = %tool, version = %version, "tool found");
    Ok(version)
}

/// 終了状態を表示用に整形（シグナル終了には終了コードがない）
pub fn describe_exit(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
