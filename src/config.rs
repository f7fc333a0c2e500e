use crate::cli::Quality;
use crate::error::{Result, VideoBatchError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ffprobe 実行ファイル（PATH上の名前でも可）
    pub ffprobe_path: PathBuf,
    /// yt-dlp 実行ファイル
    pub ytdlp_path: PathBuf,
    /// ダウンロード先・スキャン対象の既定フォルダ
    pub default_folder: PathBuf,
    pub cookie_file: PathBuf,
    /// URL一覧の既定ファイル
    pub url_file: PathBuf,
    /// レポート出力先
    pub report_dir: PathBuf,
    /// ダウンロード間の待機秒数（未設定なら画質プリセットの既定値）
    pub download_delay_secs: Option<u64>,
    pub probe_delay_secs: u64,
    /// 進捗表示で識別子を切り詰める文字数
    pub display_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ffprobe_path: PathBuf::from("ffprobe"),
            ytdlp_path: PathBuf::from("yt-dlp"),
            default_folder: PathBuf::from("Downloaded_Videos"),
            cookie_file: PathBuf::from("cookies.txt"),
            url_file: PathBuf::from("Youtube URLs.xlsx"),
            report_dir: PathBuf::from("."),
            download_delay_secs: None,
            probe_delay_secs: 0,
            display_width: 50,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VideoBatchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("video-batch").join("config.json"))
    }

    pub fn download_delay(&self, quality: Quality) -> Duration {
        self.download_delay_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| quality.default_delay())
    }

    pub fn probe_delay(&self) -> Duration {
        Duration::from_secs(self.probe_delay_secs)
    }

    pub fn set_cookie_file(&mut self, path: PathBuf) -> Result<()> {
        self.cookie_file = path;
        self.save()
    }

    pub fn set_default_folder(&mut self, path: PathBuf) -> Result<()> {
        self.default_folder = path;
        self.save()
    }
}
