use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "video-batch")]
#[command(about = "動画一括ダウンロード・メタデータ抽出ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// フォルダ内の動画をffprobeで解析してレポートを出力
    Probe {
        /// 動画フォルダ（省略時は対話入力、既定値は設定の default_folder）
        folder: Option<PathBuf>,

        /// レポート出力先ディレクトリ
        #[arg(short, long)]
        report_dir: Option<PathBuf>,

        /// 1件ごとの待機秒数
        #[arg(short, long)]
        delay: Option<u64>,

        /// 進捗バーを表示しない
        #[arg(long)]
        no_progress: bool,
    },

    /// URL一覧（Excel/テキスト）の動画をyt-dlpで一括ダウンロード
    Download {
        /// URL一覧ファイル（xlsx/xls/ods/txt、省略時は設定の url_file）
        input: Option<PathBuf>,

        /// 画質プリセット (1080p/1440p)
        #[arg(short, long, required = true)]
        quality: Quality,

        /// Cookieファイル（cookies.txt形式）
        #[arg(short, long)]
        cookies: Option<PathBuf>,

        /// 保存先フォルダ
        #[arg(short, long)]
        output_folder: Option<PathBuf>,

        /// レポート出力先ディレクトリ
        #[arg(short, long)]
        report_dir: Option<PathBuf>,

        /// 1件ごとの待機秒数
        #[arg(short, long)]
        delay: Option<u64>,

        /// 進捗バーを表示しない
        #[arg(long)]
        no_progress: bool,
    },

    /// 1件のURLについて利用可能なフォーマット一覧を表示
    Formats {
        /// 動画URL
        #[arg(required = true)]
        url: String,

        /// Cookieファイル
        #[arg(short, long)]
        cookies: Option<PathBuf>,
    },

    /// URL一覧の入力テンプレート（xlsx）を作成
    Template {
        /// 出力先（既定: youtube_urls_template.xlsx）
        path: Option<PathBuf>,

        /// 既存ファイルを上書き
        #[arg(long)]
        force: bool,
    },

    /// ffprobe / yt-dlp のインストール確認
    Check,

    /// 設定を表示/編集
    Config {
        /// Cookieファイルの既定値を設定
        #[arg(long)]
        set_cookie_file: Option<PathBuf>,

        /// 既定フォルダを設定
        #[arg(long)]
        set_default_folder: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// ダウンロード画質プリセット
///
/// どちらも既定にはせず、実行時に明示指定させる。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quality {
    /// 1080p以下のmp4 + m4a、mp4へマージ
    Hd1080,
    /// 1440p優先のmkv、サムネイル・メタデータ埋め込み
    Qhd1440,
}

impl Quality {
    /// yt-dlp -f に渡すフォーマット選択式
    pub fn format_selector(&self) -> &'static str {
        match self {
            Quality::Hd1080 => "bestvideo[height<=1080][ext=mp4]+bestaudio[ext=m4a]/best[height<=1080]",
            Quality::Qhd1440 => {
                "bestvideo[height=1440][ext=mkv]+bestaudio[ext=m4a]/bestvideo[height<=1440]+bestaudio/best"
            }
        }
    }

    /// --merge-output-format
    pub fn merge_format(&self) -> &'static str {
        match self {
            Quality::Hd1080 => "mp4",
            Quality::Qhd1440 => "mkv",
        }
    }

    /// 1件ごとの既定待機時間（--delay と設定値で上書き可）
    pub fn default_delay(&self) -> Duration {
        match self {
            Quality::Hd1080 => Duration::from_secs(2),
            Quality::Qhd1440 => Duration::from_secs(3),
        }
    }

    /// プリセット固有の追加引数
    pub fn extra_args(&self) -> &'static [&'static str] {
        match self {
            Quality::Hd1080 => &[],
            Quality::Qhd1440 => &["--embed-thumbnail", "--embed-metadata"],
        }
    }
}

impl std::str::FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1080p" | "1080" | "hd" => Ok(Quality::Hd1080),
            "1440p" | "1440" | "qhd" => Ok(Quality::Qhd1440),
            _ => Err(format!("Unknown quality: {}. Use 1080p or 1440p", s)),
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quality::Hd1080 => write!(f, "1080p"),
            Quality::Qhd1440 => write!(f, "1440p"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_from_str() {
        assert_eq!("1080p".parse::<Quality>(), Ok(Quality::Hd1080));
        assert_eq!("1440P".parse::<Quality>(), Ok(Quality::Qhd1440));
        assert!("4k".parse::<Quality>().is_err());
    }

    #[test]
    fn test_quality_presets_differ() {
        assert_eq!(Quality::Hd1080.merge_format(), "mp4");
        assert_eq!(Quality::Qhd1440.merge_format(), "mkv");
        assert!(Quality::Hd1080.format_selector().contains("height<=1080"));
        assert!(Quality::Qhd1440.format_selector().starts_with("bestvideo[height=1440]"));
        assert!(Quality::Hd1080.extra_args().is_empty());
        assert_eq!(Quality::Qhd1440.extra_args(), &["--embed-thumbnail", "--embed-metadata"]);
        assert_eq!(Quality::Hd1080.default_delay(), Duration::from_secs(2));
        assert_eq!(Quality::Qhd1440.default_delay(), Duration::from_secs(3));
    }

    #[test]
    fn test_cli_requires_quality() {
        let parsed = Cli::try_parse_from(["video-batch", "download", "urls.xlsx"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["video-batch", "download", "urls.xlsx", "-q", "1440p"]).unwrap();
        match parsed.command {
            Commands::Download { quality, input, .. } => {
                assert_eq!(quality, Quality::Qhd1440);
                assert_eq!(input, Some(PathBuf::from("urls.xlsx")));
            }
            _ => panic!("download以外にパースされた"),
        }
    }

    #[test]
    fn test_cli_template_default_path() {
        let parsed = Cli::try_parse_from(["video-batch", "template"]).unwrap();
        match parsed.command {
            Commands::Template { path, force } => {
                assert!(path.is_none());
                assert!(!force);
            }
            _ => panic!("template以外にパースされた"),
        }
    }
}
