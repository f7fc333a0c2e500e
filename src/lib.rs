//! 動画一括ダウンロード・メタデータ抽出ツール
//!
//! - download: URL一覧を yt-dlp で順に取得
//! - probe: フォルダ内の動画を ffprobe で解析
//!
//! どちらも BatchRunner で1件ずつ処理し、ReportWriter で結果を出力する。

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod probe;
pub mod report;
pub mod runner;
pub mod scanner;
pub mod sheet;
pub mod tools;
