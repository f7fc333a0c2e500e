//! レポート表レイアウト
//!
//! 表形式レポートの列順と見出しはここで固定する。
//! 見出しは内部フィールド名とは別の表示用文字列。

use crate::types::{DownloadInfo, ProcessResult, VideoMetadata};

/// 列定義
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    /// 見出し
    pub label: &'static str,
    /// 列幅（Excel文字数単位）
    pub width: f64,
}

const fn col(label: &'static str, width: f64) -> ColumnDef {
    ColumnDef { label, width }
}

/// セル値
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl Cell {
    fn text(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// 表形式レポートの1行を組み立てる型
pub trait ReportRow: Sized {
    /// シート名
    const SHEET_NAME: &'static str;
    /// 列定義（固定順）
    const COLUMNS: &'static [ColumnDef];

    /// 結果1件をセル列に変換（長さは COLUMNS と一致）
    fn cells(result: &ProcessResult<Self>) -> Vec<Cell>;

    fn headers() -> Vec<&'static str> {
        Self::COLUMNS.iter().map(|c| c.label).collect()
    }
}

pub const PROBE_COLUMNS: &[ColumnDef] = &[
    col("Filename", 40.0),
    col("Format", 24.0),
    col("Duration (seconds)", 18.0),
    col("Size (MB)", 12.0),
    col("Resolution", 12.0),
    col("Width", 8.0),
    col("Height", 8.0),
    col("Video Codec", 12.0),
    col("Frame Rate", 12.0),
    col("Aspect Ratio", 12.0),
    col("Audio Codec", 12.0),
    col("Audio Channels", 14.0),
    col("Sample Rate", 12.0),
    col("Has Subtitles", 13.0),
    col("Subtitle Count", 14.0),
    col("Extraction Time", 20.0),
    col("File Path", 60.0),
];

impl ReportRow for VideoMetadata {
    const SHEET_NAME: &'static str = "Video Metadata";
    const COLUMNS: &'static [ColumnDef] = PROBE_COLUMNS;

    fn cells(result: &ProcessResult<Self>) -> Vec<Cell> {
        let Some(m) = &result.fields else {
            // 失敗行はファイル名とパスのみ
            let mut cells = vec![Cell::Empty; PROBE_COLUMNS.len()];
            cells[0] = Cell::Text(result.item_name());
            cells[PROBE_COLUMNS.len() - 1] = Cell::Text(result.item.clone());
            return cells;
        };

        vec![
            Cell::text(&m.filename),
            Cell::text(&m.format_long_name),
            Cell::Number(m.duration_seconds),
            Cell::Number(m.file_size_mb),
            Cell::text(&m.resolution),
            Cell::Number(m.width as f64),
            Cell::Number(m.height as f64),
            Cell::text(&m.video_codec),
            Cell::text(&m.frame_rate),
            Cell::text(&m.aspect_ratio),
            Cell::text(&m.audio_codec),
            Cell::Number(m.audio_channels as f64),
            Cell::text(&m.audio_sample_rate),
            Cell::Bool(m.has_subtitles),
            Cell::Number(m.subtitle_count as f64),
            Cell::text(&m.extraction_timestamp),
            Cell::text(&m.filepath),
        ]
    }
}

pub const DOWNLOAD_COLUMNS: &[ColumnDef] = &[
    col("URL", 60.0),
    col("Status", 10.0),
    col("Message", 60.0),
    col("Quality", 10.0),
    col("Output Folder", 30.0),
    col("Finished At", 20.0),
];

impl ReportRow for DownloadInfo {
    const SHEET_NAME: &'static str = "Downloads";
    const COLUMNS: &'static [ColumnDef] = DOWNLOAD_COLUMNS;

    fn cells(result: &ProcessResult<Self>) -> Vec<Cell> {
        let status = if result.success { "Success" } else { "Failed" };
        let mut cells = vec![
            Cell::text(&result.item),
            Cell::text(status),
            Cell::text(&result.message),
        ];
        match &result.fields {
            Some(info) => {
                cells.push(Cell::text(&info.quality));
                cells.push(Cell::text(&info.output_dir));
                cells.push(Cell::text(&info.finished_at));
            }
            None => cells.extend([Cell::Empty, Cell::Empty, Cell::Empty]),
        }
        cells
    }
}
