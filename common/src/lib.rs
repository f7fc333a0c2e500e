//! Video Batch Common Library
//!
//! CLIとレポート出力で共有される型とユーティリティ

pub mod types;
pub mod layout;
pub mod items;
pub mod error;
pub mod export;

pub use types::{DownloadInfo, ProcessResult, RunSummary, VideoMetadata, WorkItem};
pub use layout::{Cell, ColumnDef, ReportRow};
pub use items::{clean_work_items, select_url_column, truncate_display};
pub use error::{Error, Result};
