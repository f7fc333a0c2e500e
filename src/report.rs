//! レポート出力
//!
//! 1回の実行につき JSON・Excel・（失敗があれば）失敗ログを書き出す。
//! ファイル名には生成時刻を付け、既存ファイルは上書きしない。

use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use video_batch_common::export::{self, FailureLogStyle, DOWNLOAD_FAILURES, PROBE_FAILURES};
use video_batch_common::{ProcessResult, ReportRow};

/// ファイル名に付ける時刻の書式
pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// 出力ファイル名の組
#[derive(Debug, Clone, Copy)]
pub struct ReportNames {
    pub json: &'static str,
    pub excel: &'static str,
    pub failures: &'static str,
    pub failure_style: FailureLogStyle,
}

pub const PROBE_REPORT: ReportNames = ReportNames {
    json: "video_metadata",
    excel: "video_metadata_summary",
    failures: "failed_extractions",
    failure_style: PROBE_FAILURES,
};

pub const DOWNLOAD_REPORT: ReportNames = ReportNames {
    json: "download_report",
    excel: "download_summary",
    failures: "failed_downloads",
    failure_style: DOWNLOAD_FAILURES,
};

/// 書き出したファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifacts {
    pub json: PathBuf,
    pub excel: PathBuf,
    pub failure_log: Option<PathBuf>,
}

impl ReportArtifacts {
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths = vec![self.json.as_path(), self.excel.as_path()];
        if let Some(log) = &self.failure_log {
            paths.push(log.as_path());
        }
        paths
    }
}

/// 現在時刻のファイル名用文字列（YYYYMMDD_HHMMSS）
pub fn stamp_now() -> String {
    chrono::Local::now().format(STAMP_FORMAT).to_string()
}

#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    names: ReportNames,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>, names: ReportNames) -> Self {
        Self {
            output_dir: output_dir.into(),
            names,
        }
    }

    pub fn write<T>(&self, results: &[ProcessResult<T>], stamp: &str) -> Result<ReportArtifacts>
    where
        T: Serialize + ReportRow,
    {
        std::fs::create_dir_all(&self.output_dir)?;

        let json = self.unique_path(self.names.json, stamp, "json");
        std::fs::write(&json, export::json_report(results)?)?;
        tracing::debug!(path = %json.display(), "JSON report written");

        // 失敗ログはxlsxより先に書く
        let failure_log = match export::render_failure_log(results, &self.names.failure_style) {
            Some(text) => {
                let path = self.unique_path(self.names.failures, stamp, "txt");
                std::fs::write(&path, text)?;
                Some(path)
            }
            None => None,
        };

        let excel = self.unique_path(self.names.excel, stamp, "xlsx");
        std::fs::write(&excel, export::excel_report(results)?)?;
        tracing::debug!(path = %excel.display(), "Excel report written");

        Ok(ReportArtifacts {
            json,
            excel,
            failure_log,
        })
    }

    /// `<base>_<stamp>.<ext>`、既にあれば `_2`, `_3` ... を付ける
    fn unique_path(&self, base: &str, stamp: &str, ext: &str) -> PathBuf {
        let first = self.output_dir.join(format!("{}_{}.{}", base, stamp, ext));
        if !first.exists() {
            return first;
        }
        (2..)
            .map(|n| self.output_dir.join(format!("{}_{}_{}.{}", base, stamp, n, ext)))
            .find(|p| !p.exists())
            .unwrap_or(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use video_batch_common::DownloadInfo;

    #[test]
    fn test_unique_path_does_not_overwrite() {
        let dir = tempdir().unwrap();
        let writer = ReportWriter::new(dir.path(), DOWNLOAD_REPORT);
        let results: Vec<ProcessResult<DownloadInfo>> = vec![ProcessResult::failure("https://x/a", "Unknown error")];

        let first = writer.write(&results, "20260118_100000").unwrap();
        let second = writer.write(&results, "20260118_100000").unwrap();

        assert_ne!(first.json, second.json);
        assert!(second.json.ends_with("download_report_20260118_100000_2.json"));
        assert!(first.failure_log.is_some());
        assert_eq!(second.paths().len(), 3);
    }

    #[test]
    fn test_stamp_format() {
        let stamp = stamp_now();
        assert_eq!(stamp.len(), 15);
        assert_eq!(&stamp[8..9], "_");
    }
}
