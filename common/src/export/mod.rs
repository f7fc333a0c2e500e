//! レポート出力の共通部品

pub mod failure_log;

#[cfg(feature = "excel")]
pub mod excel_core;

pub use failure_log::{render_failure_log, FailureLogStyle, DOWNLOAD_FAILURES, PROBE_FAILURES};

use crate::error::Result;
use crate::types::ProcessResult;
#[cfg(feature = "excel")]
use crate::{error::Error, layout::ReportRow};
use serde::Serialize;

/// 全結果をJSON配列（整形済み）に変換
pub fn json_report<T: Serialize>(results: &[ProcessResult<T>]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// 全結果をxlsxバイト列に変換
#[cfg(feature = "excel")]
pub fn excel_report<T: ReportRow>(results: &[ProcessResult<T>]) -> Result<Vec<u8>> {
    excel_core::generate_excel_buffer(results).map_err(Error::Excel)
}

/// URL一覧の入力テンプレートをxlsxバイト列で返す
#[cfg(feature = "excel")]
pub fn url_template() -> Result<Vec<u8>> {
    excel_core::generate_url_template().map_err(Error::Excel)
}
