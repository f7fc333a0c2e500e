//! URL一覧の読み込み
//!
//! Excel系（xlsx/xls/xlsm/ods）は先頭シートの1行目を見出しとして列を選ぶ。
//! txt は1行1URL。

use crate::error::{Result, VideoBatchError};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use video_batch_common::export;
use video_batch_common::{clean_work_items, select_url_column};

/// テンプレートの既定ファイル名
pub const TEMPLATE_FILE_NAME: &str = "youtube_urls_template.xlsx";

/// ファイルからURL列を読み込み、空・nan・noneを除去して返す
pub fn read_urls(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(VideoBatchError::FileNotFound(path.display().to_string()));
    }

    let is_text = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);

    if is_text {
        let content = std::fs::read_to_string(path)?;
        return Ok(clean_work_items(content.lines()));
    }

    read_workbook_urls(path)
}

/// URL列と記入例を持つ入力テンプレートを書き出す
pub fn write_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(VideoBatchError::FileExists(path.display().to_string()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, export::url_template()?)?;
    tracing::debug!(path = %path.display(), "URL template written");
    Ok(())
}

fn read_workbook_urls(path: &Path) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| VideoBatchError::SheetRead(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| VideoBatchError::SheetRead(format!("シートがありません: {}", path.display())))?
        .map_err(|e| VideoBatchError::SheetRead(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();
    let column = select_url_column(&headers);
    tracing::debug!(column, header = headers.get(column).map(String::as_str), "URL column selected");

    let values = rows.filter_map(|row| row.get(column).and_then(cell_text));
    Ok(clean_work_items(values))
}

/// 文字列セルのみ採用（数値・真偽値・空・エラーセルは None）
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => Some(s.clone()),
        _ => None,
    }
}
