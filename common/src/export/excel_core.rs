//! Excel生成（共通ライブラリ）
//!
//! layout.rs の列定義を使用して一覧表形式のExcelを生成

use crate::layout::{Cell, ReportRow};
use crate::types::ProcessResult;
use rust_xlsxwriter::*;

/// 1セルに書ける最大文字数
pub const EXCEL_CELL_LIMIT: usize = 32_767;

/// URL一覧テンプレートの見出し
pub const TEMPLATE_HEADER: &str = "URL";

/// URL一覧テンプレートの記入例
pub const TEMPLATE_EXAMPLE_URLS: &[&str] = &[
    "https://www.youtube.com/watch?v=example1",
    "https://www.youtube.com/watch?v=example2",
    "https://www.youtube.com/watch?v=example3",
];

/// Excelをバッファに生成
///
/// 1行目が見出し、以降は結果1件につき1行。
pub fn generate_excel_buffer<T: ReportRow>(results: &[ProcessResult<T>]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(T::SHEET_NAME)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, column) in T::COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, column.width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet
            .write_string_with_format(0, col, column.label, &header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    for (idx, result) in results.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, cell) in T::cells(result).into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => {
                    worksheet
                        .write_string(row, col, fit_cell(text))
                        .map_err(|e| format!("値書き込みエラー: {}", e))?;
                }
                Cell::Number(n) => {
                    worksheet
                        .write_number(row, col, n)
                        .map_err(|e| format!("値書き込みエラー: {}", e))?;
                }
                Cell::Bool(b) => {
                    worksheet
                        .write_boolean(row, col, b)
                        .map_err(|e| format!("値書き込みエラー: {}", e))?;
                }
                Cell::Empty => {}
            }
        }
    }

    // バッファに書き出し
    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

/// URL一覧の入力テンプレート（URL列と記入例）を生成
pub fn generate_url_template() -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_column_width(0, 50.0)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    worksheet
        .write_string_with_format(0, 0, TEMPLATE_HEADER, &header_format)
        .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    for (idx, url) in TEMPLATE_EXAMPLE_URLS.iter().enumerate() {
        worksheet
            .write_string(idx as u32 + 1, 0, *url)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

/// セル上限を超える文字列は切り詰める
fn fit_cell(text: String) -> String {
    if text.chars().count() <= EXCEL_CELL_LIMIT {
        return text;
    }
    text.chars().take(EXCEL_CELL_LIMIT).collect()
}
