//! 入力値の整形
//!
//! 表計算ファイルのURL列を処理対象リストへ変換する。

/// 欠損値として扱う文字列（小文字比較）
const MISSING_MARKERS: &[&str] = &["", "nan", "none"];

/// 列見出しからURL列を選ぶ
///
/// 大文字小文字を無視して `url` と完全一致する列を優先し、なければ先頭列。
pub fn select_url_column<S: AsRef<str>>(headers: &[S]) -> usize {
    headers
        .iter()
        .position(|h| h.as_ref().trim().eq_ignore_ascii_case("url"))
        .unwrap_or(0)
}

/// 値をトリムし、空・nan・none を除去する（順序は維持）
pub fn clean_work_items<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_string())
        .filter(|v| !is_missing(v))
        .collect()
}

fn is_missing(value: &str) -> bool {
    let lower = value.to_lowercase();
    MISSING_MARKERS.contains(&lower.as_str())
}

/// 表示幅で切り詰める（文字単位、切り詰めたら末尾に ...）
pub fn truncate_display(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let head: String = text.chars().take(width).collect();
    format!("{}...", head)
}
