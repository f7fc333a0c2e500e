//! 失敗ログ（プレーンテキスト）の組み立て

use crate::types::ProcessResult;

const RULE_WIDTH: usize = 70;

/// 失敗ログの書式
#[derive(Debug, Clone, Copy)]
pub struct FailureLogStyle {
    /// 先頭行
    pub title: &'static str,
    /// 識別子の前に付けるラベル（File / URL）
    pub label: &'static str,
    /// true ならパスではなくファイル名を記録
    pub file_names: bool,
}

pub const PROBE_FAILURES: FailureLogStyle = FailureLogStyle {
    title: "Failed Video Files",
    label: "File",
    file_names: true,
};

pub const DOWNLOAD_FAILURES: FailureLogStyle = FailureLogStyle {
    title: "Failed URLs",
    label: "URL",
    file_names: false,
};

/// 失敗があればログ本文を返す。全件成功なら None。
pub fn render_failure_log<T>(results: &[ProcessResult<T>], style: &FailureLogStyle) -> Option<String> {
    let failures: Vec<&ProcessResult<T>> = results.iter().filter(|r| !r.success).collect();
    if failures.is_empty() {
        return None;
    }

    let mut text = String::new();
    text.push_str(style.title);
    text.push('\n');
    text.push_str(&"=".repeat(RULE_WIDTH));
    text.push_str("\n\n");

    for failure in failures {
        let id = if style.file_names {
            failure.item_name()
        } else {
            failure.item.clone()
        };
        text.push_str(&format!("{}: {}\n", style.label, id));
        text.push_str(&format!("Reason: {}\n\n", failure.message));
    }

    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_when_all_succeeded() {
        let results = vec![ProcessResult::success("a", "Success", ())];
        assert!(render_failure_log(&results, &DOWNLOAD_FAILURES).is_none());
    }

    #[test]
    fn test_log_lists_failures_with_blank_lines() {
        let results: Vec<ProcessResult<()>> = vec![
            ProcessResult::failure("/v/a.mp4", "File not found"),
            ProcessResult::success("/v/b.mp4", "ok", ()),
            ProcessResult::failure("/v/c.mkv", "JSON decode error"),
        ];
        let log = render_failure_log(&results, &PROBE_FAILURES).unwrap();
        assert!(log.starts_with("Failed Video Files\n"));
        assert!(log.contains("File: a.mp4\nReason: File not found\n\n"));
        assert!(log.contains("File: c.mkv\nReason: JSON decode error\n\n"));
        assert!(!log.contains("b.mp4"));
    }

    #[test]
    fn test_download_log_keeps_full_url() {
        let results: Vec<ProcessResult<()>> = vec![ProcessResult::failure("https://x/watch?v=1", "Unknown error")];
        let log = render_failure_log(&results, &DOWNLOAD_FAILURES).unwrap();
        assert!(log.contains("URL: https://x/watch?v=1\n"));
    }
}
