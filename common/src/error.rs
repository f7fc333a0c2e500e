//! エラー型定義
//!
//! common はファイルを扱わないため、変換と生成の失敗のみ持つ。

use thiserror::Error;

/// レポート生成エラー
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel error: {0}")]
    Excel(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
        assert!(format!("{}", error).starts_with("JSON error: "));
    }

    #[test]
    fn test_error_display_excel() {
        let error = Error::Excel("シート名が不正です".to_string());
        assert_eq!(format!("{}", error), "Excel error: シート名が不正です");
    }
}
