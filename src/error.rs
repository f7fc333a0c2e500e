use thiserror::Error;

#[derive(Error, Debug)]
pub enum VideoBatchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("{tool} が見つかりません: {reason}\n{guidance}")]
    ToolNotFound {
        tool: String,
        reason: String,
        guidance: &'static str,
    },

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("Cookieファイルが見つかりません: {0}（ブラウザ拡張でcookies.txtをエクスポートしてください）")]
    CookieFileNotFound(String),

    #[error("{0}")]
    ToolFailed(String),

    #[error("JSON decode error: {0}")]
    ProbeParse(String),

    #[error("表計算ファイル読み込みエラー: {0}")]
    SheetRead(String),

    #[error("ファイルが既に存在します: {0}（--force で上書き）")]
    FileExists(String),

    #[error("処理対象がありません: {0}")]
    NoItems(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] video_batch_common::Error),
}

pub type Result<T> = std::result::Result<T, VideoBatchError>;
