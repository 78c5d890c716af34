use thiserror::Error;

#[derive(Error, Debug)]
pub enum MsechoError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("管理パスワードが設定されていません。`msecho config --set-admin-password` で設定してください")]
    AdminNotConfigured,

    #[error("管理パスワードが違います")]
    AccessDenied,

    #[error("入力内容に誤りがあります ({0}件)")]
    InvalidSubmission(usize),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] msecho_common::Error),
}

pub type Result<T> = std::result::Result<T, MsechoError>;
