//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use msecho_site::config::Config;
use msecho_site::error::MsechoError;
use msecho_site::submit;
use std::path::Path;
use tempfile::tempdir;

/// 存在しない履歴書ファイル
#[test]
fn test_missing_cv_file() {
    let result = submit::attached_file(Path::new("/nonexistent/path/cv.pdf"));
    assert!(matches!(result, Err(MsechoError::FileNotFound(_))));
}

/// ディレクトリを履歴書として指定した場合
#[test]
fn test_cv_path_is_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = submit::attached_file(dir.path());
    assert!(matches!(result, Err(MsechoError::FileNotFound(_))));
}

/// 管理パスワード未設定
#[test]
fn test_admin_not_configured_message() {
    let err = Config::default().admin_gate().unwrap_err();
    let display = format!("{}", err);

    assert!(display.contains("管理パスワード"));
    assert!(display.contains("msecho config"));
}

/// 不正なダイジェストは設定エラー
#[test]
fn test_malformed_digest_is_config_error() {
    let config = Config {
        admin_password_digest: Some("not-hex".to_string()),
        ..Default::default()
    };
    assert!(matches!(config.admin_gate(), Err(MsechoError::Config(_))));
}

/// 設定ファイルが存在しない場合は既定値
#[test]
fn test_config_missing_file_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert!(config.data_dir.is_none());
    assert!(config.admin_password_digest.is_none());
}

/// 設定ファイルの保存と読み込み
#[test]
fn test_config_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_admin_password("pw");
    config.data_dir = Some(dir.path().join("data"));
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.data_dir, config.data_dir);
    assert!(loaded.admin_gate().unwrap().verify("pw"));
}

/// 壊れた設定ファイルはJSONエラー
#[test]
fn test_config_corrupted_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ invalid }").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(MsechoError::JsonParse(_))));
}

/// MsechoErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        MsechoError::Config("テスト設定エラー".to_string()),
        MsechoError::AdminNotConfigured,
        MsechoError::AccessDenied,
        MsechoError::InvalidSubmission(2),
        MsechoError::Prompt("中断".to_string()),
        MsechoError::FileNotFound("cv.pdf".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: MsechoError = io_err.into();

    assert!(matches!(err, MsechoError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = msecho_common::Error::Storage("書き込み失敗".to_string());
    let err: MsechoError = common_err.into();

    assert!(matches!(err, MsechoError::Common(_)));
    assert!(format!("{}", err).contains("書き込み失敗"));
}
