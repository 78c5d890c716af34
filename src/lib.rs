//! MSECHO 応募・問い合わせ管理ツール
//!
//! 投稿データはデータディレクトリ内の `applications.json` / `contactMessages.json` に保存する。

pub mod admin;
pub mod cli;
pub mod config;
pub mod error;
pub mod file_storage;
pub mod submit;

use error::Result;
use file_storage::FileStorage;
use msecho_common::SubmissionStore;
use std::path::Path;

/// データディレクトリのストアを開く
pub fn open_store(data_dir: &Path) -> Result<SubmissionStore<FileStorage>> {
    let storage = FileStorage::open(data_dir)?;
    Ok(SubmissionStore::new(storage))
}
