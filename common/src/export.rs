//! エクスポートデータ
//!
//! 一括エクスポートは `{applications, messages, exported}`、
//! 単体エクスポートはレコードのフィールドそのものをJSON（2スペースインデント）で出力する。

use crate::error::Result;
use crate::types::{ApplicationRecord, ContactRecord, Submission};
use serde::{Deserialize, Serialize};

pub const EXPORT_MIME_TYPE: &str = "application/json";

/// 一括エクスポートの内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub applications: Vec<ApplicationRecord>,
    pub messages: Vec<ContactRecord>,
    pub exported: String,
}

impl ExportBundle {
    /// エクスポート済みJSONを読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// ダウンロード用ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl ExportFile {
    pub fn mime_type(&self) -> &'static str {
        EXPORT_MIME_TYPE
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.content).unwrap_or_default()
    }

    /// ディレクトリに書き出し
    pub fn write_to(&self, dir: &std::path::Path) -> Result<std::path::PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.content)?;
        Ok(path)
    }
}

/// `msecho-submissions-YYYY-MM-DD.json`
pub fn bundle_file_name(exported: &str) -> String {
    let date = exported.split('T').next().unwrap_or(exported);
    format!("msecho-submissions-{}.json", date)
}

/// `submission-<id>.json`
///
/// IDのうち英数字と `-` `_` 以外は `_` に置き換える（パス区切りを含めない）。
pub fn submission_file_name(id: &str) -> String {
    let safe: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("submission-{}.json", safe)
}

pub fn bundle_file(bundle: &ExportBundle) -> Result<ExportFile> {
    let json = serde_json::to_string_pretty(bundle)?;
    Ok(ExportFile {
        file_name: bundle_file_name(&bundle.exported),
        content: json.into_bytes(),
    })
}

pub fn submission_file(submission: &Submission) -> Result<ExportFile> {
    let json = serde_json::to_string_pretty(submission)?;
    Ok(ExportFile {
        file_name: submission_file_name(submission.id()),
        content: json.into_bytes(),
    })
}
