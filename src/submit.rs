//! 応募・問い合わせの受付
//!
//! 入力を検証し、問題が無ければストアに追加する。
//! 検証エラーはフィールドごとに表示し、保存は行わない。

use crate::error::{MsechoError, Result};
use msecho_common::{
    validate, AttachedFile, Clock, KeyValueStorage, NewSubmission, Submission, SubmissionStore,
    ValidationReport,
};
use std::path::Path;

/// 添付ファイルの名前とサイズを取得（中身は読まない）
pub fn attached_file(path: &Path) -> Result<AttachedFile> {
    if !path.is_file() {
        return Err(MsechoError::FileNotFound(path.display().to_string()));
    }
    let size = std::fs::metadata(path)?.len();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(AttachedFile { name, size })
}

/// 検証結果を表示用の行に変換
pub fn report_lines(report: &ValidationReport) -> Vec<String> {
    report
        .errors
        .iter()
        .flat_map(|(field, messages)| {
            messages
                .iter()
                .map(move |message| format!("{}: {}", field.input_id(), message))
        })
        .collect()
}

/// 検証して保存
pub fn submit<S: KeyValueStorage, C: Clock>(
    store: &mut SubmissionStore<S, C>,
    submission: NewSubmission,
) -> Result<Submission> {
    let report = validate(&submission);
    if !report.is_valid() {
        for line in report_lines(&report) {
            eprintln!("  ✗ {}", line);
        }
        let count: usize = report.errors.values().map(Vec::len).sum();
        return Err(MsechoError::InvalidSubmission(count));
    }

    Ok(store.append(submission)?)
}
