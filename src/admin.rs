//! 管理コマンド
//!
//! ローカル専用の管理ツール。パスワードはソルト付きダイジェストと照合するだけで、
//! 回数制限は無い。失敗時は一度だけ通知し、再実行で再入力する。

use crate::cli::AdminAction;
use crate::error::{MsechoError, Result};
use dialoguer::{Confirm, Password};
use msecho_common::{render, AdminGate, Clock, KeyValueStorage, SubmissionStore};
use std::path::{Path, PathBuf};

/// パスワードを照合（未指定なら対話入力）
pub fn login(gate: &AdminGate, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("管理パスワード")
            .interact()
            .map_err(|e| MsechoError::Prompt(e.to_string()))?,
    };

    if gate.verify(&password) {
        tracing::debug!("admin gate passed");
        Ok(())
    } else {
        tracing::warn!("admin gate rejected password");
        Err(MsechoError::AccessDenied)
    }
}

fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| MsechoError::Prompt(e.to_string()))
}

fn output_dir(output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| PathBuf::from("."))
}

/// 管理操作を実行
pub fn run<S: KeyValueStorage, C: Clock>(
    store: &mut SubmissionStore<S, C>,
    action: AdminAction,
) -> Result<()> {
    match action {
        AdminAction::List => {
            let applications = store.applications();
            let messages = store.messages();
            print!("{}", render::render_text(&applications, &messages));
        }

        AdminAction::Show { id } => match store.find_by_id(&id) {
            Some(submission) => {
                println!("{}", serde_json::to_string_pretty(&submission)?);
            }
            None => println!("該当する投稿はありません: {}", id),
        },

        AdminAction::Delete { id, yes } => {
            if store.find_by_id(&id).is_none() {
                println!("該当する投稿はありません: {}", id);
                return Ok(());
            }
            if !confirm("この投稿を削除しますか？", yes)? {
                println!("中止しました");
                return Ok(());
            }
            store.remove(&id)?;
            println!("✔ 削除しました: {}", id);
        }

        AdminAction::Clear { yes } => {
            if !confirm("すべての投稿を削除します。元に戻せません。続行しますか？", yes)? {
                println!("中止しました");
                return Ok(());
            }
            store.clear_all()?;
            println!("✔ すべての投稿を削除しました");
        }

        AdminAction::Export { output } => {
            let file = store.export_all()?;
            let path = file.write_to(&output_dir(output))?;
            println!("✔ エクスポート: {}", path.display());
        }

        AdminAction::ExportOne { id, output } => match store.export_one(&id)? {
            Some(file) => {
                let path = file.write_to(&output_dir(output))?;
                println!("✔ エクスポート: {}", path.display());
            }
            None => println!("該当する投稿はありません: {}", id),
        },

        AdminAction::Render { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from("submissions.html"));
            write_html(store, &path)?;
            println!("✔ HTML出力: {}", path.display());
        }
    }

    Ok(())
}

/// 一覧をHTML文書として書き出し
pub fn write_html<S: KeyValueStorage, C: Clock>(
    store: &SubmissionStore<S, C>,
    path: &Path,
) -> Result<()> {
    let html = render::render_document(&store.applications(), &store.messages());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}
