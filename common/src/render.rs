//! 管理画面の表示生成
//!
//! 保存済みの値はすべて利用者入力として扱い、HTMLに埋め込む前にエスケープする。
//! 操作ボタンはインラインスクリプトを持たず、`data-action` / `data-id` 属性で識別する。

use crate::types::{ApplicationRecord, ContactRecord};
use chrono::DateTime;
use std::fmt::Write;

const NOT_SPECIFIED: &str = "Not specified";

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// タイムスタンプを `YYYY-MM-DD HH:MM:SS UTC` で表示（解釈できなければそのまま）
pub fn display_time(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt
            .with_timezone(&chrono::Utc)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}

fn or_not_specified(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}

fn push_actions(html: &mut String, id: &str) {
    let id = escape_html(id);
    html.push_str("    <div class=\"submission-actions\">\n");
    let _ = writeln!(
        html,
        "      <button type=\"button\" class=\"btn btn-small btn-outline\" data-action=\"download\" data-id=\"{}\">Download</button>",
        id
    );
    let _ = writeln!(
        html,
        "      <button type=\"button\" class=\"btn btn-small btn-ghost\" data-action=\"delete\" data-id=\"{}\">Delete</button>",
        id
    );
    html.push_str("    </div>\n");
}

fn push_application(html: &mut String, app: &ApplicationRecord) {
    html.push_str("  <div class=\"submission-card\">\n");
    let _ = writeln!(
        html,
        "    <h4>{} - {}</h4>",
        escape_html(&app.full_name),
        escape_html(&app.position)
    );
    let _ = writeln!(html, "    <p><strong>Email:</strong> {}</p>", escape_html(&app.email));
    let _ = writeln!(html, "    <p><strong>Phone:</strong> {}</p>", escape_html(&app.phone));
    let _ = writeln!(
        html,
        "    <p><strong>Experience:</strong> {} years</p>",
        escape_html(or_not_specified(&app.experience))
    );
    let _ = writeln!(
        html,
        "    <p><strong>Location:</strong> {}</p>",
        escape_html(or_not_specified(&app.location))
    );
    if let Some(cv) = app.cv_file.as_deref().filter(|cv| !cv.is_empty()) {
        let _ = writeln!(html, "    <p><strong>CV:</strong> {}</p>", escape_html(cv));
    }
    let _ = writeln!(
        html,
        "    <p class=\"submission-meta\">Applied: {}</p>",
        escape_html(&display_time(&app.timestamp))
    );
    push_actions(html, &app.id);
    html.push_str("  </div>\n");
}

fn push_message(html: &mut String, msg: &ContactRecord) {
    html.push_str("  <div class=\"submission-card\">\n");
    let _ = writeln!(html, "    <h4>{}</h4>", escape_html(&msg.name));
    let _ = writeln!(html, "    <p><strong>Email:</strong> {}</p>", escape_html(&msg.email));
    let _ = writeln!(html, "    <p><strong>Message:</strong> {}</p>", escape_html(&msg.message));
    let _ = writeln!(
        html,
        "    <p class=\"submission-meta\">Sent: {}</p>",
        escape_html(&display_time(&msg.timestamp))
    );
    push_actions(html, &msg.id);
    html.push_str("  </div>\n");
}

/// 投稿一覧のHTML断片を生成
pub fn render_submissions(applications: &[ApplicationRecord], messages: &[ContactRecord]) -> String {
    let mut html = String::new();

    let _ = writeln!(html, "<h3>Job Applications ({})</h3>", applications.len());
    if applications.is_empty() {
        html.push_str("<p>No applications found.</p>\n");
    } else {
        for app in applications {
            push_application(&mut html, app);
        }
    }

    let _ = writeln!(html, "<h3>Contact Messages ({})</h3>", messages.len());
    if messages.is_empty() {
        html.push_str("<p>No messages found.</p>\n");
    } else {
        for msg in messages {
            push_message(&mut html, msg);
        }
    }

    html
}

/// 管理画面を単体のHTML文書として生成
pub fn render_document(applications: &[ApplicationRecord], messages: &[ContactRecord]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>MSECHO submissions</title>\n</head>\n<body>\n");
    html.push_str("<section id=\"submissions\">\n");
    html.push_str(&render_submissions(applications, messages));
    html.push_str("</section>\n</body>\n</html>\n");
    html
}

/// 端末に出す値から制御文字（エスケープシーケンスを含む）を除く
///
/// 改行やタブは空白1つにする。
pub fn terminal_text(value: &str) -> String {
    value
        .chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// 端末表示用のテキスト一覧
pub fn render_text(applications: &[ApplicationRecord], messages: &[ContactRecord]) -> String {
    let t = terminal_text;
    let mut out = String::new();

    let _ = writeln!(out, "Job Applications ({})", applications.len());
    if applications.is_empty() {
        out.push_str("  No applications found.\n");
    }
    for app in applications {
        let _ = writeln!(out, "  [{}] {} - {}", t(&app.id), t(&app.full_name), t(&app.position));
        let _ = writeln!(out, "      Email: {}  Phone: {}", t(&app.email), t(&app.phone));
        let _ = writeln!(
            out,
            "      Experience: {} years  Location: {}",
            t(or_not_specified(&app.experience)),
            t(or_not_specified(&app.location))
        );
        if let Some(cv) = &app.cv_file {
            match app.cv_size {
                Some(size) => {
                    let _ = writeln!(out, "      CV: {} ({} bytes)", t(cv), size);
                }
                None => {
                    let _ = writeln!(out, "      CV: {}", t(cv));
                }
            }
        }
        let _ = writeln!(out, "      Applied: {}", t(&display_time(&app.timestamp)));
    }

    let _ = writeln!(out, "Contact Messages ({})", messages.len());
    if messages.is_empty() {
        out.push_str("  No messages found.\n");
    }
    for msg in messages {
        let _ = writeln!(out, "  [{}] {} <{}>", t(&msg.id), t(&msg.name), t(&msg.email));
        let _ = writeln!(out, "      {}", t(&msg.message));
        let _ = writeln!(out, "      Sent: {}", t(&display_time(&msg.timestamp)));
    }

    out
}
