//! 投稿ストア
//!
//! 応募（`applications`）と問い合わせ（`contactMessages`）の2系列を所有し、
//! 永続化ストレージへの読み書きはすべてここを経由する。
//!
//! - 各系列は挿入順を保持し、それが表示順になる
//! - 変更のたびに系列全体を書き直す（部分書き込みは発生しない）
//! - 保存データが無い・壊れている場合は空の系列として扱う
//! - 読めないレコードは一覧から外すが、書き戻すときは消さずに残す
//!
//! IDは現在時刻（ミリ秒）の10進文字列。同一ミリ秒内の連続追加でも重複しないよう、
//! 既存の最大IDより必ず大きい値を採番する。

use crate::clock::{format_timestamp, Clock, SystemClock};
use crate::error::Result;
use crate::export::{self, ExportBundle, ExportFile};
use crate::storage::KeyValueStorage;
use crate::types::{ApplicationRecord, ContactRecord, NewSubmission, Submission, SubmissionKind};
use serde::de::DeserializeOwned;
use serde_json::Value;

fn record_id(value: &Value) -> Option<&str> {
    value.get("id").and_then(Value::as_str)
}

pub struct SubmissionStore<S, C = SystemClock> {
    storage: S,
    clock: C,
}

impl<S: KeyValueStorage> SubmissionStore<S, SystemClock> {
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: KeyValueStorage, C: Clock> SubmissionStore<S, C> {
    pub fn with_clock(storage: S, clock: C) -> Self {
        Self { storage, clock }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 保存済みの系列を要素単位で読み込む
    ///
    /// 系列全体が読めない場合は空。
    fn load_values(&self, kind: SubmissionKind) -> Vec<Value> {
        let key = kind.storage_key();
        let raw = match self.storage.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read submissions, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(key, error = %e, "unparseable submissions, treating as empty");
                Vec::new()
            }
        }
    }

    /// 読めないレコードは飛ばし、残りを返す
    fn load<T: DeserializeOwned>(&self, kind: SubmissionKind) -> Vec<T> {
        let key = kind.storage_key();
        self.load_values(kind)
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(key, index, error = %e, "skipping unreadable submission");
                    None
                }
            })
            .collect()
    }

    /// 要素単位で書き戻す（読めないレコードもそのまま残る）
    fn save(&mut self, kind: SubmissionKind, values: &[Value]) -> Result<()> {
        let json = serde_json::to_string(values)?;
        self.storage.set_item(kind.storage_key(), &json)?;
        tracing::debug!(key = kind.storage_key(), count = values.len(), "submissions saved");
        Ok(())
    }

    /// 応募一覧（挿入順）
    pub fn applications(&self) -> Vec<ApplicationRecord> {
        self.load(SubmissionKind::Application)
    }

    /// 問い合わせ一覧（挿入順）
    pub fn messages(&self) -> Vec<ContactRecord> {
        self.load(SubmissionKind::Contact)
    }

    pub fn list(&self, kind: SubmissionKind) -> Vec<Submission> {
        match kind {
            SubmissionKind::Application => self
                .applications()
                .into_iter()
                .map(Submission::Application)
                .collect(),
            SubmissionKind::Contact => self
                .messages()
                .into_iter()
                .map(Submission::Contact)
                .collect(),
        }
    }

    fn next_id(&self, now_millis: i64) -> String {
        let largest = SubmissionKind::ALL
            .iter()
            .flat_map(|&kind| self.load_values(kind))
            .filter_map(|value| record_id(&value).and_then(|id| id.parse::<i64>().ok()))
            .max();

        match largest.and_then(|largest| largest.checked_add(1)) {
            Some(next) if next > now_millis => next.to_string(),
            _ => now_millis.to_string(),
        }
    }

    /// IDとタイムスタンプを付与して末尾に追加
    pub fn append(&mut self, submission: NewSubmission) -> Result<Submission> {
        let now = self.clock.now();
        let id = self.next_id(now.timestamp_millis());
        let timestamp = format_timestamp(now);

        let record = match submission {
            NewSubmission::Application(form) => Submission::Application(form.into_record(id, timestamp)),
            NewSubmission::Contact(form) => Submission::Contact(form.into_record(id, timestamp)),
        };

        let kind = record.kind();
        let mut values = self.load_values(kind);
        values.push(serde_json::to_value(&record)?);
        self.save(kind, &values)?;

        tracing::info!(id = record.id(), kind = ?record.kind(), "submission stored");
        Ok(record)
    }

    /// 両系列からIDで検索（応募を先に探す）
    pub fn find_by_id(&self, id: &str) -> Option<Submission> {
        if let Some(record) = self.applications().into_iter().find(|r| r.id == id) {
            return Some(Submission::Application(record));
        }
        self.messages()
            .into_iter()
            .find(|r| r.id == id)
            .map(Submission::Contact)
    }

    /// IDに一致するレコードを削除
    ///
    /// 見つからなければ何もせず `false` を返す。変更のあった系列のみ書き直す。
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let mut removed = false;

        for kind in SubmissionKind::ALL {
            let mut values = self.load_values(kind);
            let before = values.len();
            values.retain(|value| record_id(value) != Some(id));
            if values.len() != before {
                self.save(kind, &values)?;
                removed = true;
            }
        }

        if removed {
            tracing::info!(id, "submission removed");
        } else {
            tracing::debug!(id, "remove: no such submission");
        }
        Ok(removed)
    }

    /// 両系列を削除
    pub fn clear_all(&mut self) -> Result<()> {
        self.storage.remove_item(SubmissionKind::Application.storage_key())?;
        self.storage.remove_item(SubmissionKind::Contact.storage_key())?;
        tracing::info!("all submissions cleared");
        Ok(())
    }

    /// 現在の内容をエクスポート用にまとめる
    pub fn snapshot(&self) -> ExportBundle {
        ExportBundle {
            applications: self.applications(),
            messages: self.messages(),
            exported: format_timestamp(self.clock.now()),
        }
    }

    /// 一括エクスポート
    pub fn export_all(&self) -> Result<ExportFile> {
        export::bundle_file(&self.snapshot())
    }

    /// 単体エクスポート（見つからなければ `None`）
    pub fn export_one(&self, id: &str) -> Result<Option<ExportFile>> {
        match self.find_by_id(id) {
            Some(submission) => Ok(Some(export::submission_file(&submission)?)),
            None => Ok(None),
        }
    }
}
