//! 投稿データの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ApplicationForm / ContactForm: フォーム入力値（検証前）
//! - ApplicationRecord / ContactRecord: 保存済みレコード
//! - Submission: どちらか一方のレコード

use serde::{Deserialize, Serialize};

/// レコード種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmissionKind {
    Application,
    Contact,
}

impl SubmissionKind {
    pub const ALL: [SubmissionKind; 2] = [SubmissionKind::Application, SubmissionKind::Contact];

    /// 永続化ストレージ上のキー名
    pub fn storage_key(&self) -> &'static str {
        match self {
            SubmissionKind::Application => "applications",
            SubmissionKind::Contact => "contactMessages",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionKind::Application => "Job Applications",
            SubmissionKind::Contact => "Contact Messages",
        }
    }
}

impl std::str::FromStr for SubmissionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "application" | "applications" | "app" => Ok(SubmissionKind::Application),
            "contact" | "contacts" | "message" | "messages" => Ok(SubmissionKind::Contact),
            _ => Err(format!("Unknown kind: {}. Use application or contact", s)),
        }
    }
}

/// 添付ファイル（ファイル名とサイズのみ。中身は保存しない）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedFile {
    pub name: String,
    pub size: u64,
}

/// 応募フォームの入力値
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub experience: String,
    pub location: String,
    pub consent: bool,
    pub cv: Option<AttachedFile>,
}

/// 問い合わせフォームの入力値
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    #[serde(rename = "cName")]
    pub name: String,
    #[serde(rename = "cEmail")]
    pub email: String,
    #[serde(rename = "cMessage")]
    pub message: String,
}

/// 保存前の投稿（検証・追加の入力）
#[derive(Debug, Clone, PartialEq)]
pub enum NewSubmission {
    Application(ApplicationForm),
    Contact(ContactForm),
}

impl NewSubmission {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            NewSubmission::Application(_) => SubmissionKind::Application,
            NewSubmission::Contact(_) => SubmissionKind::Contact,
        }
    }
}

/// 保存済みの応募レコード
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// 添付ファイル名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_file: Option<String>,

    /// 添付ファイルサイズ（バイト）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_size: Option<u64>,

    pub timestamp: String,
}

/// 保存済みの問い合わせレコード
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: String,
    #[serde(rename = "cName")]
    pub name: String,
    #[serde(rename = "cEmail")]
    pub email: String,
    #[serde(rename = "cMessage")]
    pub message: String,
    pub timestamp: String,
}

/// どちらか一方のレコード
///
/// タグなしでシリアライズされるため、単体エクスポートはレコードのフィールドそのものになる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Submission {
    Application(ApplicationRecord),
    Contact(ContactRecord),
}

impl Submission {
    pub fn id(&self) -> &str {
        match self {
            Submission::Application(r) => &r.id,
            Submission::Contact(r) => &r.id,
        }
    }

    pub fn timestamp(&self) -> &str {
        match self {
            Submission::Application(r) => &r.timestamp,
            Submission::Contact(r) => &r.timestamp,
        }
    }

    pub fn kind(&self) -> SubmissionKind {
        match self {
            Submission::Application(_) => SubmissionKind::Application,
            Submission::Contact(_) => SubmissionKind::Contact,
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl ApplicationForm {
    /// 入力値からレコードを作成（前後の空白は除去）
    pub fn into_record(self, id: String, timestamp: String) -> ApplicationRecord {
        let (cv_file, cv_size) = match self.cv {
            Some(file) => (Some(file.name), Some(file.size)),
            None => (None, None),
        };

        ApplicationRecord {
            id,
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            position: self.position.trim().to_string(),
            experience: optional(&self.experience),
            location: optional(&self.location),
            cv_file,
            cv_size,
            timestamp,
        }
    }
}

impl ContactForm {
    pub fn into_record(self, id: String, timestamp: String) -> ContactRecord {
        ContactRecord {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys() {
        assert_eq!(SubmissionKind::Application.storage_key(), "applications");
        assert_eq!(SubmissionKind::Contact.storage_key(), "contactMessages");
    }

    #[test]
    fn test_application_record_camel_case() {
        let record = ApplicationRecord {
            id: "1".into(),
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: "555-0100".into(),
            position: "Security Officer".into(),
            cv_file: Some("cv.pdf".into()),
            cv_size: Some(1024),
            timestamp: "2026-10-18T09:30:00.000Z".into(),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fullName"], "Jane Doe");
        assert_eq!(json["cvFile"], "cv.pdf");
        assert_eq!(json["cvSize"], 1024);
        // 未指定の任意項目は出力しない
        assert!(json.get("experience").is_none());
        assert!(json.get("location").is_none());
    }

    #[test]
    fn test_contact_record_field_names() {
        let record = ContactRecord {
            id: "2".into(),
            name: "Sam".into(),
            email: "sam@example.com".into(),
            message: "Hello".into(),
            timestamp: "2026-10-18T09:30:00.000Z".into(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["cName"], "Sam");
        assert_eq!(json["cEmail"], "sam@example.com");
        assert_eq!(json["cMessage"], "Hello");
    }

    #[test]
    fn test_reads_site_script_records() {
        // ブラウザ版が保存した余分なキー（consent等）は無視される
        let json = r#"{
            "fullName": "Ann", "email": "ann@x.io", "phone": "123",
            "position": "Guard", "experience": "", "consent": "on",
            "timestamp": "2025-01-01T00:00:00.000Z", "id": "1735689600000"
        }"#;
        let record: ApplicationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.full_name, "Ann");
        assert_eq!(record.experience.as_deref(), Some(""));
        assert!(record.cv_file.is_none());
    }

    #[test]
    fn test_untagged_submission_roundtrip() {
        let contact = Submission::Contact(ContactRecord {
            id: "9".into(),
            name: "A".into(),
            email: "a@b.c".into(),
            message: "m".into(),
            timestamp: "t".into(),
        });
        let json = serde_json::to_string(&contact).unwrap();
        assert!(!json.contains("Contact"));
        let back: Submission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, contact);
        assert_eq!(back.kind(), SubmissionKind::Contact);
    }

    #[test]
    fn test_into_record_trims_and_drops_empty_optionals() {
        let form = ApplicationForm {
            full_name: "  Jane  ".into(),
            email: "jane@example.com ".into(),
            phone: "555".into(),
            position: "Guard".into(),
            experience: "   ".into(),
            location: " Boston ".into(),
            consent: true,
            cv: Some(AttachedFile { name: "cv.docx".into(), size: 2048 }),
        };
        let record = form.into_record("1".into(), "ts".into());
        assert_eq!(record.full_name, "Jane");
        assert_eq!(record.email, "jane@example.com");
        assert_eq!(record.experience, None);
        assert_eq!(record.location.as_deref(), Some("Boston"));
        assert_eq!(record.cv_file.as_deref(), Some("cv.docx"));
        assert_eq!(record.cv_size, Some(2048));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("applications".parse::<SubmissionKind>().unwrap(), SubmissionKind::Application);
        assert_eq!("Messages".parse::<SubmissionKind>().unwrap(), SubmissionKind::Contact);
        assert!("other".parse::<SubmissionKind>().is_err());
    }
}
