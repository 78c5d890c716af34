//! フォーム検証モジュール
//!
//! 必須項目・メール形式・電話番号形式・添付ファイルを一度に検査し、
//! 失敗したフィールドごとにメッセージを返す。最初の失敗で打ち切らない。

use crate::types::{ApplicationForm, AttachedFile, ContactForm, NewSubmission};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

/// 添付ファイルの上限サイズ（5MB）
pub const MAX_CV_SIZE: u64 = 5 * 1024 * 1024;

/// 添付可能な拡張子
pub const ALLOWED_CV_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx"];

pub const MSG_FULL_NAME_REQUIRED: &str = "Full name is required";
pub const MSG_EMAIL_REQUIRED: &str = "Valid email is required";
pub const MSG_PHONE_REQUIRED: &str = "Phone number is required";
pub const MSG_POSITION_REQUIRED: &str = "Please select a position";
pub const MSG_CONSENT_REQUIRED: &str = "Consent is required";
pub const MSG_EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MSG_PHONE_INVALID: &str = "Please enter a valid phone number";
pub const MSG_CV_TOO_LARGE: &str = "File size must be less than 5MB";
pub const MSG_CV_BAD_TYPE: &str = "Please upload a PDF, DOC, or DOCX file";
pub const MSG_NAME_REQUIRED: &str = "Name is required";
pub const MSG_CONTACT_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_MESSAGE_REQUIRED: &str = "Message is required";

/// 検証対象フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Phone,
    Position,
    Consent,
    CvFile,
    #[serde(rename = "cName")]
    ContactName,
    #[serde(rename = "cEmail")]
    ContactEmail,
    #[serde(rename = "cMessage")]
    ContactMessage,
}

impl Field {
    /// ページ上の入力要素ID
    pub fn input_id(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Position => "position",
            Field::Consent => "consent",
            Field::CvFile => "cvFile",
            Field::ContactName => "cName",
            Field::ContactEmail => "cEmail",
            Field::ContactMessage => "cMessage",
        }
    }

    /// エラーメッセージ表示要素のID
    ///
    /// `fullName` → `err-full-name`、モーダル版は `m-err-full-name`。
    pub fn error_element_id(&self, modal: bool) -> String {
        let mut kebab = String::new();
        for ch in self.input_id().chars() {
            if ch.is_ascii_uppercase() {
                kebab.push('-');
                kebab.push(ch.to_ascii_lowercase());
            } else {
                kebab.push(ch);
            }
        }
        if modal {
            format!("m-err-{}", kebab)
        } else {
            format!("err-{}", kebab)
        }
    }
}

/// 検証結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: BTreeMap<Field, Vec<String>>,
}

impl ValidationReport {
    fn new() -> Self {
        Self {
            valid: true,
            errors: BTreeMap::new(),
        }
    }

    fn fail(&mut self, field: Field, message: &str) {
        self.valid = false;
        self.errors.entry(field).or_default().push(message.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// フィールドのメッセージ一覧（なければ空）
    pub fn messages(&self, field: Field) -> &[String] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// フィールドの最初のメッセージ
    pub fn first_message(&self, field: Field) -> Option<&str> {
        self.messages(field).first().map(String::as_str)
    }

    pub fn has_error(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }
}

lazy_static::lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^[0-9\s\-\+\(\)]+$").unwrap();
}

/// メールアドレスの簡易形式チェック
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// 電話番号の文字種チェック（数字・空白・+ - ( ) のみ）
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// 拡張子（ドット付き・小文字）を取得
///
/// ドットを含まないファイル名はファイル名全体を拡張子とみなす。
pub fn file_extension(name: &str) -> String {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or(name);
    format!(".{}", ext.to_lowercase())
}

fn check_attachment(report: &mut ValidationReport, file: &AttachedFile) {
    if file.size > MAX_CV_SIZE {
        report.fail(Field::CvFile, MSG_CV_TOO_LARGE);
    }
    let ext = file_extension(&file.name);
    if !ALLOWED_CV_EXTENSIONS.contains(&ext.as_str()) {
        report.fail(Field::CvFile, MSG_CV_BAD_TYPE);
    }
}

/// 応募フォームを検証
pub fn validate_application(form: &ApplicationForm) -> ValidationReport {
    let mut report = ValidationReport::new();

    let required = [
        (Field::FullName, form.full_name.as_str(), MSG_FULL_NAME_REQUIRED),
        (Field::Email, form.email.as_str(), MSG_EMAIL_REQUIRED),
        (Field::Phone, form.phone.as_str(), MSG_PHONE_REQUIRED),
        (Field::Position, form.position.as_str(), MSG_POSITION_REQUIRED),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            report.fail(field, message);
        }
    }
    if !form.consent {
        report.fail(Field::Consent, MSG_CONSENT_REQUIRED);
    }

    // 形式チェックは値がある場合のみ
    let email = form.email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        report.fail(Field::Email, MSG_EMAIL_INVALID);
    }

    let phone = form.phone.trim();
    if !phone.is_empty() && !is_valid_phone(phone) {
        report.fail(Field::Phone, MSG_PHONE_INVALID);
    }

    if let Some(file) = &form.cv {
        check_attachment(&mut report, file);
    }

    if !report.valid {
        tracing::debug!(fields = report.errors.len(), "application form rejected");
    }
    report
}

/// 問い合わせフォームを検証
pub fn validate_contact(form: &ContactForm) -> ValidationReport {
    let mut report = ValidationReport::new();

    if form.name.trim().is_empty() {
        report.fail(Field::ContactName, MSG_NAME_REQUIRED);
    }

    let email = form.email.trim();
    if email.is_empty() {
        report.fail(Field::ContactEmail, MSG_CONTACT_EMAIL_REQUIRED);
    } else if !is_valid_email(email) {
        report.fail(Field::ContactEmail, MSG_EMAIL_INVALID);
    }

    if form.message.trim().is_empty() {
        report.fail(Field::ContactMessage, MSG_MESSAGE_REQUIRED);
    }

    if !report.valid {
        tracing::debug!(fields = report.errors.len(), "contact form rejected");
    }
    report
}

/// 種別に応じて検証
pub fn validate(submission: &NewSubmission) -> ValidationReport {
    match submission {
        NewSubmission::Application(form) => validate_application(form),
        NewSubmission::Contact(form) => validate_contact(form),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_application() -> ApplicationForm {
        ApplicationForm {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: "+1 (555) 123-4567".into(),
            position: "Security Officer".into(),
            experience: "3".into(),
            location: "Boston".into(),
            consent: true,
            cv: None,
        }
    }

    #[test]
    fn test_valid_application_has_no_errors() {
        let report = validate_application(&valid_application());
        assert!(report.is_valid());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_each_missing_required_field() {
        let cases: Vec<(Box<dyn Fn(&mut ApplicationForm)>, Field, &str)> = vec![
            (Box::new(|f: &mut ApplicationForm| f.full_name = "  ".into()), Field::FullName, MSG_FULL_NAME_REQUIRED),
            (Box::new(|f: &mut ApplicationForm| f.email = String::new()), Field::Email, MSG_EMAIL_REQUIRED),
            (Box::new(|f: &mut ApplicationForm| f.phone = String::new()), Field::Phone, MSG_PHONE_REQUIRED),
            (Box::new(|f: &mut ApplicationForm| f.position = String::new()), Field::Position, MSG_POSITION_REQUIRED),
            (Box::new(|f: &mut ApplicationForm| f.consent = false), Field::Consent, MSG_CONSENT_REQUIRED),
        ];

        for (mutate, field, message) in cases {
            let mut form = valid_application();
            mutate(&mut form);
            let report = validate_application(&form);
            assert!(!report.is_valid(), "{:?} should be rejected", field);
            assert_eq!(report.messages(field), &[message.to_string()]);
            assert_eq!(report.errors.len(), 1);
        }
    }

    #[test]
    fn test_collects_all_errors_at_once() {
        let form = ApplicationForm {
            email: "not-an-email".into(),
            phone: "call me".into(),
            cv: Some(AttachedFile { name: "virus.exe".into(), size: 6 * 1024 * 1024 }),
            ..Default::default()
        };
        let report = validate_application(&form);

        assert!(!report.is_valid());
        assert_eq!(report.first_message(Field::FullName), Some(MSG_FULL_NAME_REQUIRED));
        assert_eq!(report.first_message(Field::Email), Some(MSG_EMAIL_INVALID));
        assert_eq!(report.first_message(Field::Phone), Some(MSG_PHONE_INVALID));
        assert_eq!(report.first_message(Field::Position), Some(MSG_POSITION_REQUIRED));
        assert_eq!(report.first_message(Field::Consent), Some(MSG_CONSENT_REQUIRED));
        // サイズと種類は独立して両方報告される
        assert_eq!(
            report.messages(Field::CvFile),
            &[MSG_CV_TOO_LARGE.to_string(), MSG_CV_BAD_TYPE.to_string()]
        );
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("abc"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@@b.c"));
    }

    #[test]
    fn test_phone_characters() {
        assert!(is_valid_phone("+1 (555) 123-4567"));
        assert!(is_valid_phone("5551234567"));
        assert!(!is_valid_phone("call me"));
        assert!(!is_valid_phone("555-CALL"));
        // 数字はASCIIのみ
        assert!(!is_valid_phone("٥٥٥١٢٣٤"));
        assert!(!is_valid_phone("５５５-０１００"));
    }

    #[test]
    fn test_attachment_rules() {
        let mut form = valid_application();

        form.cv = Some(AttachedFile { name: "resume.pdf".into(), size: 6 * 1024 * 1024 });
        let report = validate_application(&form);
        assert_eq!(report.messages(Field::CvFile), &[MSG_CV_TOO_LARGE.to_string()]);

        form.cv = Some(AttachedFile { name: "setup.exe".into(), size: 1024 });
        let report = validate_application(&form);
        assert_eq!(report.messages(Field::CvFile), &[MSG_CV_BAD_TYPE.to_string()]);

        form.cv = Some(AttachedFile { name: "resume.docx".into(), size: 1024 });
        assert!(validate_application(&form).is_valid());

        form.cv = Some(AttachedFile { name: "RESUME.PDF".into(), size: MAX_CV_SIZE });
        assert!(validate_application(&form).is_valid());
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("cv.final.DOCX"), ".docx");
        assert_eq!(file_extension("resume"), ".resume");
        assert_eq!(file_extension("archive.tar.gz"), ".gz");
    }

    #[test]
    fn test_contact_rules() {
        let ok = ContactForm {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            message: "Need a quote".into(),
        };
        assert!(validate_contact(&ok).is_valid());

        let report = validate_contact(&ContactForm::default());
        assert_eq!(report.first_message(Field::ContactName), Some(MSG_NAME_REQUIRED));
        assert_eq!(report.first_message(Field::ContactEmail), Some(MSG_CONTACT_EMAIL_REQUIRED));
        assert_eq!(report.first_message(Field::ContactMessage), Some(MSG_MESSAGE_REQUIRED));

        let bad_email = ContactForm { email: "sam@example".into(), ..ok };
        let report = validate_contact(&bad_email);
        assert_eq!(report.messages(Field::ContactEmail), &[MSG_EMAIL_INVALID.to_string()]);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_validate_dispatch() {
        let report = validate(&NewSubmission::Contact(ContactForm::default()));
        assert!(report.has_error(Field::ContactName));
        assert!(!report.has_error(Field::FullName));
    }

    #[test]
    fn test_error_element_ids() {
        assert_eq!(Field::FullName.error_element_id(false), "err-full-name");
        assert_eq!(Field::FullName.error_element_id(true), "m-err-full-name");
        assert_eq!(Field::ContactName.error_element_id(false), "err-c-name");
        assert_eq!(Field::Email.error_element_id(false), "err-email");
    }

    #[test]
    fn test_report_serializes_field_ids() {
        let report = validate_contact(&ContactForm::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"]["cName"][0], MSG_NAME_REQUIRED);
    }
}
