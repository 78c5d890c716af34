//! MSECHO Common Library
//!
//! CLIとWeb(WASM)で共有される型とロジック:
//! フォーム検証、投稿ストア、エクスポート、管理画面表示

pub mod types;
pub mod error;
pub mod validator;
pub mod storage;
pub mod clock;
pub mod store;
pub mod export;
pub mod render;
pub mod admin;

pub use types::{
    ApplicationForm, ApplicationRecord, AttachedFile, ContactForm, ContactRecord, NewSubmission,
    Submission, SubmissionKind,
};
pub use error::{Error, Result};
pub use validator::{validate, validate_application, validate_contact, Field, ValidationReport};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use clock::{Clock, FixedClock, SystemClock};
pub use store::SubmissionStore;
pub use export::{ExportBundle, ExportFile};
pub use admin::AdminGate;
