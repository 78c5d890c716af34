//! MSECHO site browser bindings (WASM)
//!
//! ページのスクリプトから呼ぶ関数群。投稿データの読み書きは
//! すべて `SubmissionStore` 経由で localStorage に対して行う。

mod admin_view;
mod download;
mod forms;
mod storage;

use msecho_common::{
    validate_application, validate_contact, AdminGate, ApplicationForm, ContactForm,
    NewSubmission, SubmissionStore, ValidationReport,
};
use serde::Serialize;
use storage::LocalStorage;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlFormElement};

const CONTACT_SENT_NOTICE: &str = "Message sent! (Stored locally in this browser)";

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
}

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_plain_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(to_js)
}

pub(crate) fn open_store() -> Result<SubmissionStore<LocalStorage>, JsValue> {
    LocalStorage::open().map(SubmissionStore::new).map_err(to_js)
}

fn report_to_js(report: &ValidationReport) -> Result<JsValue, JsValue> {
    to_plain_js(report)
}

/// 応募フォームの値を検証（`{valid, errors}` を返す）
#[wasm_bindgen(js_name = "validateApplication")]
pub fn validate_application_js(data: JsValue) -> Result<JsValue, JsValue> {
    let form: ApplicationForm = serde_wasm_bindgen::from_value(data)?;
    report_to_js(&validate_application(&form))
}

/// 問い合わせフォームの値を検証
#[wasm_bindgen(js_name = "validateContact")]
pub fn validate_contact_js(data: JsValue) -> Result<JsValue, JsValue> {
    let form: ContactForm = serde_wasm_bindgen::from_value(data)?;
    report_to_js(&validate_contact(&form))
}

/// フォームのエラー表示を消す
#[wasm_bindgen(js_name = "clearFormErrors")]
pub fn clear_form_errors(form: &HtmlFormElement) -> Result<(), JsValue> {
    forms::clear_errors(form)
}

/// 応募を検証して保存。不備があればエラーを表示して `null` を返す
///
/// 保存できたらフォームを隠して完了表示に切り替える。
#[wasm_bindgen(js_name = "submitApplication")]
pub fn submit_application(form_el: &HtmlFormElement, data: JsValue) -> Result<JsValue, JsValue> {
    let form: ApplicationForm = serde_wasm_bindgen::from_value(data)?;
    let report = validate_application(&form);
    forms::show_report(form_el, &report)?;
    if !report.is_valid() {
        return Ok(JsValue::NULL);
    }

    let mut store = open_store()?;
    let record = store
        .append(NewSubmission::Application(form))
        .map_err(to_js)?;
    forms::show_success(form_el)?;
    to_plain_js(&record)
}

/// 完了表示の「もう一度応募する」ボタンから呼ぶ
#[wasm_bindgen(js_name = "startNewApplication")]
pub fn start_new_application(button: &Element) -> Result<(), JsValue> {
    forms::start_new_application(button)
}

/// 問い合わせを検証して保存。保存後は通知してフォームをリセットする
#[wasm_bindgen(js_name = "submitContact")]
pub fn submit_contact(form_el: &HtmlFormElement, data: JsValue) -> Result<JsValue, JsValue> {
    let form: ContactForm = serde_wasm_bindgen::from_value(data)?;
    let report = validate_contact(&form);
    forms::show_report(form_el, &report)?;
    if !report.is_valid() {
        return Ok(JsValue::NULL);
    }

    let mut store = open_store()?;
    let record = store.append(NewSubmission::Contact(form)).map_err(to_js)?;

    gloo::dialogs::alert(CONTACT_SENT_NOTICE);
    form_el.reset();
    forms::clear_errors(form_el)?;
    to_plain_js(&record)
}

/// 管理画面の簡易ゲート（ローカル専用。認証基盤ではない）
#[wasm_bindgen(js_name = "adminLogin")]
pub fn admin_login(password: &str, digest_hex: &str, salt: &str) -> bool {
    let Some(gate) = AdminGate::from_digest(digest_hex, salt) else {
        web_sys::console::error_1(&JsValue::from_str("admin digest is malformed"));
        return false;
    };

    if gate.verify(password) {
        true
    } else {
        gloo::dialogs::alert("Incorrect password.");
        false
    }
}

/// 投稿一覧のHTML（値はエスケープ済み）
#[wasm_bindgen(js_name = "renderSubmissions")]
pub fn render_submissions() -> Result<String, JsValue> {
    admin_view::listing_html()
}

/// 投稿一覧を要素に描画し、Download / Delete ボタンを有効にする
#[wasm_bindgen(js_name = "renderSubmissionsInto")]
pub fn render_submissions_into(container: &Element) -> Result<(), JsValue> {
    admin_view::bind(container)
}

/// 1件をJSONでダウンロード（見つからなければ何もしない）
#[wasm_bindgen(js_name = "downloadSubmission")]
pub fn download_submission(id: &str) -> Result<(), JsValue> {
    let store = open_store()?;
    if let Some(file) = store.export_one(id).map_err(to_js)? {
        download::download(&file)?;
    }
    Ok(())
}

/// 確認のうえ1件を削除。削除したら `true`
#[wasm_bindgen(js_name = "deleteSubmission")]
pub fn delete_submission(id: &str) -> Result<bool, JsValue> {
    if !gloo::dialogs::confirm("Are you sure you want to delete this submission?") {
        return Ok(false);
    }
    let mut store = open_store()?;
    let removed = store.remove(id).map_err(to_js)?;
    admin_view::refresh()?;
    Ok(removed)
}

/// 全件をJSONでダウンロード
#[wasm_bindgen(js_name = "exportAllData")]
pub fn export_all_data() -> Result<(), JsValue> {
    let store = open_store()?;
    let file = store.export_all().map_err(to_js)?;
    download::download(&file)
}

/// 確認のうえ全件を削除
#[wasm_bindgen(js_name = "clearAllData")]
pub fn clear_all_data() -> Result<bool, JsValue> {
    if !gloo::dialogs::confirm(
        "Are you sure you want to delete ALL submissions? This cannot be undone.",
    ) {
        return Ok(false);
    }
    let mut store = open_store()?;
    store.clear_all().map_err(to_js)?;
    admin_view::refresh()?;
    Ok(true)
}
