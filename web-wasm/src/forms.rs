//! フォームのエラー表示
//!
//! 再検証のたびに既存の表示を消してから、失敗したフィールドにメッセージと
//! `aria-invalid` を付ける。

use msecho_common::{Field, ValidationReport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlFormElement};

/// 送信完了表示（フォームと同じ親の中を探す）
pub const SUCCESS_SELECTOR: &str = ".success, #application-success, #application-success-modal";

/// モーダル内のフォームか（IDが `-modal` で終わる）
pub fn is_modal_form_id(form_id: &str) -> bool {
    form_id.ends_with("-modal")
}

/// フィールドの入力要素を探すセレクタ（通常版とモーダル版）
pub fn input_selector(field: Field) -> String {
    let id = field.input_id();
    if field == Field::CvFile {
        return "input[type=\"file\"]".to_string();
    }
    format!("#{}, #m-{}", id, id)
}

fn elements(form: &HtmlFormElement, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = form.query_selector_all(selector)?;
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(el) = list.get(i).and_then(|node| node.dyn_into::<Element>().ok()) {
            out.push(el);
        }
    }
    Ok(out)
}

/// 表示中のエラーと `aria-invalid` をすべて消す
pub fn clear_errors(form: &HtmlFormElement) -> Result<(), JsValue> {
    for el in elements(form, ".error")? {
        el.set_text_content(Some(""));
    }
    for el in elements(form, "input, select, textarea")? {
        el.remove_attribute("aria-invalid")?;
    }
    Ok(())
}

/// 検証結果をフォームに表示
pub fn show_report(form: &HtmlFormElement, report: &ValidationReport) -> Result<(), JsValue> {
    clear_errors(form)?;

    let modal = is_modal_form_id(&form.id());
    for (field, messages) in &report.errors {
        let Some(message) = messages.first() else {
            continue;
        };

        if let Some(input) = form.query_selector(&input_selector(*field))? {
            input.set_attribute("aria-invalid", "true")?;
        }

        let error_id = field.error_element_id(modal);
        if let Some(target) = form.query_selector(&format!("#{}", error_id))? {
            target.set_text_content(Some(message.as_str()));
        }
    }
    Ok(())
}

/// フォームを隠して完了表示に切り替える
///
/// 完了表示が見つからなければ何もせず `false`。
pub fn show_success(form: &HtmlFormElement) -> Result<bool, JsValue> {
    let Some(parent) = form.parent_element() else {
        return Ok(false);
    };
    let Some(success) = parent.query_selector(SUCCESS_SELECTOR)? else {
        return Ok(false);
    };
    form.set_hidden(true);
    success.dyn_into::<HtmlElement>()?.set_hidden(false);
    Ok(true)
}

/// 完了表示内のボタンから、空のフォームに戻す
pub fn start_new_application(button: &Element) -> Result<(), JsValue> {
    let Some(success) = button.closest(".success")? else {
        return Ok(());
    };
    success.clone().dyn_into::<HtmlElement>()?.set_hidden(true);

    if let Some(form) = success
        .previous_element_sibling()
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    {
        form.reset();
        clear_errors(&form)?;
        form.set_hidden(false);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_modal_form_id() {
        assert!(is_modal_form_id("application-form-modal"));
        assert!(!is_modal_form_id("application-form"));
        assert!(!is_modal_form_id("contact-form"));
    }

    #[test]
    fn test_input_selector() {
        assert_eq!(input_selector(Field::FullName), "#fullName, #m-fullName");
        assert_eq!(input_selector(Field::ContactEmail), "#cEmail, #m-cEmail");
        assert_eq!(input_selector(Field::CvFile), "input[type=\"file\"]");
    }
}
