//! ファイルダウンロード
//!
//! Blob と一時的なオブジェクトURLを作り、非表示のリンクをクリックさせる。

use msecho_common::ExportFile;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

pub fn download(file: &ExportFile) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document が存在しません"))?;

    let bytes = js_sys::Uint8Array::from(file.content.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&bytes);

    let options = BlobPropertyBag::new();
    options.set_type(file.mime_type());
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&url);
    link.set_download(&file.file_name);
    link.click();

    Url::revoke_object_url(&url)?;
    Ok(())
}
