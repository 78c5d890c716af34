//! 管理画面の一覧
//!
//! 一覧を描画したコンテナに `data-submissions` を付け、クリックを1か所で受けて
//! ボタンの `data-action` / `data-id` で処理を振り分ける。

use msecho_common::render;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

/// 一覧コンテナの目印
const CONTAINER_ATTR: &str = "data-submissions";

/// 一覧のボタン操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Download(String),
    Delete(String),
}

impl Action {
    pub fn parse(action: &str, id: &str) -> Option<Self> {
        if id.is_empty() {
            return None;
        }
        match action {
            "download" => Some(Action::Download(id.to_string())),
            "delete" => Some(Action::Delete(id.to_string())),
            _ => None,
        }
    }
}

fn action_for(event: &Event) -> Option<Action> {
    let target: Element = event.target()?.dyn_into().ok()?;
    let button = target.closest("[data-action]").ok()??;
    let action = button.get_attribute("data-action")?;
    let id = button.get_attribute("data-id")?;
    Action::parse(&action, &id)
}

fn run(action: Action) -> Result<(), JsValue> {
    match action {
        Action::Download(id) => crate::download_submission(&id),
        Action::Delete(id) => crate::delete_submission(&id).map(|_| ()),
    }
}

/// 現在の投稿一覧のHTML
pub fn listing_html() -> Result<String, JsValue> {
    let store = crate::open_store()?;
    Ok(render::render_submissions(&store.applications(), &store.messages()))
}

/// コンテナに一覧を描画し、初回だけクリック処理を登録する
pub fn bind(container: &Element) -> Result<(), JsValue> {
    container.set_inner_html(&listing_html()?);
    if container.has_attribute(CONTAINER_ATTR) {
        return Ok(());
    }

    let closure = Closure::wrap(Box::new(move |event: Event| {
        if let Some(action) = action_for(&event) {
            if let Err(e) = run(action) {
                web_sys::console::error_1(&e);
            }
        }
    }) as Box<dyn FnMut(_)>);

    container.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    container.set_attribute(CONTAINER_ATTR, "")?;
    Ok(())
}

/// 描画済みのすべての一覧を描き直す
pub fn refresh() -> Result<(), JsValue> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Ok(());
    };
    let containers = document.query_selector_all(&format!("[{}]", CONTAINER_ATTR))?;
    if containers.length() == 0 {
        return Ok(());
    }

    let html = listing_html()?;
    for i in 0..containers.length() {
        if let Some(el) = containers.get(i).and_then(|node| node.dyn_into::<Element>().ok()) {
            el.set_inner_html(&html);
        }
    }
    Ok(())
}
