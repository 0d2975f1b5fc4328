//! Fire-and-forget clipboard writes.
//!
//! The text is captured by value when the write starts, so later session
//! changes cannot race with it. `on_done(copied: boolean)` runs once the
//! browser settles the write; any failure counts as "not copied".

use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

fn notify(on_done: &Option<Function>, copied: bool) {
    if let Some(f) = on_done {
        if let Err(err) = f.call1(&JsValue::UNDEFINED, &JsValue::from_bool(copied)) {
            log::warn!("copy listener threw: {err:?}");
        }
    }
}

fn write_promise(text: &str) -> Option<Promise> {
    let window = web_sys::window()?;
    let clipboard = Reflect::get(&window.navigator(), &JsValue::from_str("clipboard")).ok()?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return None;
    }
    let write: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .ok()?
        .dyn_into()
        .ok()?;
    write
        .apply(&clipboard, &Array::of1(&JsValue::from_str(text)))
        .ok()?
        .dyn_into::<Promise>()
        .ok()
}

/// Start writing `text` to the system clipboard.
pub fn write_text(text: &str, on_done: Option<Function>) {
    let Some(promise) = write_promise(text) else {
        log::warn!("clipboard unavailable");
        notify(&on_done, false);
        return;
    };

    let ok_done = on_done.clone();
    let on_ok = Closure::once_into_js(move |_: JsValue| notify(&ok_done, true));
    let on_err = Closure::once_into_js(move |err: JsValue| {
        log::warn!("clipboard write failed: {err:?}");
        notify(&on_done, false);
    });
    let on_ok: Function = on_ok.unchecked_into();
    let on_err: Function = on_err.unchecked_into();

    if let Some(then) = Reflect::get(&promise, &JsValue::from_str("then"))
        .ok()
        .and_then(|t| t.dyn_into::<Function>().ok())
    {
        let _ = then.call2(&promise, &on_ok, &on_err);
    }
}
