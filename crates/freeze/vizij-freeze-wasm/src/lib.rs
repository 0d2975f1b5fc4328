use js_sys::Function;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use vizij_freeze_core::{AnnotationId, Config, Session, SessionEvent};

pub mod clipboard;
pub mod dom;
pub mod logger;

use dom::DomHost;

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Plain objects (not `Map`s) so the output can go straight to `JSON.stringify`.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, swb::Error> {
    value.serialize(&swb::Serializer::json_compatible())
}

/// Ids cross the JS boundary as plain numbers; anything but a non-negative
/// integer names no annotation.
fn annotation_id(id: f64) -> Option<AnnotationId> {
    if !id.is_finite() || id < 0.0 || id.fract() != 0.0 || id > u64::MAX as f64 {
        return None;
    }
    Some(AnnotationId(id as u64))
}

#[wasm_bindgen]
pub struct VizijFreeze {
    session: Session<DomHost>,
    on_copy: Option<Function>,
    on_event: Option<Function>,
}

impl VizijFreeze {
    /// Hand drained session events to the clipboard and the JS listener.
    fn flush(&mut self) {
        for event in self.session.drain_events() {
            if let SessionEvent::CopyRequested { text } = &event {
                clipboard::write_text(text, self.on_copy.clone());
            }
            if let Some(f) = &self.on_event {
                match to_js(&event) {
                    Ok(v) => {
                        if let Err(err) = f.call1(&JsValue::UNDEFINED, &v) {
                            log::warn!("event listener threw: {err:?}");
                        }
                    }
                    Err(e) => log::warn!("event serialize error: {e}"),
                }
            }
        }
    }
}

#[wasm_bindgen]
impl VizijFreeze {
    /// Mount an overlay on the current page. Pass a JSON config object or
    /// undefined/null for defaults.
    /// Example:
    ///   new VizijFreeze({ mode: "single" })
    ///
    /// Throws if an overlay is already mounted on this document.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<VizijFreeze, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let window = web_sys::window().ok_or_else(|| JsError::new("no window available"))?;
        let host = DomHost::new(window)
            .map_err(|e| JsError::new(&format!("host error: {e:?}")))?;
        let session =
            Session::mount(host, cfg).map_err(|e| JsError::new(&format!("mount error: {e}")))?;

        Ok(VizijFreeze {
            session,
            on_copy: None,
            on_event: None,
        })
    }

    /// Called as `listener(copied: boolean)` after every clipboard write settles.
    #[wasm_bindgen(js_name = set_copy_listener)]
    pub fn set_copy_listener(&mut self, listener: Option<Function>) {
        self.on_copy = listener;
    }

    /// Called as `listener(event)` for every session event, e.g. `{ type: "committed", id: 0 }`.
    #[wasm_bindgen(js_name = set_event_listener)]
    pub fn set_event_listener(&mut self, listener: Option<Function>) {
        self.on_event = listener;
    }

    pub fn toggle(&mut self) {
        self.session.toggle();
        self.flush();
    }

    pub fn enable(&mut self) {
        self.session.enable();
        self.flush();
    }

    pub fn disable(&mut self) {
        self.session.disable();
        self.flush();
    }

    #[wasm_bindgen(js_name = is_enabled)]
    pub fn is_enabled(&self) -> bool {
        self.session.is_enabled()
    }

    /// "disabled" | "idle" | "pending"
    pub fn phase(&self) -> String {
        match self.session.phase() {
            vizij_freeze_core::SessionPhase::Disabled => "disabled",
            vizij_freeze_core::SessionPhase::Idle => "idle",
            vizij_freeze_core::SessionPhase::Pending => "pending",
        }
        .to_string()
    }

    /// Freeze and capture `element`. Returns false when the pick was ignored.
    pub fn pick(&mut self, element: Option<Element>, viewport_x: f64, viewport_y: f64) -> bool {
        let picked = self.session.pick(element, viewport_x, viewport_y);
        self.flush();
        picked
    }

    /// Commit the pending capture. Returns the new annotation id, or undefined
    /// when nothing was pending.
    pub fn commit(&mut self, note: String) -> Option<f64> {
        let id = self.session.commit(&note);
        self.flush();
        id.map(|id| id.0 as f64)
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
        self.flush();
    }

    #[wasm_bindgen(js_name = remove_entry)]
    pub fn remove_entry(&mut self, id: f64) {
        if let Some(id) = annotation_id(id) {
            self.session.remove_entry(id);
            self.flush();
        }
    }

    #[wasm_bindgen(js_name = clear_all)]
    pub fn clear_all(&mut self) {
        self.session.clear_all();
        self.flush();
    }

    /// Copy the combined report; returns the text, or undefined when empty.
    #[wasm_bindgen(js_name = copy_all)]
    pub fn copy_all(&mut self) -> Option<String> {
        let text = self.session.copy_all();
        self.flush();
        text
    }

    #[wasm_bindgen(js_name = copy_one)]
    pub fn copy_one(&mut self, id: f64) -> Option<String> {
        let text = annotation_id(id).and_then(|id| self.session.copy_one(id));
        self.flush();
        text
    }

    pub fn report(&self) -> String {
        self.session.report()
    }

    #[wasm_bindgen(js_name = annotation_count)]
    pub fn annotation_count(&self) -> u32 {
        self.session.annotations().count() as u32
    }

    /// Stored annotations as plain JS objects, in report order.
    pub fn annotations(&self) -> Result<JsValue, JsError> {
        to_js(self.session.annotations().list())
            .map_err(|e| JsError::new(&format!("annotations error: {e}")))
    }

    /// Pending snapshot as a JS object, or null.
    pub fn pending(&self) -> Result<JsValue, JsError> {
        match self.session.pending() {
            Some(snap) => {
                to_js(snap).map_err(|e| JsError::new(&format!("pending error: {e}")))
            }
            None => Ok(JsValue::NULL),
        }
    }

    /// Element the highlight overlay should track.
    pub fn target(&self) -> Option<Element> {
        self.session.target().cloned()
    }

    /// Resume everything, remove the overlay marker and release the session.
    /// `free()` and garbage collection perform the same teardown.
    pub fn dispose(self) {
        let VizijFreeze { session, .. } = self;
        session.unmount();
    }
}

/// Route `log` output to the browser console at `level` ("error" … "trace").
#[wasm_bindgen(js_name = init_logging)]
pub fn init_logging(level: String) {
    logger::init(logger::parse_level(&level));
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
