//! Browser DOM implementation of the core host traits.
//!
//! Stable `web-sys` bindings are used where they exist; the Web Animations
//! pieces whose binding shape varies between `web-sys` releases
//! (`getAnimations({ subtree })`, `getComputedTiming()`, CSS animation names)
//! are reached through `js_sys::Reflect`.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Animation, AnimationPlayState, Document, Element, Window};

use vizij_freeze_core::{
    AnimationControl, EffectTiming, Host, Phase, PlayState, Rect, SessionError, SourceLocation,
};

/// Id of the marker element that records an installed overlay.
pub const OVERLAY_ROOT_ID: &str = "vizij-freeze-root";

/// Attribute checked first for an explicit `file:line:col` source location.
const SOURCE_ATTR: &str = "data-source-loc";

fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn call_method(target: &JsValue, name: &str, args: &Array) -> Option<JsValue> {
    let f: Function = get(target, name)?.dyn_into().ok()?;
    f.apply(target, args).ok()
}

fn get_f64(target: &JsValue, key: &str) -> Option<f64> {
    get(target, key).and_then(|v| v.as_f64())
}

fn get_string(target: &JsValue, key: &str) -> Option<String> {
    get(target, key)
        .and_then(|v| v.as_string())
        .filter(|s| !s.is_empty())
}

/// One Web Animations `Animation`.
#[derive(Clone, Debug)]
pub struct DomAnimation(pub Animation);

impl AnimationControl for DomAnimation {
    fn play_state(&self) -> PlayState {
        match self.0.play_state() {
            AnimationPlayState::Running => PlayState::Running,
            AnimationPlayState::Paused => PlayState::Paused,
            AnimationPlayState::Finished => PlayState::Finished,
            _ => PlayState::Idle,
        }
    }

    fn current_time(&self) -> Option<f64> {
        self.0.current_time()
    }

    fn timing(&self) -> EffectTiming {
        let Some(effect) = get(&self.0, "effect") else {
            return EffectTiming::default();
        };
        let Some(t) = call_method(&effect, "getComputedTiming", &Array::new()) else {
            return EffectTiming::default();
        };
        let local_time = get_f64(&t, "localTime");
        let delay = get_f64(&t, "delay").unwrap_or(0.0);
        let active = get_f64(&t, "activeDuration").unwrap_or(f64::INFINITY);
        EffectTiming {
            // "auto" durations come back as strings and map to None
            duration: get_f64(&t, "duration"),
            progress: get_f64(&t, "progress"),
            phase: Phase::from_local_time(local_time, delay, active),
            easing: get_string(&t, "easing").unwrap_or_else(|| "linear".to_string()),
        }
    }

    fn name(&self) -> Option<String> {
        get_string(&self.0, "animationName").or_else(|| get_string(&self.0, "transitionProperty"))
    }

    fn id(&self) -> Option<String> {
        Some(self.0.id()).filter(|s| !s.is_empty())
    }

    fn pause(&self) {
        if let Err(err) = self.0.pause() {
            log::warn!("animation pause failed: {err:?}");
        }
    }

    fn play(&self) {
        if let Err(err) = self.0.play() {
            log::warn!("animation resume failed: {err:?}");
        }
    }
}

/// Host backed by the page's `window`/`document`.
#[derive(Debug)]
pub struct DomHost {
    window: Window,
    document: Document,
    /// Whether this host created the overlay marker and must remove it.
    owns_root: bool,
}

impl DomHost {
    pub fn new(window: Window) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        Ok(Self {
            window,
            document,
            owns_root: false,
        })
    }

    fn react_source(node: &Element) -> Option<SourceLocation> {
        let keys = Object::keys(node.unchecked_ref::<Object>());
        let fiber_key = keys
            .iter()
            .filter_map(|k| k.as_string())
            .find(|k| k.starts_with("__reactFiber$"))?;
        let mut fiber = get(node, &fiber_key);
        while let Some(f) = fiber {
            if let Some(src) = get(&f, "_debugSource") {
                let file = get_string(&src, "fileName")?;
                let line = get_f64(&src, "lineNumber")? as u32;
                let column = get_f64(&src, "columnNumber").map(|c| c as u32);
                return Some(SourceLocation { file, line, column });
            }
            fiber = get(&f, "return");
        }
        None
    }

    fn remove_root(&self) {
        if let Some(root) = self.document.get_element_by_id(OVERLAY_ROOT_ID) {
            root.remove();
        }
    }
}

impl Drop for DomHost {
    fn drop(&mut self) {
        if self.owns_root {
            self.remove_root();
        }
    }
}

impl Host for DomHost {
    type Node = Element;
    type Animation = DomAnimation;

    fn animations(&self, node: Option<&Element>) -> Vec<DomAnimation> {
        let list = match node {
            Some(el) => {
                let opts = Object::new();
                let _ = Reflect::set(&opts, &JsValue::from_str("subtree"), &JsValue::TRUE);
                call_method(el, "getAnimations", &Array::of1(&opts))
            }
            None => call_method(&self.document, "getAnimations", &Array::new()),
        };
        let Some(list) = list else {
            log::debug!("getAnimations unavailable");
            return Vec::new();
        };
        Array::from(&list)
            .iter()
            .filter_map(|v| v.dyn_into::<Animation>().ok())
            .map(DomAnimation)
            .collect()
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let r = node.get_bounding_client_rect();
        Rect {
            x: r.x(),
            y: r.y(),
            width: r.width(),
            height: r.height(),
        }
    }

    fn style_property(&self, node: &Element, name: &str) -> Option<String> {
        let decl = self.window.get_computed_style(node).ok()??;
        decl.get_property_value(name).ok()
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_lowercase()
    }

    fn element_id(&self, node: &Element) -> Option<String> {
        Some(node.id()).filter(|s| !s.is_empty())
    }

    fn class_name(&self, node: &Element) -> Option<String> {
        // SVG elements expose className as an SVGAnimatedString; the attribute is uniform
        node.get_attribute("class")
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn inner_markup(&self, node: &Element) -> Option<String> {
        Some(node.inner_html())
    }

    fn source_location(&self, node: &Element) -> Option<SourceLocation> {
        node.get_attribute(SOURCE_ATTR)
            .and_then(|raw| SourceLocation::parse(&raw))
            .or_else(|| Self::react_source(node))
    }

    fn now_millis(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn overlay_mounted(&self) -> bool {
        self.document.get_element_by_id(OVERLAY_ROOT_ID).is_some()
    }

    fn set_overlay_mounted(&mut self, mounted: bool) -> Result<(), SessionError> {
        if !mounted {
            self.remove_root();
            self.owns_root = false;
            return Ok(());
        }
        let body = self
            .document
            .body()
            .ok_or_else(|| SessionError::MountFailed("document has no body".into()))?;
        let root = self
            .document
            .create_element("div")
            .map_err(|err| SessionError::MountFailed(format!("{err:?}")))?;
        root.set_id(OVERLAY_ROOT_ID);
        body.append_child(&root)
            .map_err(|err| SessionError::MountFailed(format!("{err:?}")))?;
        self.owns_root = true;
        Ok(())
    }
}
