#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the studio page.
//!
//! Wraps [`super::runner_core::SiteRunner`] with JS-friendly types. Only
//! compiled on `wasm32` targets.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::runner_core::SiteRunner;
use stillpoint_runtime::ScrollRequest;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn scroll_request_to_js(request: &ScrollRequest) -> JsValue {
    let obj = Object::new();
    set_js(&obj, "target", JsValue::from_str(request.target.as_str()));
    set_js(&obj, "top", JsValue::from_f64(request.top));
    set_js(&obj, "behavior", JsValue::from_str(request.behavior.as_str()));
    obj.into()
}

/// Studio page runtime for the browser.
///
/// Host-driven: JavaScript forwards scroll, resize and layout events, renders
/// the nav bar from [`navView`](Self::nav_view), and performs the queued
/// smooth scrolls.
#[wasm_bindgen]
pub struct StudioSite {
    inner: SiteRunner,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl StudioSite {
    /// Mount the studio page at the current viewport width (CSS px).
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64) -> Result<StudioSite, JsValue> {
        install_panic_hook();
        SiteRunner::studio(width)
            .map(|inner| Self { inner })
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Record a section's document-relative top and height.
    #[wasm_bindgen(js_name = measureSection)]
    pub fn measure_section(&mut self, id: &str, top: f64, height: f64) -> bool {
        self.inner.measure_section(id, top, height)
    }

    #[wasm_bindgen(js_name = unmountSection)]
    pub fn unmount_section(&mut self, id: &str) -> bool {
        self.inner.unmount_section(id)
    }

    /// Feed `window.scrollY`. Returns whether the active section changed.
    pub fn scroll(&mut self, y: f64) -> bool {
        self.inner.scroll(y)
    }

    /// Returns whether the responsive breakpoint changed.
    pub fn resize(&mut self, width: f64) -> bool {
        self.inner.resize(width)
    }

    #[wasm_bindgen(js_name = navigateTo)]
    pub fn navigate_to(&mut self, id: &str) -> bool {
        self.inner.navigate_to(id)
    }

    /// Flip the mobile menu. Returns `true` when it is now open.
    #[wasm_bindgen(js_name = toggleMenu)]
    pub fn toggle_menu(&mut self) -> bool {
        self.inner.toggle_menu().is_open()
    }

    #[wasm_bindgen(js_name = closeMenu)]
    pub fn close_menu(&mut self) {
        self.inner.close_menu();
    }

    /// Apply one JSON-encoded host message.
    #[wasm_bindgen(js_name = pushEncoded)]
    pub fn push_encoded(&mut self, json: &str) -> bool {
        self.inner.push_encoded(json)
    }

    /// Active section id, or `null` before the first match.
    #[wasm_bindgen(js_name = activeSection)]
    pub fn active_section(&self) -> Option<String> {
        self.inner
            .active_section()
            .id()
            .map(|id| id.as_str().to_owned())
    }

    /// Nav bar view model as a plain object, or `null` if encoding failed.
    #[wasm_bindgen(js_name = navView)]
    pub fn nav_view(&self) -> JsValue {
        match self.inner.nav_view_json() {
            Ok(json) => js_sys::JSON::parse(&json).unwrap_or(JsValue::NULL),
            Err(err) => {
                console_error(&format!("nav view encoding failed: {err}"));
                JsValue::NULL
            }
        }
    }

    /// Drain queued scrolls. Returns `Array<{ target, top, behavior }>`.
    #[wasm_bindgen(js_name = takeScrollRequests)]
    pub fn take_scroll_requests(&mut self) -> Array {
        let arr = Array::new();
        for request in self.inner.take_scroll_requests() {
            arr.push(&scroll_request_to_js(&request));
        }
        arr
    }

    /// Drain accumulated log lines. Returns `Array<string>`.
    #[wasm_bindgen(js_name = takeLogs)]
    pub fn take_logs(&mut self) -> Array {
        let logs = self.inner.take_logs();
        let arr = Array::new();
        for log in logs {
            arr.push(&JsValue::from_str(&log));
        }
        arr
    }

    /// Release the scroll listener. Safe to call more than once.
    pub fn destroy(&mut self) -> bool {
        self.inner.teardown()
    }
}
