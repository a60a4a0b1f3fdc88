#![forbid(unsafe_code)]

//! Window size and `resize` listeners behind [`Viewport`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wavesite_fx::config::clamp_device_pixel_ratio;
use wavesite_runtime::{ResizeCallback, Viewport, ViewportSize, WatchId};
use web_sys::Window;

use super::describe_js_error;

pub(crate) struct WindowViewport {
    window: Window,
    max_dpr: f64,
    next_id: Cell<u64>,
    listeners: RefCell<HashMap<WatchId, Closure<dyn FnMut()>>>,
}

impl WindowViewport {
    pub(crate) fn new(window: Window, max_dpr: f64) -> Self {
        Self {
            window,
            max_dpr,
            next_id: Cell::new(0),
            listeners: RefCell::new(HashMap::new()),
        }
    }
}

fn measure(window: &Window, max_dpr: f64) -> ViewportSize {
    let css = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let dpr = clamp_device_pixel_ratio(window.device_pixel_ratio(), max_dpr);
    ViewportSize::from_css(css(window.inner_width()), css(window.inner_height()), dpr)
}

impl Viewport for WindowViewport {
    fn size(&self) -> ViewportSize {
        measure(&self.window, self.max_dpr)
    }

    fn watch(&self, mut callback: ResizeCallback) -> WatchId {
        let id = WatchId::from_raw(self.next_id.get());
        self.next_id.set(id.raw() + 1);

        let window = self.window.clone();
        let max_dpr = self.max_dpr;
        let listener = Closure::<dyn FnMut()>::new(move || {
            callback(measure(&window, max_dpr));
        });
        if let Err(err) = self
            .window
            .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
        {
            warn!(error = %describe_js_error(&err), "resize listener not registered");
        }
        self.listeners.borrow_mut().insert(id, listener);
        id
    }

    fn unwatch(&self, id: WatchId) {
        let Some(listener) = self.listeners.borrow_mut().remove(&id) else {
            return;
        };
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
    }
}

impl Drop for WindowViewport {
    fn drop(&mut self) {
        for (_, listener) in self.listeners.get_mut().drain() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        }
    }
}
