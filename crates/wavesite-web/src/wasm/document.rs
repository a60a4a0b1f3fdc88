#![forbid(unsafe_code)]

//! Document plumbing: the theme attribute, the stylesheet and the toggle
//! button's click listener.

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wavesite_runtime::ModeSink;
use wavesite_style::{THEME_ATTRIBUTE, ThemeMode};
use web_sys::{Document, Element};

use super::describe_js_error;

const STYLE_ELEMENT_ID: &str = "wavesite-theme";

/// Writes the mode to `data-theme` on the root element.
pub(crate) struct RootAttribute {
    root: Element,
}

impl RootAttribute {
    pub(crate) fn new(root: Element) -> Self {
        Self { root }
    }
}

impl ModeSink for RootAttribute {
    fn publish(&self, mode: ThemeMode) {
        if let Err(err) = self.root.set_attribute(THEME_ATTRIBUTE, mode.as_attr()) {
            warn!(error = %describe_js_error(&err), "theme attribute not written");
        }
    }
}

/// Put `css` in a `<style>` element in `<head>`, reusing one from an
/// earlier mount.
pub(crate) fn install_stylesheet(document: &Document, css: &str) -> Result<Element, JsValue> {
    if let Some(existing) = document.get_element_by_id(STYLE_ELEMENT_ID) {
        existing.set_text_content(Some(css));
        return Ok(existing);
    }
    let style = document.create_element("style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(css));
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
    head.append_child(&style)?;
    Ok(style)
}

/// A `click` listener that is removed on drop.
pub(crate) struct ClickListener {
    target: Element,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl ClickListener {
    pub(crate) fn attach(
        target: Element,
        on_click: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(on_click);
        target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        Ok(Self { target, closure })
    }
}

impl Drop for ClickListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback("click", self.closure.as_ref().unchecked_ref());
    }
}
