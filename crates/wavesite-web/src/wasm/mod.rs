#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the page.
//!
//! Only compiled on `wasm32` targets. Everything host-specific lives in the
//! submodules; [`WaveSite`] wires them to the host-agnostic crates.

mod canvas;
mod console;
mod document;
mod raf;
mod window_viewport;

use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wavesite_fx::{BackgroundConfig, BackgroundRenderer, BoxedSurface};
use wavesite_runtime::{Subscription, ThemeController, toggle_label};
use wavesite_style::{ThemeMode, theme_stylesheet};

use crate::content::GOCHROMEDP;
use crate::markup::{TOGGLE_BUTTON_ID, render_page};

use canvas::CanvasSurface;
use document::{ClickListener, RootAttribute, install_stylesheet};
use raf::RafScheduler;
use window_viewport::WindowViewport;

pub(crate) fn describe_js_error(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console::install_panic_hook();
    console::install_logging();
}

/// Find the rendered toggle button, create the controller and connect the
/// button's label and click handler to it.
fn wire_toggle(
    document: &web_sys::Document,
    html_root: web_sys::Element,
    initial: ThemeMode,
) -> Result<(Rc<ThemeController>, Subscription, ClickListener), JsValue> {
    let button = document
        .get_element_by_id(TOGGLE_BUTTON_ID)
        .ok_or_else(|| JsValue::from_str("toggle button missing"))?;

    let controller = Rc::new(ThemeController::new(initial, RootAttribute::new(html_root)));

    let label_target = button.clone();
    let label = controller.signal().subscribe(move |mode| {
        label_target.set_text_content(Some(&toggle_label(mode)));
    });

    let on_click = Rc::clone(&controller);
    let click = ClickListener::attach(button, move |_| {
        on_click.toggle();
    })?;
    Ok((controller, label, click))
}

/// Everything created by `mount`. Field order is drop order: the
/// background stops before the listeners and content go away.
struct Mounted {
    background: BackgroundRenderer,
    _click: ClickListener,
    _label: Subscription,
    controller: Rc<ThemeController>,
    root: web_sys::Element,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.background.unmount();
        self.root.set_inner_html("");
    }
}

/// The wavesite page: content, theme toggle and wave background.
#[wasm_bindgen]
pub struct WaveSite {
    config: BackgroundConfig,
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl WaveSite {
    /// Create a site from optional JSON background options. Invalid options
    /// are logged and replaced by defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<String>) -> Self {
        console::install_panic_hook();
        console::install_logging();
        let config = match options.as_deref().map(BackgroundConfig::from_json) {
            None => BackgroundConfig::default(),
            Some(Ok(config)) => config,
            Some(Err(err)) => {
                warn!(%err, "using default background options");
                BackgroundConfig::default()
            }
        };
        Self {
            config,
            mounted: None,
        }
    }

    /// Render the page into the element with id `root_id` and start the
    /// background. Mounting again replaces the previous mount.
    pub fn mount(&mut self, root_id: &str) -> Result<(), JsValue> {
        self.destroy();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let root = document
            .get_element_by_id(root_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id `{root_id}`")))?;
        let html_root = document
            .document_element()
            .ok_or_else(|| JsValue::from_str("no root element"))?;

        install_stylesheet(&document, &theme_stylesheet(&self.config.palettes))?;

        let initial = self.config.initial_theme;
        root.set_inner_html(&render_page(&GOCHROMEDP, initial));
        let (controller, label, click) = match wire_toggle(&document, html_root, initial) {
            Ok(wired) => wired,
            Err(err) => {
                root.set_inner_html("");
                return Err(err);
            }
        };

        let body = document
            .body()
            .map(Into::into)
            .unwrap_or_else(|| root.clone());
        let background = BackgroundRenderer::mount(
            self.config.clone(),
            controller.signal(),
            Rc::new(WindowViewport::new(
                window.clone(),
                self.config.max_device_pixel_ratio,
            )),
            Rc::new(RafScheduler::new(window)),
            |size| {
                CanvasSurface::acquire(&document, &body, size)
                    .map(|surface| Box::new(surface) as BoxedSurface)
            },
        );

        info!(root = root_id, mode = %initial, "site mounted");
        self.mounted = Some(Mounted {
            background,
            _click: click,
            _label: label,
            controller,
            root,
        });
        Ok(())
    }

    /// Flip the theme. Returns the new mode (`"dark"` or `"light"`).
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&self) -> Option<String> {
        let mounted = self.mounted.as_ref()?;
        Some(mounted.controller.toggle().as_attr().to_owned())
    }

    /// Current mode, or the configured initial mode before `mount`.
    pub fn theme(&self) -> String {
        let mode = self
            .mounted
            .as_ref()
            .map_or(self.config.initial_theme, |m| m.controller.mode());
        mode.as_attr().to_owned()
    }

    /// Frames drawn by the background since mount.
    #[wasm_bindgen(js_name = framesDrawn)]
    pub fn frames_drawn(&self) -> f64 {
        self.mounted
            .as_ref()
            .map_or(0.0, |m| m.background.frames_drawn() as f64)
    }

    /// Whether the background animation is running (false when inert).
    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|m| m.background.is_running())
    }

    /// Stop the background, detach listeners and clear the root. Idempotent.
    pub fn destroy(&mut self) {
        if self.mounted.take().is_some() {
            info!("site destroyed");
        }
    }
}
