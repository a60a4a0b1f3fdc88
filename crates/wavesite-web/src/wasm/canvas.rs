#![forbid(unsafe_code)]

//! `<canvas>` 2D context behind [`Surface`].

use wasm_bindgen::JsCast;
use wavesite_fx::{Surface, SurfaceError, WavePath};
use wavesite_runtime::ViewportSize;
use wavesite_style::{BACKGROUND_CLASS, Rgb, Rgba};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

use super::describe_js_error;

/// A background canvas inserted as the first child of its parent. Removed
/// from the document on drop.
pub(crate) struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: ViewportSize,
}

impl CanvasSurface {
    pub(crate) fn acquire(
        document: &Document,
        parent: &Element,
        size: ViewportSize,
    ) -> Result<Self, SurfaceError> {
        let element = document
            .create_element("canvas")
            .map_err(|err| SurfaceError::ContextUnavailable(describe_js_error(&err)))?;
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::Unsupported)?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|err| SurfaceError::ContextUnavailable(describe_js_error(&err)))?
            .ok_or_else(|| SurfaceError::ContextUnavailable("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::Unsupported)?;

        canvas.set_class_name(BACKGROUND_CLASS);
        let _ = canvas.set_attribute("aria-hidden", "true");
        canvas.set_width(size.width);
        canvas.set_height(size.height);
        parent
            .insert_before(&canvas, parent.first_child().as_ref())
            .map_err(|err| SurfaceError::ContextUnavailable(describe_js_error(&err)))?;

        Ok(Self { canvas, ctx, size })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> ViewportSize {
        self.size
    }

    fn resize(&mut self, size: ViewportSize) {
        self.size = size;
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn clear(&mut self, color: Rgb) {
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill_rect(
            0.0,
            0.0,
            f64::from(self.size.width),
            f64::from(self.size.height),
        );
    }

    fn fill_path(&mut self, path: &WavePath, color: Rgba) {
        let Some((&(x0, y0), rest)) = path.points().split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(x0, y0);
        for &(x, y) in rest {
            self.ctx.line_to(x, y);
        }
        self.ctx.close_path();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }
}

impl Drop for CanvasSurface {
    fn drop(&mut self) {
        self.canvas.remove();
    }
}
