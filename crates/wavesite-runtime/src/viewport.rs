#![forbid(unsafe_code)]

//! Viewport size and scoped resize watches.
//!
//! A [`ResizeWatch`] is the only way to observe resizes: it registers on
//! acquisition and unregisters on drop, so every exit path (including a
//! failed mount) releases the listener.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

/// Drawing-surface size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Convert a CSS-pixel size at `dpr` into device pixels.
    ///
    /// A non-zero CSS extent never rounds down to zero device pixels.
    /// Non-finite or non-positive inputs give zero.
    #[must_use]
    pub fn from_css(css_width: f64, css_height: f64, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let scale = |css: f64| -> u32 {
            if !css.is_finite() || css <= 0.0 {
                return 0;
            }
            (css * dpr).round().clamp(1.0, f64::from(u32::MAX)) as u32
        };
        Self::new(scale(css_width), scale(css_height))
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[must_use]
    pub const fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for ViewportSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Resize notification callback.
pub type ResizeCallback = Box<dyn FnMut(ViewportSize)>;

/// Registration id returned by [`Viewport::watch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(u64);

impl WatchId {
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Host viewport.
pub trait Viewport {
    /// Current size in device pixels.
    fn size(&self) -> ViewportSize;

    /// Register `callback` for resizes.
    fn watch(&self, callback: ResizeCallback) -> WatchId;

    /// Remove a registration. Unknown ids are ignored.
    fn unwatch(&self, id: WatchId);
}

/// Scoped resize registration; unregisters on drop.
pub struct ResizeWatch {
    viewport: Rc<dyn Viewport>,
    id: Option<WatchId>,
}

impl ResizeWatch {
    /// Register `callback` on `viewport` for the lifetime of the guard.
    pub fn acquire(viewport: Rc<dyn Viewport>, callback: ResizeCallback) -> Self {
        let id = viewport.watch(callback);
        trace!(id = id.raw(), "resize watch acquired");
        Self {
            viewport,
            id: Some(id),
        }
    }

    /// Unregister now. Idempotent.
    pub fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.viewport.unwatch(id);
            trace!(id = id.raw(), "resize watch released");
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Size of the watched viewport.
    #[must_use]
    pub fn size(&self) -> ViewportSize {
        self.viewport.size()
    }
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ResizeWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeWatch").field("id", &self.id).finish()
    }
}

type SharedCallback = Rc<RefCell<ResizeCallback>>;

#[derive(Default)]
struct ManualState {
    size: ViewportSize,
    next_id: u64,
    watchers: Vec<(WatchId, SharedCallback)>,
}

/// Caller-driven [`Viewport`]. Clones share state.
#[derive(Clone, Default)]
pub struct ManualViewport {
    state: Rc<RefCell<ManualState>>,
}

impl fmt::Debug for ManualViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualViewport")
            .field("size", &state.size)
            .field("watchers", &state.watchers.len())
            .finish()
    }
}

impl ManualViewport {
    #[must_use]
    pub fn new(size: ViewportSize) -> Self {
        Self {
            state: Rc::new(RefCell::new(ManualState {
                size,
                ..ManualState::default()
            })),
        }
    }

    /// Change the size and notify watchers registered at call time.
    pub fn resize(&self, size: ViewportSize) {
        let targets: Vec<SharedCallback> = {
            let mut state = self.state.borrow_mut();
            state.size = size;
            state.watchers.iter().map(|(_, cb)| Rc::clone(cb)).collect()
        };
        for callback in targets {
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (*callback)(size);
            }
        }
    }

    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.state.borrow().watchers.len()
    }
}

impl Viewport for ManualViewport {
    fn size(&self) -> ViewportSize {
        self.state.borrow().size
    }

    fn watch(&self, callback: ResizeCallback) -> WatchId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = WatchId(state.next_id);
        state.watchers.push((id, Rc::new(RefCell::new(callback))));
        id
    }

    fn unwatch(&self, id: WatchId) {
        self.state.borrow_mut().watchers.retain(|(w, _)| *w != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn from_css_scales_and_rounds() {
        assert_eq!(ViewportSize::from_css(800.0, 600.0, 2.0), ViewportSize::new(1600, 1200));
        assert_eq!(ViewportSize::from_css(333.3, 10.0, 1.5), ViewportSize::new(500, 15));
    }

    #[test]
    fn from_css_never_rounds_to_zero() {
        assert_eq!(ViewportSize::from_css(0.2, 0.2, 1.0), ViewportSize::new(1, 1));
        assert!(ViewportSize::from_css(0.0, 100.0, 1.0).is_empty());
        assert!(ViewportSize::from_css(f64::NAN, 100.0, 1.0).is_empty());
    }

    #[test]
    fn from_css_bad_dpr_means_one() {
        assert_eq!(
            ViewportSize::from_css(100.0, 50.0, f64::INFINITY),
            ViewportSize::new(100, 50)
        );
        assert_eq!(ViewportSize::from_css(100.0, 50.0, -2.0), ViewportSize::new(100, 50));
    }

    #[test]
    fn display_and_area() {
        let size = ViewportSize::new(1920, 1080);
        assert_eq!(size.to_string(), "1920x1080");
        assert_eq!(size.area(), 2_073_600);
    }

    #[test]
    fn watch_guard_releases_on_drop() {
        let viewport = ManualViewport::new(ViewportSize::new(10, 10));
        let hits = Rc::new(Cell::new(0));
        let hits_in = Rc::clone(&hits);
        let watch = ResizeWatch::acquire(
            Rc::new(viewport.clone()),
            Box::new(move |_| hits_in.set(hits_in.get() + 1)),
        );
        assert_eq!(viewport.watcher_count(), 1);
        viewport.resize(ViewportSize::new(20, 20));
        assert_eq!(hits.get(), 1);
        assert_eq!(watch.size(), ViewportSize::new(20, 20));
        drop(watch);
        assert_eq!(viewport.watcher_count(), 0);
        viewport.resize(ViewportSize::new(30, 30));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn release_is_idempotent() {
        let viewport = ManualViewport::new(ViewportSize::new(1, 1));
        let mut watch = ResizeWatch::acquire(Rc::new(viewport.clone()), Box::new(|_| {}));
        watch.release();
        watch.release();
        assert!(!watch.is_active());
        assert_eq!(viewport.watcher_count(), 0);
    }

    #[test]
    fn callback_receives_new_size() {
        let viewport = ManualViewport::new(ViewportSize::default());
        let last = Rc::new(Cell::new(ViewportSize::default()));
        let last_in = Rc::clone(&last);
        let _watch = ResizeWatch::acquire(
            Rc::new(viewport.clone()),
            Box::new(move |size| last_in.set(size)),
        );
        viewport.resize(ViewportSize::new(640, 480));
        assert_eq!(last.get(), ViewportSize::new(640, 480));
    }
}
