#![forbid(unsafe_code)]

//! Theme controller: sole writer of the page's [`ThemeMode`].
//!
//! The controller keeps the mode in an [`Observable`] and mirrors every
//! change into a [`ModeSink`] (in the browser, the root element's
//! `data-theme` attribute). Readers never get write access; they hold a
//! [`ThemeSignal`].
//!
//! ```text
//! click ──► toggle() ──► sink.publish("light")     style rules
//!                   └──► observable.set(Light) ──► button label
//!                                             └──► renderer reads on next frame
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, info};
use wavesite_style::ThemeMode;

use crate::reactive::{Observable, Subscription};

/// Destination for the published mode.
pub trait ModeSink {
    /// Record `mode` as the current value. Called synchronously on every
    /// change and once at construction.
    fn publish(&self, mode: ThemeMode);
}

impl<F: Fn(ThemeMode)> ModeSink for F {
    fn publish(&self, mode: ThemeMode) {
        self(mode);
    }
}

/// In-memory stand-in for the document attribute.
///
/// Clones share state, so a test can keep one clone while the controller
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryAttribute {
    value: Rc<RefCell<Option<String>>>,
    writes: Rc<Cell<u32>>,
}

impl MemoryAttribute {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current attribute text, `None` before the first publish.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    /// Number of publishes seen.
    #[must_use]
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl ModeSink for MemoryAttribute {
    fn publish(&self, mode: ThemeMode) {
        *self.value.borrow_mut() = Some(mode.as_attr().to_owned());
        self.writes.set(self.writes.get() + 1);
    }
}

/// Button text for the toggle: names the mode a click switches *to*.
#[must_use]
pub fn toggle_label(current: ThemeMode) -> String {
    format!("Switch to {} Theme", current.toggled().label())
}

/// Owner of the page mode.
pub struct ThemeController {
    mode: Observable<ThemeMode>,
    sink: Box<dyn ModeSink>,
}

impl fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController")
            .field("mode", &self.mode.get())
            .field("version", &self.mode.version())
            .finish_non_exhaustive()
    }
}

impl ThemeController {
    /// Create a controller and publish `initial` to `sink`.
    pub fn new(initial: ThemeMode, sink: impl ModeSink + 'static) -> Self {
        sink.publish(initial);
        debug!(mode = %initial, "theme controller initialized");
        Self {
            mode: Observable::new(initial),
            sink: Box::new(sink),
        }
    }

    /// Current mode. No side effects.
    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        self.mode.get()
    }

    /// Flip Dark and Light. The sink is written before subscribers run, so
    /// anything a subscriber reads from the document is already current.
    pub fn toggle(&self) -> ThemeMode {
        let next = self.mode().toggled();
        self.apply(next);
        next
    }

    /// Set an explicit mode. Returns `false` (and publishes nothing) when it
    /// is already current.
    pub fn set_mode(&self, mode: ThemeMode) -> bool {
        if self.mode() == mode {
            return false;
        }
        self.apply(mode);
        true
    }

    /// Read-only handle for the renderer and other consumers.
    #[must_use]
    pub fn signal(&self) -> ThemeSignal {
        ThemeSignal {
            mode: self.mode.clone(),
        }
    }

    /// Label for the toggle button in the current mode.
    #[must_use]
    pub fn label(&self) -> String {
        toggle_label(self.mode())
    }

    fn apply(&self, mode: ThemeMode) {
        self.sink.publish(mode);
        self.mode.set(mode);
        info!(mode = %mode, "theme changed");
    }
}

/// Read-only view of the controller's mode.
#[derive(Clone)]
pub struct ThemeSignal {
    mode: Observable<ThemeMode>,
}

impl ThemeSignal {
    /// Standalone signal fixed at `mode`; for hosts without a controller.
    #[must_use]
    pub fn constant(mode: ThemeMode) -> Self {
        Self {
            mode: Observable::new(mode),
        }
    }

    #[must_use]
    pub fn get(&self) -> ThemeMode {
        self.mode.get()
    }

    /// Increments on every mode change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.mode.version()
    }

    pub fn subscribe(&self, callback: impl Fn(ThemeMode) + 'static) -> Subscription {
        self.mode.subscribe(move |mode| callback(*mode))
    }
}

impl fmt::Debug for ThemeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ThemeSignal").field(&self.get()).finish()
    }
}
