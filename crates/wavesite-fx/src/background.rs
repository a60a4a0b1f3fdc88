#![forbid(unsafe_code)]

//! Background mount/unmount lifecycle.
//!
//! [`BackgroundRenderer::mount`] wires a [`WaveRenderer`] to the host:
//!
//! ```text
//! viewport.size() ─► acquire surface ─► ResizeWatch ─► FrameLoop::start()
//!        │                 │                                │
//!        └─ zero area ─────┴─ error ─► inert ◄── refused ───┘
//! ```
//!
//! Every resource taken before a failure is a guard, so an early exit
//! releases it. [`BackgroundRenderer::unmount`] (also run on drop) stops the
//! loop, cancels the armed frame, releases the resize watch and drops the
//! surface. The resize callback holds only a `Weak` to the renderer, so a
//! resize racing teardown is a no-op.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};
use wavesite_runtime::{
    FrameLoop, FrameScheduler, ResizeWatch, ScheduleError, ThemeSignal, Viewport, ViewportSize,
};
use wavesite_style::ThemeMode;

use crate::config::BackgroundConfig;
use crate::renderer::WaveRenderer;
use crate::surface::{Surface, SurfaceError};

/// Surface type used by mounted backgrounds.
pub type BoxedSurface = Box<dyn Surface>;

type SharedRenderer = Rc<RefCell<WaveRenderer<BoxedSurface>>>;

/// Why a mount produced an inert background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    Surface(SurfaceError),
    Schedule(ScheduleError),
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(err) => write!(f, "background disabled: {err}"),
            Self::Schedule(err) => write!(f, "background disabled: {err}"),
        }
    }
}

impl std::error::Error for MountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(err) => Some(err),
            Self::Schedule(err) => Some(err),
        }
    }
}

impl From<SurfaceError> for MountError {
    fn from(err: SurfaceError) -> Self {
        Self::Surface(err)
    }
}

impl From<ScheduleError> for MountError {
    fn from(err: ScheduleError) -> Self {
        Self::Schedule(err)
    }
}

struct Active {
    renderer: SharedRenderer,
    frame_loop: FrameLoop<WaveRenderer<BoxedSurface>, Rc<dyn FrameScheduler>>,
    // Held for its Drop.
    _watch: ResizeWatch,
}

enum Mount {
    Active(Active),
    Inert(MountError),
    Unmounted { frames_drawn: u64 },
}

/// A mounted (or degraded) wave background.
pub struct BackgroundRenderer {
    mount: Mount,
}

impl fmt::Debug for BackgroundRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.mount {
            Mount::Active(_) => "active",
            Mount::Inert(_) => "inert",
            Mount::Unmounted { .. } => "unmounted",
        };
        f.debug_struct("BackgroundRenderer")
            .field("state", &state)
            .field("frames_drawn", &self.frames_drawn())
            .finish()
    }
}

impl BackgroundRenderer {
    /// Mount a background and start its loop.
    ///
    /// `acquire` creates the drawing surface for the initial viewport size.
    /// Any failure yields an inert renderer (see [`degraded`](Self::degraded))
    /// instead of an error; the page keeps working without the effect.
    pub fn mount<A>(
        config: BackgroundConfig,
        theme: ThemeSignal,
        viewport: Rc<dyn Viewport>,
        scheduler: Rc<dyn FrameScheduler>,
        acquire: A,
    ) -> Self
    where
        A: FnOnce(ViewportSize) -> Result<BoxedSurface, SurfaceError>,
    {
        match Self::try_mount(config, theme, viewport, scheduler, acquire) {
            Ok(active) => Self {
                mount: Mount::Active(active),
            },
            Err(err) => {
                warn!(%err, "wave background running inert");
                Self {
                    mount: Mount::Inert(err),
                }
            }
        }
    }

    fn try_mount<A>(
        config: BackgroundConfig,
        theme: ThemeSignal,
        viewport: Rc<dyn Viewport>,
        scheduler: Rc<dyn FrameScheduler>,
        acquire: A,
    ) -> Result<Active, MountError>
    where
        A: FnOnce(ViewportSize) -> Result<BoxedSurface, SurfaceError>,
    {
        let size = viewport.size();
        if size.is_empty() {
            return Err(SurfaceError::ZeroSized.into());
        }
        let surface = acquire(size)?;
        let mode = theme.get();
        let renderer: SharedRenderer =
            Rc::new(RefCell::new(WaveRenderer::new(config, theme, surface)));

        let weak: Weak<RefCell<WaveRenderer<BoxedSurface>>> = Rc::downgrade(&renderer);
        let watch = ResizeWatch::acquire(
            viewport,
            Box::new(move |size| {
                let Some(renderer) = weak.upgrade() else {
                    return;
                };
                if let Ok(mut renderer) = renderer.try_borrow_mut() {
                    renderer.resize(size);
                }
            }),
        );

        let frame_loop = FrameLoop::new(Rc::clone(&renderer), scheduler);
        frame_loop.start()?;
        info!(%size, %mode, "wave background mounted");
        Ok(Active {
            renderer,
            frame_loop,
            _watch: watch,
        })
    }

    /// Stop the loop and release every host resource. Idempotent.
    pub fn unmount(&mut self) {
        if !matches!(self.mount, Mount::Active(_)) {
            return;
        }
        let frames_drawn = self.frames_drawn();
        let previous = std::mem::replace(&mut self.mount, Mount::Unmounted { frames_drawn });
        if let Mount::Active(active) = previous {
            active.frame_loop.stop();
            drop(active);
            info!(frames_drawn, "wave background unmounted");
        }
    }

    /// Reason the background is inert, if it is.
    #[must_use]
    pub fn degraded(&self) -> Option<&MountError> {
        match &self.mount {
            Mount::Inert(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        matches!(self.mount, Mount::Active(_))
    }

    /// Whether the frame loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        match &self.mount {
            Mount::Active(active) => active.frame_loop.is_running(),
            _ => false,
        }
    }

    /// Frames drawn so far. Frozen at unmount; zero when inert.
    #[must_use]
    pub fn frames_drawn(&self) -> u64 {
        match &self.mount {
            Mount::Active(active) => active.renderer.borrow().frames_drawn(),
            Mount::Inert(_) => 0,
            Mount::Unmounted { frames_drawn } => *frames_drawn,
        }
    }

    /// Current surface size while mounted.
    #[must_use]
    pub fn viewport(&self) -> Option<ViewportSize> {
        self.with_renderer(WaveRenderer::viewport)
    }

    /// Phase of wave layer `layer` while mounted.
    #[must_use]
    pub fn wave_phase(&self, layer: usize) -> Option<f64> {
        self.with_renderer(|r| r.wave_phase(layer)).flatten()
    }

    /// Mode of the palette used by the last drawn frame.
    #[must_use]
    pub fn palette_mode(&self) -> Option<ThemeMode> {
        self.with_renderer(WaveRenderer::palette_mode).flatten()
    }

    /// Seconds of animation accumulated since mount.
    #[must_use]
    pub fn elapsed_s(&self) -> Option<f64> {
        self.with_renderer(|r| r.state().elapsed_s())
    }

    fn with_renderer<R>(&self, f: impl FnOnce(&WaveRenderer<BoxedSurface>) -> R) -> Option<R> {
        match &self.mount {
            Mount::Active(active) => Some(f(&active.renderer.borrow())),
            _ => None,
        }
    }
}

impl Drop for BackgroundRenderer {
    fn drop(&mut self) {
        if self.is_mounted() {
            debug!("wave background dropped while mounted");
        }
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use wavesite_runtime::{ManualScheduler, ManualViewport};

    fn mount_with(
        viewport: &ManualViewport,
        scheduler: &ManualScheduler,
    ) -> (BackgroundRenderer, RecordingSurface) {
        let surface = RecordingSurface::default();
        let handle = surface.clone();
        let background = BackgroundRenderer::mount(
            BackgroundConfig::default(),
            ThemeSignal::constant(ThemeMode::Dark),
            Rc::new(viewport.clone()),
            Rc::new(scheduler.clone()),
            move |size| {
                let mut surface = surface;
                surface.resize(size);
                Ok(Box::new(surface) as BoxedSurface)
            },
        );
        (background, handle)
    }

    #[test]
    fn mount_arms_one_frame_and_watches_resize() {
        let viewport = ManualViewport::new(ViewportSize::new(800, 600));
        let scheduler = ManualScheduler::new();
        let (background, _) = mount_with(&viewport, &scheduler);
        assert!(background.is_mounted());
        assert!(background.is_running());
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(viewport.watcher_count(), 1);
        assert_eq!(background.viewport(), Some(ViewportSize::new(800, 600)));
        assert_eq!(background.palette_mode(), None);
    }

    #[test]
    fn unmount_releases_everything() {
        let viewport = ManualViewport::new(ViewportSize::new(800, 600));
        let scheduler = ManualScheduler::new();
        let (mut background, _) = mount_with(&viewport, &scheduler);
        scheduler.run_frame(0.0);
        background.unmount();
        background.unmount();
        assert!(!background.is_running());
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(viewport.watcher_count(), 0);
        assert_eq!(background.frames_drawn(), 1);
        assert_eq!(background.viewport(), None);
    }

    #[test]
    fn drop_unmounts() {
        let viewport = ManualViewport::new(ViewportSize::new(10, 10));
        let scheduler = ManualScheduler::new();
        let (background, _) = mount_with(&viewport, &scheduler);
        drop(background);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(viewport.watcher_count(), 0);
    }

    #[test]
    fn zero_sized_viewport_is_inert() {
        let viewport = ManualViewport::new(ViewportSize::new(0, 600));
        let scheduler = ManualScheduler::new();
        let (background, _) = mount_with(&viewport, &scheduler);
        assert_eq!(
            background.degraded(),
            Some(&MountError::Surface(SurfaceError::ZeroSized))
        );
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn mount_error_display() {
        let err = MountError::from(SurfaceError::Unsupported);
        assert_eq!(err.to_string(), "background disabled: drawing surface unsupported");
        assert!(std::error::Error::source(&err).is_some());
    }
}
