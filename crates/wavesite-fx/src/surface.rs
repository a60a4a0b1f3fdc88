#![forbid(unsafe_code)]

//! Drawing-surface seam.
//!
//! The renderer issues two kinds of calls per frame: one [`Surface::clear`]
//! with the palette background, then one [`Surface::fill_path`] per layer.
//! The browser implementation is a canvas 2D context; tests use
//! [`RecordingSurface`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use wavesite_runtime::ViewportSize;
use wavesite_style::{Rgb, Rgba};

use crate::wave::WavePath;

/// The drawing surface could not be acquired or used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The host has no drawing API at all.
    Unsupported,
    /// The host refused a drawing context.
    ContextUnavailable(String),
    /// The viewport has no area to draw on.
    ZeroSized,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "drawing surface unsupported"),
            Self::ContextUnavailable(msg) => write!(f, "drawing context unavailable: {msg}"),
            Self::ZeroSized => write!(f, "viewport has zero area"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A 2D target the wave renderer draws into.
pub trait Surface {
    /// Backing-store size in device pixels.
    fn size(&self) -> ViewportSize;

    /// Change the backing-store size. Contents may be discarded.
    fn resize(&mut self, size: ViewportSize);

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Rgb);

    /// Fill the closed polygon `path` with `color`.
    fn fill_path(&mut self, path: &WavePath, color: Rgba);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize(ViewportSize),
    Clear(Rgb),
    Fill { color: Rgba, points: usize },
}

#[derive(Debug, Default)]
struct Log {
    size: ViewportSize,
    commands: Vec<DrawCommand>,
}

/// [`Surface`] that records every call. Clones share the log, so a test can
/// inspect what a renderer that owns another clone drew.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    log: Rc<RefCell<Log>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(size: ViewportSize) -> Self {
        Self {
            log: Rc::new(RefCell::new(Log {
                size,
                commands: Vec::new(),
            })),
        }
    }

    #[must_use]
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.log.borrow().commands.clone()
    }

    /// Drain the recorded calls.
    pub fn take_commands(&self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.log.borrow_mut().commands)
    }

    /// Colors of the `Clear` and `Fill` calls since the last `Clear`, i.e.
    /// the most recent frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<(Rgb, Vec<Rgba>)> {
        let log = self.log.borrow();
        let start = log
            .commands
            .iter()
            .rposition(|cmd| matches!(cmd, DrawCommand::Clear(_)))?;
        let DrawCommand::Clear(background) = log.commands[start] else {
            return None;
        };
        let fills = log.commands[start + 1..]
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Fill { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        Some((background, fills))
    }

    /// Number of `Clear` calls, one per drawn frame.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.log
            .borrow()
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Clear(_)))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> ViewportSize {
        self.log.borrow().size
    }

    fn resize(&mut self, size: ViewportSize) {
        let mut log = self.log.borrow_mut();
        log.size = size;
        log.commands.push(DrawCommand::Resize(size));
    }

    fn clear(&mut self, color: Rgb) {
        self.log.borrow_mut().commands.push(DrawCommand::Clear(color));
    }

    fn fill_path(&mut self, path: &WavePath, color: Rgba) {
        self.log.borrow_mut().commands.push(DrawCommand::Fill {
            color,
            points: path.len(),
        });
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn size(&self) -> ViewportSize {
        (**self).size()
    }

    fn resize(&mut self, size: ViewportSize) {
        (**self).resize(size);
    }

    fn clear(&mut self, color: Rgb) {
        (**self).clear(color);
    }

    fn fill_path(&mut self, path: &WavePath, color: Rgba) {
        (**self).fill_path(path, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn records_calls_in_order() {
        let surface = RecordingSurface::new(ViewportSize::new(4, 4));
        let mut drawer = surface.clone();
        drawer.resize(ViewportSize::new(8, 2));
        drawer.clear(Rgb::BLACK);
        drawer.fill_path(&WavePath::from_points(vec![(0.0, 0.0); 3]), Rgba::new(1, 2, 3, 4));
        assert_eq!(
            surface.commands(),
            vec![
                DrawCommand::Resize(ViewportSize::new(8, 2)),
                DrawCommand::Clear(Rgb::BLACK),
                DrawCommand::Fill {
                    color: Rgba::new(1, 2, 3, 4),
                    points: 3
                },
            ]
        );
        assert_eq!(surface.size(), ViewportSize::new(8, 2));
    }

    #[test]
    fn last_frame_starts_at_latest_clear() {
        let mut surface = RecordingSurface::new(ViewportSize::new(1, 1));
        let path = WavePath::default();
        surface.clear(Rgb::BLACK);
        surface.fill_path(&path, Rgba::new(0, 0, 0, 1));
        surface.clear(Rgb::WHITE);
        surface.fill_path(&path, Rgba::new(9, 9, 9, 9));
        assert_eq!(
            surface.last_frame(),
            Some((Rgb::WHITE, vec![Rgba::new(9, 9, 9, 9)]))
        );
        assert_eq!(surface.frames(), 2);
    }

    #[test]
    fn no_frames_yet() {
        let surface = RecordingSurface::default();
        assert_eq!(surface.last_frame(), None);
        assert!(surface.take_commands().is_empty());
    }

    #[test]
    fn error_messages() {
        assert_eq!(SurfaceError::ZeroSized.to_string(), "viewport has zero area");
        assert_eq!(
            SurfaceError::ContextUnavailable("2d".into()).to_string(),
            "drawing context unavailable: 2d"
        );
    }
}
