#![forbid(unsafe_code)]

//! Animated wave background.
//!
//! - [`BackgroundConfig`]: every visual constant, parsed from JSON options
//! - [`WaveState`] and [`wave_path`]: deterministic wave math
//! - [`Surface`]: the 2D drawing seam ([`RecordingSurface`] for tests)
//! - [`WaveRenderer`]: one frame of drawing, driven by the frame loop
//! - [`BackgroundRenderer`]: mount, resize and teardown lifecycle

pub mod background;
pub mod config;
pub mod renderer;
pub mod surface;
pub mod wave;

pub use background::{BackgroundRenderer, BoxedSurface, MountError};
pub use config::{BackgroundConfig, ConfigError, FieldError, MIN_SAMPLE_STEP_PX, WaveLayer, default_layers};
pub use renderer::WaveRenderer;
pub use surface::{DrawCommand, RecordingSurface, Surface, SurfaceError};
pub use wave::{MAX_CREST_SAMPLES, WavePath, WaveState, sample, wave_path, wave_shape};
