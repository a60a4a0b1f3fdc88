#![forbid(unsafe_code)]

//! Per-frame wave drawing.
//!
//! [`WaveRenderer`] is the [`FrameTask`] driven by the frame loop. Each
//! frame it:
//!
//! 1. turns the paint timestamp into a clamped delta (first frame: 0)
//! 2. advances [`WaveState`]
//! 3. reads the current mode from its [`ThemeSignal`] and picks the palette
//! 4. clears the surface and fills one path per layer
//!
//! The mode is read at draw time, so a toggle between two frames shows up
//! on the next one without touching the wave state.

use tracing::{debug, info};
use wavesite_runtime::{FrameTask, ThemeSignal, ViewportSize};
use wavesite_style::ThemeMode;

use crate::config::BackgroundConfig;
use crate::surface::Surface;
use crate::wave::{WavePath, WaveState};

/// Draws the wave background onto `S`.
#[derive(Debug)]
pub struct WaveRenderer<S> {
    config: BackgroundConfig,
    theme: ThemeSignal,
    surface: S,
    state: WaveState,
    last_now_ms: Option<f64>,
    frames_drawn: u64,
    palette_mode: Option<ThemeMode>,
    scratch: WavePath,
}

impl<S: Surface> WaveRenderer<S> {
    #[must_use]
    pub fn new(config: BackgroundConfig, theme: ThemeSignal, surface: S) -> Self {
        let state = WaveState::new(&config.layers);
        Self {
            config,
            theme,
            surface,
            state,
            last_now_ms: None,
            frames_drawn: 0,
            palette_mode: None,
            scratch: WavePath::default(),
        }
    }

    /// Resize the surface. Wave state is untouched.
    pub fn resize(&mut self, size: ViewportSize) {
        if self.surface.size() == size {
            return;
        }
        self.surface.resize(size);
        debug!(%size, "background resized");
    }

    /// Run one frame at host timestamp `now_ms`.
    pub fn render(&mut self, now_ms: f64) {
        let delta_ms = self.last_now_ms.map_or(0.0, |last| now_ms - last);
        self.last_now_ms = Some(now_ms);
        let dt_s = self.config.clamp_delta_ms(delta_ms);
        self.state.advance(&self.config.layers, dt_s);
        self.draw();
    }

    fn draw(&mut self) {
        let size = self.surface.size();
        if size.is_empty() {
            return;
        }

        let mode = self.theme.get();
        if self.palette_mode != Some(mode) {
            if let Some(previous) = self.palette_mode {
                info!(from = %previous, to = %mode, "background palette switched");
            }
            self.palette_mode = Some(mode);
        }
        let palette = self.config.palettes.for_mode(mode);
        let (width, height) = (f64::from(size.width), f64::from(size.height));

        self.surface.clear(palette.background);
        for (i, layer) in self.config.layers.iter().enumerate() {
            let phase = self.state.phase(i).unwrap_or(layer.phase);
            self.scratch
                .trace(layer, phase, width, height, self.config.sample_step_px);
            self.surface.fill_path(&self.scratch, palette.wave_color(i));
        }
        self.frames_drawn += 1;
    }

    /// Frames that reached the surface.
    #[must_use]
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Current surface size.
    #[must_use]
    pub fn viewport(&self) -> ViewportSize {
        self.surface.size()
    }

    #[must_use]
    pub fn wave_phase(&self, layer: usize) -> Option<f64> {
        self.state.phase(layer)
    }

    #[must_use]
    pub fn state(&self) -> &WaveState {
        &self.state
    }

    /// Mode whose palette the last frame used; `None` before the first frame.
    #[must_use]
    pub fn palette_mode(&self) -> Option<ThemeMode> {
        self.palette_mode
    }
}

impl<S: Surface> FrameTask for WaveRenderer<S> {
    fn on_frame(&mut self, now_ms: f64) {
        self.render(now_ms);
    }
}
