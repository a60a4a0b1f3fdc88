#![forbid(unsafe_code)]

//! Wave animation state and geometry.
//!
//! Deterministic: phases depend only on the elapsed time fed to
//! [`WaveState::advance`]. No randomness, no wall clock.

use std::f64::consts::TAU;

use crate::config::WaveLayer;

// ---------------------------------------------------------------------------
// Wave function
// ---------------------------------------------------------------------------

/// Weight of the second harmonic relative to the fundamental.
const HARMONIC_WEIGHT: f64 = 0.35;
/// Spatial frequency of the harmonic relative to the fundamental.
const HARMONIC_FREQ: f64 = 2.2;
/// Phase rate of the harmonic relative to the fundamental.
const HARMONIC_DRIFT: f64 = -1.4;
/// Upper bound on crest vertices per layer; narrower steps are widened.
pub const MAX_CREST_SAMPLES: usize = 8_192;

/// Normalized wave height at `x` for a layer at `phase`, in `[-1, 1]`.
///
/// A fundamental plus a slower-drifting harmonic, so crests change shape as
/// they travel instead of sliding rigidly.
#[inline]
#[must_use]
pub fn wave_shape(x: f64, wavelength: f64, phase: f64) -> f64 {
    let k = TAU / wavelength;
    let fundamental = (k * x + phase).sin();
    let harmonic = (k * HARMONIC_FREQ * x + phase * HARMONIC_DRIFT).sin();
    (fundamental + HARMONIC_WEIGHT * harmonic) / (1.0 + HARMONIC_WEIGHT)
}

/// Surface y coordinate of `layer` at `x`, for a surface `height` tall.
#[inline]
#[must_use]
pub fn sample(layer: &WaveLayer, x: f64, phase: f64, height: f64) -> f64 {
    layer.baseline * height + layer.amplitude * wave_shape(x, layer.wavelength, phase)
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Per-layer phase accumulators plus total elapsed time.
///
/// Phases are not wrapped, so `phase(t1) - phase(t0)` is exactly the
/// accumulated `speed * dt`.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveState {
    phases: Vec<f64>,
    elapsed_s: f64,
}

impl WaveState {
    /// State at mount: each layer at its configured starting phase.
    #[must_use]
    pub fn new(layers: &[WaveLayer]) -> Self {
        Self {
            phases: layers.iter().map(|layer| layer.phase).collect(),
            elapsed_s: 0.0,
        }
    }

    /// Advance every layer by `dt_s` seconds.
    pub fn advance(&mut self, layers: &[WaveLayer], dt_s: f64) {
        for (phase, layer) in self.phases.iter_mut().zip(layers) {
            *phase += layer.speed * dt_s;
        }
        self.elapsed_s += dt_s;
    }

    /// Current phase of layer `index`.
    #[must_use]
    pub fn phase(&self, index: usize) -> Option<f64> {
        self.phases.get(index).copied()
    }

    #[must_use]
    pub fn phases(&self) -> &[f64] {
        &self.phases
    }

    /// Seconds accumulated since mount.
    #[must_use]
    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Closed polygon filled for one layer: the wave crest from left to right,
/// then down to the bottom corners.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WavePath {
    points: Vec<(f64, f64)>,
}

impl WavePath {
    #[must_use]
    pub fn from_points(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rebuild in place for `layer`, reusing the allocation.
    ///
    /// At most [`MAX_CREST_SAMPLES`] crest vertices are emitted; a `step`
    /// finer than that allows is widened to `width / MAX_CREST_SAMPLES`.
    pub fn trace(&mut self, layer: &WaveLayer, phase: f64, width: f64, height: f64, step: f64) {
        self.points.clear();
        if !(width > 0.0 && width.is_finite() && height > 0.0 && step > 0.0) {
            return;
        }
        let step = step.max(width / MAX_CREST_SAMPLES as f64);
        let count = ((width / step).ceil() as usize).min(MAX_CREST_SAMPLES);
        for i in 0..count {
            let x = i as f64 * step;
            self.points.push((x, sample(layer, x, phase, height)));
        }
        self.points.push((width, sample(layer, width, phase, height)));
        self.points.push((width, height));
        self.points.push((0.0, height));
    }
}

/// Build the fill polygon for `layer` on a `width` x `height` surface.
#[must_use]
pub fn wave_path(layer: &WaveLayer, phase: f64, width: f64, height: f64, step: f64) -> WavePath {
    let mut path = WavePath::default();
    path.trace(layer, phase, width, height, step);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_layers;

    const EPS: f64 = 1e-9;

    #[test]
    fn new_state_starts_at_configured_phase() {
        let layers = default_layers();
        let state = WaveState::new(&layers);
        assert_eq!(state.phases(), &[0.0, 1.3, 2.6]);
        assert_eq!(state.elapsed_s(), 0.0);
        assert_eq!(state.phase(3), None);
    }

    #[test]
    fn advance_accumulates_speed_times_dt() {
        let layers = default_layers();
        let mut state = WaveState::new(&layers);
        state.advance(&layers, 0.5);
        assert!((state.phase(0).unwrap() - 0.3).abs() < EPS);
        assert!((state.phase(1).unwrap() - (1.3 - 0.2)).abs() < EPS);
        assert!((state.elapsed_s() - 0.5).abs() < EPS);
    }

    #[test]
    fn zero_dt_changes_nothing() {
        let layers = default_layers();
        let mut state = WaveState::new(&layers);
        let before = state.clone();
        state.advance(&layers, 0.0);
        assert_eq!(state, before);
    }

    #[test]
    fn shape_is_bounded() {
        for i in 0..200 {
            let x = f64::from(i) * 7.3;
            let y = wave_shape(x, 300.0, f64::from(i) * 0.1);
            assert!((-1.0..=1.0).contains(&y), "y={y}");
        }
    }

    #[test]
    fn sample_stays_within_amplitude_of_baseline() {
        let layer = WaveLayer::new(20.0, 400.0, 1.0, 0.5);
        for i in 0..100 {
            let y = sample(&layer, f64::from(i) * 13.0, 0.7, 600.0);
            assert!((y - 300.0).abs() <= 20.0 + EPS);
        }
    }

    #[test]
    fn path_spans_full_width_and_closes_at_bottom() {
        let layer = WaveLayer::new(10.0, 200.0, 1.0, 0.5);
        let path = wave_path(&layer, 0.0, 100.0, 50.0, 8.0);
        let points = path.points();
        // 0, 8, .., 96 (13 samples) + right edge + two bottom corners.
        assert_eq!(points.len(), 16);
        assert_eq!(points[0].0, 0.0);
        assert_eq!(points[13].0, 100.0);
        assert_eq!(points[14], (100.0, 50.0));
        assert_eq!(points[15], (0.0, 50.0));
    }

    #[test]
    fn empty_surface_gives_empty_path() {
        let layer = WaveLayer::new(10.0, 200.0, 1.0, 0.5);
        assert!(wave_path(&layer, 0.0, 0.0, 50.0, 8.0).is_empty());
        assert!(wave_path(&layer, 0.0, 100.0, 50.0, 0.0).is_empty());
    }

    #[test]
    fn trace_reuses_path() {
        let layer = WaveLayer::new(10.0, 200.0, 1.0, 0.5);
        let mut path = wave_path(&layer, 0.0, 100.0, 50.0, 8.0);
        path.trace(&layer, 1.0, 16.0, 50.0, 8.0);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn tiny_step_is_bounded() {
        let layer = WaveLayer::new(10.0, 200.0, 1.0, 0.5);
        for step in [f64::from_bits(1), 1e-3] {
            let path = wave_path(&layer, 0.0, 3840.0, 2160.0, step);
            assert_eq!(path.len(), MAX_CREST_SAMPLES + 3);
            let crest = &path.points()[..MAX_CREST_SAMPLES];
            assert!(crest.windows(2).all(|w| w[0].0 < w[1].0));
            assert!(crest.iter().all(|&(x, _)| x < 3840.0));
            assert_eq!(path.points()[MAX_CREST_SAMPLES].0, 3840.0);
        }
    }
}
