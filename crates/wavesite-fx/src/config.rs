#![forbid(unsafe_code)]

//! Background configuration.
//!
//! Every visual constant of the wave background lives here. Hosts pass a
//! JSON object; missing fields take their defaults, and [`validate`]
//! reports every violation at once.
//!
//! [`validate`]: BackgroundConfig::validate

use std::fmt;

use serde::{Deserialize, Serialize};
use wavesite_style::{Palette, PaletteMapping, ThemeMode};

/// Default horizontal spacing of path vertices, in device pixels.
pub const DEFAULT_SAMPLE_STEP_PX: f64 = 8.0;
/// Smallest accepted vertex spacing, in device pixels.
pub const MIN_SAMPLE_STEP_PX: f64 = 1.0;
/// Default cap on one frame's elapsed time.
pub const DEFAULT_MAX_FRAME_DELTA_MS: f64 = 100.0;
/// Default cap on the device pixel ratio used for sizing.
pub const DEFAULT_MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

/// One wave layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaveLayer {
    /// Peak displacement from the baseline, in device pixels.
    pub amplitude: f64,
    /// Distance between crests, in device pixels.
    pub wavelength: f64,
    /// Phase velocity in radians per second. Negative drifts left.
    pub speed: f64,
    /// Resting height as a fraction of the surface height (0 = top).
    pub baseline: f64,
    /// Phase at mount, in radians.
    #[serde(default)]
    pub phase: f64,
}

impl WaveLayer {
    #[must_use]
    pub const fn new(amplitude: f64, wavelength: f64, speed: f64, baseline: f64) -> Self {
        Self {
            amplitude,
            wavelength,
            speed,
            baseline,
            phase: 0.0,
        }
    }

    #[must_use]
    pub const fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }
}

/// Wave background settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    pub layers: Vec<WaveLayer>,
    pub palettes: PaletteMapping,
    pub sample_step_px: f64,
    pub max_frame_delta_ms: f64,
    pub max_device_pixel_ratio: f64,
    pub initial_theme: ThemeMode,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            layers: default_layers(),
            palettes: PaletteMapping::default(),
            sample_step_px: DEFAULT_SAMPLE_STEP_PX,
            max_frame_delta_ms: DEFAULT_MAX_FRAME_DELTA_MS,
            max_device_pixel_ratio: DEFAULT_MAX_DEVICE_PIXEL_RATIO,
            initial_theme: ThemeMode::Dark,
        }
    }
}

/// Three overlapping layers drifting at different speeds.
#[must_use]
pub fn default_layers() -> Vec<WaveLayer> {
    vec![
        WaveLayer::new(28.0, 640.0, 0.6, 0.62),
        WaveLayer::new(36.0, 900.0, -0.4, 0.72).with_phase(1.3),
        WaveLayer::new(22.0, 420.0, 0.9, 0.82).with_phase(2.6),
    ]
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub value: String,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: impl Into<String>, value: impl fmt::Display, message: &'static str) -> Self {
        Self {
            field: field.into(),
            value: value.to_string(),
            message,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

/// Configuration could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The options text was not valid JSON for this shape.
    Json(String),
    /// Parsed, but one or more fields break a rule.
    Invalid(Vec<FieldError>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "invalid background options: {msg}"),
            Self::Invalid(errors) => {
                write!(f, "invalid background options: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl BackgroundConfig {
    /// Parse and validate a JSON options object. Blank input means defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(json)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Check every constraint and return all violations.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.layers.is_empty() {
            errors.push(FieldError::new("layers", "[]", "must contain at least one layer"));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            let field = |name: &str| format!("layers[{i}].{name}");
            if !(layer.amplitude.is_finite() && layer.amplitude >= 0.0) {
                errors.push(FieldError::new(field("amplitude"), layer.amplitude, "must be finite and >= 0"));
            }
            if !(layer.wavelength.is_finite() && layer.wavelength > 0.0) {
                errors.push(FieldError::new(field("wavelength"), layer.wavelength, "must be finite and > 0"));
            }
            if !layer.speed.is_finite() {
                errors.push(FieldError::new(field("speed"), layer.speed, "must be finite"));
            }
            if !(0.0..=1.0).contains(&layer.baseline) {
                errors.push(FieldError::new(field("baseline"), layer.baseline, "must be within 0..=1"));
            }
            if !layer.phase.is_finite() {
                errors.push(FieldError::new(field("phase"), layer.phase, "must be finite"));
            }
        }
        for mode in self.palettes.empty_modes() {
            errors.push(FieldError::new(
                format!("palettes.{}.waves", mode.as_attr()),
                "[]",
                "must contain at least one color",
            ));
        }
        if !(self.sample_step_px.is_finite() && self.sample_step_px >= MIN_SAMPLE_STEP_PX) {
            errors.push(FieldError::new(
                "sample_step_px",
                self.sample_step_px,
                "must be finite and >= 1",
            ));
        }
        validate_positive("max_frame_delta_ms", self.max_frame_delta_ms, &mut errors);
        if !(self.max_device_pixel_ratio.is_finite() && self.max_device_pixel_ratio >= 1.0) {
            errors.push(FieldError::new(
                "max_device_pixel_ratio",
                self.max_device_pixel_ratio,
                "must be finite and >= 1",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Palette for `mode`.
    #[must_use]
    pub fn palette(&self, mode: ThemeMode) -> &Palette {
        self.palettes.for_mode(mode)
    }

    /// Device pixel ratio to size with: the host's value capped at
    /// `max_device_pixel_ratio`, or 1 when the host value is unusable.
    #[must_use]
    pub fn clamp_dpr(&self, dpr: f64) -> f64 {
        clamp_device_pixel_ratio(dpr, self.max_device_pixel_ratio)
    }

    /// Frame delta in seconds: negative becomes zero, long gaps are capped.
    #[must_use]
    pub fn clamp_delta_ms(&self, delta_ms: f64) -> f64 {
        if !delta_ms.is_finite() || delta_ms <= 0.0 {
            return 0.0;
        }
        delta_ms.min(self.max_frame_delta_ms) / 1_000.0
    }
}

/// `dpr` capped at `max`; 1 when `dpr` is not a usable ratio.
#[must_use]
pub fn clamp_device_pixel_ratio(dpr: f64, max: f64) -> f64 {
    if !dpr.is_finite() || dpr <= 0.0 {
        return 1.0;
    }
    dpr.min(max)
}

fn validate_positive(field: &'static str, value: f64, errors: &mut Vec<FieldError>) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(FieldError::new(field, value, "must be finite and > 0"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wavesite_style::Rgb;

    #[test]
    fn defaults_are_valid() {
        let config = BackgroundConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.layers.len(), 3);
        assert_eq!(config.initial_theme, ThemeMode::Dark);
    }

    #[test]
    fn blank_and_empty_object_mean_defaults() {
        assert_eq!(BackgroundConfig::from_json("  ").unwrap(), BackgroundConfig::default());
        assert_eq!(BackgroundConfig::from_json("{}").unwrap(), BackgroundConfig::default());
    }

    #[test]
    fn partial_object_keeps_other_defaults() {
        let config = BackgroundConfig::from_json(
            r#"{"initial_theme":"light","layers":[{"amplitude":10,"wavelength":200,"speed":1.5,"baseline":0.5}]}"#,
        )
        .unwrap();
        assert_eq!(config.initial_theme, ThemeMode::Light);
        assert_eq!(config.layers, vec![WaveLayer::new(10.0, 200.0, 1.5, 0.5)]);
        assert_eq!(config.sample_step_px, DEFAULT_SAMPLE_STEP_PX);
    }

    #[test]
    fn palettes_parse_from_hex() {
        let config = BackgroundConfig::from_json(
            r##"{"palettes":{
                "dark":{"background":"#000000","waves":["#ffffff80"]},
                "light":{"background":"#ffffff","waves":["#000000","#ff000033"]}
            }}"##,
        )
        .unwrap();
        assert_eq!(config.palette(ThemeMode::Dark).background, Rgb::BLACK);
        assert_eq!(config.palette(ThemeMode::Light).waves.len(), 2);
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = BackgroundConfig::from_json("{layers:").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        let err = BackgroundConfig::from_json(r#"{"bogus":1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn validate_reports_every_violation() {
        let config = BackgroundConfig {
            layers: vec![WaveLayer::new(-1.0, 0.0, f64::NAN, 2.0)],
            sample_step_px: 0.0,
            max_device_pixel_ratio: 0.5,
            ..BackgroundConfig::default()
        };
        let errors = config.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "layers[0].amplitude",
                "layers[0].wavelength",
                "layers[0].speed",
                "layers[0].baseline",
                "sample_step_px",
                "max_device_pixel_ratio",
            ]
        );
    }

    #[test]
    fn sub_pixel_sample_step_rejected() {
        for json in [r#"{"sample_step_px":5e-324}"#, r#"{"sample_step_px":0.001}"#] {
            let err = BackgroundConfig::from_json(json).unwrap_err();
            let ConfigError::Invalid(errors) = err else {
                panic!("expected validation error for {json}");
            };
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "sample_step_px");
            assert_eq!(errors[0].message, "must be finite and >= 1");
        }
        let config = BackgroundConfig::from_json(r#"{"sample_step_px":1}"#).unwrap();
        assert_eq!(config.sample_step_px, MIN_SAMPLE_STEP_PX);
    }

    #[test]
    fn empty_layers_and_waves_rejected() {
        let mut config = BackgroundConfig::default();
        config.layers.clear();
        config.palettes.light.waves.clear();
        let errors = config.validate().unwrap_err();
        assert_eq!(errors[0].field, "layers");
        assert_eq!(errors[1].field, "palettes.light.waves");
    }

    #[test]
    fn invalid_json_values_surface_as_invalid() {
        let err = BackgroundConfig::from_json(r#"{"max_frame_delta_ms":-5}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid background options: max_frame_delta_ms=-5 (must be finite and > 0)"
        );
    }

    #[test]
    fn dpr_clamp() {
        let config = BackgroundConfig::default();
        assert_eq!(config.clamp_dpr(3.0), 2.0);
        assert_eq!(config.clamp_dpr(1.5), 1.5);
        assert_eq!(config.clamp_dpr(0.0), 1.0);
        assert_eq!(config.clamp_dpr(f64::NAN), 1.0);
    }

    #[test]
    fn delta_clamp() {
        let config = BackgroundConfig::default();
        assert_eq!(config.clamp_delta_ms(-20.0), 0.0);
        assert_eq!(config.clamp_delta_ms(16.0), 0.016);
        assert_eq!(config.clamp_delta_ms(5_000.0), 0.1);
    }
}
