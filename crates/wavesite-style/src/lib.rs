#![forbid(unsafe_code)]

//! Style types for the wavesite page.
//!
//! This crate provides:
//! - [`Rgb`] / [`Rgba`] color values with CSS formatting and hex parsing
//! - [`ThemeMode`] for the two-valued light/dark display mode
//! - [`Palette`] and [`PaletteMapping`] for the wave background colors
//! - [`theme_stylesheet`] for the attribute-selected CSS rules

/// Color types and hex parsing.
pub mod color;
/// Palette types and the mode-to-palette mapping.
pub mod palette;
/// CSS generated from a palette mapping.
pub mod stylesheet;
/// The light/dark display mode.
pub mod theme;

pub use color::{ColorParseError, Rgb, Rgba};
pub use palette::{Palette, PaletteMapping};
pub use stylesheet::{BACKGROUND_CLASS, theme_stylesheet};
pub use theme::{THEME_ATTRIBUTE, ThemeMode, UnknownThemeMode};
