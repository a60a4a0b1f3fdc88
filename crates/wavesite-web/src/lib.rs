#![forbid(unsafe_code)]

//! Browser entry point for the wavesite page.
//!
//! This crate provides [`WaveSite`] (wasm32 only), a `wasm-bindgen`-exported
//! struct that renders the static page, wires the theme toggle and mounts
//! the animated wave background. The page content and its HTML rendering
//! are plain Rust and tested natively.

pub mod content;
pub mod markup;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::WaveSite;

pub use content::{GOCHROMEDP, Page};
pub use markup::{TOGGLE_BUTTON_ID, escape_html, render_page};
