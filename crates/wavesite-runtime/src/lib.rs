#![forbid(unsafe_code)]

//! Single-threaded runtime for the wavesite page.
//!
//! # Role
//! The pieces here are host-agnostic: they describe *when* things happen
//! (frames, resizes, mode changes) without touching a browser. The web crate
//! supplies browser-backed implementations of [`FrameScheduler`],
//! [`Viewport`] and [`ModeSink`]; tests use [`ManualScheduler`],
//! [`ManualViewport`] and [`MemoryAttribute`].
//!
//! # Key components
//! - [`ThemeController`] / [`ThemeSignal`]: sole writer and read-only view
//!   of the page's [`ThemeMode`](wavesite_style::ThemeMode)
//! - [`FrameLoop`]: `Stopped | Running` state machine with one armed tick
//! - [`ResizeWatch`]: scoped resize registration released on drop
//! - [`Observable`]: shared value with change callbacks

pub mod frame_loop;
pub mod reactive;
pub mod scheduler;
pub mod theme_controller;
pub mod viewport;

pub use frame_loop::{
    FrameCallback, FrameHandle, FrameLoop, FrameScheduler, FrameTask, LoopState, ScheduleError,
};
pub use reactive::{Observable, Subscription};
pub use scheduler::ManualScheduler;
pub use theme_controller::{MemoryAttribute, ModeSink, ThemeController, ThemeSignal, toggle_label};
pub use viewport::{
    ManualViewport, ResizeCallback, ResizeWatch, Viewport, ViewportSize, WatchId,
};
