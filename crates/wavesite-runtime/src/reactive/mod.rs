#![forbid(unsafe_code)]

//! Change-tracked shared values.
//!
//! - [`Observable`]: a shared value with a version counter and change
//!   callbacks.
//! - [`Subscription`]: guard that keeps a callback registered while alive.
//!
//! Everything here is `!Send`: the page runs on one UI thread and values are
//! shared through `Rc<RefCell<..>>`.
//!
//! # Invariants
//!
//! 1. The version moves by exactly one per value-changing write.
//! 2. Writing an equal value does nothing (no version bump, no callbacks).
//! 3. Callbacks run in registration order, after the write is committed.
//! 4. A dropped [`Subscription`] is never called again.

pub mod observable;

pub use observable::{Observable, Subscription};
