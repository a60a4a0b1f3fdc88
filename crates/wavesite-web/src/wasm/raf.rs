#![forbid(unsafe_code)]

//! `requestAnimationFrame` behind [`FrameScheduler`].
//!
//! One persistent JS closure serves every request. The browser runs frame
//! callbacks in request order, so the closure pops the oldest queued Rust
//! callback each time it fires.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::trace;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wavesite_runtime::{FrameCallback, FrameHandle, FrameScheduler, ScheduleError};
use web_sys::Window;

use super::describe_js_error;

type Queue = Rc<RefCell<VecDeque<(FrameHandle, FrameCallback)>>>;

pub(crate) struct RafScheduler {
    window: Window,
    queue: Queue,
    closure: Closure<dyn FnMut(f64)>,
}

impl RafScheduler {
    pub(crate) fn new(window: Window) -> Self {
        let queue: Queue = Rc::new(RefCell::new(VecDeque::new()));
        let fired = Rc::clone(&queue);
        let closure = Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
            let next = fired.borrow_mut().pop_front();
            if let Some((_, callback)) = next {
                callback(now_ms);
            }
        });
        Self {
            window,
            queue,
            closure,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, ScheduleError> {
        let raw = self
            .window
            .request_animation_frame(self.closure.as_ref().unchecked_ref())
            .map_err(|err| ScheduleError(describe_js_error(&err)))?;
        let handle = FrameHandle::from_raw(raw);
        self.queue.borrow_mut().push_back((handle, callback));
        Ok(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.raw());
        self.queue.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

impl Drop for RafScheduler {
    fn drop(&mut self) {
        // The closure is freed with `self`; nothing may still point at it.
        let pending = std::mem::take(&mut *self.queue.borrow_mut());
        for (handle, _) in &pending {
            let _ = self.window.cancel_animation_frame(handle.raw());
        }
        if !pending.is_empty() {
            trace!(count = pending.len(), "cancelled pending animation frames");
        }
    }
}
