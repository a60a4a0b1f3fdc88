#![forbid(unsafe_code)]

//! Deterministic frame scheduler driven by the caller.
//!
//! [`ManualScheduler`] queues frame requests and fires them only when the
//! owner calls [`ManualScheduler::run_frame`] with a timestamp, the way a
//! browser batches `requestAnimationFrame` callbacks before one paint.
//! Callbacks requested *during* a batch wait for the next batch.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::frame_loop::{FrameCallback, FrameHandle, FrameScheduler, ScheduleError};

#[derive(Default)]
struct Queue {
    next_raw: i32,
    pending: Vec<(FrameHandle, FrameCallback)>,
    requested: u64,
    cancelled: u64,
    fired: u64,
    refuse: bool,
}

/// Caller-driven [`FrameScheduler`]. Clones share one queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Queue>>,
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.queue.borrow();
        f.debug_struct("ManualScheduler")
            .field("pending", &queue.pending.len())
            .field("requested", &queue.requested)
            .field("cancelled", &queue.cancelled)
            .field("fired", &queue.fired)
            .finish()
    }
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every callback queued before this call, in request order.
    /// Returns how many ran.
    pub fn run_frame(&self, now_ms: f64) -> usize {
        let batch = self.take_pending();
        let count = batch.len();
        self.queue.borrow_mut().fired += count as u64;
        for callback in batch {
            callback(now_ms);
        }
        count
    }

    /// Remove queued callbacks without running them.
    pub fn take_pending(&self) -> Vec<FrameCallback> {
        let pending = std::mem::take(&mut self.queue.borrow_mut().pending);
        pending.into_iter().map(|(_, callback)| callback).collect()
    }

    /// Make subsequent requests fail (simulates an unsupported host).
    pub fn refuse_requests(&self, refuse: bool) {
        self.queue.borrow_mut().refuse = refuse;
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Total accepted requests.
    #[must_use]
    pub fn requested(&self) -> u64 {
        self.queue.borrow().requested
    }

    /// Cancels that withdrew a queued request.
    #[must_use]
    pub fn cancelled(&self) -> u64 {
        self.queue.borrow().cancelled
    }

    /// Callbacks run by [`run_frame`](Self::run_frame).
    #[must_use]
    pub fn fired(&self) -> u64 {
        self.queue.borrow().fired
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, ScheduleError> {
        let mut queue = self.queue.borrow_mut();
        if queue.refuse {
            return Err(ScheduleError("scheduler refused request".into()));
        }
        queue.next_raw = queue.next_raw.wrapping_add(1);
        let handle = FrameHandle::from_raw(queue.next_raw);
        queue.pending.push((handle, callback));
        queue.requested += 1;
        Ok(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let mut queue = self.queue.borrow_mut();
        let before = queue.pending.len();
        queue.pending.retain(|(h, _)| *h != handle);
        if queue.pending.len() != before {
            queue.cancelled += 1;
        }
    }
}
