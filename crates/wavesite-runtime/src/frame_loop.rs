#![forbid(unsafe_code)]

//! Cooperative per-paint loop with an explicit `Stopped | Running` state.
//!
//! The host owns the clock and the "next paint" primitive (behind
//! [`FrameScheduler`]); the loop owns the decision to re-arm. Exactly one
//! tick is armed while running:
//!
//! ```text
//!            start()                 tick fires (token matches)
//!  Stopped ───────────► Running ──► task.on_frame(now) ──► re-arm
//!     ▲                    │
//!     └──── stop() ────────┘   cancel armed handle, bump generation
//! ```
//!
//! Armed callbacks capture a `Weak` to the loop plus the generation they
//! were armed in. A callback that fires after `stop()` (or after the loop
//! is dropped) finds either nothing to upgrade or a stale generation, and
//! returns without touching the task.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{trace, warn};

/// Callback handed to the host; receives the paint timestamp in ms.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Host-issued id of an armed frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(i32);

impl FrameHandle {
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

/// The host refused to schedule a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleError(pub String);

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame request failed: {}", self.0)
    }
}

impl std::error::Error for ScheduleError {}

/// Host "request next paint" primitive.
pub trait FrameScheduler {
    /// Arrange for `callback` to run once before the next paint.
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, ScheduleError>;

    /// Withdraw a request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Rc<S> {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, ScheduleError> {
        (**self).request_frame(callback)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        (**self).cancel_frame(handle);
    }
}

/// Work done once per frame.
pub trait FrameTask {
    fn on_frame(&mut self, now_ms: f64);
}

/// Loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

#[derive(Debug, Default)]
struct Control {
    state: LoopState,
    generation: u64,
    armed: Option<FrameHandle>,
    ticks: u64,
}

struct LoopShared<T, S> {
    task: Rc<RefCell<T>>,
    scheduler: S,
    control: RefCell<Control>,
}

/// A frame loop driving `task` through `scheduler`.
///
/// Dropping the loop stops it.
pub struct FrameLoop<T: FrameTask + 'static, S: FrameScheduler + 'static> {
    shared: Rc<LoopShared<T, S>>,
}

impl<T: FrameTask + 'static, S: FrameScheduler + 'static> fmt::Debug for FrameLoop<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameLoop")
            .field("control", &*self.shared.control.borrow())
            .finish_non_exhaustive()
    }
}

impl<T: FrameTask + 'static, S: FrameScheduler + 'static> FrameLoop<T, S> {
    /// Create a stopped loop.
    #[must_use]
    pub fn new(task: Rc<RefCell<T>>, scheduler: S) -> Self {
        Self {
            shared: Rc::new(LoopShared {
                task,
                scheduler,
                control: RefCell::new(Control::default()),
            }),
        }
    }

    /// Transition to `Running` and arm the first tick.
    ///
    /// Calling `start` on a running loop is a no-op, so a second tick can
    /// never be armed alongside the first. If the host refuses the request
    /// the loop stays `Stopped`.
    pub fn start(&self) -> Result<(), ScheduleError> {
        {
            let mut control = self.shared.control.borrow_mut();
            if control.state == LoopState::Running {
                return Ok(());
            }
            control.state = LoopState::Running;
            control.generation += 1;
        }
        arm(&self.shared).inspect_err(|_| {
            self.shared.control.borrow_mut().state = LoopState::Stopped;
        })
    }

    /// Transition to `Stopped` and cancel the armed tick. Idempotent.
    pub fn stop(&self) {
        let armed = {
            let mut control = self.shared.control.borrow_mut();
            if control.state == LoopState::Stopped {
                return;
            }
            control.state = LoopState::Stopped;
            control.generation += 1;
            control.armed.take()
        };
        if let Some(handle) = armed {
            self.shared.scheduler.cancel_frame(handle);
        }
        trace!("frame loop stopped");
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.shared.control.borrow().state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state() == LoopState::Running
    }

    /// Whether a tick is currently armed with the host.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.shared.control.borrow().armed.is_some()
    }

    /// Ticks delivered to the task since construction.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.shared.control.borrow().ticks
    }

    /// The driven task.
    #[must_use]
    pub fn task(&self) -> &Rc<RefCell<T>> {
        &self.shared.task
    }
}

impl<T: FrameTask + 'static, S: FrameScheduler + 'static> Drop for FrameLoop<T, S> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn arm<T: FrameTask + 'static, S: FrameScheduler + 'static>(
    shared: &Rc<LoopShared<T, S>>,
) -> Result<(), ScheduleError> {
    let token = shared.control.borrow().generation;
    let weak = Rc::downgrade(shared);
    let handle = shared
        .scheduler
        .request_frame(Box::new(move |now_ms| tick(&weak, token, now_ms)))?;
    shared.control.borrow_mut().armed = Some(handle);
    Ok(())
}

fn tick<T: FrameTask + 'static, S: FrameScheduler + 'static>(
    weak: &Weak<LoopShared<T, S>>,
    token: u64,
    now_ms: f64,
) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    {
        let mut control = shared.control.borrow_mut();
        if control.state != LoopState::Running || control.generation != token {
            return;
        }
        control.armed = None;
        control.ticks += 1;
    }

    shared.task.borrow_mut().on_frame(now_ms);

    let still_current = {
        let control = shared.control.borrow();
        control.state == LoopState::Running && control.generation == token
    };
    if !still_current {
        return;
    }
    if let Err(err) = arm(&shared) {
        warn!(%err, "frame loop halted");
        shared.control.borrow_mut().state = LoopState::Stopped;
    }
}
