//! Property-based invariant tests for the theme controller and frame loop.
//!
//! **Theme controller:**
//! 1. Two toggles return the attribute to its starting value.
//! 2. The attribute always equals the controller's mode.
//! 3. The signal version counts mode changes exactly.
//!
//! **Frame loop:**
//! 4. At most one tick is ever armed.
//! 5. After `stop`, no further ticks reach the task.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use wavesite_runtime::{
    FrameLoop, FrameTask, ManualScheduler, MemoryAttribute, ThemeController,
};
use wavesite_style::ThemeMode;

// ── Strategies ────────────────────────────────────────────────────────────

fn mode_strategy() -> impl Strategy<Value = ThemeMode> {
    prop_oneof![Just(ThemeMode::Dark), Just(ThemeMode::Light)]
}

#[derive(Debug, Clone, Copy)]
enum LoopOp {
    Start,
    Stop,
    Frame,
}

fn loop_ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<LoopOp>> {
    proptest::collection::vec(
        prop_oneof![Just(LoopOp::Start), Just(LoopOp::Stop), Just(LoopOp::Frame)],
        0..=max_len,
    )
}

#[derive(Default)]
struct Sentinel {
    count: u64,
}

impl FrameTask for Sentinel {
    fn on_frame(&mut self, _now_ms: f64) {
        self.count += 1;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Theme controller
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn double_toggle_is_identity(initial in mode_strategy(), prefix in 0usize..8) {
        let attr = MemoryAttribute::new();
        let controller = ThemeController::new(initial, attr.clone());
        for _ in 0..prefix {
            controller.toggle();
        }
        let before = attr.value();
        controller.toggle();
        controller.toggle();
        prop_assert_eq!(attr.value(), before);
    }
}

proptest! {
    #[test]
    fn attribute_tracks_mode(
        initial in mode_strategy(),
        ops in proptest::collection::vec(proptest::option::of(mode_strategy()), 0..32),
    ) {
        let attr = MemoryAttribute::new();
        let controller = ThemeController::new(initial, attr.clone());
        let signal = controller.signal();
        let mut changes = 0u64;
        for op in ops {
            match op {
                None => {
                    controller.toggle();
                    changes += 1;
                }
                Some(mode) => {
                    if controller.set_mode(mode) {
                        changes += 1;
                    }
                }
            }
            let attr_value = attr.value();
            prop_assert_eq!(attr_value.as_deref(), Some(controller.mode().as_attr()));
            prop_assert_eq!(signal.get(), controller.mode());
        }
        prop_assert_eq!(signal.version(), changes);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Frame loop
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn never_more_than_one_armed_tick(ops in loop_ops_strategy(64)) {
        let task = Rc::new(RefCell::new(Sentinel::default()));
        let scheduler = ManualScheduler::new();
        let frame_loop = FrameLoop::new(Rc::clone(&task), scheduler.clone());
        let mut now = 0.0;
        for op in ops {
            match op {
                LoopOp::Start => frame_loop.start().expect("manual scheduler accepts"),
                LoopOp::Stop => frame_loop.stop(),
                LoopOp::Frame => {
                    now += 16.0;
                    scheduler.run_frame(now);
                }
            }
            prop_assert!(scheduler.pending() <= 1);
            prop_assert_eq!(scheduler.pending() == 1, frame_loop.is_running());
        }
        prop_assert_eq!(task.borrow().count, frame_loop.ticks());
    }
}

proptest! {
    #[test]
    fn sentinel_stops_after_stop(frames_before in 0usize..16, frames_after in 1usize..16) {
        let task = Rc::new(RefCell::new(Sentinel::default()));
        let scheduler = ManualScheduler::new();
        let frame_loop = FrameLoop::new(Rc::clone(&task), scheduler.clone());
        frame_loop.start().expect("manual scheduler accepts");
        for i in 0..frames_before {
            scheduler.run_frame(i as f64 * 16.0);
        }
        let at_stop = task.borrow().count;
        prop_assert_eq!(at_stop, frames_before as u64);
        frame_loop.stop();
        for i in 0..frames_after {
            scheduler.run_frame(1_000.0 + i as f64 * 16.0);
        }
        prop_assert_eq!(task.borrow().count, at_stop);
    }
}
