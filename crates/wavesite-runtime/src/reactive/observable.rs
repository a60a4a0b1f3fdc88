#![forbid(unsafe_code)]

//! Shared value with versioning and change callbacks.
//!
//! [`Observable<T>`] is a handle; clones share one value, one version
//! counter and one callback list. Unsubscribing is eager: dropping a
//! [`Subscription`] removes its slot immediately, and a liveness flag stops
//! a callback that is dropped in the middle of a notification pass.
//!
//! # Failure Modes
//!
//! - **Write from a callback**: allowed. The nested write commits and runs
//!   its own notification pass; the outer pass then continues with the value
//!   it started with.
//! - **Borrow while writing**: [`Observable::with`] holds a shared borrow for
//!   the duration of its closure; writing from inside that closure panics.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Slot<T> {
    id: u64,
    live: Rc<Cell<bool>>,
    callback: Callback<T>,
}

struct Shared<T> {
    value: T,
    version: u64,
    next_id: u64,
    slots: Vec<Slot<T>>,
}

/// A shared, version-tracked value with change notification.
pub struct Observable<T> {
    shared: Rc<RefCell<Shared<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("Observable")
            .field("value", &shared.value)
            .field("version", &shared.version)
            .field("subscribers", &shared.slots.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// New observable at version 0 with no subscribers.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                value,
                version: 0,
                next_id: 0,
                slots: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.shared.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.borrow().value)
    }

    /// Replace the value. Returns `true` when it changed, in which case the
    /// version is bumped and subscribers are notified.
    pub fn set(&self, value: T) -> bool {
        {
            let mut shared = self.shared.borrow_mut();
            if shared.value == value {
                return false;
            }
            shared.value = value;
            shared.version += 1;
        }
        self.notify();
        true
    }

    /// Edit the value in place. Change detection compares against a
    /// snapshot taken before `f` runs.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        {
            let mut shared = self.shared.borrow_mut();
            let before = shared.value.clone();
            f(&mut shared.value);
            if shared.value == before {
                return false;
            }
            shared.version += 1;
        }
        self.notify();
        true
    }

    /// Register `callback` for future changes. The current value is not
    /// replayed.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let live = Rc::new(Cell::new(true));
        let id = {
            let mut shared = self.shared.borrow_mut();
            let id = shared.next_id;
            shared.next_id += 1;
            shared.slots.push(Slot {
                id,
                live: Rc::clone(&live),
                callback: Rc::new(callback),
            });
            id
        };
        let registry: Weak<RefCell<Shared<T>>> = Rc::downgrade(&self.shared);
        Subscription {
            live,
            detach: Some(Box::new(move || {
                if let Some(shared) = registry.upgrade() {
                    // A nested drop during `with` would still hold a borrow.
                    if let Ok(mut shared) = shared.try_borrow_mut() {
                        shared.slots.retain(|slot| slot.id != id);
                    }
                }
            })),
        }
    }

    /// Version counter; moves by one per change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.shared.borrow().version
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        let shared = self.shared.borrow();
        shared.slots.iter().filter(|slot| slot.live.get()).count()
    }

    fn notify(&self) {
        let (value, targets): (T, Vec<(Rc<Cell<bool>>, Callback<T>)>) = {
            let mut shared = self.shared.borrow_mut();
            shared.slots.retain(|slot| slot.live.get());
            let targets = shared
                .slots
                .iter()
                .map(|slot| (Rc::clone(&slot.live), Rc::clone(&slot.callback)))
                .collect();
            (shared.value.clone(), targets)
        };
        for (live, callback) in targets {
            if live.get() {
                callback(&value);
            }
        }
    }
}

/// Keeps a callback registered; dropping it unsubscribes.
pub struct Subscription {
    live: Rc<Cell<bool>>,
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Whether the callback is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.live.get()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.live.set(false);
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.live.get())
            .finish()
    }
}
