//! Resettable state and change detection.
//!
//! `use_resetable_state` hands out signals that remember their initial value.
//! Resetting the state puts every one of them back, in the order they were
//! created, optionally recomputing the value from the initial one and a
//! trigger flag:
//!
//! ```rust
//! use tether_core::signal;
//! use tether_utils::use_resetable_state;
//!
//! let open = signal(false);
//! let dialog = use_resetable_state(Some(&open), None);
//!
//! let job_id = dialog.state(None::<String>);
//! let price = dialog.state_with(100, |initial, trigger| {
//!     if trigger == Some(true) { initial * 2 } else { *initial }
//! });
//!
//! job_id.set(Some("12345".into()));
//! price.set(150);
//!
//! // Opening the dialog resets everything with `trigger = Some(true)`.
//! open.set(true);
//! assert_eq!(job_id.get(), None);
//! assert_eq!(price.get(), 200);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use tether_core::{Dispose, Signal, signal, watch};

/// A single registered reset action.
pub type ResetFn = Rc<dyn Fn(Option<bool>)>;

/// Called on trigger changes instead of resetting directly.
pub type TriggerCallback = Box<dyn Fn(&Resetter, bool)>;

type Recompute<T> = Rc<dyn Fn(&T, Option<bool>) -> T>;

/// Cloneable handle that replays every reset action of a `ResetableState`.
#[derive(Clone, Default)]
pub struct Resetter {
    resets: Rc<RefCell<Vec<ResetFn>>>,
}

impl Resetter {
    /// Runs every reset action in registration order.
    pub fn reset(&self, trigger: Option<bool>) {
        // Snapshot so a reset action may register more state.
        let resets: Vec<ResetFn> = self.resets.borrow().clone();
        log::debug!(
            "resetting {} state value(s), trigger={trigger:?}",
            resets.len()
        );
        for reset in resets {
            reset(trigger);
        }
    }

    pub fn len(&self) -> usize {
        self.resets.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.resets.borrow().is_empty()
    }

    fn register(&self, reset: ResetFn) {
        self.resets.borrow_mut().push(reset);
    }
}

impl fmt::Debug for Resetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resetter").field("len", &self.len()).finish()
    }
}

/// Registry of signals that can be reset together.
#[derive(Debug, Default)]
pub struct ResetableState {
    resetter: Resetter,
    watcher: Option<Dispose>,
}

impl ResetableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets with `Some(value)` whenever `trigger` changes.
    pub fn with_trigger(trigger: &Signal<bool>) -> Self {
        use_resetable_state(Some(trigger), None)
    }

    /// Calls `callback(resetter, value)` whenever `trigger` changes and leaves
    /// the decision to reset to it.
    pub fn with_trigger_callback(
        trigger: &Signal<bool>,
        callback: impl Fn(&Resetter, bool) + 'static,
    ) -> Self {
        use_resetable_state(Some(trigger), Some(Box::new(callback)))
    }

    /// A signal that resets to a clone of `value`.
    pub fn state<T: Clone + 'static>(&self, value: T) -> ResetableSignal<T> {
        self.register(value, None)
    }

    /// A signal that resets to `recompute(&value, trigger)`.
    pub fn state_with<T: Clone + 'static>(
        &self,
        value: T,
        recompute: impl Fn(&T, Option<bool>) -> T + 'static,
    ) -> ResetableSignal<T> {
        self.register(value, Some(Rc::new(recompute)))
    }

    fn register<T: Clone + 'static>(
        &self,
        value: T,
        recompute: Option<Recompute<T>>,
    ) -> ResetableSignal<T> {
        let sig = signal(value.clone());
        let reset: ResetFn = {
            let sig = sig.clone();
            Rc::new(move |trigger| match &recompute {
                Some(recompute) => sig.set(recompute(&value, trigger)),
                None => sig.set(value.clone()),
            })
        };
        self.resetter.register(reset.clone());
        ResetableSignal { signal: sig, reset }
    }

    /// Resets every registered signal in registration order.
    pub fn reset(&self, trigger: Option<bool>) {
        self.resetter.reset(trigger);
    }

    pub fn resetter(&self) -> Resetter {
        self.resetter.clone()
    }

    pub fn len(&self) -> usize {
        self.resetter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resetter.is_empty()
    }

    /// Stops reacting to the trigger signal, if one was bound.
    ///
    /// Dropping the state does the same; signals it handed out keep working
    /// and can still be reset individually.
    pub fn unwatch(&self) {
        if let Some(w) = &self.watcher {
            w.run();
        }
    }
}

impl Drop for ResetableState {
    fn drop(&mut self) {
        self.unwatch();
    }
}

/// Creates a `ResetableState`, optionally bound to a `trigger` signal.
///
/// Every change of `trigger` either calls `trigger_cb(resetter, value)` or,
/// without a callback, resets everything with `Some(value)`.
pub fn use_resetable_state(
    trigger: Option<&Signal<bool>>,
    trigger_cb: Option<TriggerCallback>,
) -> ResetableState {
    let resetter = Resetter::default();
    let watcher = trigger.map(|trigger| {
        let resetter = resetter.clone();
        watch(trigger, move |value, _| match &trigger_cb {
            Some(cb) => cb(&resetter, *value),
            None => resetter.reset(Some(*value)),
        })
    });
    ResetableState { resetter, watcher }
}

/// A signal registered with a `ResetableState`.
pub struct ResetableSignal<T: 'static> {
    signal: Signal<T>,
    reset: ResetFn,
}

impl<T> ResetableSignal<T> {
    /// Resets just this signal.
    pub fn reset(&self, trigger: Option<bool>) {
        (self.reset)(trigger);
    }

    pub fn signal(&self) -> &Signal<T> {
        &self.signal
    }
}

impl<T> Clone for ResetableSignal<T> {
    fn clone(&self) -> Self {
        Self {
            signal: self.signal.clone(),
            reset: self.reset.clone(),
        }
    }
}

impl<T> Deref for ResetableSignal<T> {
    type Target = Signal<T>;

    fn deref(&self) -> &Signal<T> {
        &self.signal
    }
}

impl<T: fmt::Debug> fmt::Debug for ResetableSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResetableSignal").field(&self.signal).finish()
    }
}

/// Tracks whether any watched signal was written through its facade.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    has_changes: Signal<bool>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Becomes `true` on the first write through any facade and stays there.
    pub fn has_changes(&self) -> &Signal<bool> {
        &self.has_changes
    }

    /// Wraps `target`; writes through the result mark the detector dirty.
    pub fn watch_signal<T>(&self, target: &Signal<T>) -> WatchedSignal<T> {
        WatchedSignal {
            target: target.clone(),
            has_changes: self.has_changes.clone(),
        }
    }
}

pub fn use_change_detector() -> ChangeDetector {
    ChangeDetector::new()
}

/// Facade over a signal that flags its `ChangeDetector` on writes.
pub struct WatchedSignal<T: 'static> {
    target: Signal<T>,
    has_changes: Signal<bool>,
}

impl<T> WatchedSignal<T> {
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.target.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.target.with(f)
    }

    pub fn set(&self, v: T) {
        self.target.set(v);
        self.mark_changed();
    }

    pub fn update(&self, f: impl FnOnce(&mut T))
    where
        T: Clone,
    {
        self.target.update(f);
        self.mark_changed();
    }

    /// The wrapped signal; writes through it are not tracked.
    pub fn signal(&self) -> &Signal<T> {
        &self.target
    }

    fn mark_changed(&self) {
        if !self.has_changes.get() {
            self.has_changes.set(true);
        }
    }
}

impl<T> Clone for WatchedSignal<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            has_changes: self.has_changes.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for WatchedSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WatchedSignal").field(&self.target).finish()
    }
}
