use std::cell::RefCell;
use std::rc::Rc;

use crate::Signal;

/// Cleanup handle returned by `watch` and friends.
///
/// Clones share one cleanup closure; whichever clone runs first consumes it.
/// Instances hold a clone so their disposal stops the watcher too.
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.0.borrow().is_none()
    }
}

impl std::fmt::Debug for Dispose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispose")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Calls `f(new, old)` whenever a write changes `source`.
///
/// Writes of an equal value are ignored. Inside `Instance::run` the returned
/// guard is also registered on the current instance, so the watcher stops when
/// the instance is disposed.
pub fn watch<T, F>(source: &Signal<T>, f: F) -> Dispose
where
    T: Clone + PartialEq + 'static,
    F: Fn(&T, &T) + 'static,
{
    let last = RefCell::new(source.get());
    let id = source.subscribe(move |now| {
        let old = {
            let mut last = last.borrow_mut();
            if *last == *now {
                return;
            }
            std::mem::replace(&mut *last, now.clone())
        };
        f(now, &old);
    });

    let d = {
        let source = source.clone();
        Dispose::new(move || {
            source.unsubscribe(id);
        })
    };

    if let Some(instance) = crate::current_instance() {
        let d2 = d.clone();
        instance.add_disposer(move || d2.run());
    }

    d
}
