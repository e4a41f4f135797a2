use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Handle returned by `Signal::subscribe`.
    pub struct SubId;
}

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Observable value. Clones share the same cell.
///
/// Subscribers run after every write and see the value that write stored. They
/// may read, write and (un)subscribe any signal, including the one notifying
/// them. A write made from a subscriber supersedes the one being delivered:
/// subscribers that have not run yet only see the newer value.
pub struct Signal<T: 'static>(Rc<Shared<T>>);

struct Shared<T: 'static> {
    value: RefCell<Rc<T>>,
    version: Cell<u64>,
    subs: RefCell<SlotMap<SubId, (u64, Subscriber<T>)>>,
    next_seq: Cell<u64>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(Shared {
            value: RefCell::new(Rc::new(value)),
            version: Cell::new(0),
            subs: RefCell::new(SlotMap::with_key()),
            next_seq: Cell::new(0),
        }))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        T::clone(&self.0.value.borrow())
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self.0.value.borrow().clone();
        f(&*value)
    }

    pub fn set(&self, v: T) {
        *self.0.value.borrow_mut() = Rc::new(v);
        self.notify();
    }

    /// Mutates in place; clones first only while a notification still holds
    /// the current value.
    pub fn update<F: FnOnce(&mut T)>(&self, f: F)
    where
        T: Clone,
    {
        f(Rc::make_mut(&mut self.0.value.borrow_mut()));
        self.notify();
    }

    /// Subscribers run in subscription order.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let seq = self.0.next_seq.get();
        self.0.next_seq.set(seq + 1);
        self.0.subs.borrow_mut().insert((seq, Rc::new(f)))
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        self.0.subs.borrow_mut().remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.subs.borrow().len()
    }

    /// True when both handles point at the same cell.
    pub fn ptr_eq(&self, other: &Signal<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn notify(&self) {
        let version = self.0.version.get() + 1;
        self.0.version.set(version);

        let subs: SmallVec<[Subscriber<T>; 4]> = {
            let subs = self.0.subs.borrow();
            let mut ordered: SmallVec<[&(u64, Subscriber<T>); 4]> = subs.values().collect();
            ordered.sort_by_key(|(seq, _)| *seq);
            ordered.into_iter().map(|(_, s)| s.clone()).collect()
        };
        if subs.is_empty() {
            return;
        }
        log::trace!("signal: notifying {} subscriber(s)", subs.len());
        let value = self.0.value.borrow().clone();
        for s in subs {
            if self.0.version.get() != version {
                log::trace!("signal: write superseded during notification");
                break;
            }
            s(&*value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signal").field(&**self.0.value.borrow()).finish()
    }
}

impl<T: Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
