use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::{CreateElement, Key, Node, ProvideKey};

thread_local! {
    static CURRENT_INSTANCE: RefCell<Option<Weak<InstanceInner>>> = const { RefCell::new(None) };
    static NEXT_UID: Cell<u64> = const { Cell::new(0) };
}

pub type Listener = Rc<dyn Fn(&dyn Any)>;

/// A component instance: the context helpers see while a component is set up.
pub struct Instance {
    inner: Rc<InstanceInner>,
}

struct InstanceInner {
    uid: u64,
    name: String,
    parent: Option<Weak<InstanceInner>>,
    listeners: RefCell<HashMap<String, Vec<Listener>>>,
    provides: RefCell<HashMap<ProvideKey, Rc<dyn Any>>>,
    disposers: RefCell<Vec<Box<dyn FnOnce()>>>,
    children: RefCell<Vec<Instance>>,
    el: RefCell<Option<Node>>,
}

impl InstanceInner {
    fn new(name: String, parent: Option<Weak<InstanceInner>>) -> Self {
        let uid = NEXT_UID.with(|n| {
            let uid = n.get();
            n.set(uid + 1);
            uid
        });
        Self {
            uid,
            name,
            parent,
            listeners: RefCell::new(HashMap::new()),
            provides: RefCell::new(HashMap::new()),
            disposers: RefCell::new(Vec::new()),
            children: RefCell::new(Vec::new()),
            el: RefCell::new(None),
        }
    }
}

impl Instance {
    /// A detached root instance.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(InstanceInner::new(name.into(), None)),
        }
    }

    /// A child owned by this instance; disposed together with it.
    pub fn child(&self, name: impl Into<String>) -> Instance {
        let child = Instance {
            inner: Rc::new(InstanceInner::new(
                name.into(),
                Some(Rc::downgrade(&self.inner)),
            )),
        };
        self.inner.children.borrow_mut().push(child.clone());
        child
    }

    pub fn uid(&self) -> u64 {
        self.inner.uid
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn parent(&self) -> Option<Instance> {
        self.inner
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| Instance { inner })
    }

    /// Runs `f` with this instance as the current one.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        struct Restore(Option<Weak<InstanceInner>>);
        impl Drop for Restore {
            fn drop(&mut self) {
                let prev = self.0.take();
                CURRENT_INSTANCE.with(|current| *current.borrow_mut() = prev);
            }
        }

        let prev = CURRENT_INSTANCE.with(|current| {
            current
                .borrow_mut()
                .replace(Rc::downgrade(&self.inner))
        });
        let _restore = Restore(prev);
        f()
    }

    pub fn on(&self, event: impl Into<String>, listener: impl Fn(&dyn Any) + 'static) {
        self.inner
            .listeners
            .borrow_mut()
            .entry(event.into())
            .or_default()
            .push(Rc::new(listener));
    }

    /// Invokes every listener for `event`; returns how many ran.
    pub fn emit(&self, event: &str, payload: &dyn Any) -> usize {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .get(event)
            .cloned()
            .unwrap_or_default();
        log::trace!(
            "{}#{}: emit {event:?} to {} listener(s)",
            self.inner.name,
            self.inner.uid,
            listeners.len()
        );
        for l in &listeners {
            l(payload);
        }
        listeners.len()
    }

    pub fn provide<T, K>(&self, key: &K, value: T)
    where
        T: 'static,
        K: Key<T> + ?Sized,
    {
        self.inner
            .provides
            .borrow_mut()
            .insert(key.provide_key(), Rc::new(value));
    }

    /// Nearest ancestor's value for `key`.
    pub(crate) fn find_provided(&self, key: &ProvideKey) -> Option<Rc<dyn Any>> {
        let mut cursor = self.parent();
        while let Some(instance) = cursor {
            if let Some(v) = instance.inner.provides.borrow().get(key) {
                return Some(v.clone());
            }
            cursor = instance.parent();
        }
        None
    }

    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) {
        self.inner.disposers.borrow_mut().push(Box::new(disposer));
    }

    /// Disposes children first, then runs this instance's disposers.
    pub fn dispose(self) {
        log::debug!("{}#{}: dispose", self.inner.name, self.inner.uid);
        let children = std::mem::take(&mut *self.inner.children.borrow_mut());
        for child in children {
            child.dispose();
        }

        let disposers = std::mem::take(&mut *self.inner.disposers.borrow_mut());
        for disposer in disposers {
            disposer();
        }
    }

    /// Renders inside this instance and records the result as its element.
    ///
    /// A render producing nothing mounts an empty comment node.
    pub fn mount(&self, render: impl FnOnce(&CreateElement) -> Option<Node>) -> Node {
        let node = self
            .run(|| render(&CreateElement::default()))
            .unwrap_or_else(Node::empty);
        log::debug!(
            "{}#{}: mounted {}",
            self.inner.name,
            self.inner.uid,
            node.to_html()
        );
        *self.inner.el.borrow_mut() = Some(node.clone());
        node
    }

    /// The mounted element, if any.
    pub fn el(&self) -> Option<Node> {
        self.inner.el.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Clone for Instance {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("uid", &self.inner.uid)
            .field("name", &self.inner.name)
            .finish()
    }
}

impl Drop for InstanceInner {
    fn drop(&mut self) {
        let children = std::mem::take(&mut *self.children.borrow_mut());
        drop(children);

        let disposers = std::mem::take(&mut *self.disposers.borrow_mut());
        for disposer in disposers {
            disposer();
        }
    }
}

/// The instance made current by the innermost `Instance::run`, if any.
pub fn current_instance() -> Option<Instance> {
    CURRENT_INSTANCE.with(|current| {
        current
            .borrow()
            .as_ref()
            .and_then(|weak| weak.upgrade().map(|inner| Instance { inner }))
    })
}
