//! Provide/inject between component instances.
//!
//! A value provided on an instance is visible to every descendant that calls
//! `inject` while it is current. Lookups walk the ancestor chain nearest first
//! and never see the injecting instance's own provides.
//!
//! Keys are either typed `InjectionKey<T>` values, unique per construction
//! like a symbol, or plain strings.

use std::borrow::Cow;
use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;

use crate::current_instance;

thread_local! {
    static NEXT_KEY_ID: Cell<u64> = const { Cell::new(0) };
}

/// Storage key for provided values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProvideKey {
    Symbol(u64),
    Name(String),
}

/// Symbolic key carrying the provided value's type.
pub struct InjectionKey<T> {
    id: u64,
    description: Option<Cow<'static, str>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> InjectionKey<T> {
    pub fn new() -> Self {
        Self::with_description(None)
    }

    pub fn described(description: impl Into<Cow<'static, str>>) -> Self {
        Self::with_description(Some(description.into()))
    }

    fn with_description(description: Option<Cow<'static, str>>) -> Self {
        let id = NEXT_KEY_ID.with(|n| {
            let id = n.get();
            n.set(id + 1);
            id
        });
        Self {
            id,
            description,
            _marker: PhantomData,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl<T> Default for InjectionKey<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for InjectionKey<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            description: self.description.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for InjectionKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(d) => write!(f, "Symbol({d})"),
            None => write!(f, "Symbol()"),
        }
    }
}

/// Anything usable to provide or inject a `T`.
pub trait Key<T> {
    fn provide_key(&self) -> ProvideKey;

    /// Human-readable form used in error messages.
    fn display_name(&self) -> String;
}

impl<T> Key<T> for InjectionKey<T> {
    fn provide_key(&self) -> ProvideKey {
        ProvideKey::Symbol(self.id)
    }

    fn display_name(&self) -> String {
        self.description
            .as_deref()
            .map(str::to_owned)
            .unwrap_or_else(|| "Symbol()".to_owned())
    }
}

impl<T> Key<T> for str {
    fn provide_key(&self) -> ProvideKey {
        ProvideKey::Name(self.to_owned())
    }

    fn display_name(&self) -> String {
        self.to_owned()
    }
}

impl<T> Key<T> for String {
    fn provide_key(&self) -> ProvideKey {
        ProvideKey::Name(self.clone())
    }

    fn display_name(&self) -> String {
        self.clone()
    }
}

/// Resolve `key` from the current instance's ancestors.
///
/// Returns `None` outside an instance, when nothing was provided, or when the
/// provided value is not a `T`.
pub fn inject<T, K>(key: &K) -> Option<T>
where
    T: Clone + 'static,
    K: Key<T> + ?Sized,
{
    let Some(instance) = current_instance() else {
        log::warn!(
            "inject({}) can only be used inside Instance::run",
            key.display_name()
        );
        return None;
    };
    let provided = instance.find_provided(&key.provide_key())?;
    match provided.downcast_ref::<T>() {
        Some(v) => Some(v.clone()),
        None => {
            log::warn!(
                "inject({}): provided value has a different type",
                key.display_name()
            );
            None
        }
    }
}

/// Like `inject`, returning `fallback` when nothing resolves.
pub fn inject_or<T, K>(key: &K, fallback: T) -> T
where
    T: Clone + 'static,
    K: Key<T> + ?Sized,
{
    inject(key).unwrap_or(fallback)
}
