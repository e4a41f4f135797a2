use std::rc::Rc;

use tether_core::{Error, Instance, Key, Result, current_instance, inject};

/// The current instance, or a missing-context error naming `name`.
pub fn assert_current_instance(name: &str) -> Result<Instance> {
    current_instance().ok_or_else(|| Error::missing_context(name))
}

/// Values that can be falsy.
///
/// `inject_strict` rejects falsy values the same way it rejects missing ones.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

macro_rules! truthy_int {
    ($($t:ty),*) => {
        $(impl Truthy for $t {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

truthy_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for &'static str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T: Truthy + ?Sized> Truthy for Rc<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Box<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

/// Injects `key`, failing when the value is missing or falsy.
///
/// `fallback` stands in when nothing is provided and is subject to the same
/// check.
pub fn inject_strict<T, K>(key: &K, fallback: Option<T>) -> Result<T>
where
    T: Clone + Truthy + 'static,
    K: Key<T> + ?Sized,
{
    inject(key)
        .or(fallback)
        .filter(Truthy::is_truthy)
        .ok_or_else(|| Error::unresolved(key.display_name()))
}

/// Injects `key`, failing only when nothing is provided and there is no
/// fallback. Provided falsy values resolve.
pub fn inject_required<T, K>(key: &K, fallback: Option<T>) -> Result<T>
where
    T: Clone + 'static,
    K: Key<T> + ?Sized,
{
    inject(key)
        .or(fallback)
        .ok_or_else(|| Error::unresolved(key.display_name()))
}
