use tether_core::Signal;

/// `move |v| target.set(v)`, or a no-op without a target.
pub fn ref_setter<T: 'static>(target: Option<&Signal<T>>) -> impl Fn(T) + use<T> {
    let target = target.cloned();
    move |v| {
        if let Some(target) = &target {
            target.set(v);
        }
    }
}

/// Like `ref_setter`, but always writes a clone of `value`.
pub fn ref_setter_with<T: Clone + 'static>(
    target: Option<&Signal<T>>,
    value: T,
) -> impl Fn() + use<T> {
    let set = ref_setter(target);
    move || set(value.clone())
}

pub fn ref_transformer<T, R, F>(target: &Signal<R>, transformer: F) -> impl Fn(T) + use<T, R, F>
where
    R: 'static,
    F: Fn(T) -> R + 'static,
{
    let target = target.clone();
    move |v| target.set(transformer(v))
}

pub fn ref_toggler(target: Option<&Signal<bool>>) -> impl Fn() + use<> {
    let target = target.cloned();
    move || {
        if let Some(target) = &target {
            target.update(|v| *v = !*v);
        }
    }
}
