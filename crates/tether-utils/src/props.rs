use std::fmt;
use std::rc::Rc;

use heck::ToKebabCase;
use tether_core::{Instance, Result, Signal};

use crate::assert_current_instance;

/// Two-way accessor for a prop: reads come from the props, writes are
/// emitted as an event for the parent to apply.
pub struct ComputedProp<T> {
    read: Rc<dyn Fn() -> T>,
    instance: Instance,
    event: String,
}

impl<T: 'static> ComputedProp<T> {
    pub fn get(&self) -> T {
        (self.read)()
    }

    /// Emits the update event with `value` as payload.
    pub fn set(&self, value: T) {
        self.instance.emit(&self.event, &value);
    }

    pub fn event(&self) -> &str {
        &self.event
    }
}

impl<T> Clone for ComputedProp<T> {
    fn clone(&self) -> Self {
        Self {
            read: self.read.clone(),
            instance: self.instance.clone(),
            event: self.event.clone(),
        }
    }
}

impl<T> fmt::Debug for ComputedProp<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputedProp")
            .field("instance", &self.instance)
            .field("event", &self.event)
            .finish()
    }
}

/// `update:<kebab-case prop>`, the event a bound prop emits on write.
pub fn update_event_name(prop: &str) -> String {
    format!("update:{}", prop.to_kebab_case())
}

/// Binds `prop` of `props` to the current instance.
///
/// `read` projects the prop out of the props value. Writes emit
/// `custom_event`, or `update:<kebab-case prop>` when none is given.
pub fn use_computed_prop<P, T>(
    props: &Signal<P>,
    prop: &str,
    read: impl Fn(&P) -> T + 'static,
    custom_event: Option<&str>,
) -> Result<ComputedProp<T>>
where
    P: 'static,
    T: 'static,
{
    let instance = assert_current_instance("use_computed_prop")?;
    let event = custom_event
        .map(str::to_owned)
        .unwrap_or_else(|| update_event_name(prop));

    let props = props.clone();
    Ok(ComputedProp {
        read: Rc::new(move || props.with(|p| read(p))),
        instance,
        event,
    })
}
