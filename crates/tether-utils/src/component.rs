use std::any::Any;

use tether_core::Instance;

/// True when `obj` is a component instance handle.
pub fn is_component_instance(obj: &dyn Any) -> bool {
    obj.is::<Instance>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_instances() {
        assert!(is_component_instance(&Instance::new("Root")));
        assert!(!is_component_instance(&"Root"));
        assert!(!is_component_instance(&None::<Instance>));
    }
}
