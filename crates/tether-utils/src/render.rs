use tether_core::{CreateElement, Element, Instance, Node};

/// Renders `render` in a detached throwaway instance and appends the mounted
/// node to `target`.
///
/// Render code runs with that instance as the current one. A render that
/// yields nothing appends an empty comment. Panics from `render` propagate.
pub fn render_inline(
    target: &mut Element,
    render: impl FnOnce(&CreateElement) -> Option<Node>,
) {
    let injector = Instance::new("InlineRender");
    let el = injector.mount(render);
    log::trace!("render_inline: appending to <{}>", target.tag());
    target.append(el);
}
