//! # Component helpers
//!
//! Small helpers for component setup code built on `tether-core`:
//!
//! - `refs` — setter, toggler and transformer closures over a `Signal`.
//! - `state` — resettable state (`use_resetable_state`) and change detection
//!   (`use_change_detector`).
//! - `props` — two-way prop binding that writes by emitting `update:*`.
//! - `instance` — `assert_current_instance`, `inject_strict`.
//! - `render` — `render_inline` into an existing element.
//!
//! ```rust
//! use tether_utils::*;
//!
//! let form = use_resetable_state(None, None);
//! let name = form.state(String::new());
//! let set_name = ref_setter(Some(name.signal()));
//!
//! set_name("Ada".into());
//! form.reset(None);
//! assert_eq!(name.get(), "");
//! ```

pub mod component;
pub mod instance;
pub mod props;
pub mod refs;
pub mod render;
pub mod state;


pub use component::*;
pub use instance::*;
pub use props::*;
pub use refs::*;
pub use render::*;
pub use state::*;
