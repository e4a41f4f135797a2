//! # Signals, Instances, and Injection
//!
//! Tether's core is the small host layer that component helpers are written
//! against. There are four pieces:
//!
//! - `Signal<T>` — observable, reactive value.
//! - `watch` — change callbacks with a `Dispose` guard.
//! - `Instance` — the component instance that is "current" while a
//!   component is being set up, with event emission and provide/inject.
//! - `Node` — a tiny element tree that instances mount into.
//!
//! ## Signals
//!
//! `Signal<T>` is a cloneable handle to a piece of state:
//!
//! ```rust
//! use tether_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! ## Watching
//!
//! `watch` fires with `(new, old)` only when a write actually changes the
//! value:
//!
//! ```rust
//! use tether_core::*;
//!
//! let open = signal(false);
//! let _stop = watch(&open, |now, was| log::info!("open: {was} -> {now}"));
//! open.set(true);
//! ```
//!
//! ## Instances
//!
//! Code that needs a component context runs inside `Instance::run`:
//!
//! ```rust
//! use tether_core::*;
//!
//! let parent = Instance::new("Form");
//! let key = InjectionKey::<String>::described("form-id");
//! parent.provide(&key, "checkout".to_string());
//!
//! let field = parent.child("Field");
//! field.run(|| {
//!     assert_eq!(inject(&key).as_deref(), Some("checkout"));
//! });
//! ```

pub mod effects;
pub mod error;
pub mod inject;
pub mod instance;
pub mod signal;
pub mod view;

#[cfg(test)]
mod tests;

pub use effects::*;
pub use error::*;
pub use inject::*;
pub use instance::*;
pub use signal::*;
pub use view::*;
