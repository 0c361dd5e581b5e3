//! Keyboard shortcut registration and dispatch.
//!
//! UI components declare the shortcuts they want through a
//! [`ShortcutBinding`], the binding registers them as a group in the
//! shared [`ShortcutRegistry`], and the application's single
//! [`Dispatcher`] consults the registry on every key-down event. At most
//! one callback fires per key press: first-registered group wins, then
//! first-declared entry within the group.

pub mod binding;
pub mod dispatch;
pub mod entry;
pub mod normalizer;
pub mod registry;

pub use binding::ShortcutBinding;
pub use dispatch::Dispatcher;
pub use entry::{GroupId, ShortcutCallback, ShortcutEntry, ShortcutGroup, ShortcutUpdate};
pub use normalizer::{normalize_key, InputFocus};
pub use registry::{SharedRegistry, ShortcutRegistry};
