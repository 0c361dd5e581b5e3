use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::entry::{GroupId, ShortcutEntry, ShortcutUpdate};
use super::registry::{SharedRegistry, ShortcutRegistry};

/// Per-component handle over the shared registry.
///
/// A binding owns exactly one group at a time: the first call to
/// [`set_shortcuts`](Self::set_shortcuts) registers it, every later call
/// replaces it wholesale under a fresh id, and dropping the binding
/// unregisters whatever is left. The group-wide and registry-wide
/// controls it exposes are the ones dialogs need: suspending every
/// shortcut while a modal is open, and tweaking a single entry in its
/// own group.
///
/// Using a binding after the owning application dropped the registry is
/// a programming error and panics immediately; a silent no-op there
/// would hide a real integration bug. Teardown is the one exception:
/// `Drop` quietly does nothing when the registry is already gone, so
/// destruction order never matters.
pub struct ShortcutBinding {
    registry: Weak<RefCell<ShortcutRegistry>>,
    id: Option<GroupId>,
}

impl ShortcutBinding {
    pub fn new(registry: &SharedRegistry) -> Self {
        Self {
            registry: Rc::downgrade(registry),
            id: None,
        }
    }

    /// Register `entries` as this binding's group, replacing any
    /// previously registered group first.
    pub fn set_shortcuts(&mut self, entries: Vec<ShortcutEntry>) {
        let registry = self.registry();
        let mut registry = registry.borrow_mut();
        if let Some(previous) = self.id.take() {
            registry.unregister(previous);
        }
        self.id = Some(registry.register(entries));
    }

    /// Apply a partial update to the entry matching `key` in this
    /// binding's own group. No-op before the first registration.
    pub fn update_shortcut(&mut self, key: &str, updates: ShortcutUpdate) {
        let registry = self.registry();
        if let Some(id) = self.id {
            registry.borrow_mut().update_entry(id, key, updates);
        }
    }

    /// Suspend every registered group, not just this binding's own.
    /// Used while a modal dialog is open.
    pub fn disable_all_shortcuts(&self) {
        self.registry().borrow_mut().disable_all();
    }

    /// Lift the suspension put in place by
    /// [`disable_all_shortcuts`](Self::disable_all_shortcuts).
    pub fn enable_all_shortcuts(&self) {
        self.registry().borrow_mut().enable_all();
    }

    /// The id of the currently registered group, if any.
    pub fn id(&self) -> Option<GroupId> {
        self.id
    }

    fn registry(&self) -> SharedRegistry {
        match self.registry.upgrade() {
            Some(registry) => registry,
            None => panic!("shortcut binding used after the registry was dropped"),
        }
    }
}

impl Drop for ShortcutBinding {
    fn drop(&mut self) {
        if let (Some(registry), Some(id)) = (self.registry.upgrade(), self.id.take()) {
            registry.borrow_mut().unregister(id);
        }
    }
}
