use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use super::entry::{GroupId, ShortcutEntry, ShortcutGroup, ShortcutUpdate};

/// Shared handle to the registry used across UI components.
///
/// The whole shortcut system runs on the single-threaded UI task, so a
/// plain `Rc<RefCell<..>>` is the mutual-exclusion section the dispatch
/// contract asks for: every mutation and every dispatch pass completes
/// before the next event is processed.
pub type SharedRegistry = Rc<RefCell<ShortcutRegistry>>;

/// Application-wide store of shortcut groups.
///
/// Groups are kept in registration order and entries in declaration
/// order, because dispatch resolves ties by "first registered group,
/// then first declared entry" and that ordering is observable behavior.
///
/// Operations against an unknown id are silent no-ops: registration and
/// unregistration race benignly with component setup and teardown, so an
/// unknown id is expected traffic rather than an error.
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    groups: Vec<ShortcutGroup>,
    next_id: u64,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry already wrapped for sharing with bindings.
    pub fn shared() -> SharedRegistry {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Store a new enabled group and return its fresh id.
    ///
    /// Entry order is preserved as given. Duplicate keys across groups
    /// are not validated; the dispatch ordering rules decide the winner.
    pub fn register(&mut self, entries: Vec<ShortcutEntry>) -> GroupId {
        let id = GroupId::new(self.next_id);
        self.next_id += 1;

        debug!("registering {} with {} entries", id, entries.len());
        self.groups.push(ShortcutGroup::new(id, entries));
        id
    }

    /// Remove the group with `id`. Idempotent; unknown ids are ignored.
    pub fn unregister(&mut self, id: GroupId) {
        let before = self.groups.len();
        self.groups.retain(|group| group.id() != id);
        if self.groups.len() < before {
            debug!("unregistered {}", id);
        }
    }

    /// Disable one group without touching the others.
    pub fn disable_group(&mut self, id: GroupId) {
        self.set_group_disabled(id, true);
    }

    /// Re-enable one group.
    pub fn enable_group(&mut self, id: GroupId) {
        self.set_group_disabled(id, false);
    }

    fn set_group_disabled(&mut self, id: GroupId, disabled: bool) {
        if let Some(group) = self.groups.iter_mut().find(|group| group.id() == id) {
            group.set_disabled(disabled);
        }
    }

    /// Disable every currently registered group.
    ///
    /// This is a snapshot mutation, not a persistent mode: a group
    /// registered after this call starts enabled.
    pub fn disable_all(&mut self) {
        debug!("disabling all {} groups", self.groups.len());
        for group in &mut self.groups {
            group.set_disabled(true);
        }
    }

    /// Enable every currently registered group.
    pub fn enable_all(&mut self) {
        debug!("enabling all {} groups", self.groups.len());
        for group in &mut self.groups {
            group.set_disabled(false);
        }
    }

    /// Apply a partial update to the entry matching `key` within group
    /// `id`. Unknown group or key is a no-op.
    pub fn update_entry(&mut self, id: GroupId, key: &str, updates: ShortcutUpdate) {
        let Some(group) = self.groups.iter_mut().find(|group| group.id() == id) else {
            return;
        };
        if let Some(entry) = group.entries_mut().iter_mut().find(|e| e.matches(key)) {
            entry.apply(updates);
        }
    }

    /// All entries eligible for dispatch, in group-registration order then
    /// in-group declaration order: entries of non-disabled groups that are
    /// not individually disabled.
    pub fn active_entries(&self) -> impl Iterator<Item = &ShortcutEntry> {
        self.groups
            .iter()
            .filter(|group| !group.is_disabled())
            .flat_map(|group| group.entries())
            .filter(|entry| !entry.is_disabled())
    }

    /// Snapshot of every registered `(key, description)` pair, enabled or
    /// not, in registry order. Used by the help dialog.
    pub fn entries_for_help(&self) -> Vec<(String, String)> {
        self.groups
            .iter()
            .flat_map(|group| group.entries())
            .map(|entry| (entry.key().to_string(), entry.description().to_string()))
            .collect()
    }

    /// Invoke the first active entry matching the normalized `token`.
    ///
    /// Returns true when a callback fired, which tells the event loop to
    /// treat the key as consumed. At most one callback runs per call, and
    /// it runs synchronously before this method returns.
    pub fn dispatch(&mut self, token: &str) -> bool {
        let matched = self
            .groups
            .iter_mut()
            .filter(|group| !group.is_disabled())
            .flat_map(|group| group.entries_mut().iter_mut())
            .find(|entry| !entry.is_disabled() && entry.matches(token));

        match matched {
            Some(entry) => {
                debug!("dispatching '{}' to '{}'", token, entry.description());
                entry.invoke();
                true
            }
            None => false,
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn contains(&self, id: GroupId) -> bool {
        self.groups.iter().any(|group| group.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_entry(key: &str, hits: &Rc<Cell<u32>>) -> ShortcutEntry {
        let hits = Rc::clone(hits);
        ShortcutEntry::new(key, format!("count {}", key), move || {
            hits.set(hits.get() + 1)
        })
    }

    #[test]
    fn test_first_registered_group_wins() {
        let mut registry = ShortcutRegistry::new();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        registry.register(vec![counting_entry("a", &first)]);
        registry.register(vec![counting_entry("a", &second)]);

        assert!(registry.dispatch("a"));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
    }

    #[test]
    fn test_first_declared_entry_wins_within_group() {
        let mut registry = ShortcutRegistry::new();
        let first = Rc::new(Cell::new(0));
        let duplicate = Rc::new(Cell::new(0));

        registry.register(vec![
            counting_entry("a", &first),
            counting_entry("a", &duplicate),
        ]);

        assert!(registry.dispatch("a"));
        assert_eq!(first.get(), 1);
        assert_eq!(duplicate.get(), 0);
    }

    #[test]
    fn test_disabling_a_group_falls_through_to_the_next() {
        let mut registry = ShortcutRegistry::new();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let g1 = registry.register(vec![counting_entry("a", &first)]);
        registry.register(vec![counting_entry("a", &second)]);

        registry.disable_group(g1);
        assert!(registry.dispatch("a"));
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);

        registry.enable_group(g1);
        assert!(registry.dispatch("a"));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_disable_all_is_a_snapshot_not_a_policy() {
        let mut registry = ShortcutRegistry::new();
        let before = Rc::new(Cell::new(0));
        let after = Rc::new(Cell::new(0));

        registry.register(vec![counting_entry("a", &before)]);
        registry.disable_all();
        assert!(!registry.dispatch("a"));

        // A group registered after disable_all starts enabled.
        registry.register(vec![counting_entry("b", &after)]);
        assert!(registry.dispatch("b"));
        assert_eq!(after.get(), 1);

        registry.enable_all();
        assert!(registry.dispatch("a"));
        assert_eq!(before.get(), 1);
    }

    #[test]
    fn test_individually_disabled_entry_is_skipped() {
        let mut registry = ShortcutRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let fallthrough = Rc::new(Cell::new(0));

        let id = registry.register(vec![counting_entry("a", &hits)]);
        registry.register(vec![counting_entry("a", &fallthrough)]);

        registry.update_entry(id, "a", ShortcutUpdate::new().disabled(true));
        assert!(registry.dispatch("a"));
        assert_eq!(hits.get(), 0);
        assert_eq!(fallthrough.get(), 1);

        registry.update_entry(id, "a", ShortcutUpdate::new().disabled(false));
        assert!(registry.dispatch("a"));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_unregister_is_idempotent_and_silent() {
        let mut registry = ShortcutRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let other = Rc::new(Cell::new(0));

        let id = registry.register(vec![counting_entry("a", &hits)]);
        let keep = registry.register(vec![counting_entry("b", &other)]);

        registry.unregister(id);
        registry.unregister(id);
        assert!(!registry.dispatch("a"));
        assert!(registry.contains(keep));
        assert!(registry.dispatch("b"));
    }

    #[test]
    fn test_operations_on_unknown_ids_are_no_ops() {
        let mut registry = ShortcutRegistry::new();
        let hits = Rc::new(Cell::new(0));
        registry.register(vec![counting_entry("a", &hits)]);

        let never_issued = GroupId::new(999);
        registry.unregister(never_issued);
        registry.disable_group(never_issued);
        registry.enable_group(never_issued);
        registry.update_entry(never_issued, "a", ShortcutUpdate::new().disabled(true));

        assert!(registry.dispatch("a"));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut registry = ShortcutRegistry::new();
        let a = registry.register(vec![]);
        registry.unregister(a);
        let b = registry.register(vec![]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_active_entries_excludes_disabled() {
        let mut registry = ShortcutRegistry::new();
        let g1 = registry.register(vec![
            ShortcutEntry::new("a", "first", || {}),
            ShortcutEntry::new("b", "second", || {}).disabled(true),
        ]);
        registry.register(vec![ShortcutEntry::new("c", "third", || {})]);

        let keys: Vec<&str> = registry.active_entries().map(|e| e.key()).collect();
        assert_eq!(keys, vec!["a", "c"]);

        registry.disable_group(g1);
        let keys: Vec<&str> = registry.active_entries().map(|e| e.key()).collect();
        assert_eq!(keys, vec!["c"]);

        // Help listing still sees everything.
        assert_eq!(registry.entries_for_help().len(), 3);
    }

    #[test]
    fn test_dispatch_matches_case_insensitively() {
        let mut registry = ShortcutRegistry::new();
        let hits = Rc::new(Cell::new(0));
        registry.register(vec![counting_entry("A", &hits)]);

        assert!(registry.dispatch("a"));
        assert_eq!(hits.get(), 1);
    }
}
