//! End-to-end behavior of the shortcut system through its public API:
//! registration ordering, enable/disable scoping, suspension, and
//! lifecycle races.

use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use cohort::shortcuts::{
    Dispatcher, InputFocus, ShortcutBinding, ShortcutEntry, ShortcutRegistry,
};

fn press(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn counting(key: &str, description: &str, hits: &Rc<Cell<u32>>) -> ShortcutEntry {
    let hits = Rc::clone(hits);
    ShortcutEntry::new(key, description, move || hits.set(hits.get() + 1))
}

#[test]
fn earlier_group_shadows_later_group_for_the_same_key() {
    let registry = ShortcutRegistry::shared();
    let g1_hits = Rc::new(Cell::new(0));
    let g2_hits = Rc::new(Cell::new(0));

    registry
        .borrow_mut()
        .register(vec![counting("a", "first group", &g1_hits)]);
    registry
        .borrow_mut()
        .register(vec![counting("a", "second group", &g2_hits)]);

    let dispatcher = Dispatcher::new(Rc::clone(&registry));
    assert!(dispatcher.handle_key(&press('a'), InputFocus::Normal));
    assert_eq!(g1_hits.get(), 1);
    assert_eq!(g2_hits.get(), 0);
}

#[test]
fn disabling_the_early_group_uncovers_the_later_one() {
    let registry = ShortcutRegistry::shared();
    let g1_hits = Rc::new(Cell::new(0));
    let g2_hits = Rc::new(Cell::new(0));

    let g1 = registry
        .borrow_mut()
        .register(vec![counting("a", "first group", &g1_hits)]);
    registry
        .borrow_mut()
        .register(vec![counting("a", "second group", &g2_hits)]);

    registry.borrow_mut().disable_group(g1);

    let dispatcher = Dispatcher::new(Rc::clone(&registry));
    assert!(dispatcher.handle_key(&press('a'), InputFocus::Normal));
    assert_eq!(g1_hits.get(), 0);
    assert_eq!(g2_hits.get(), 1);
}

#[test]
fn disable_all_suspends_dispatch_until_enable_all() {
    let registry = ShortcutRegistry::shared();
    let g1_hits = Rc::new(Cell::new(0));
    let g2_hits = Rc::new(Cell::new(0));

    registry
        .borrow_mut()
        .register(vec![counting("a", "first group", &g1_hits)]);
    registry
        .borrow_mut()
        .register(vec![counting("a", "second group", &g2_hits)]);

    let dispatcher = Dispatcher::new(Rc::clone(&registry));

    registry.borrow_mut().disable_all();
    assert!(!dispatcher.handle_key(&press('a'), InputFocus::Normal));
    assert_eq!(g1_hits.get(), 0);
    assert_eq!(g2_hits.get(), 0);

    registry.borrow_mut().enable_all();
    assert!(dispatcher.handle_key(&press('a'), InputFocus::Normal));
    assert_eq!(g1_hits.get(), 1);
    assert_eq!(g2_hits.get(), 0);
}

#[test]
fn unregistering_twice_or_with_a_foreign_id_never_breaks_other_groups() {
    let registry = ShortcutRegistry::shared();
    let hits = Rc::new(Cell::new(0));

    let id = registry
        .borrow_mut()
        .register(vec![counting("a", "doomed", &hits)]);
    let survivor = registry
        .borrow_mut()
        .register(vec![counting("b", "survivor", &hits)]);

    registry.borrow_mut().unregister(id);
    registry.borrow_mut().unregister(id);

    // An id this registry never issued.
    let mut scratch = ShortcutRegistry::new();
    for _ in 0..16 {
        scratch.register(Vec::new());
    }
    let foreign = scratch.register(Vec::new());
    registry.borrow_mut().unregister(foreign);

    assert!(registry.borrow().contains(survivor));
    let dispatcher = Dispatcher::new(Rc::clone(&registry));
    assert!(dispatcher.handle_key(&press('b'), InputFocus::Normal));
    assert_eq!(hits.get(), 1);
}

#[test]
fn keys_typed_into_a_text_entry_never_trigger_callbacks() {
    let registry = ShortcutRegistry::shared();
    let hits = Rc::new(Cell::new(0));

    registry
        .borrow_mut()
        .register(vec![counting("a", "add", &hits)]);

    let dispatcher = Dispatcher::new(Rc::clone(&registry));
    assert!(!dispatcher.handle_key(&press('a'), InputFocus::TextEntry));
    assert_eq!(hits.get(), 0);

    // The same key fires as soon as focus leaves the text entry.
    assert!(dispatcher.handle_key(&press('a'), InputFocus::Normal));
    assert_eq!(hits.get(), 1);
}

#[test]
fn reregistration_through_a_binding_retires_the_old_entries() {
    let registry = ShortcutRegistry::shared();
    let old_hits = Rc::new(Cell::new(0));
    let new_hits = Rc::new(Cell::new(0));

    let mut binding = ShortcutBinding::new(&registry);
    binding.set_shortcuts(vec![counting("a", "old list", &old_hits)]);
    let old_id = binding.id().unwrap();

    binding.set_shortcuts(vec![counting("a", "new list", &new_hits)]);
    assert_ne!(binding.id().unwrap(), old_id);
    assert!(!registry.borrow().contains(old_id));

    let dispatcher = Dispatcher::new(Rc::clone(&registry));
    assert!(dispatcher.handle_key(&press('a'), InputFocus::Normal));
    assert_eq!(old_hits.get(), 0);
    assert_eq!(new_hits.get(), 1);
}

#[test]
fn groups_registered_after_a_suspension_start_enabled() {
    let registry = ShortcutRegistry::shared();
    let suspended = Rc::new(Cell::new(0));
    let fresh = Rc::new(Cell::new(0));

    let mut binding = ShortcutBinding::new(&registry);
    binding.set_shortcuts(vec![counting("a", "suspended", &suspended)]);
    binding.disable_all_shortcuts();

    let mut late = ShortcutBinding::new(&registry);
    late.set_shortcuts(vec![counting("b", "fresh", &fresh)]);

    let dispatcher = Dispatcher::new(Rc::clone(&registry));
    assert!(!dispatcher.handle_key(&press('a'), InputFocus::Normal));
    assert!(dispatcher.handle_key(&press('b'), InputFocus::Normal));
    assert_eq!(fresh.get(), 1);
}

#[test]
fn duplicate_keys_resolve_to_the_first_declaration() {
    let registry = ShortcutRegistry::shared();
    let help_hits = Rc::new(Cell::new(0));
    let add_hits = Rc::new(Cell::new(0));
    let dup_hits = Rc::new(Cell::new(0));

    registry
        .borrow_mut()
        .register(vec![counting("?", "open help", &help_hits)]);
    registry.borrow_mut().register(vec![
        counting("a", "open add", &add_hits),
        counting("a", "open add duplicate", &dup_hits),
    ]);

    let dispatcher = Dispatcher::new(Rc::clone(&registry));

    let shifted = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
    assert!(dispatcher.handle_key(&shifted, InputFocus::Normal));
    assert_eq!(help_hits.get(), 1);

    assert!(dispatcher.handle_key(&press('a'), InputFocus::Normal));
    assert_eq!(add_hits.get(), 1);
    assert_eq!(dup_hits.get(), 0);
}

#[test]
fn unregistered_keys_fall_through_untouched() {
    let registry = ShortcutRegistry::shared();
    let hits = Rc::new(Cell::new(0));

    let id = registry
        .borrow_mut()
        .register(vec![counting("a", "short lived", &hits)]);
    registry.borrow_mut().unregister(id);

    let dispatcher = Dispatcher::new(Rc::clone(&registry));
    assert!(!dispatcher.handle_key(&press('a'), InputFocus::Normal));
    assert_eq!(hits.get(), 0);
}
