use crossterm::event::KeyEvent;

use super::normalizer::{normalize_key, InputFocus};
use super::registry::SharedRegistry;

/// The single key-down listener of the application.
///
/// The event loop hands every key event to [`Dispatcher::handle_key`]
/// before any widget sees it. Dispatch is a linear scan over the active
/// entries in registry order; the first match fires and consumes the
/// event, everything else lets the event fall through to the focused
/// widget (so typing in a form field keeps working).
pub struct Dispatcher {
    registry: SharedRegistry,
}

impl Dispatcher {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// Handle one key-down event.
    ///
    /// Returns true when a shortcut callback fired, meaning the event
    /// must not be forwarded anywhere else.
    pub fn handle_key(&self, key: &KeyEvent, focus: InputFocus) -> bool {
        let Some(token) = normalize_key(key, focus) else {
            return false;
        };
        self.registry.borrow_mut().dispatch(&token)
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }
}
