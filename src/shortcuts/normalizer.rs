use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Where keyboard focus currently sits, from the dispatcher's point of
/// view.
///
/// The registry must stay silent while the user is typing into a form
/// field, so the application reports `TextEntry` whenever a text input or
/// an editable selection list has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFocus {
    /// No text-entry widget has focus; shortcuts may fire.
    Normal,
    /// A text-entry-capable widget has focus; all shortcuts are
    /// suppressed and the key goes to the widget instead.
    TextEntry,
}

/// Map a raw key event to a canonical lowercase key token, or `None` when
/// the event must not reach the shortcut registry.
///
/// Pure function: lowercases character keys, names special keys
/// ("enter", "escape", ...), and drops everything that arrives while a
/// text-entry widget has focus or carries a non-Shift modifier. Shift
/// alone is allowed because shifted characters ('?', 'A') already arrive
/// as the shifted symbol.
pub fn normalize_key(key: &KeyEvent, focus: InputFocus) -> Option<String> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if focus == InputFocus::TextEntry {
        return None;
    }

    let non_shift = key.modifiers.difference(KeyModifiers::SHIFT);
    if !non_shift.is_empty() {
        return None;
    }

    let token = match key.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_lowercase().to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "escape".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => "backtab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Insert => "insert".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::F(n) => format!("f{}", n),
        _ => return None,
    };

    Some(token)
}
