use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::theme::Theme;

/// Render `(key, description)` rows as a keymap listing, the key shown
/// as an uppercase key cap followed by its description.
pub fn render_keymap(frame: &mut Frame, area: Rect, theme: &Theme, entries: &[(String, String)]) {
    let items: Vec<ListItem> = entries
        .iter()
        .map(|(key, description)| ListItem::new(keymap_line(theme, key, description)))
        .collect();

    frame.render_widget(List::new(items), area);
}

fn keymap_line<'a>(theme: &Theme, key: &'a str, description: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {} ", display_key(key)), theme.key_style()),
        Span::raw("  "),
        Span::styled(description, theme.text_style()),
    ])
}

/// Key caps show single characters uppercased ("a" -> "A") and named
/// keys as-is ("enter", "?").
fn display_key(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_uppercase()
    } else {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chars_are_uppercased() {
        assert_eq!(display_key("a"), "A");
        assert_eq!(display_key("?"), "?");
    }

    #[test]
    fn test_named_keys_keep_their_name() {
        assert_eq!(display_key("enter"), "enter");
        assert_eq!(display_key("escape"), "escape");
    }
}
