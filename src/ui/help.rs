use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::keymap::render_keymap;
use super::layout::centered_rect;
use super::DialogOutcome;
use crate::theme::Theme;

/// Keyboard shortcuts help popup.
///
/// Shows every registered shortcut with its description, taken as a
/// snapshot of the registry when the dialog opens.
pub struct HelpDialog {
    entries: Vec<(String, String)>,
}

impl HelpDialog {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => {
                Some(DialogOutcome::Close)
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(area, 50, 70);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(Span::styled(" Keyboard Shortcuts ", theme.title_style()))
            .borders(Borders::ALL)
            .border_style(theme.border_style(true));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // intro
                Constraint::Min(1),    // keymap
                Constraint::Length(1), // footer
            ])
            .split(inner);

        let intro = Paragraph::new(Line::styled(
            "Press any of the following keys to perform the associated action:",
            theme.text_style(),
        ));
        frame.render_widget(intro, sections[0]);

        render_keymap(frame, sections[1], theme, &self.entries);

        let footer = Paragraph::new(Line::styled("Press Esc to close", theme.label_style()));
        frame.render_widget(footer, sections[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_help_closes_on_its_own_shortcut_key() {
        let mut dialog = HelpDialog::new(vec![("?".into(), "Show help".into())]);
        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert!(matches!(
            dialog.handle_key(&question),
            Some(DialogOutcome::Close)
        ));
    }
}
