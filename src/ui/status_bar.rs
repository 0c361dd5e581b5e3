use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// Bottom status bar: connection/data state on the left, shortcut hints
/// on the right.
pub struct StatusBar {
    student_count: usize,
    loading: bool,
    error: Option<String>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            student_count: 0,
            loading: true,
            error: None,
        }
    }

    pub fn set_student_count(&mut self, count: usize) {
        self.student_count = count;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(false));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status = if let Some(error) = &self.error {
            Line::styled(format!("⚠ {}", error), theme.error_style())
        } else if self.loading {
            Line::styled("Loading...", theme.label_style())
        } else {
            Line::styled(
                format!("{} students", self.student_count),
                theme.text_style(),
            )
        };
        frame.render_widget(Paragraph::new(status), inner);

        let hints = Line::from(vec![
            hint(theme, "a", "add"),
            hint(theme, "u", "update"),
            hint(theme, "s", "view"),
            hint(theme, "d", "delete"),
            hint(theme, "l", "lessons"),
            hint(theme, "r", "refresh"),
            hint(theme, "?", "help"),
            hint(theme, "q", "quit"),
        ]);
        frame.render_widget(
            Paragraph::new(hints).alignment(Alignment::Right),
            inner,
        );
    }
}

fn hint<'a>(theme: &Theme, key: &'a str, action: &'a str) -> Span<'a> {
    Span::styled(format!(" {}:{} ", key, action), theme.label_style())
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
