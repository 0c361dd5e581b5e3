use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::layout::centered_rect;
use super::DialogOutcome;
use crate::models::Student;
use crate::theme::Theme;

/// Read-only detail view of the selected student.
pub struct ViewStudentDialog {
    student: Student,
}

impl ViewStudentDialog {
    pub fn new(student: Student) -> Self {
        Self { student }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(DialogOutcome::Close),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(area, 50, 60);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(Span::styled(" View Student ", theme.title_style()))
            .borders(Borders::ALL)
            .border_style(theme.border_style(true));

        let mut lines = vec![
            detail_line(theme, "Name", self.student.full_name()),
            detail_line(theme, "Age", self.student.age.to_string()),
            detail_line(theme, "Grade", self.student.grade.clone()),
            detail_line(
                theme,
                "Registered",
                self.student.registration_date.to_string(),
            ),
            Line::raw(""),
            Line::styled("Lessons", theme.title_style()),
        ];

        if self.student.lessons.is_empty() {
            lines.push(Line::styled("  (none)", theme.label_style()));
        } else {
            for lesson in &self.student.lessons {
                lines.push(Line::styled(
                    format!("  • {}", lesson.lesson_name),
                    theme.text_style(),
                ));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::styled("Press Esc to close", theme.label_style()));

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup);
    }
}

fn detail_line<'a>(theme: &Theme, label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:12}", label), theme.label_style()),
        Span::styled(value, theme.text_style()),
    ])
}
