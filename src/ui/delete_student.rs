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

/// Confirmation prompt before deleting a student.
pub struct DeleteStudentDialog {
    student: Student,
}

impl DeleteStudentDialog {
    pub fn new(student: Student) -> Self {
        Self { student }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self
                .student
                .student_id
                .clone()
                .map(DialogOutcome::DeleteStudent)
                .or(Some(DialogOutcome::Close)),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(DialogOutcome::Close),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(area, 50, 30);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(Span::styled(" Delete Student ", theme.title_style()))
            .borders(Borders::ALL)
            .border_style(theme.error_style());

        let lines = vec![
            Line::styled(
                format!("Delete {}?", self.student.full_name()),
                theme.text_style(),
            ),
            Line::raw(""),
            Line::styled("This cannot be undone.", theme.error_style()),
            Line::raw(""),
            Line::styled("y/Enter confirm · n/Esc cancel", theme.label_style()),
        ];

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;

    fn dialog() -> DeleteStudentDialog {
        DeleteStudentDialog::new(Student {
            student_id: Some("s1".into()),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            age: 12,
            grade: "6th".into(),
            registration_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            lessons: Vec::new(),
        })
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_confirm_yields_the_student_id() {
        let mut d = dialog();
        match d.handle_key(&press(KeyCode::Char('y'))) {
            Some(DialogOutcome::DeleteStudent(id)) => assert_eq!(id, "s1"),
            other => panic!("expected DeleteStudent, got {:?}", other.is_some()),
        }
    }

    #[test]
    fn test_cancel_closes_without_deleting() {
        let mut d = dialog();
        assert!(matches!(
            d.handle_key(&press(KeyCode::Char('n'))),
            Some(DialogOutcome::Close)
        ));
        assert!(matches!(
            d.handle_key(&press(KeyCode::Esc)),
            Some(DialogOutcome::Close)
        ));
    }
}
