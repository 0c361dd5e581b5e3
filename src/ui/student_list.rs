use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::Student;
use crate::theme::Theme;

/// Scrollable table of students, the main view of the application.
pub struct StudentList {
    students: Vec<Student>,
    state: TableState,
    loading: bool,
}

impl StudentList {
    pub fn new() -> Self {
        Self {
            students: Vec::new(),
            state: TableState::default(),
            loading: true,
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Replace the backing data, clamping the selection so it stays on a
    /// valid row after deletes.
    pub fn set_students(&mut self, students: Vec<Student>) {
        self.students = students;
        self.loading = false;

        if self.students.is_empty() {
            self.state.select(None);
        } else {
            let selected = self.state.selected().unwrap_or(0);
            self.state.select(Some(selected.min(self.students.len() - 1)));
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn selected(&self) -> Option<&Student> {
        self.state.selected().and_then(|index| self.students.get(index))
    }

    pub fn select_next(&mut self) {
        if self.students.is_empty() {
            return;
        }
        let next = match self.state.selected() {
            Some(index) if index + 1 < self.students.len() => index + 1,
            Some(index) => index,
            None => 0,
        };
        self.state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.students.is_empty() {
            return;
        }
        let previous = self.state.selected().map_or(0, |index| index.saturating_sub(1));
        self.state.select(Some(previous));
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(Span::styled(" Students ", theme.title_style()))
            .borders(Borders::ALL)
            .border_style(theme.border_style(true));

        if self.students.is_empty() {
            let message = if self.loading {
                "Loading students..."
            } else {
                "No students yet. Press 'a' to add one."
            };
            let placeholder = Paragraph::new(Line::styled(message, theme.label_style()))
                .block(block)
                .alignment(ratatui::layout::Alignment::Center);
            frame.render_widget(placeholder, area);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Name"),
            Cell::from("Age"),
            Cell::from("Grade"),
            Cell::from("Registered"),
            Cell::from("Lessons"),
        ])
        .style(theme.label_style())
        .height(1);

        let rows: Vec<Row> = self
            .students
            .iter()
            .map(|student| {
                Row::new(vec![
                    Cell::from(student.full_name()),
                    Cell::from(student.age.to_string()),
                    Cell::from(student.grade.clone()),
                    Cell::from(student.registration_date.to_string()),
                    Cell::from(student.lessons.len().to_string()),
                ])
                .style(theme.text_style())
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(35),
                Constraint::Length(5),
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(9),
            ],
        )
        .header(header)
        .block(block)
        .highlight_style(theme.selection_style())
        .highlight_symbol("> ");

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

impl Default for StudentList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn student(id: &str) -> Student {
        Student {
            student_id: Some(id.to_string()),
            first_name: id.to_string(),
            last_name: "Test".to_string(),
            age: 10,
            grade: "4th".to_string(),
            registration_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            lessons: Vec::new(),
        }
    }

    #[test]
    fn test_selection_moves_and_stops_at_the_edges() {
        let mut list = StudentList::new();
        list.set_students(vec![student("a"), student("b")]);

        assert_eq!(list.selected().unwrap().first_name, "a");
        list.select_next();
        assert_eq!(list.selected().unwrap().first_name, "b");
        list.select_next();
        assert_eq!(list.selected().unwrap().first_name, "b");
        list.select_previous();
        assert_eq!(list.selected().unwrap().first_name, "a");
        list.select_previous();
        assert_eq!(list.selected().unwrap().first_name, "a");
    }

    #[test]
    fn test_selection_is_clamped_after_refresh() {
        let mut list = StudentList::new();
        list.set_students(vec![student("a"), student("b"), student("c")]);
        list.select_next();
        list.select_next();

        list.set_students(vec![student("a")]);
        assert_eq!(list.selected().unwrap().first_name, "a");

        list.set_students(Vec::new());
        assert!(list.selected().is_none());
    }
}
