use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::layout::centered_rect;
use super::text_field::TextField;
use super::DialogOutcome;
use crate::models::{Lesson, Student};
use crate::shortcuts::InputFocus;
use crate::theme::Theme;

/// Which part of the form has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormFocus {
    FirstName,
    LastName,
    Age,
    Grade,
    RegistrationDate,
    Lessons,
}

impl FormFocus {
    fn next(self) -> Self {
        match self {
            Self::FirstName => Self::LastName,
            Self::LastName => Self::Age,
            Self::Age => Self::Grade,
            Self::Grade => Self::RegistrationDate,
            Self::RegistrationDate => Self::Lessons,
            Self::Lessons => Self::FirstName,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::FirstName => Self::Lessons,
            Self::LastName => Self::FirstName,
            Self::Age => Self::LastName,
            Self::Grade => Self::Age,
            Self::RegistrationDate => Self::Grade,
            Self::Lessons => Self::RegistrationDate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Update,
}

/// Modal form for creating or editing a student.
///
/// Tab cycles the fields, Space toggles lessons in the picker, Enter
/// submits, Esc cancels. Validation failures stay in the dialog as an
/// error line instead of reaching the server.
pub struct StudentFormDialog {
    mode: FormMode,
    /// Server id of the student being edited; None in add mode.
    student_id: Option<String>,
    first_name: TextField,
    last_name: TextField,
    age: TextField,
    grade: TextField,
    registration_date: TextField,
    lessons: Vec<(Lesson, bool)>,
    lesson_state: ListState,
    focus: FormFocus,
    error: Option<String>,
}

impl StudentFormDialog {
    /// Empty form for a new student, registered today by default.
    pub fn add(lessons: Vec<Lesson>, today: NaiveDate) -> Self {
        Self {
            mode: FormMode::Add,
            student_id: None,
            first_name: TextField::new("First name"),
            last_name: TextField::new("Last name"),
            age: TextField::new("Age"),
            grade: TextField::new("Grade"),
            registration_date: TextField::with_value("Registration date", today.to_string()),
            lessons: lessons.into_iter().map(|lesson| (lesson, false)).collect(),
            lesson_state: ListState::default(),
            focus: FormFocus::FirstName,
            error: None,
        }
    }

    /// Form pre-filled from an existing student.
    pub fn update(student: &Student, lessons: Vec<Lesson>) -> Self {
        let assigned = student.lesson_ids();
        let lessons = lessons
            .into_iter()
            .map(|lesson| {
                let selected = assigned.contains(&lesson.lesson_id);
                (lesson, selected)
            })
            .collect();

        Self {
            mode: FormMode::Update,
            student_id: student.student_id.clone(),
            first_name: TextField::with_value("First name", &student.first_name),
            last_name: TextField::with_value("Last name", &student.last_name),
            age: TextField::with_value("Age", student.age.to_string()),
            grade: TextField::with_value("Grade", &student.grade),
            registration_date: TextField::with_value(
                "Registration date",
                student.registration_date.to_string(),
            ),
            lessons,
            lesson_state: ListState::default(),
            focus: FormFocus::FirstName,
            error: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => " Add Student ",
            FormMode::Update => " Update Student ",
        }
    }

    /// Every field except the lesson picker is free-text entry; the
    /// picker counts too since it is a selection control.
    pub fn input_focus(&self) -> InputFocus {
        InputFocus::TextEntry
    }

    fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            FormFocus::FirstName => Some(&mut self.first_name),
            FormFocus::LastName => Some(&mut self.last_name),
            FormFocus::Age => Some(&mut self.age),
            FormFocus::Grade => Some(&mut self.grade),
            FormFocus::RegistrationDate => Some(&mut self.registration_date),
            FormFocus::Lessons => None,
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome> {
        match key.code {
            KeyCode::Esc => return Some(DialogOutcome::Close),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return None;
            }
            KeyCode::Enter => return self.submit(),
            _ => {}
        }

        if self.focus == FormFocus::Lessons {
            self.handle_lesson_key(key);
            return None;
        }

        if let Some(field) = self.focused_field() {
            field.handle_key(key);
        }
        None
    }

    fn handle_lesson_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let selected = self.lesson_state.selected().map_or(0, |i| i.saturating_sub(1));
                if !self.lessons.is_empty() {
                    self.lesson_state.select(Some(selected));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.lessons.is_empty() {
                    let selected = match self.lesson_state.selected() {
                        Some(i) if i + 1 < self.lessons.len() => i + 1,
                        Some(i) => i,
                        None => 0,
                    };
                    self.lesson_state.select(Some(selected));
                }
            }
            KeyCode::Char(' ') => {
                if let Some(index) = self.lesson_state.selected() {
                    if let Some((_, selected)) = self.lessons.get_mut(index) {
                        *selected = !*selected;
                    }
                }
            }
            _ => {}
        }
    }

    fn submit(&mut self) -> Option<DialogOutcome> {
        match self.build_student() {
            Ok(student) => match self.mode {
                FormMode::Add => Some(DialogOutcome::CreateStudent(student)),
                FormMode::Update => Some(DialogOutcome::UpdateStudent(student)),
            },
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }

    fn build_student(&self) -> Result<Student, String> {
        let first_name = self.first_name.value().trim();
        let last_name = self.last_name.value().trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err("First and last name are required".to_string());
        }

        let age: u8 = self
            .age
            .value()
            .trim()
            .parse()
            .map_err(|_| "Age must be a number".to_string())?;

        let grade = self.grade.value().trim();
        if grade.is_empty() {
            return Err("Grade is required".to_string());
        }

        let registration_date: NaiveDate = self
            .registration_date
            .value()
            .trim()
            .parse()
            .map_err(|_| "Registration date must be YYYY-MM-DD".to_string())?;

        let lessons = self
            .lessons
            .iter()
            .filter(|(_, selected)| *selected)
            .map(|(lesson, _)| lesson.clone())
            .collect();

        Ok(Student {
            student_id: self.student_id.clone(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age,
            grade: grade.to_string(),
            registration_date,
            lessons,
        })
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(area, 60, 80);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(Span::styled(self.title(), theme.title_style()))
            .borders(Borders::ALL)
            .border_style(theme.border_style(true));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // first name
                Constraint::Length(3), // last name
                Constraint::Length(3), // age
                Constraint::Length(3), // grade
                Constraint::Length(3), // registration date
                Constraint::Min(3),    // lesson picker
                Constraint::Length(1), // error
                Constraint::Length(1), // footer
            ])
            .split(inner);

        self.first_name
            .render(frame, rows[0], theme, self.focus == FormFocus::FirstName);
        self.last_name
            .render(frame, rows[1], theme, self.focus == FormFocus::LastName);
        self.age
            .render(frame, rows[2], theme, self.focus == FormFocus::Age);
        self.grade
            .render(frame, rows[3], theme, self.focus == FormFocus::Grade);
        self.registration_date
            .render(frame, rows[4], theme, self.focus == FormFocus::RegistrationDate);

        self.render_lessons(frame, rows[5], theme);

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Line::styled(error.clone(), theme.error_style())),
                rows[6],
            );
        }

        let footer = Line::styled(
            "Tab next field · Space toggle lesson · Enter save · Esc cancel",
            theme.label_style(),
        );
        frame.render_widget(Paragraph::new(footer), rows[7]);
    }

    fn render_lessons(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(Span::styled(" Lessons ", theme.label_style()))
            .borders(Borders::ALL)
            .border_style(theme.border_style(self.focus == FormFocus::Lessons));

        let items: Vec<ListItem> = self
            .lessons
            .iter()
            .map(|(lesson, selected)| {
                let marker = if *selected { "[x]" } else { "[ ]" };
                ListItem::new(Line::styled(
                    format!("{} {}", marker, lesson.lesson_name),
                    theme.text_style(),
                ))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme.selection_style());
        frame.render_stateful_widget(list, area, &mut self.lesson_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut StudentFormDialog, text: &str) {
        for c in text.chars() {
            form.handle_key(&press(KeyCode::Char(c)));
        }
    }

    fn lessons() -> Vec<Lesson> {
        vec![
            Lesson {
                lesson_id: "l1".into(),
                lesson_name: "Math".into(),
            },
            Lesson {
                lesson_id: "l2".into(),
                lesson_name: "History".into(),
            },
        ]
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_submit_builds_a_student_with_selected_lessons() {
        let mut form = StudentFormDialog::add(lessons(), today());
        type_text(&mut form, "Ada");
        form.handle_key(&press(KeyCode::Tab));
        type_text(&mut form, "Lovelace");
        form.handle_key(&press(KeyCode::Tab));
        type_text(&mut form, "12");
        form.handle_key(&press(KeyCode::Tab));
        type_text(&mut form, "6th");
        form.handle_key(&press(KeyCode::Tab)); // registration date keeps default
        form.handle_key(&press(KeyCode::Tab)); // into lesson picker
        form.handle_key(&press(KeyCode::Down));
        form.handle_key(&press(KeyCode::Char(' ')));

        let outcome = form.handle_key(&press(KeyCode::Enter));
        match outcome {
            Some(DialogOutcome::CreateStudent(student)) => {
                assert_eq!(student.full_name(), "Ada Lovelace");
                assert_eq!(student.age, 12);
                assert_eq!(student.registration_date, today());
                assert_eq!(student.lesson_ids(), vec!["l1"]);
            }
            other => panic!("expected CreateStudent, got {:?}", other.is_some()),
        }
    }

    #[test]
    fn test_invalid_age_stays_in_the_dialog() {
        let mut form = StudentFormDialog::add(Vec::new(), today());
        type_text(&mut form, "Ada");
        form.handle_key(&press(KeyCode::Tab));
        type_text(&mut form, "Lovelace");
        form.handle_key(&press(KeyCode::Tab));
        type_text(&mut form, "twelve");
        form.handle_key(&press(KeyCode::Tab));
        type_text(&mut form, "6th");

        assert!(form.handle_key(&press(KeyCode::Enter)).is_none());
        assert_eq!(form.error.as_deref(), Some("Age must be a number"));
    }

    #[test]
    fn test_update_prefills_and_keeps_the_id() {
        let student = Student {
            student_id: Some("s1".into()),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            age: 12,
            grade: "6th".into(),
            registration_date: today(),
            lessons: vec![Lesson {
                lesson_id: "l2".into(),
                lesson_name: "History".into(),
            }],
        };

        let mut form = StudentFormDialog::update(&student, lessons());
        let outcome = form.handle_key(&press(KeyCode::Enter));
        match outcome {
            Some(DialogOutcome::UpdateStudent(updated)) => {
                assert_eq!(updated.student_id.as_deref(), Some("s1"));
                assert_eq!(updated.lesson_ids(), vec!["l2"]);
            }
            other => panic!("expected UpdateStudent, got {:?}", other.is_some()),
        }
    }

    #[test]
    fn test_escape_closes_without_submitting() {
        let mut form = StudentFormDialog::add(Vec::new(), today());
        assert!(matches!(
            form.handle_key(&press(KeyCode::Esc)),
            Some(DialogOutcome::Close)
        ));
    }
}
