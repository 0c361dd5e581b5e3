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
use crate::models::Lesson;
use crate::shortcuts::InputFocus;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LessonsFocus {
    List,
    Input,
}

/// Modal for managing the lesson catalogue: list, add, delete.
///
/// The dialog stays open across mutations so several lessons can be
/// managed in one sitting; the application refreshes its lesson list
/// into the dialog when the server confirms a change.
pub struct ManageLessonsDialog {
    lessons: Vec<Lesson>,
    state: ListState,
    input: TextField,
    focus: LessonsFocus,
}

impl ManageLessonsDialog {
    pub fn new(lessons: Vec<Lesson>) -> Self {
        let mut state = ListState::default();
        if !lessons.is_empty() {
            state.select(Some(0));
        }
        Self {
            lessons,
            state,
            input: TextField::new("New lesson"),
            focus: LessonsFocus::List,
        }
    }

    /// Replace the listing after a refresh, keeping the selection valid.
    pub fn set_lessons(&mut self, lessons: Vec<Lesson>) {
        self.lessons = lessons;
        if self.lessons.is_empty() {
            self.state.select(None);
        } else {
            let selected = self.state.selected().unwrap_or(0);
            self.state.select(Some(selected.min(self.lessons.len() - 1)));
        }
    }

    /// Both halves of the dialog count as text entry for the
    /// dispatcher: the input field trivially, the list as a selection
    /// control.
    pub fn input_focus(&self) -> InputFocus {
        InputFocus::TextEntry
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome> {
        match key.code {
            KeyCode::Esc => return Some(DialogOutcome::Close),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    LessonsFocus::List => LessonsFocus::Input,
                    LessonsFocus::Input => LessonsFocus::List,
                };
                return None;
            }
            _ => {}
        }

        match self.focus {
            LessonsFocus::Input => match key.code {
                KeyCode::Enter => {
                    let name = self.input.value().trim().to_string();
                    if name.is_empty() {
                        None
                    } else {
                        self.input.clear();
                        Some(DialogOutcome::CreateLesson(name))
                    }
                }
                _ => {
                    self.input.handle_key(key);
                    None
                }
            },
            LessonsFocus::List => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    if !self.lessons.is_empty() {
                        let selected =
                            self.state.selected().map_or(0, |i| i.saturating_sub(1));
                        self.state.select(Some(selected));
                    }
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if !self.lessons.is_empty() {
                        let selected = match self.state.selected() {
                            Some(i) if i + 1 < self.lessons.len() => i + 1,
                            Some(i) => i,
                            None => 0,
                        };
                        self.state.select(Some(selected));
                    }
                    None
                }
                KeyCode::Char('d') | KeyCode::Delete => self
                    .state
                    .selected()
                    .and_then(|index| self.lessons.get(index))
                    .map(|lesson| DialogOutcome::DeleteLesson(lesson.lesson_id.clone())),
                _ => None,
            },
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(area, 50, 70);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(Span::styled(" Manage Lessons ", theme.title_style()))
            .borders(Borders::ALL)
            .border_style(theme.border_style(true));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // lesson list
                Constraint::Length(3), // input
                Constraint::Length(1), // footer
            ])
            .split(inner);

        let list_block = Block::default()
            .title(Span::styled(" Lessons ", theme.label_style()))
            .borders(Borders::ALL)
            .border_style(theme.border_style(self.focus == LessonsFocus::List));

        if self.lessons.is_empty() {
            let placeholder =
                Paragraph::new(Line::styled("No lessons yet", theme.label_style()))
                    .block(list_block);
            frame.render_widget(placeholder, rows[0]);
        } else {
            let items: Vec<ListItem> = self
                .lessons
                .iter()
                .map(|lesson| {
                    ListItem::new(Line::styled(lesson.lesson_name.clone(), theme.text_style()))
                })
                .collect();
            let list = List::new(items)
                .block(list_block)
                .highlight_style(theme.selection_style())
                .highlight_symbol("> ");
            frame.render_stateful_widget(list, rows[0], &mut self.state);
        }

        self.input
            .render(frame, rows[1], theme, self.focus == LessonsFocus::Input);

        let footer = Line::styled(
            "Tab switch · Enter add · d delete · Esc close",
            theme.label_style(),
        );
        frame.render_widget(Paragraph::new(footer), rows[2]);
    }
}
