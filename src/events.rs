use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::api::ApiError;
use crate::models::{Lesson, Student};
use crate::shortcuts::{Dispatcher, SharedRegistry};
use crate::ui::{DialogOutcome, Ui};

/// Dialogs the global shortcuts can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    AddStudent,
    UpdateStudent,
    ViewStudent,
    DeleteStudent,
    ManageLessons,
    Help,
}

/// Write operations against the API, named for their toast messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    StudentCreated,
    StudentUpdated,
    StudentDeleted,
    LessonCreated,
    LessonDeleted,
}

impl Mutation {
    pub fn success_message(&self) -> &'static str {
        match self {
            Mutation::StudentCreated => "Student added successfully",
            Mutation::StudentUpdated => "Student updated successfully",
            Mutation::StudentDeleted => "Student deleted successfully",
            Mutation::LessonCreated => "Lesson added successfully",
            Mutation::LessonDeleted => "Lesson deleted successfully",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Mutation::StudentCreated => "Failed to add student",
            Mutation::StudentUpdated => "Failed to update student",
            Mutation::StudentDeleted => "Failed to delete student",
            Mutation::LessonCreated => "Failed to add lesson",
            Mutation::LessonDeleted => "Failed to delete lesson",
        }
    }
}

/// Commands and completions flowing back into the main loop.
///
/// Shortcut callbacks and background API tasks both talk to the
/// application exclusively through these, which keeps the registry free
/// of borrowed application state.
#[derive(Debug)]
pub enum AppEvent {
    OpenDialog(DialogKind),
    Refresh,
    Quit,
    StudentsLoaded(Result<Vec<Student>, ApiError>),
    LessonsLoaded(Result<Vec<Lesson>, ApiError>),
    MutationCompleted(Mutation, Result<(), ApiError>),
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

/// Result of routing one key event.
#[derive(Debug)]
pub enum EventResult {
    Continue,
    DialogOutcome(DialogOutcome),
}

/// Routes key events: the shortcut dispatcher sees every key first,
/// unconsumed keys go to the open dialog, and what is left drives table
/// navigation.
pub struct EventHandler {
    dispatcher: Dispatcher,
}

impl EventHandler {
    pub fn new(registry: SharedRegistry) -> Self {
        Self {
            dispatcher: Dispatcher::new(registry),
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent, ui: &mut Ui) -> EventResult {
        if self.dispatcher.handle_key(&key, ui.input_focus()) {
            return EventResult::Continue;
        }

        if let Some(dialog) = ui.dialog_mut() {
            if let Some(outcome) = dialog.handle_key(&key) {
                return EventResult::DialogOutcome(outcome);
            }
            return EventResult::Continue;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => ui.student_list.select_next(),
            KeyCode::Up | KeyCode::Char('k') => ui.student_list.select_previous(),
            _ => {}
        }
        EventResult::Continue
    }
}
