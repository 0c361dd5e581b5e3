pub mod delete_student;
pub mod help;
pub mod keymap;
pub mod layout;
pub mod manage_lessons;
pub mod status_bar;
pub mod student_form;
pub mod student_list;
pub mod text_field;
pub mod toast;
pub mod view_student;

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::models::{Lesson, Student};
use crate::shortcuts::InputFocus;
use crate::theme::Theme;

use self::{
    delete_student::DeleteStudentDialog, help::HelpDialog, layout::AppLayout,
    manage_lessons::ManageLessonsDialog, status_bar::StatusBar, student_form::StudentFormDialog,
    student_list::StudentList, toast::ToastStack, view_student::ViewStudentDialog,
};

// Re-export the pieces the event layer works with.
pub use student_form::FormMode;
pub use toast::{Toast, ToastLevel};

/// What a dialog asked the application to do in response to a key.
#[derive(Debug)]
pub enum DialogOutcome {
    Close,
    CreateStudent(Student),
    UpdateStudent(Student),
    DeleteStudent(String),
    CreateLesson(String),
    DeleteLesson(String),
}

/// The currently open modal dialog, if any.
pub enum Dialog {
    StudentForm(StudentFormDialog),
    ViewStudent(ViewStudentDialog),
    DeleteStudent(DeleteStudentDialog),
    ManageLessons(ManageLessonsDialog),
    Help(HelpDialog),
}

impl Dialog {
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<DialogOutcome> {
        match self {
            Dialog::StudentForm(dialog) => dialog.handle_key(key),
            Dialog::ViewStudent(dialog) => dialog.handle_key(key),
            Dialog::DeleteStudent(dialog) => dialog.handle_key(key),
            Dialog::ManageLessons(dialog) => dialog.handle_key(key),
            Dialog::Help(dialog) => dialog.handle_key(key),
        }
    }

    /// Focus as reported to the key normalizer: dialogs with editable
    /// widgets suppress shortcut dispatch entirely.
    pub fn input_focus(&self) -> InputFocus {
        match self {
            Dialog::StudentForm(dialog) => dialog.input_focus(),
            Dialog::ManageLessons(dialog) => dialog.input_focus(),
            Dialog::ViewStudent(_) | Dialog::DeleteStudent(_) | Dialog::Help(_) => {
                InputFocus::Normal
            }
        }
    }
}

/// Aggregate UI state: the main table, the status bar, toasts, and the
/// active dialog.
pub struct Ui {
    pub student_list: StudentList,
    pub status_bar: StatusBar,
    pub toasts: ToastStack,
    dialog: Option<Dialog>,
    lessons: Vec<Lesson>,
    theme: Theme,
}

impl Ui {
    pub fn new(theme: Theme) -> Self {
        Self {
            student_list: StudentList::new(),
            status_bar: StatusBar::new(),
            toasts: ToastStack::new(),
            dialog: None,
            lessons: Vec::new(),
            theme,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Cache the lesson catalogue and push it into an open
    /// Manage Lessons dialog.
    pub fn set_lessons(&mut self, lessons: Vec<Lesson>) {
        self.lessons = lessons;
        if let Some(Dialog::ManageLessons(dialog)) = &mut self.dialog {
            dialog.set_lessons(self.lessons.clone());
        }
    }

    pub fn set_students(&mut self, students: Vec<Student>) {
        self.status_bar.set_student_count(students.len());
        self.status_bar.set_loading(false);
        self.student_list.set_students(students);
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut Dialog> {
        self.dialog.as_mut()
    }

    pub fn open_dialog(&mut self, dialog: Dialog) {
        self.dialog = Some(dialog);
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn has_dialog(&self) -> bool {
        self.dialog.is_some()
    }

    /// Focus reported to the key normalizer on every key event.
    pub fn input_focus(&self) -> InputFocus {
        self.dialog
            .as_ref()
            .map_or(InputFocus::Normal, |dialog| dialog.input_focus())
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = AppLayout::calculate(frame.size());

        self.student_list.render(frame, chunks[0], &self.theme);
        self.status_bar.render(frame, chunks[1], &self.theme);

        if let Some(dialog) = &mut self.dialog {
            let area = frame.size();
            match dialog {
                Dialog::StudentForm(d) => d.render(frame, area, &self.theme),
                Dialog::ViewStudent(d) => d.render(frame, area, &self.theme),
                Dialog::DeleteStudent(d) => d.render(frame, area, &self.theme),
                Dialog::ManageLessons(d) => d.render(frame, area, &self.theme),
                Dialog::Help(d) => d.render(frame, area, &self.theme),
            }
        }

        self.toasts.render(frame, frame.size(), &self.theme);
    }
}
