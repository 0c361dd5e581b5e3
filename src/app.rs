use std::io::{self, IsTerminal};
use std::rc::Rc;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{error, info};

use crate::api::ApiClient;
use crate::config::Config;
use crate::events::{
    AppEvent, DialogKind, EventHandler, EventReceiver, EventResult, EventSender, Mutation,
};
use crate::shortcuts::{SharedRegistry, ShortcutBinding, ShortcutEntry, ShortcutRegistry};
use crate::theme::Theme;
use crate::ui::{
    help::HelpDialog, manage_lessons::ManageLessonsDialog, student_form::StudentFormDialog,
    delete_student::DeleteStudentDialog, view_student::ViewStudentDialog, Dialog, DialogOutcome,
    Ui,
};

pub struct App {
    api: ApiClient,
    registry: SharedRegistry,
    binding: ShortcutBinding,
    event_handler: EventHandler,
    ui: Ui,
    tx: EventSender,
    rx: EventReceiver,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config.api_url, config.request_timeout())?;
        let registry = ShortcutRegistry::shared();
        let (tx, rx) = mpsc::unbounded_channel();

        let mut binding = ShortcutBinding::new(&registry);
        binding.set_shortcuts(Self::global_shortcuts(&tx));

        let event_handler = EventHandler::new(Rc::clone(&registry));
        let ui = Ui::new(Theme::from_name(&config.theme));

        Ok(Self {
            api,
            registry,
            binding,
            event_handler,
            ui,
            tx,
            rx,
            should_quit: false,
        })
    }

    /// The application-level shortcut group. Callbacks only send
    /// commands back into the event loop; they never touch application
    /// state directly.
    fn global_shortcuts(tx: &EventSender) -> Vec<ShortcutEntry> {
        let open = |tx: &EventSender, kind: DialogKind| {
            let tx = tx.clone();
            move || {
                let _ = tx.send(AppEvent::OpenDialog(kind));
            }
        };
        let send = |tx: &EventSender, event: fn() -> AppEvent| {
            let tx = tx.clone();
            move || {
                let _ = tx.send(event());
            }
        };

        vec![
            ShortcutEntry::new("a", "Add a student", open(tx, DialogKind::AddStudent)),
            ShortcutEntry::new("u", "Update a student", open(tx, DialogKind::UpdateStudent)),
            ShortcutEntry::new("s", "View a student", open(tx, DialogKind::ViewStudent)),
            ShortcutEntry::new("d", "Delete a student", open(tx, DialogKind::DeleteStudent)),
            ShortcutEntry::new("l", "Manage lessons", open(tx, DialogKind::ManageLessons)),
            ShortcutEntry::new("?", "Show keyboard shortcuts", open(tx, DialogKind::Help)),
            ShortcutEntry::new("r", "Refresh data", send(tx, || AppEvent::Refresh)),
            ShortcutEntry::new("q", "Quit", send(tx, || AppEvent::Quit)),
        ]
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub async fn run(&mut self) -> Result<()> {
        if !io::stdout().is_terminal() {
            return Err(anyhow!(
                "cohort requires a terminal (TTY) to run. Use the subcommands for scripting."
            ));
        }

        enable_raw_mode().map_err(|e| anyhow!("failed to enable raw mode: {}", e))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| anyhow!("failed to set up terminal: {}", e))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        info!("starting against {}", self.api.base_url());
        self.refresh();

        let tick_rate = Duration::from_millis(50);

        loop {
            while let Ok(event) = self.rx.try_recv() {
                self.handle_app_event(event);
            }

            self.ui.toasts.remove_expired();

            terminal.draw(|frame| self.ui.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    match self.event_handler.handle_key_event(key, &mut self.ui) {
                        EventResult::Continue => {}
                        EventResult::DialogOutcome(outcome) => self.handle_dialog_outcome(outcome),
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Reload students and lessons in the background; completions come
    /// back through the event channel.
    fn refresh(&mut self) {
        self.ui.status_bar.set_loading(true);
        self.ui.student_list.set_loading(true);

        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppEvent::StudentsLoaded(api.list_students().await));
        });

        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppEvent::LessonsLoaded(api.list_lessons().await));
        });
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::OpenDialog(kind) => self.open_dialog(kind),
            AppEvent::Refresh => self.refresh(),
            AppEvent::Quit => self.should_quit = true,
            AppEvent::StudentsLoaded(Ok(students)) => {
                self.ui.status_bar.set_error(None);
                self.ui.set_students(students);
            }
            AppEvent::StudentsLoaded(Err(e)) => {
                error!("failed to load students: {}", e);
                self.ui.student_list.set_loading(false);
                self.ui.status_bar.set_loading(false);
                self.ui.status_bar.set_error(Some(e.to_string()));
            }
            AppEvent::LessonsLoaded(Ok(lessons)) => self.ui.set_lessons(lessons),
            AppEvent::LessonsLoaded(Err(e)) => {
                error!("failed to load lessons: {}", e);
                self.ui.toasts.error("Failed to load lessons");
            }
            AppEvent::MutationCompleted(mutation, Ok(())) => {
                self.ui.toasts.success(mutation.success_message());
                self.refresh();
            }
            AppEvent::MutationCompleted(mutation, Err(e)) => {
                error!("{}: {}", mutation.failure_message(), e);
                self.ui.toasts.error(mutation.failure_message());
            }
        }
    }

    /// Open a dialog and suspend every shortcut group while it is up.
    fn open_dialog(&mut self, kind: DialogKind) {
        if self.ui.has_dialog() {
            return;
        }

        let dialog = match kind {
            DialogKind::AddStudent => Some(Dialog::StudentForm(StudentFormDialog::add(
                self.ui.lessons().to_vec(),
                chrono::Local::now().date_naive(),
            ))),
            DialogKind::UpdateStudent => self.ui.student_list.selected().cloned().map(|student| {
                Dialog::StudentForm(StudentFormDialog::update(
                    &student,
                    self.ui.lessons().to_vec(),
                ))
            }),
            DialogKind::ViewStudent => self
                .ui
                .student_list
                .selected()
                .cloned()
                .map(|student| Dialog::ViewStudent(ViewStudentDialog::new(student))),
            DialogKind::DeleteStudent => self
                .ui
                .student_list
                .selected()
                .cloned()
                .map(|student| Dialog::DeleteStudent(DeleteStudentDialog::new(student))),
            DialogKind::ManageLessons => Some(Dialog::ManageLessons(ManageLessonsDialog::new(
                self.ui.lessons().to_vec(),
            ))),
            DialogKind::Help => Some(Dialog::Help(HelpDialog::new(
                self.registry.borrow().entries_for_help(),
            ))),
        };

        match dialog {
            Some(dialog) => {
                self.ui.open_dialog(dialog);
                self.binding.disable_all_shortcuts();
            }
            None => self.ui.toasts.warning("No student selected"),
        }
    }

    fn close_dialog(&mut self) {
        self.ui.close_dialog();
        self.binding.enable_all_shortcuts();
    }

    fn handle_dialog_outcome(&mut self, outcome: DialogOutcome) {
        match outcome {
            DialogOutcome::Close => self.close_dialog(),
            DialogOutcome::CreateStudent(student) => {
                self.close_dialog();
                let api = self.api.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = api.create_student(&student).await;
                    let _ = tx.send(AppEvent::MutationCompleted(Mutation::StudentCreated, result));
                });
            }
            DialogOutcome::UpdateStudent(student) => {
                self.close_dialog();
                let api = self.api.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = api.update_student(&student).await;
                    let _ = tx.send(AppEvent::MutationCompleted(Mutation::StudentUpdated, result));
                });
            }
            DialogOutcome::DeleteStudent(id) => {
                self.close_dialog();
                let api = self.api.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = api.delete_student(&id).await;
                    let _ = tx.send(AppEvent::MutationCompleted(Mutation::StudentDeleted, result));
                });
            }
            // Lesson management stays open so several changes can be
            // made in a row; the refresh after the mutation updates the
            // dialog's listing.
            DialogOutcome::CreateLesson(name) => {
                let api = self.api.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = api.create_lesson(&name).await;
                    let _ = tx.send(AppEvent::MutationCompleted(Mutation::LessonCreated, result));
                });
            }
            DialogOutcome::DeleteLesson(id) => {
                let api = self.api.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = api.delete_lesson(&id).await;
                    let _ = tx.send(AppEvent::MutationCompleted(Mutation::LessonDeleted, result));
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registers_the_global_shortcut_group() {
        let app = App::new(Config::default()).unwrap();
        let registry = app.registry().borrow();

        assert_eq!(registry.group_count(), 1);
        let keys: Vec<String> = registry
            .active_entries()
            .map(|entry| entry.key().to_string())
            .collect();
        assert_eq!(keys, vec!["a", "u", "s", "d", "l", "?", "r", "q"]);
    }

    #[test]
    fn test_quit_shortcut_sends_the_quit_event() {
        let mut app = App::new(Config::default()).unwrap();
        assert!(app.registry().borrow_mut().dispatch("q"));

        match app.rx.try_recv() {
            Ok(AppEvent::Quit) => {}
            other => panic!("expected Quit, got {:?}", other),
        }
    }
}
