use std::io;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use swimlane_api::BoardService;
use swimlane_core::{InputState, SelectionState, SwimlaneError, SwimlaneResult};
use swimlane_domain::{HistoryEntry, Status, Task, TaskId};

use crate::events::{Event, EventHandler};
use crate::ui;

const TICK_RATE: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    CreateTask,
    EditTask(TaskId),
    ConfirmDelete(TaskId),
    Filter,
    /// A drop is waiting for the "Additional Information" dialog.
    AdditionalInfo,
    History,
}

pub struct App {
    pub should_quit: bool,
    pub mode: AppMode,
    pub input: InputState,
    pub service: BoardService,
    pub focused_column: Status,
    pub selections: [SelectionState; 3],
    /// Last error worth showing; cleared by the next successful reload.
    pub status_message: Option<String>,
    pub history_title: String,
    pub history: Vec<HistoryEntry>,
    pub history_scroll: u16,
    /// Store revision the selections were last clamped against.
    seen_revision: u64,
}

impl App {
    pub fn new(service: BoardService) -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Normal,
            input: InputState::new(),
            service,
            focused_column: Status::Todo,
            selections: Default::default(),
            status_message: None,
            history_title: String::new(),
            history: Vec::new(),
            history_scroll: 0,
            seen_revision: 0,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn selection(&self, status: Status) -> &SelectionState {
        &self.selections[status.column_index()]
    }

    pub fn selection_mut(&mut self, status: Status) -> &mut SelectionState {
        &mut self.selections[status.column_index()]
    }

    pub fn column_tasks(&self, status: Status) -> Vec<&Task> {
        self.service.state().column(status)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let index = self.selection(self.focused_column).get()?;
        self.column_tasks(self.focused_column).get(index).copied()
    }

    /// Keep every column's selection inside its (filtered) task list.
    pub fn clamp_selections(&mut self) {
        for status in Status::ALL {
            let len = self.column_tasks(status).len();
            self.selection_mut(status).clamp(len);
        }
        self.seen_revision = self.service.store().revision();
    }

    /// Columns only change when a command was applied to the store.
    fn board_changed(&self) -> bool {
        self.service.store().revision() != self.seen_revision
    }

    /// Focus the column holding `task_id` and select it there.
    pub fn select_task(&mut self, task_id: &str) {
        let Some(status) = self.service.state().task(task_id).map(|t| t.status) else {
            return;
        };
        let index = self
            .column_tasks(status)
            .iter()
            .position(|t| t.id == task_id);
        if let Some(index) = index {
            self.focused_column = status;
            self.selection_mut(status).set(Some(index));
        }
    }

    /// Surface an error to the user. Validation and lookup failures change
    /// nothing and are only logged.
    pub fn report(&mut self, err: SwimlaneError) {
        if err.is_user_noop() {
            tracing::debug!("Ignored: {}", err);
        } else {
            tracing::warn!("{}", err);
            self.status_message = Some(err.to_string());
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match self.mode.clone() {
            AppMode::Normal => self.handle_normal_key(key.code).await,
            AppMode::CreateTask => self.handle_create_task_dialog(key.code).await,
            AppMode::EditTask(task_id) => self.handle_edit_task_dialog(&task_id, key.code).await,
            AppMode::ConfirmDelete(task_id) => {
                self.handle_confirm_delete(&task_id, key.code).await
            }
            AppMode::Filter => self.handle_filter_input(key.code),
            AppMode::AdditionalInfo => self.handle_additional_info_dialog(key.code).await,
            AppMode::History => self.handle_history_popup(key.code),
        }

        if self.board_changed() {
            self.clamp_selections();
        }
    }

    async fn handle_normal_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => self.handle_escape(),
            KeyCode::Left | KeyCode::Char('h') => self.focus_prev_column(),
            KeyCode::Right | KeyCode::Char('l') => self.focus_next_column(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next_task(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev_task(),
            KeyCode::Char('n') => self.begin_create_task(),
            KeyCode::Char('e') => self.begin_edit_task(),
            KeyCode::Char('d') => self.begin_delete_task(),
            KeyCode::Char('/') => self.begin_filter(),
            KeyCode::Char(' ') => self.pick_up_or_drop().await,
            KeyCode::Enter => self.open_history().await,
            KeyCode::Char('r') => self.reload().await,
            _ => {}
        }
    }

    pub async fn run(&mut self) -> SwimlaneResult<()> {
        let mut terminal = setup_terminal()?;
        self.reload().await;

        let mut events = EventHandler::new(TICK_RATE);
        let result = self.event_loop(&mut terminal, &mut events).await;
        events.stop();

        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &mut EventHandler,
    ) -> SwimlaneResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;

            match events.next().await {
                Some(Event::Key(key)) => self.handle_key(key).await,
                Some(Event::Tick) => {}
                None => break,
            }
        }
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
