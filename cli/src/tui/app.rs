//! Dashboard state machine.
//!
//! All state transitions are pure so they can be tested without a terminal;
//! the event loop in `mod.rs` owns the I/O and acts on the returned
//! [`Action`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use portscope_core::{ListenerRecord, ProcessKiller, Scanner};

/// Input mode of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Incremental search; every keystroke re-filters the table.
    Search,
    /// Waiting for y/n on a pending kill.
    ConfirmKill { force: bool },
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Refresh,
    Kill { pid: u32, force: bool },
}

pub struct App {
    records: Vec<ListenerRecord>,
    pub filtered: Vec<ListenerRecord>,
    pub selected: usize,
    pub mode: Mode,
    pub search: String,
    pub status: Option<String>,
    pub error: Option<String>,
    pub show_help: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            filtered: Vec::new(),
            selected: 0,
            mode: Mode::Normal,
            search: String::new(),
            status: None,
            error: None,
            show_help: false,
        }
    }

    /// Run one discovery cycle and replace the record set.
    ///
    /// A failed cycle keeps the previous records on screen; the error is
    /// shown as a banner until a later refresh succeeds.
    pub async fn refresh<S: Scanner>(&mut self, scanner: &S) {
        match scanner.scan().await {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        self.apply_filter();
    }

    /// Deliver the confirmed signal and record the outcome in the status line.
    pub fn kill(&mut self, killer: &ProcessKiller, pid: u32, force: bool) {
        let (signal, result) = if force {
            ("SIGKILL", killer.force_terminate(pid))
        } else {
            ("SIGTERM", killer.terminate(pid))
        };

        self.status = Some(match result {
            Ok(()) => format!("Sent {signal} to PID {pid}"),
            Err(e) => e.to_string(),
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }

        match self.mode {
            Mode::Search => self.handle_search_key(key),
            Mode::ConfirmKill { force } => self.handle_confirm_key(key, force),
            Mode::Normal => self.handle_normal_key(key),
        }
    }

    pub fn selected_record(&self) -> Option<&ListenerRecord> {
        self.filtered.get(self.selected)
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => self.mode = Mode::Normal,
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.search.clear();
                self.apply_filter();
            }
            KeyCode::Backspace => {
                self.search.pop();
                self.apply_filter();
            }
            KeyCode::Char(c) => {
                self.search.push(c);
                self.apply_filter();
            }
            _ => {}
        }
        Action::None
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, force: bool) -> Action {
        self.mode = Mode::Normal;
        self.status = None;

        if let KeyCode::Char('y') | KeyCode::Char('Y') = key.code {
            if let Some(record) = self.selected_record() {
                return Action::Kill {
                    pid: record.pid,
                    force,
                };
            }
        }
        Action::None
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Action::Quit;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.filtered.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('x') => self.request_kill(false),
            KeyCode::Char('X') => self.request_kill(true),
            KeyCode::Char('r') => {
                self.status = None;
                return Action::Refresh;
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                self.search.clear();
                self.apply_filter();
            }
            KeyCode::Esc => {
                self.search.clear();
                self.apply_filter();
            }
            KeyCode::Char('?') => self.show_help = !self.show_help,
            _ => {}
        }
        Action::None
    }

    fn request_kill(&mut self, force: bool) {
        if let Some(record) = self.selected_record() {
            let verb = if force { "Force kill" } else { "Kill" };
            self.status = Some(format!(
                "{verb} {} (PID {}) on port {}? (y/n)",
                record.command, record.pid, record.port
            ));
            self.mode = Mode::ConfirmKill { force };
        }
    }

    fn apply_filter(&mut self) {
        self.filtered = self
            .records
            .iter()
            .filter(|r| r.matches_search(&self.search))
            .cloned()
            .collect();

        // Keep the selection inside the filtered range.
        if self.selected >= self.filtered.len() {
            self.selected = self.filtered.len().saturating_sub(1);
        }
    }
}
