//! Interactive dashboard.

mod app;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use portscope_core::{LsofScanner, ProcessKiller};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::{Action, App};

/// Run the dashboard until the user quits.
pub async fn run() -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let scanner = LsofScanner::new();
    let killer = ProcessKiller::new();
    let mut app = App::new();

    app.refresh(&scanner).await;

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            match app.handle_key(key) {
                Action::None => {}
                Action::Quit => return Ok(()),
                Action::Refresh => app.refresh(&scanner).await,
                Action::Kill { pid, force } => {
                    app.kill(&killer, pid, force);
                    app.refresh(&scanner).await;
                }
            }
        }
    }
}
