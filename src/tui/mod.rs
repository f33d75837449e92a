//! Terminal UI for Strictly Millions.

mod app;
mod input;
mod ui;

use app::App;
use input::action_for_key;
use ui::draw;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info, instrument};

use crate::games::ladder::GameController;

/// Runs the terminal client until the player quits.
///
/// Tracing must already be writing somewhere other than stdout.
pub fn run_tui<R: Rng>(controller: GameController<R>) -> Result<()> {
    info!("Starting Strictly Millions TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("TUI closed");
    res
}

#[instrument(skip_all)]
fn run_app<R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<R>,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app.view(), app.status_message()))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        debug!(code = ?key.code, "Key pressed");

        if let Some(action) = action_for_key(key.code) {
            app.handle_action(action);
        }
        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }
    }
}
