//! Dashboard application loop and key handling.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use super::ui;
use crate::dashboard::{DashboardController, LoadState};

/// User intent derived from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start a new load (refresh or retry).
    Refresh,
    /// Cancel the in-flight load.
    Cancel,
    /// Leave the dashboard.
    Quit,
}

/// Map a key to an action given the current state.
///
/// Refresh is unavailable while loading and cancel is only offered while
/// loading, matching what the footer shows.
pub fn action_for(code: KeyCode, state: &LoadState) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::Enter if !state.is_loading => Some(Action::Refresh),
        KeyCode::Char('c') if state.is_loading => Some(Action::Cancel),
        _ => None,
    }
}

/// View-only state that the controller does not own.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Spinner frame index, advanced every tick.
    pub spinner_frame: usize,
}

/// Terminal dashboard bound to a controller.
pub struct DashboardApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    controller: DashboardController,
    view: ViewState,
    tick_rate: Duration,
}

impl DashboardApp {
    /// Take over the terminal.
    pub fn new(controller: DashboardController, tick_rate: Duration) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            controller,
            view: ViewState::default(),
            tick_rate,
        })
    }

    /// Run until the user quits. Cancels any in-flight load on the way out.
    pub async fn run(&mut self, load_on_start: bool) -> io::Result<()> {
        if load_on_start {
            self.controller.load_metrics();
        }

        loop {
            if let Some(outcome) = self.controller.poll_completion().await {
                debug!(%outcome, "Load attempt finished");
            }

            let state = self.controller.state();
            let view = &self.view;
            self.terminal.draw(|f| ui::draw(f, &state, view))?;

            // Drain pending input without blocking the runtime.
            let mut quit = false;
            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match action_for(key.code, &self.controller.state()) {
                        Some(Action::Refresh) => self.controller.load_metrics(),
                        Some(Action::Cancel) => self.controller.cancel_loading(),
                        Some(Action::Quit) => quit = true,
                        None => {}
                    }
                }
            }
            if quit {
                break;
            }

            self.view.spinner_frame = self.view.spinner_frame.wrapping_add(1);
            tokio::time::sleep(self.tick_rate).await;
        }

        self.controller.shutdown().await;
        Ok(())
    }

    /// Restore the terminal.
    pub fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for DashboardApp {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
