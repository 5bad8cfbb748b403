use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::{DeckError, Result};

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Restores the terminal when dropped. Lives as long as the UI does.
pub struct TerminalGuard {
    _private: (),
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    }
}

/// Raw mode, alternate screen and mouse capture.
pub fn enter() -> Result<(CrosstermTerminal, TerminalGuard)> {
    enable_raw_mode().map_err(|e| DeckError::Terminal(e.to_string()))?;
    let guard = TerminalGuard { _private: () };

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| DeckError::Terminal(e.to_string()))?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))
        .map_err(|e| DeckError::Terminal(e.to_string()))?;
    Ok((terminal, guard))
}
