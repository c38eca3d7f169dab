//! Terminal front end: single-algorithm player and side-by-side compare view.

pub mod app;
pub mod compare_app;
pub mod surface;
pub mod ui;

use std::io;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

pub type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Next size on the `step` grid above or below `current`. Sizes off the grid
/// snap to the neighbouring multiple.
pub(crate) fn step_size(current: usize, step: usize, grow: bool) -> usize {
    if grow {
        (current / step + 1) * step
    } else {
        current.saturating_sub(1) / step * step
    }
}

/// Run `body` inside raw mode on the alternate screen, restoring the terminal
/// afterwards even if `body` fails or panics.
pub fn with_terminal(body: impl FnOnce(&mut Term) -> io::Result<()>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal before the panic message is printed.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
        original_hook(info);
    }));

    let result = body(&mut terminal);

    let _ = std::panic::take_hook();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;

    result
}
