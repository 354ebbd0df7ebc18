use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{DefaultTerminal, Terminal, backend::CrosstermBackend};

/// Switch to the alternate screen with raw mode and mouse capture (wheel and clicks).
pub fn init_terminal() -> color_eyre::Result<DefaultTerminal> {
    enable_raw_mode()?;
    if let Err(e) = execute!(std::io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
        disable_raw_mode()?;
        return Err(e.into());
    }
    Ok(Terminal::new(CrosstermBackend::new(std::io::stdout()))?)
}

/// Undo [`init_terminal`]. Safe to call more than once.
pub fn restore_terminal() -> color_eyre::Result<()> {
    execute!(std::io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Restore the terminal before the panic report is printed.
///
/// Must run after `color_eyre::install` so it wraps the eyre hook.
pub fn install_panic_hook() {
    let report = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Err(e) = restore_terminal() {
            eprintln!("Failed to restore terminal: {}", e);
        }
        report(info);
    }));
}
