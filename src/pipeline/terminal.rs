//! Terminal setup and teardown.
//!
//! Handles entering/exiting raw mode, the alternate screen, mouse capture
//! (for the scroll wheel), bracketed paste and focus reporting.

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste, EnableFocusChange,
    EnableMouseCapture,
};
use crossterm::execute;
use crossterm::style::{Attribute, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::tty::IsTty;

/// Terminal setup/teardown handle.
#[derive(Debug, Default)]
pub struct TerminalSetup {
    is_fullscreen: bool,
    is_raw: bool,
    mouse_enabled: bool,
    bracketed_paste: bool,
    focus_reporting: bool,
}

impl TerminalSetup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter fullscreen mode with all terminal features enabled.
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        // Not a TTY (piped, tests): render anyway, just without raw input
        if io::stdin().is_tty() {
            terminal::enable_raw_mode()?;
            self.is_raw = true;
        }

        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        execute!(out, EnableMouseCapture)?;
        self.mouse_enabled = true;

        execute!(out, EnableBracketedPaste)?;
        self.bracketed_paste = true;

        execute!(out, EnableFocusChange)?;
        self.focus_reporting = true;

        out.flush()?;
        self.is_fullscreen = true;
        tracing::debug!(raw = self.is_raw, "entered fullscreen");
        Ok(())
    }

    /// Exit fullscreen mode and restore terminal.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        let mut out = io::stdout();

        if self.focus_reporting {
            execute!(out, DisableFocusChange)?;
            self.focus_reporting = false;
        }
        if self.bracketed_paste {
            execute!(out, DisableBracketedPaste)?;
            self.bracketed_paste = false;
        }
        if self.mouse_enabled {
            execute!(out, DisableMouseCapture)?;
            self.mouse_enabled = false;
        }

        execute!(out, SetAttribute(Attribute::Reset), Show, LeaveAlternateScreen)?;

        if self.is_raw {
            terminal::disable_raw_mode()?;
            self.is_raw = false;
        }
        self.is_fullscreen = false;
        tracing::debug!("left fullscreen");
        Ok(())
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }
}

impl Drop for TerminalSetup {
    fn drop(&mut self) {
        if self.is_fullscreen {
            let _ = self.exit_fullscreen();
        }
    }
}

/// Current terminal size, falling back to 80x24 when it cannot be read.
pub fn detect_terminal_size() -> (u16, u16) {
    terminal::size().unwrap_or((80, 24))
}
