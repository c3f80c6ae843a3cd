//! Terminal acquisition: raw mode and window size
//!
//! Raw mode is scoped: the guard restores the terminal on every exit
//! path, including panics, so the user's shell is never left in raw mode.
//! crossterm carries the platform split (termios on POSIX, the console
//! mode API on Windows).

use anyhow::{Context, Result};
use std::io::{self, Write};

/// Rows reserved below the content window (status line plus slack)
const RESERVED_ROWS: usize = 2;

/// RAII raw-mode scope.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Enable raw mode; failing to do so is fatal at startup since the
    /// editor cannot run cooked.
    pub fn enable() -> Result<Self> {
        crossterm::terminal::enable_raw_mode().context("failed to enable raw terminal mode")?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
        // Leave a clean screen behind rather than frame remnants
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x1b[2J\x1b[H");
        let _ = stdout.flush();
    }
}

/// Usable content window size: `(rows, columns)`, with the reserved rows
/// already subtracted from the reported height.
pub fn window_size() -> Result<(usize, usize)> {
    let (columns, rows) =
        crossterm::terminal::size().context("failed to query terminal window size")?;
    Ok((
        (rows as usize).saturating_sub(RESERVED_ROWS),
        columns as usize,
    ))
}
