use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use slate::editor::Editor;
use slate::terminal;

#[derive(Parser, Debug)]
#[command(name = "slate", version, about = "A small full-screen terminal text editor")]
struct Args {
    /// File to edit; must exist. Omit to start a new document under a
    /// timestamped filename.
    file: Option<String>,

    /// Append logs to this file (the screen owns stdout)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let (rows, columns) = terminal::window_size()?;
    let mut editor = Editor::open(args.file.as_deref(), rows, columns)?;

    // Raw mode last: every error path below still restores the terminal
    let _raw = terminal::RawModeGuard::enable()?;
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    editor.run(&mut stdin, &mut stdout)
}

/// Logging goes to a file or nowhere; stdout carries frames.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file '{}'", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
