//! Loading and saving documents as line sequences

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            let rest = rest.strip_prefix(['/', '\\']).unwrap_or(rest);
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Generated name for a document started without a filename argument.
pub fn default_file_name() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M%S.txt").to_string()
}

/// Read a file into lines. Missing files are an error; the caller decides
/// whether that is fatal (startup) or a status message.
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Write lines back to a file, one per line with a trailing newline each.
pub fn save_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut text = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    fs::write(path, text).with_context(|| format!("failed to save '{}'", path.display()))
}
