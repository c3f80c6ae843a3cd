//! The editor session: key pipeline, frame loop, save and quit
//!
//! One key event flows through three passes in order: the content edit,
//! the cursor move, then the scroll adjustment. Rendering happens once
//! per processed key, and each frame reports back the physical rows the
//! content occupied so the next page move can land correctly.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::content::Content;
use crate::cursor::Cursor;
use crate::edit;
use crate::input::{self, Key};
use crate::persistence;
use crate::render;
use crate::search::{Direction, Search};

const SAVED_MESSAGE: &str = "Saved file successfully!";
const UNSAVED_WARNING: &str = "File has unsaved changes! Press Ctrl-Q again to quit.";

pub struct Editor {
    content: Content,
    cursor: Cursor,
    path: PathBuf,
    /// Usable content rows (terminal height minus the reserved rows)
    rows: usize,
    columns: usize,
    /// Physical rows the last frame's content occupied
    used_rows: usize,
    /// One-shot status message, shown instead of the diagnostics line
    notice: Option<String>,
    quit_pending: bool,
    should_quit: bool,
}

impl Editor {
    /// Open a document. A named file must exist; without a name the
    /// session starts empty under a timestamped filename.
    pub fn open(file: Option<&str>, rows: usize, columns: usize) -> Result<Self> {
        let (path, content) = match file {
            Some(name) => {
                let path = persistence::expand_home(name);
                let lines = persistence::load_lines(&path)?;
                (path, Content::from_lines(lines))
            }
            None => (PathBuf::from(persistence::default_file_name()), Content::new()),
        };
        info!(path = %path.display(), lines = content.line_count(), "opened document");
        Ok(Self {
            content,
            cursor: Cursor::new(),
            path,
            rows,
            columns,
            used_rows: 0,
            notice: None,
            quit_pending: false,
            should_quit: false,
        })
    }

    /// Run the frame loop until quit or end of input.
    pub fn run(&mut self, input: &mut impl Read, output: &mut impl Write) -> Result<()> {
        loop {
            self.render_frame(output)?;
            let Some(key) = input::read_key(input) else {
                break;
            };
            debug!(?key, row = self.cursor.row(), col = self.cursor.col(), "key");
            if matches!(key, Key::Find) {
                self.find_prompt(input, output)?;
            } else {
                self.handle_key(&key);
            }
            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Edit, move, scroll. Save and quit short-circuit the pipeline.
    fn handle_key(&mut self, key: &Key) {
        match key {
            Key::Quit => {
                if self.content.is_modified() && !self.quit_pending {
                    self.quit_pending = true;
                    self.notice = Some(UNSAVED_WARNING.to_string());
                } else {
                    info!("quit");
                    self.should_quit = true;
                }
                return;
            }
            Key::Save => {
                self.save();
                return;
            }
            Key::Esc | Key::Raw(_) | Key::Find => return,
            _ => {}
        }
        self.quit_pending = false;
        edit::apply(key, &mut self.content, &mut self.cursor);
        self.cursor
            .move_for(key, &self.content, self.used_rows, self.columns);
        self.cursor
            .scroll_for(key, &self.content, self.rows, self.columns);
    }

    fn save(&mut self) {
        self.quit_pending = false;
        match persistence::save_lines(&self.path, self.content.lines()) {
            Ok(()) => {
                self.content.mark_saved();
                self.notice = Some(SAVED_MESSAGE.to_string());
                info!(path = %self.path.display(), "saved document");
            }
            Err(err) => {
                self.notice = Some(format!("Save failed: {err:#}"));
                warn!(path = %self.path.display(), error = %err, "save failed");
            }
        }
    }

    /// Modal incremental search. Typing extends the query and re-scans
    /// from the top; arrows step between matches; Enter or Esc returns
    /// to editing at the current match.
    fn find_prompt(&mut self, input: &mut impl Read, output: &mut impl Write) -> Result<()> {
        let mut query = String::new();
        let mut search = Search::new();
        loop {
            self.notice = Some(format!("Search: {query}"));
            self.render_frame(output)?;
            let Some(key) = input::read_key(input) else {
                return Ok(());
            };
            let hit = match key {
                Key::Enter | Key::Esc => return Ok(()),
                Key::Insert(text) => {
                    query.push_str(&text);
                    search.find_first(&query, &self.content)
                }
                Key::Backspace => {
                    query.pop();
                    search.find_first(&query, &self.content)
                }
                Key::Right | Key::Down => search.find_next(Direction::Forward, &self.content),
                Key::Left | Key::Up => search.find_next(Direction::Backward, &self.content),
                _ => None,
            };
            if let Some((row, col)) = hit {
                debug!(row, col, %query, "search match");
                self.cursor.jump_to(row, col, &self.content, self.columns);
                self.cursor
                    .scroll_for(&Key::Find, &self.content, self.rows, self.columns);
            }
        }
    }

    fn render_frame(&mut self, output: &mut impl Write) -> Result<()> {
        let status = self.notice.take().unwrap_or_else(|| self.diagnostics());
        let (frame, used_rows) = render::compose(
            &self.content,
            &mut self.cursor,
            self.rows,
            self.columns,
            &status,
        );
        self.used_rows = used_rows;
        output
            .write_all(frame.as_bytes())
            .context("failed to write frame")?;
        output.flush().context("failed to flush frame")?;
        Ok(())
    }

    /// Default status line: the viewport counters, for watching the wrap
    /// accounting while editing.
    fn diagnostics(&self) -> String {
        format!(
            "R: {} cY: {} oY: {} pw: {} cw: {} hw: {} cd: {}",
            self.used_rows,
            self.cursor.row(),
            self.cursor.scroll_top(),
            self.cursor.page_wrap(),
            self.cursor.cursor_wrap(),
            self.cursor.hidden_wrap(),
            self.cursor.hidden_wrap_cooldown(),
        )
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
