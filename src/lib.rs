//! slate: a small full-screen terminal text editor
//!
//! The crate is split along the frame pipeline: raw bytes decode to keys
//! (`input`), keys mutate the document (`edit`) and the viewport
//! (`cursor`), and the compositor (`render`) turns both into one ANSI
//! frame. `editor` ties the pipeline to a session with a file behind it.

pub mod content;
pub mod cursor;
pub mod display_width;
pub mod edit;
pub mod editor;
pub mod input;
pub mod persistence;
pub mod render;
pub mod search;
pub mod terminal;
