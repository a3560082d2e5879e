//! The host editing surface, as seen by the adapter.
//!
//! A host must expose an offset-addressable document, an enumerable list of
//! selections and an atomic batch primitive. Everything else the adapter
//! needs (indentation preferences, language mode, profile override) is a
//! plain query.

mod memory;

use std::ops::Range;
use std::path::PathBuf;

use crate::adapter::IndentStyle;
use crate::editable::{Selection, TextBuffer};

pub use memory::MemoryHost;

/// Capability set the adapter consumes from a text-editing surface.
pub trait Host {
    /// Read access to the document
    fn buffer(&self) -> &dyn TextBuffer;

    /// Replace the characters in `range` with `text`.
    ///
    /// Hosts are expected to relocate their other selections across the edit
    /// the way an editor normally does.
    fn replace_range(&mut self, range: Range<usize>, text: &str);

    /// All active selections, in the host's native enumeration order
    fn selections(&self) -> Vec<Selection>;

    /// Replace the whole selection list at once
    fn set_selections(&mut self, selections: Vec<Selection>);

    /// Indentation preference (tabs, or N spaces)
    fn indent_style(&self) -> IndentStyle;

    /// Active language/mode identifier (e.g. `text/html`)
    fn mode(&self) -> Option<String>;

    /// Host-level output profile override
    fn profile(&self) -> Option<String> {
        None
    }

    /// Start an atomic batch: one undo step, one re-layout. Batches nest.
    fn begin_batch(&mut self);

    /// Finish the batch opened by the matching `begin_batch`.
    fn end_batch(&mut self);

    /// Path of the file being edited
    fn file_path(&self) -> Option<PathBuf> {
        None
    }

    /// Ask the user for input. Hosts without UI answer `None`.
    fn prompt(&mut self, _title: &str) -> Option<String> {
        None
    }
}
