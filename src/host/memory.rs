//! In-memory reference host.
//!
//! `MemoryHost` is a complete `Host` backed by a rope, a selection list and a
//! transaction history. It is what the test suite and the CLI drive, and it
//! doubles as the template for wiring a real editor widget.

use std::collections::VecDeque;
use std::ops::Range;
use std::path::PathBuf;

use super::Host;
use crate::adapter::IndentStyle;
use crate::editable::{
    EditHistory, EditOperation, Position, RopeBuffer, Selection, TextBuffer, TextBufferMut,
};

/// Rope-backed host with undo history and batch bookkeeping.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    buffer: RopeBuffer,
    selections: Vec<Selection>,
    history: EditHistory,
    indent_style: IndentStyle,
    mode: Option<String>,
    profile: Option<String>,
    file_path: Option<PathBuf>,
    prompt_answers: VecDeque<String>,
    batch_depth: usize,
    /// Number of outermost batches closed (each is one re-layout)
    layouts: usize,
}

impl MemoryHost {
    /// Create a host with `text` and a single caret at offset 0
    pub fn new(text: &str) -> Self {
        Self {
            buffer: RopeBuffer::from_text(text),
            selections: vec![Selection::collapsed(Position::zero())],
            history: EditHistory::new(),
            indent_style: IndentStyle::Tabs,
            mode: None,
            profile: None,
            file_path: None,
            prompt_answers: VecDeque::new(),
            batch_depth: 0,
            layouts: 0,
        }
    }

    pub fn with_mode(mut self, mode: &str) -> Self {
        self.mode = Some(mode.to_string());
        self
    }

    pub fn with_profile(mut self, profile: &str) -> Self {
        self.profile = Some(profile.to_string());
        self
    }

    pub fn with_indent_style(mut self, style: IndentStyle) -> Self {
        self.indent_style = style;
        self
    }

    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Replace the selection list using offset pairs `(anchor, head)`
    pub fn with_offset_selections(mut self, pairs: &[(usize, usize)]) -> Self {
        self.selections = pairs
            .iter()
            .map(|&(anchor, head)| Selection::new(self.position(anchor), self.position(head)))
            .collect();
        self
    }

    /// Queue an answer for the next `prompt` call
    pub fn push_prompt_answer(&mut self, answer: &str) {
        self.prompt_answers.push_back(answer.to_string());
    }

    /// Full document text
    pub fn text(&self) -> String {
        self.buffer.content()
    }

    /// Selections as `(anchor, head)` offset pairs
    pub fn offset_selections(&self) -> Vec<(usize, usize)> {
        self.selections
            .iter()
            .map(|s| (self.offset(s.anchor), self.offset(s.head)))
            .collect()
    }

    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    pub fn layout_count(&self) -> usize {
        self.layouts
    }

    pub fn batch_depth(&self) -> usize {
        self.batch_depth
    }

    /// Undo the last step. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(tx) = self.history.pop_undo() else {
            return false;
        };
        for op in tx.inverse().edits {
            self.apply(&op);
        }
        self.selections = tx.selections_before;
        true
    }

    /// Redo the last undone step. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(tx) = self.history.pop_redo() else {
            return false;
        };
        // The redo stack holds inverses, so `tx` is the undo of the original
        for op in tx.inverse().edits {
            self.apply(&op);
        }
        self.selections = tx.selections_before;
        true
    }

    fn position(&self, offset: usize) -> Position {
        self.buffer.offset_to_position(offset).into()
    }

    fn offset(&self, pos: Position) -> usize {
        self.buffer.position_to_offset(pos.line, pos.column)
    }

    fn apply(&mut self, op: &EditOperation) {
        let end = op.offset + op.deleted_text.chars().count();
        self.buffer.replace(op.offset..end, &op.inserted_text);
    }
}

/// Map an offset across a replacement of `range` by `inserted` characters.
fn map_offset(offset: usize, range: &Range<usize>, inserted: usize) -> usize {
    if offset < range.start {
        offset
    } else if offset <= range.end {
        range.start + inserted
    } else {
        offset + inserted - (range.end - range.start)
    }
}

impl Host for MemoryHost {
    fn buffer(&self) -> &dyn TextBuffer {
        &self.buffer
    }

    fn replace_range(&mut self, range: Range<usize>, text: &str) {
        let len = self.buffer.len_chars();
        let range = range.start.min(len)..range.end.min(len).max(range.start.min(len));

        let before = self.selections.clone();
        let offsets = self.offset_selections();
        let deleted = self.buffer.slice(range.clone());
        self.buffer.replace(range.clone(), text);

        let inserted = text.chars().count();
        self.selections = offsets
            .into_iter()
            .map(|(anchor, head)| {
                Selection::new(
                    self.position(map_offset(anchor, &range, inserted)),
                    self.position(map_offset(head, &range, inserted)),
                )
            })
            .collect();

        let op = EditOperation::replace(range.start, deleted, text.to_string());
        self.history.record(op, &before, &self.selections);
    }

    fn selections(&self) -> Vec<Selection> {
        self.selections.clone()
    }

    fn set_selections(&mut self, selections: Vec<Selection>) {
        self.selections = selections;
    }

    fn indent_style(&self) -> IndentStyle {
        self.indent_style
    }

    fn mode(&self) -> Option<String> {
        self.mode.clone()
    }

    fn profile(&self) -> Option<String> {
        self.profile.clone()
    }

    fn begin_batch(&mut self) {
        self.history.begin(&self.selections);
        self.batch_depth += 1;
    }

    fn end_batch(&mut self) {
        if self.batch_depth == 0 {
            tracing::warn!("end_batch called without a matching begin_batch");
            return;
        }
        self.history.end(&self.selections);
        self.batch_depth -= 1;
        if self.batch_depth == 0 {
            self.layouts += 1;
        }
    }

    fn file_path(&self) -> Option<PathBuf> {
        self.file_path.clone()
    }

    fn prompt(&mut self, _title: &str) -> Option<String> {
        self.prompt_answers.pop_front()
    }
}
