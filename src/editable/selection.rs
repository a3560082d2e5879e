//! Host-native selections.
//!
//! Hosts track a selection as an anchor (where the gesture started) and a
//! head (where the caret is now). The adapter never stores that orientation
//! downstream; see `adapter::SelectionRange` for the normalized form.

use super::position::Position;

/// A text selection with anchor (start point) and head (cursor position).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: Position,
    /// Where the cursor is (moving point)
    pub head: Position,
}

impl Selection {
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (cursor with no selection)
    pub fn collapsed(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Check if selection is empty (anchor == head)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }
}
