//! Edit history (undo/redo) grouped into batch transactions.
//!
//! Every edit recorded between `begin` and the matching `end` lands in one
//! `Transaction`, which is one undo step. Batches nest; only the outermost
//! `end` commits.

use super::selection::Selection;

/// A single text replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Character offset where the edit occurred
    pub offset: usize,
    /// Text that was deleted (empty for pure inserts)
    pub deleted_text: String,
    /// Text that was inserted (empty for pure deletes)
    pub inserted_text: String,
}

impl EditOperation {
    pub fn replace(offset: usize, deleted_text: String, inserted_text: String) -> Self {
        Self {
            offset,
            deleted_text,
            inserted_text,
        }
    }

    /// Get the inverse operation for undo
    pub fn inverse(&self) -> Self {
        Self {
            offset: self.offset,
            deleted_text: self.inserted_text.clone(),
            inserted_text: self.deleted_text.clone(),
        }
    }
}

/// One undo step: every edit of a batch plus the selections around it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    pub edits: Vec<EditOperation>,
    pub selections_before: Vec<Selection>,
    pub selections_after: Vec<Selection>,
}

impl Transaction {
    /// Inverse transaction: edits reversed and inverted, selections swapped
    pub fn inverse(&self) -> Self {
        Self {
            edits: self.edits.iter().rev().map(EditOperation::inverse).collect(),
            selections_before: self.selections_after.clone(),
            selections_after: self.selections_before.clone(),
        }
    }
}

/// Edit history with undo/redo stacks and batch grouping.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    max_size: usize,
    pending: Option<Transaction>,
    depth: usize,
}

impl EditHistory {
    /// Create a new edit history with default max size
    pub fn new() -> Self {
        Self::with_max_size(1000)
    }

    /// Create a new edit history with specified max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
            pending: None,
            depth: 0,
        }
    }

    /// Open a batch (nestable). `selections` are the selections before it.
    pub fn begin(&mut self, selections: &[Selection]) {
        if self.depth == 0 {
            self.pending = Some(Transaction {
                selections_before: selections.to_vec(),
                ..Transaction::default()
            });
        }
        self.depth += 1;
    }

    /// Record an edit into the open batch, or as its own step when none is
    /// open. `before` and `after` are the selections around this one edit.
    pub fn record(&mut self, op: EditOperation, before: &[Selection], after: &[Selection]) {
        match self.pending.as_mut() {
            Some(tx) => tx.edits.push(op),
            None => self.push(Transaction {
                edits: vec![op],
                selections_before: before.to_vec(),
                selections_after: after.to_vec(),
            }),
        }
    }

    /// Close a batch. Returns true when the outermost batch committed an undo step.
    pub fn end(&mut self, selections: &[Selection]) -> bool {
        if self.depth == 0 {
            return false;
        }
        self.depth -= 1;
        if self.depth > 0 {
            return false;
        }
        match self.pending.take() {
            Some(mut tx) if !tx.edits.is_empty() => {
                tx.selections_after = selections.to_vec();
                self.push(tx);
                true
            }
            _ => false,
        }
    }

    /// Push a transaction onto the undo stack (clears redo stack)
    pub fn push(&mut self, tx: Transaction) {
        self.redo_stack.clear();
        self.undo_stack.push(tx);

        while self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
    }

    /// Pop a transaction from the undo stack (its inverse moves to redo)
    pub fn pop_undo(&mut self) -> Option<Transaction> {
        let tx = self.undo_stack.pop()?;
        self.redo_stack.push(tx.inverse());
        Some(tx)
    }

    /// Pop a transaction from the redo stack (its inverse moves to undo)
    pub fn pop_redo(&mut self) -> Option<Transaction> {
        let tx = self.redo_stack.pop()?;
        self.undo_stack.push(tx.inverse());
        Some(tx)
    }

    /// Get the number of steps in the undo stack
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::Position;

    fn op(offset: usize, deleted: &str, inserted: &str) -> EditOperation {
        EditOperation::replace(offset, deleted.to_string(), inserted.to_string())
    }

    #[test]
    fn test_edit_operation_inverse() {
        let inv = op(5, "old", "new").inverse();
        assert_eq!(inv.deleted_text, "new");
        assert_eq!(inv.inserted_text, "old");
    }

    #[test]
    fn test_transaction_inverse_reverses_edits() {
        let tx = Transaction {
            edits: vec![op(0, "", "a"), op(3, "", "b")],
            ..Transaction::default()
        };
        let inv = tx.inverse();
        assert_eq!(inv.edits[0], op(3, "b", ""));
        assert_eq!(inv.edits[1], op(0, "a", ""));
    }

    #[test]
    fn test_edits_outside_batch_are_separate_steps() {
        let mut history = EditHistory::new();
        history.record(op(0, "", "a"), &[], &[]);
        history.record(op(1, "", "b"), &[], &[]);
        assert_eq!(history.undo_count(), 2);
    }

    #[test]
    fn test_nested_batch_commits_once() {
        let mut history = EditHistory::new();
        history.begin(&[]);
        history.record(op(0, "", "a"), &[], &[]);
        history.begin(&[]);
        history.record(op(1, "", "b"), &[], &[]);
        assert!(!history.end(&[]));
        history.record(op(2, "", "c"), &[], &[]);
        assert!(history.end(&[]));

        assert_eq!(history.undo_count(), 1);
        let tx = history.pop_undo().unwrap();
        assert_eq!(tx.edits.len(), 3);
        assert_eq!(history.undo_count(), 0);
    }

    #[test]
    fn test_empty_batch_records_nothing() {
        let mut history = EditHistory::new();
        history.begin(&[]);
        assert!(!history.end(&[]));
        assert_eq!(history.undo_count(), 0);
    }

    #[test]
    fn test_unbalanced_end_is_ignored() {
        let mut history = EditHistory::new();
        assert!(!history.end(&[]));
        history.record(op(0, "", "a"), &[], &[]);
        assert_eq!(history.undo_count(), 1);
    }

    #[test]
    fn test_unbatched_edit_keeps_selections_around_it() {
        let before = [Selection::collapsed(Position::new(0, 3))];
        let after = [Selection::collapsed(Position::new(0, 6))];
        let mut history = EditHistory::new();
        history.record(op(3, "", "def"), &before, &after);

        let tx = history.pop_undo().unwrap();
        assert_eq!(tx.selections_before, before);
        assert_eq!(tx.selections_after, after);
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = EditHistory::new();
        history.record(op(0, "", "a"), &[], &[]);
        history.pop_undo();

        history.record(op(0, "", "b"), &[], &[]);
        assert!(history.pop_redo().is_none());
    }

    #[test]
    fn test_history_max_size() {
        let mut history = EditHistory::with_max_size(3);
        for i in 0..5 {
            history.record(op(i, "", "x"), &[], &[]);
        }
        assert_eq!(history.undo_count(), 3);
    }
}
