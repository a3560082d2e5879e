//! Selection model: the host's selections in normalized offset space.
//!
//! The selection list is read from the host on every call. An edit made by
//! one dispatch iteration moves the offsets of the selections after it, so a
//! cached list would be stale by the next iteration.

use crate::editable::Selection;
use crate::error::AdapterError;
use crate::host::Host;

use super::codec;

/// An order-independent selection in offset space. `start == end` is a caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    /// Build a range from two offsets in either order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Every host selection, normalized so that `start <= end`
pub fn list(host: &dyn Host) -> Vec<SelectionRange> {
    let buffer = host.buffer();
    host.selections()
        .iter()
        .map(|sel| {
            SelectionRange::new(
                codec::to_offset(buffer, sel.anchor),
                codec::to_offset(buffer, sel.head),
            )
        })
        .collect()
}

/// The selection at `index`
pub fn current(host: &dyn Host, index: usize) -> Result<SelectionRange, AdapterError> {
    let ranges = list(host);
    let count = ranges.len();
    ranges
        .get(index)
        .copied()
        .ok_or(AdapterError::SelectionIndexOutOfRange { index, count })
}

/// Rewrite only the selection at `index` and push the whole set back.
///
/// Other entries are handed back to the host exactly as it reported them.
pub fn set_current(
    host: &mut dyn Host,
    index: usize,
    start: usize,
    end: usize,
) -> Result<(), AdapterError> {
    let mut selections = host.selections();
    let count = selections.len();
    if index >= count {
        return Err(AdapterError::SelectionIndexOutOfRange { index, count });
    }

    let range = SelectionRange::new(start, end);
    let buffer = host.buffer();
    selections[index] = Selection::new(
        codec::to_position(buffer, range.start),
        codec::to_position(buffer, range.end),
    );
    host.set_selections(selections);
    Ok(())
}
