//! Adapter contract errors.
//!
//! These indicate a bookkeeping bug in the adapter or dispatcher, not a
//! runtime condition, so they propagate instead of being swallowed.

use std::fmt;

/// Errors raised by the selection and editing-context layers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The selection index does not address an entry of the current selection set
    SelectionIndexOutOfRange { index: usize, count: usize },
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterError::SelectionIndexOutOfRange { index, count } => write!(
                f,
                "Selection index {} out of range ({} selections)",
                index, count
            ),
        }
    }
}

impl std::error::Error for AdapterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_index_and_count() {
        let err = AdapterError::SelectionIndexOutOfRange { index: 3, count: 2 };
        assert_eq!(err.to_string(), "Selection index 3 out of range (2 selections)");
    }
}
