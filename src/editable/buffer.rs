//! Text storage traits and the rope-backed document buffer.
//!
//! `TextBuffer` is the read-only view the adapter needs from a host document:
//! line lookup, character counts and the line/column <-> offset mapping.
//! `TextBufferMut` adds the single mutation the adapter performs, a range
//! replacement.

use ropey::Rope;
use std::borrow::Cow;
use std::ops::Range;

/// Read-only view into a host document.
///
/// All offsets are character indices (not bytes). Implementations clamp
/// out-of-range input instead of failing.
pub trait TextBuffer {
    /// Number of lines (always >= 1)
    fn line_count(&self) -> usize;

    /// Length of a specific line in characters (excluding newline)
    fn line_length(&self, line: usize) -> usize;

    /// Total length in characters
    fn len_chars(&self) -> usize;

    /// Check if buffer is empty
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Get line content (without trailing newline)
    fn line(&self, line: usize) -> Option<Cow<'_, str>>;

    /// Character offset of the first character of `line`
    fn line_start(&self, line: usize) -> usize;

    /// Convert (line, column) to character offset
    fn position_to_offset(&self, line: usize, column: usize) -> usize;

    /// Convert character offset to (line, column)
    fn offset_to_position(&self, offset: usize) -> (usize, usize);

    /// Get slice of text as String (by character indices)
    fn slice(&self, range: Range<usize>) -> String;

    /// Get full content as String
    fn content(&self) -> String;
}

/// Mutable buffer operations. Extends TextBuffer.
pub trait TextBufferMut: TextBuffer {
    /// Insert text at character offset
    fn insert(&mut self, offset: usize, text: &str);

    /// Remove text in character range
    fn remove(&mut self, range: Range<usize>);

    /// Replace text in range with new text
    fn replace(&mut self, range: Range<usize>, text: &str) {
        self.remove(range.clone());
        self.insert(range.start, text);
    }
}

/// TextBuffer implementation wrapping ropey::Rope.
#[derive(Debug, Clone)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    /// Create a RopeBuffer from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }
}

impl TextBuffer for RopeBuffer {
    fn line_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    fn line_length(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let line_slice = self.rope.line(line);
        let len = line_slice.len_chars();
        // Exclude trailing newline if present
        if len > 0 && line_slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line).to_string();
        let trimmed = s.strip_suffix('\n').unwrap_or(&s).to_string();
        Some(Cow::Owned(trimmed))
    }

    fn line_start(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(line)
    }

    fn position_to_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        let line_start = self.rope.line_to_char(line);
        line_start + column.min(self.line_length(line))
    }

    fn offset_to_position(&self, offset: usize) -> (usize, usize) {
        let clamped = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(clamped);
        let line_start = self.rope.line_to_char(line);
        (line, clamped - line_start)
    }

    fn slice(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    fn content(&self) -> String {
        self.rope.to_string()
    }
}

impl TextBufferMut for RopeBuffer {
    fn insert(&mut self, offset: usize, text: &str) {
        let clamped = offset.min(self.len_chars());
        self.rope.insert(clamped, text);
    }

    fn remove(&mut self, range: Range<usize>) {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rope_buffer_multiline() {
        let buf = RopeBuffer::from_text("line1\nline2\nline3");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line(0).unwrap().as_ref(), "line1");
        assert_eq!(buf.line(2).unwrap().as_ref(), "line3");
        assert!(buf.line(3).is_none());
    }

    #[test]
    fn test_rope_buffer_line_length() {
        let buf = RopeBuffer::from_text("hello\nworld\n");
        assert_eq!(buf.line_length(0), 5);
        assert_eq!(buf.line_length(1), 5);
        // Trailing newline opens an empty last line
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line_length(2), 0);
    }

    #[test]
    fn test_rope_buffer_position_conversion() {
        let buf = RopeBuffer::from_text("hello\nworld");
        assert_eq!(buf.offset_to_position(0), (0, 0));
        assert_eq!(buf.offset_to_position(5), (0, 5));
        assert_eq!(buf.offset_to_position(6), (1, 0));
        assert_eq!(buf.offset_to_position(11), (1, 5));

        assert_eq!(buf.position_to_offset(0, 0), 0);
        assert_eq!(buf.position_to_offset(1, 0), 6);
        assert_eq!(buf.position_to_offset(1, 5), 11);
    }

    #[test]
    fn test_rope_buffer_clamps_out_of_range() {
        let buf = RopeBuffer::from_text("ab\ncd");
        assert_eq!(buf.position_to_offset(0, 99), 2);
        assert_eq!(buf.position_to_offset(9, 0), 5);
        assert_eq!(buf.offset_to_position(99), (1, 2));
    }

    #[test]
    fn test_rope_buffer_utf8_offsets_are_chars() {
        let buf = RopeBuffer::from_text("héllo\nwörld");
        assert_eq!(buf.len_chars(), 11);
        assert_eq!(buf.offset_to_position(7), (1, 1));
        assert_eq!(buf.slice(6..11), "wörld");
    }

    #[test]
    fn test_rope_buffer_replace() {
        let mut buf = RopeBuffer::from_text("hello\nworld");
        buf.replace(6..11, "there");
        assert_eq!(buf.content(), "hello\nthere");
        buf.replace(5..5, "!");
        assert_eq!(buf.content(), "hello!\nthere");
    }

    #[test]
    fn test_rope_buffer_line_start() {
        let buf = RopeBuffer::from_text("ab\ncde\nf");
        assert_eq!(buf.line_start(0), 0);
        assert_eq!(buf.line_start(1), 3);
        assert_eq!(buf.line_start(2), 7);
        assert_eq!(buf.line_start(5), 8);
    }
}
