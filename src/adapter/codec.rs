//! Position codec: line/column <-> linear character offset.
//!
//! Both directions are pure functions of the current document content.
//! Nothing is cached across edits, and out-of-range input is clamped by the
//! buffer rather than rejected.

use crate::editable::{Position, TextBuffer};

/// Convert a host position to a linear character offset
pub fn to_offset(buffer: &dyn TextBuffer, pos: Position) -> usize {
    buffer.position_to_offset(pos.line, pos.column)
}

/// Convert a linear character offset to a host position
pub fn to_position(buffer: &dyn TextBuffer, offset: usize) -> Position {
    buffer.offset_to_position(offset).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::RopeBuffer;

    const SAMPLE: &str = "<ul>\n\t<li>one</li>\n\n\t<li>twö</li>\n</ul>\n";

    #[test]
    fn test_offset_roundtrip_for_every_offset() {
        let buf = RopeBuffer::from_text(SAMPLE);
        for offset in 0..=buf.len_chars() {
            let pos = to_position(&buf, offset);
            assert_eq!(to_offset(&buf, pos), offset, "offset {offset} via {pos:?}");
        }
    }

    #[test]
    fn test_position_roundtrip_for_every_position() {
        let buf = RopeBuffer::from_text(SAMPLE);
        for line in 0..buf.line_count() {
            for column in 0..=buf.line_length(line) {
                let pos = Position::new(line, column);
                assert_eq!(to_position(&buf, to_offset(&buf, pos)), pos);
            }
        }
    }

    #[test]
    fn test_empty_document() {
        let buf = RopeBuffer::from_text("");
        assert_eq!(to_position(&buf, 0), Position::zero());
        assert_eq!(to_offset(&buf, Position::zero()), 0);
    }
}
