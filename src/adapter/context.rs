//! The editing context handed to the engine for each action run.
//!
//! It borrows the host for the duration of one dispatch and owns nothing but
//! the selection index. Content, syntax, profile and selections are read from
//! the host on every call.

use std::borrow::Cow;
use std::path::PathBuf;

use crate::error::AdapterError;
use crate::host::Host;

use super::codec;
use super::indent;
use super::selection::{self, SelectionRange};
use super::syntax::{DefaultDetector, Detector, SyntaxTable};
use super::tabstops::{self, literal_escape, EscapeFn};

/// Engine-facing view of the host for one dispatch.
pub struct EditingContext<'a> {
    host: &'a mut dyn Host,
    detector: &'a dyn Detector,
    syntaxes: Cow<'a, SyntaxTable>,
    escape: &'a EscapeFn,
    default_profile: Option<&'a str>,
    selection_index: usize,
}

impl<'a> EditingContext<'a> {
    pub fn new(host: &'a mut dyn Host) -> Self {
        Self {
            host,
            detector: &DefaultDetector,
            syntaxes: Cow::Owned(SyntaxTable::default()),
            escape: &literal_escape,
            default_profile: None,
            selection_index: 0,
        }
    }

    pub fn with_detector(mut self, detector: &'a dyn Detector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_syntax_table(mut self, table: &'a SyntaxTable) -> Self {
        self.syntaxes = Cow::Borrowed(table);
        self
    }

    pub fn with_escape(mut self, escape: &'a EscapeFn) -> Self {
        self.escape = escape;
        self
    }

    /// Profile used when the host has no override of its own
    pub fn with_default_profile(mut self, profile: Option<&'a str>) -> Self {
        self.default_profile = profile;
        self
    }

    pub fn selection_index(&self) -> usize {
        self.selection_index
    }

    /// Only the dispatcher re-points the context between iterations.
    pub(crate) fn set_selection_index(&mut self, index: usize) {
        self.selection_index = index;
    }

    pub fn host(&self) -> &dyn Host {
        &*self.host
    }

    /// Full document text
    pub fn content(&self) -> String {
        self.host.buffer().content()
    }

    /// Engine syntax name for the host's active mode
    pub fn syntax(&self) -> String {
        let mode = self.host.mode();
        if let Some(syntax) = mode.as_deref().and_then(|m| self.syntaxes.lookup(m)) {
            return syntax.to_string();
        }
        self.detector.detect_syntax(self, mode.as_deref())
    }

    /// Output profile: host override, then configured default, then detection
    pub fn profile_name(&self) -> String {
        if let Some(profile) = self.host.profile() {
            return profile;
        }
        if let Some(profile) = self.default_profile {
            return profile.to_string();
        }
        self.detector.detect_profile(self)
    }

    /// One level of indentation in the host's preferred unit
    pub fn indentation(&self) -> String {
        self.host.indent_style().unit()
    }

    /// All selections, normalized
    pub fn selection_ranges(&self) -> Vec<SelectionRange> {
        selection::list(&*self.host)
    }

    pub fn selection_count(&self) -> usize {
        self.host.selections().len()
    }

    /// Whether any selection (not just the current one) is non-empty
    pub fn has_selection(&self) -> bool {
        self.host.selections().iter().any(|s| !s.is_empty())
    }

    /// The selection this iteration works on
    pub fn selection_range(&self) -> Result<SelectionRange, AdapterError> {
        selection::current(&*self.host, self.selection_index)
    }

    /// Text covered by the current selection
    pub fn selection(&self) -> Result<String, AdapterError> {
        let range = self.selection_range()?;
        Ok(self.host.buffer().slice(range.start..range.end))
    }

    pub fn caret_pos(&self) -> Result<usize, AdapterError> {
        Ok(self.selection_range()?.start)
    }

    pub fn set_caret_pos(&mut self, offset: usize) -> Result<(), AdapterError> {
        self.create_selection(offset, offset)
    }

    /// Move the current selection; every other selection is left alone
    pub fn create_selection(&mut self, start: usize, end: usize) -> Result<(), AdapterError> {
        selection::set_current(&mut *self.host, self.selection_index, start, end)
    }

    /// Offsets spanning the line that holds the caret (newline excluded)
    pub fn current_line_range(&self) -> Result<SelectionRange, AdapterError> {
        let caret = self.caret_pos()?;
        let buffer = self.host.buffer();
        let line = codec::to_position(buffer, caret).line;
        let start = buffer.line_start(line);
        Ok(SelectionRange::new(start, start + buffer.line_length(line)))
    }

    pub fn current_line(&self) -> Result<String, AdapterError> {
        let caret = self.caret_pos()?;
        let buffer = self.host.buffer();
        let line = codec::to_position(buffer, caret).line;
        Ok(buffer.line(line).map(Cow::into_owned).unwrap_or_default())
    }

    pub fn file_path(&self) -> Option<PathBuf> {
        self.host.file_path()
    }

    pub fn prompt(&mut self, title: &str) -> Option<String> {
        self.host.prompt(title)
    }

    /// Replace `[start, end)` with engine output and place the caret.
    ///
    /// `end` defaults to `start` (insertion), or to the document length when
    /// both are omitted; `start` defaults to 0. Unless `no_indent` is set the
    /// text is re-indented for the host and re-based on the indentation of
    /// the line at `start`. The caret lands on the first tab stop, or at the
    /// end of the inserted text when there is none. The edit and the
    /// selection change form one host batch.
    pub fn replace_content(
        &mut self,
        text: &str,
        start: Option<usize>,
        end: Option<usize>,
        no_indent: bool,
    ) -> Result<(), AdapterError> {
        // Fail before touching the document if there is no selection to move
        self.selection_range()?;

        let len = self.host.buffer().len_chars();
        let end = end.or(start).unwrap_or(len);
        let start = start.unwrap_or(0).min(len);
        let end = end.clamp(start, len);

        let value = if no_indent {
            Cow::Borrowed(text)
        } else {
            let padding = indent::line_padding_at(&self.content(), start);
            let normalized = indent::normalize(text, self.host.indent_style());
            Cow::Owned(indent::pad(&normalized, &padding))
        };

        let data = tabstops::extract(&value, self.escape);
        let inserted = data.text.chars().count();
        let (caret_start, caret_end) = data
            .first()
            .map(|t| (t.start, t.end))
            .unwrap_or((inserted, inserted));

        tracing::trace!(
            start,
            end,
            inserted,
            tabstops = data.tabstops.len(),
            "replace_content"
        );

        self.host.begin_batch();
        self.host.replace_range(start..end, &data.text);
        let placed = self.create_selection(start + caret_start, start + caret_end);
        self.host.end_batch();
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::IndentStyle;
    use crate::host::MemoryHost;

    #[test]
    fn test_replace_defaults_to_full_document() {
        let mut host = MemoryHost::new("old text");
        let mut ctx = EditingContext::new(&mut host);
        ctx.replace_content("new", None, None, true).unwrap();
        assert_eq!(host.text(), "new");
        assert_eq!(host.offset_selections(), vec![(3, 3)]);
    }

    #[test]
    fn test_replace_with_start_only_inserts() {
        let mut host = MemoryHost::new("ac");
        let mut ctx = EditingContext::new(&mut host);
        ctx.replace_content("b", Some(1), None, true).unwrap();
        assert_eq!(host.text(), "abc");
        assert_eq!(host.offset_selections(), vec![(2, 2)]);
    }

    #[test]
    fn test_replace_places_caret_on_first_tabstop() {
        let mut host = MemoryHost::new("ul").with_offset_selections(&[(2, 2)]);
        let mut ctx = EditingContext::new(&mut host);
        ctx.replace_content("<ul>${1:item}</ul>", Some(0), Some(2), true)
            .unwrap();
        assert_eq!(host.text(), "<ul>item</ul>");
        assert_eq!(host.offset_selections(), vec![(4, 8)]);
    }

    #[test]
    fn test_replace_reindents_against_line_padding() {
        let mut host = MemoryHost::new("\tul")
            .with_indent_style(IndentStyle::Spaces(2))
            .with_offset_selections(&[(3, 3)]);
        let mut ctx = EditingContext::new(&mut host);
        ctx.replace_content("<ul>\n\t<li>$1</li>\n</ul>", Some(1), Some(3), false)
            .unwrap();
        assert_eq!(host.text(), "\t<ul>\n\t  <li></li>\n\t</ul>");
        // Caret inside the <li>
        assert_eq!(host.offset_selections(), vec![(13, 13)]);
    }

    #[test]
    fn test_replace_is_one_undo_step() {
        let mut host = MemoryHost::new("abc");
        let mut ctx = EditingContext::new(&mut host);
        ctx.replace_content("x", Some(1), Some(2), true).unwrap();
        assert_eq!(host.undo_count(), 1);
        assert!(host.undo());
        assert_eq!(host.text(), "abc");
    }

    #[test]
    fn test_replace_without_selection_leaves_document_alone() {
        let mut host = MemoryHost::new("abc").with_offset_selections(&[]);
        let mut ctx = EditingContext::new(&mut host);
        assert!(ctx.replace_content("x", None, None, true).is_err());
        assert_eq!(host.text(), "abc");
    }

    #[test]
    fn test_current_line() {
        let mut host = MemoryHost::new("first\n  second line\nthird").with_offset_selections(&[(9, 9)]);
        let ctx = EditingContext::new(&mut host);
        assert_eq!(ctx.current_line().unwrap(), "  second line");
        assert_eq!(ctx.current_line_range().unwrap(), SelectionRange::new(6, 19));
    }

    #[test]
    fn test_selection_text_and_caret() {
        let mut host = MemoryHost::new("hello world").with_offset_selections(&[(11, 6)]);
        let mut ctx = EditingContext::new(&mut host);
        assert_eq!(ctx.selection().unwrap(), "world");
        assert_eq!(ctx.caret_pos().unwrap(), 6);
        assert!(ctx.has_selection());

        ctx.set_caret_pos(2).unwrap();
        assert!(!ctx.has_selection());
        assert_eq!(ctx.selection_range().unwrap(), SelectionRange::caret(2));
    }

    #[test]
    fn test_syntax_from_table_and_detector() {
        let mut html = MemoryHost::new("").with_mode("text/html");
        assert_eq!(EditingContext::new(&mut html).syntax(), "html");

        let mut scss = MemoryHost::new("").with_mode("text/x-scss");
        assert_eq!(EditingContext::new(&mut scss).syntax(), "scss");

        let mut none = MemoryHost::new("");
        assert_eq!(EditingContext::new(&mut none).syntax(), "html");
    }

    #[test]
    fn test_profile_prefers_host_override() {
        let mut host = MemoryHost::new("").with_mode("application/xml").with_profile("line");
        assert_eq!(EditingContext::new(&mut host).profile_name(), "line");

        let mut host = MemoryHost::new("").with_mode("application/xml");
        assert_eq!(EditingContext::new(&mut host).profile_name(), "xml");

        let mut host = MemoryHost::new("").with_mode("text/css");
        let ctx = EditingContext::new(&mut host).with_default_profile(Some("plain"));
        assert_eq!(ctx.profile_name(), "plain");
    }

    #[test]
    fn test_indentation_follows_host() {
        let mut host = MemoryHost::new("").with_indent_style(IndentStyle::Spaces(4));
        assert_eq!(EditingContext::new(&mut host).indentation(), "    ");
    }
}
