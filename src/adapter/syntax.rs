//! Syntax and output-profile resolution.
//!
//! A host mode id is first looked up in a fixed table. Anything the table
//! does not know is handed to a [`Detector`], the external collaborator that
//! owns the real detection heuristics.

use std::collections::BTreeMap;

use super::context::EditingContext;

/// Host mode ids the engine understands without detection
const DEFAULT_MODES: &[(&str, &str)] = &[
    ("text/html", "html"),
    ("application/xml", "xml"),
    ("text/xsl", "xsl"),
    ("text/css", "css"),
    ("text/x-less", "less"),
];

/// Mode id -> engine syntax name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTable {
    modes: BTreeMap<String, String>,
}

impl SyntaxTable {
    /// Table with extra entries layered over the defaults
    pub fn with_extra<'a>(extra: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut table = Self::default();
        for (mode, syntax) in extra {
            table.modes.insert(mode.clone(), syntax.clone());
        }
        table
    }

    pub fn lookup(&self, mode: &str) -> Option<&str> {
        self.modes.get(mode).map(String::as_str)
    }
}

impl Default for SyntaxTable {
    fn default() -> Self {
        Self {
            modes: DEFAULT_MODES
                .iter()
                .map(|(mode, syntax)| (mode.to_string(), syntax.to_string()))
                .collect(),
        }
    }
}

/// External syntax/profile detection.
pub trait Detector {
    /// Syntax for a mode the table does not map. `hint` is the raw host mode.
    fn detect_syntax(&self, ctx: &EditingContext<'_>, hint: Option<&str>) -> String;

    /// Output profile when the host has no override
    fn detect_profile(&self, ctx: &EditingContext<'_>) -> String;
}

/// Minimal detector: derives the syntax from the mode id itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDetector;

impl Detector for DefaultDetector {
    fn detect_syntax(&self, _ctx: &EditingContext<'_>, hint: Option<&str>) -> String {
        let Some(hint) = hint.filter(|h| !h.is_empty()) else {
            return "html".to_string();
        };
        let name = hint.rsplit('/').next().unwrap_or(hint);
        let name = name.strip_prefix("x-").unwrap_or(name);
        match name {
            "htmlmixed" | "xhtml" => "html".to_string(),
            other => other.to_lowercase(),
        }
    }

    fn detect_profile(&self, ctx: &EditingContext<'_>) -> String {
        match ctx.syntax().as_str() {
            "xml" | "xsl" => "xml".to_string(),
            "html" => {
                let head = ctx.content().chars().take(512).collect::<String>();
                if head.contains("XHTML") {
                    "xhtml".to_string()
                } else {
                    "html".to_string()
                }
            }
            _ => "xhtml".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = SyntaxTable::default();
        assert_eq!(table.lookup("text/html"), Some("html"));
        assert_eq!(table.lookup("text/x-less"), Some("less"));
        assert_eq!(table.lookup("text/x-scss"), None);
    }

    #[test]
    fn test_extra_entries_override_and_extend() {
        let extra: BTreeMap<String, String> = [
            ("text/x-scss".to_string(), "scss".to_string()),
            ("text/html".to_string(), "xhtml".to_string()),
        ]
        .into_iter()
        .collect();
        let table = SyntaxTable::with_extra(&extra);
        assert_eq!(table.lookup("text/x-scss"), Some("scss"));
        assert_eq!(table.lookup("text/html"), Some("xhtml"));
        assert_eq!(table.lookup("text/css"), Some("css"));
    }
}
