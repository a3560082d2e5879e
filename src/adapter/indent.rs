//! Indentation normalizer for engine-produced text blocks.
//!
//! Engine output is indented with whatever unit the engine likes. Before it
//! lands in the document, every leading whitespace run is converted into
//! nesting levels and re-emitted with the host's own unit, then the block is
//! re-based onto the indentation of the line it is inserted into.

use serde::{Deserialize, Serialize};

/// The host's preferred indentation unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    #[default]
    Tabs,
    Spaces(usize),
}

impl IndentStyle {
    /// One level of indentation as text
    pub fn unit(&self) -> String {
        match self {
            IndentStyle::Tabs => "\t".to_string(),
            IndentStyle::Spaces(width) => " ".repeat(*width),
        }
    }
}

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Width of one space-indent level in this block: the narrowest run of
/// leading spaces (after any tabs) on a non-blank line.
fn space_unit(text: &str) -> Option<usize> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            leading_whitespace(line)
                .trim_start_matches('\t')
                .chars()
                .take_while(|&c| c == ' ')
                .count()
        })
        .filter(|&n| n > 0)
        .min()
}

/// Rewrite every line's leading whitespace in the host's unit, preserving
/// relative nesting depth.
pub fn normalize(text: &str, style: IndentStyle) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }

    let unit = style.unit();
    let space_unit = space_unit(text).unwrap_or(1);

    text.split('\n')
        .map(|line| {
            let lead = leading_whitespace(line);
            if lead.is_empty() {
                return line.to_string();
            }
            let tabs = lead.chars().filter(|&c| c == '\t').count();
            let spaces = lead.len() - tabs;
            let depth = tabs + spaces / space_unit;
            let rest = spaces % space_unit;
            format!(
                "{}{}{}",
                unit.repeat(depth),
                " ".repeat(rest),
                &line[lead.len()..]
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix every line except the first with `pad`.
pub fn pad(text: &str, pad: &str) -> String {
    if pad.is_empty() {
        return text.to_string();
    }
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Leading whitespace of the line containing char `offset` in `content`.
pub fn line_padding_at(content: &str, offset: usize) -> String {
    let byte = content
        .char_indices()
        .nth(offset)
        .map(|(i, _)| i)
        .unwrap_or(content.len());
    let line_start = content[..byte].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = content[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(content.len());
    leading_whitespace(&content[line_start..line_end]).to_string()
}
