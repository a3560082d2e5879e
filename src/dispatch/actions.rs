//! Static action classification.
//!
//! Every action runs either once (against the first selection) or once per
//! selection. A few actions also carry pass-through rules that hand the key
//! back to the host.

use std::collections::BTreeSet;

/// Expands an abbreviation on Tab, or falls back to a plain Tab
pub const EXPAND_WITH_TAB: &str = "expand_abbreviation_with_tab";

/// Inserts a formatted line break on Enter, or falls back to a plain Enter
pub const FORMATTED_LINE_BREAK: &str = "insert_formatted_line_break_only";

/// Actions that only make sense for one selection at a time
pub const SINGLE_SELECTION_ACTIONS: &[&str] = &[
    "prev_edit_point",
    "next_edit_point",
    "merge_lines",
    "reflect_css_value",
    "select_next_item",
    "select_previous_item",
    "wrap_with_abbreviation",
    "update_tag",
    FORMATTED_LINE_BREAK,
];

/// How many times an action runs per dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMode {
    /// Once, against selection 0
    Single,
    /// Once per selection, in host order
    PerSelection,
}

impl std::fmt::Display for ActionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionMode::Single => write!(f, "single"),
            ActionMode::PerSelection => write!(f, "per-selection"),
        }
    }
}

/// Pass-through rules for one action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassRules {
    /// Defer to the host when any selection is non-empty
    pub when_selected: bool,
    /// Defer to the host when the engine does not support the syntax
    pub when_unsupported_syntax: bool,
    /// Defer to the host when the engine reports it did nothing
    pub when_not_performed: bool,
}

/// Mode and pass-through lookup for action names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTable {
    single: BTreeSet<String>,
}

impl ActionTable {
    /// Defaults plus extra single-selection actions
    pub fn with_single<'a>(extra: impl IntoIterator<Item = &'a String>) -> Self {
        let mut table = Self::default();
        table.single.extend(extra.into_iter().cloned());
        table
    }

    pub fn mode(&self, action: &str) -> ActionMode {
        if self.single.contains(action) {
            ActionMode::Single
        } else {
            ActionMode::PerSelection
        }
    }

    pub fn pass_rules(&self, action: &str) -> PassRules {
        match action {
            EXPAND_WITH_TAB => PassRules {
                when_selected: true,
                when_unsupported_syntax: true,
                ..PassRules::default()
            },
            FORMATTED_LINE_BREAK => PassRules {
                when_not_performed: true,
                ..PassRules::default()
            },
            _ => PassRules::default(),
        }
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        Self {
            single: SINGLE_SELECTION_ACTIONS
                .iter()
                .map(|a| a.to_string())
                .collect(),
        }
    }
}
