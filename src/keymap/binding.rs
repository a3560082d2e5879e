//! Keybinding struct mapping a keystroke to an engine action

use super::types::Keystroke;

/// Prefix of every host command id registered by the bridge
pub const COMMAND_PREFIX: &str = "emmet.";

/// Action name that removes a default binding in user keymaps
pub const UNBOUND: &str = "unbound";

/// Host command id for `action`, e.g. `emmet.balance_outward`
pub fn command_id(action: &str) -> String {
    format!("{}{}", COMMAND_PREFIX, action)
}

/// Action name behind a host command id
pub fn action_for_command(command: &str) -> Option<&str> {
    command
        .strip_prefix(COMMAND_PREFIX)
        .filter(|action| !action.is_empty())
}

/// A single keybinding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    /// Engine action name
    pub action: String,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, action: &str) -> Self {
        Self {
            keystroke,
            action: action.to_string(),
        }
    }

    pub fn command_id(&self) -> String {
        command_id(&self.action)
    }

    /// Whether this entry removes a binding instead of adding one
    pub fn is_unbound(&self) -> bool {
        self.action == UNBOUND
    }
}
