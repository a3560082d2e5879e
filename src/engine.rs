//! The external transformation engine, as the dispatcher sees it.

use serde::{Deserialize, Serialize};

use crate::adapter::EditingContext;

/// An action the engine can perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInfo {
    pub name: String,
}

impl ActionInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Abbreviation/snippet engine.
///
/// `run` returns whether the action did something. Any error it returns is
/// an engine fault: the dispatcher logs it and moves on to the next
/// selection.
pub trait Engine {
    fn run(&self, action: &str, ctx: &mut EditingContext<'_>) -> anyhow::Result<bool>;

    /// Every action this engine knows
    fn actions(&self) -> Vec<ActionInfo>;

    /// Whether the engine can expand abbreviations for `syntax`
    fn supports_syntax(&self, _syntax: &str) -> bool {
        true
    }
}
