//! Configurable keyboard mapping for engine actions
//!
//! This module provides a data-driven keybinding system that:
//! - Maps host key strings (`Shift-Cmd-D`) to engine actions
//! - Rewrites the `Cmd` modifier to `Ctrl` off macOS
//! - Enables user customization via YAML config files
//!
//! # Architecture
//!
//! ```text
//! host key event → Keystroke → Keymap::lookup() → action → Dispatcher
//! ```
//!
//! # Loading Keymaps
//!
//! ```ignore
//! // Embedded defaults merged with ~/.config/editbridge/keymap.yaml
//! let keymap = Keymap::with_bindings(load_default_keymap(Platform::current()));
//! ```

mod binding;
mod config;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::{action_for_command, command_id, Keybinding, COMMAND_PREFIX, UNBOUND};
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use defaults::{
    default_bindings, get_default_keymap_yaml, load_default_keymap, load_keymap_with_overrides,
    merge_bindings,
};
pub use keymap::Keymap;
pub use types::{KeyCode, Keystroke, Modifiers, Platform};
