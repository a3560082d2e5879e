//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into Keybinding structs:
//!
//! ```yaml
//! bindings:
//!   - key: Shift-Cmd-D
//!     action: balance_inward
//!   - key: Ctrl-Alt-Right
//!     action: next_edit_point
//!     platform: macos
//! ```

use std::path::Path;

use serde::Deserialize;

use super::binding::{action_for_command, Keybinding};
use super::types::{KeyCode, Keystroke, Modifiers, Platform};

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    /// Action name, with or without the `emmet.` prefix
    pub action: String,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path, platform: Platform) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content, platform)
}

/// Parse keybindings from YAML string
pub fn parse_keymap_yaml(yaml: &str, platform: Platform) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let mut bindings = Vec::with_capacity(config.bindings.len());

    for entry in config.bindings {
        // Skip if platform-specific and doesn't match
        if let Some(ref tag) = entry.platform {
            if !platform.matches(tag) {
                continue;
            }
        }

        let keystroke = parse_key_string(&entry.key, platform)?;
        let action = parse_action(&entry.action)?;
        bindings.push(Keybinding::new(keystroke, action));
    }

    Ok(bindings)
}

/// Parse a host key string like "Shift-Cmd-D" into a Keystroke.
///
/// `Cmd` is the platform command key: the meta key on macOS, `Ctrl`
/// elsewhere. A trailing `-` key is written `Cmd--`.
pub fn parse_key_string(key_str: &str, platform: Platform) -> Result<Keystroke, KeymapError> {
    let (mods_part, key_part) = if key_str == "-" {
        ("", "-")
    } else if let Some(rest) = key_str.strip_suffix("--") {
        (rest, "-")
    } else {
        key_str.rsplit_once('-').unwrap_or(("", key_str))
    };

    if key_part.is_empty() {
        return Err(KeymapError::InvalidKey(format!(
            "No key found in binding: {}",
            key_str
        )));
    }

    let mut mods = Modifiers::NONE;
    for part in mods_part.split('-').filter(|p| !p.is_empty()) {
        match part.to_lowercase().as_str() {
            "cmd" => {
                mods = mods | Modifiers::cmd_for(platform);
            }
            "ctrl" | "control" => {
                mods = mods | Modifiers::CTRL;
            }
            "shift" => {
                mods = mods | Modifiers::SHIFT;
            }
            "alt" | "option" | "opt" => {
                mods = mods | Modifiers::ALT;
            }
            "meta" | "super" | "win" => {
                mods = mods | Modifiers::META;
            }
            _ => {
                return Err(KeymapError::InvalidKey(format!(
                    "Unknown modifier '{}' in binding: {}",
                    part, key_str
                )));
            }
        }
    }

    Ok(Keystroke::new(parse_key_code(key_part)?, mods))
}

/// Parse a key code from string
fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c.to_ascii_lowercase()));
    }

    let lower = key.to_lowercase();
    match lower.as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "space" => Ok(KeyCode::Space),

        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),

        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" => Ok(KeyCode::PageUp),
        "pagedown" => Ok(KeyCode::PageDown),

        _ => lower
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=24).contains(n))
            .map(KeyCode::F)
            .ok_or_else(|| KeymapError::InvalidKey(format!("Unknown key: {}", key))),
    }
}

/// Validate an action name; `emmet.`-prefixed command ids are accepted
fn parse_action(action: &str) -> Result<&str, KeymapError> {
    let name = action_for_command(action).unwrap_or(action);
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(name)
    } else {
        Err(KeymapError::InvalidAction(action.to_string()))
    }
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidAction(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidAction(a) => write!(f, "Invalid action: {}", a),
        }
    }
}

impl std::error::Error for KeymapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let stroke = parse_key_string("Tab", Platform::Other).unwrap();
        assert_eq!(stroke.key, KeyCode::Tab);
        assert!(stroke.mods.is_empty());
    }

    #[test]
    fn test_parse_cmd_per_platform() {
        let mac = parse_key_string("Shift-Cmd-D", Platform::Mac).unwrap();
        assert_eq!(mac.key, KeyCode::Char('d'));
        assert!(mac.mods.meta() && mac.mods.shift());
        assert!(!mac.mods.ctrl());

        let other = parse_key_string("Shift-Cmd-D", Platform::Other).unwrap();
        assert!(other.mods.ctrl() && other.mods.shift());
        assert!(!other.mods.meta());
    }

    #[test]
    fn test_parse_punctuation_keys() {
        let stroke = parse_key_string("Shift-Cmd-.", Platform::Mac).unwrap();
        assert_eq!(stroke.key, KeyCode::Char('.'));

        let stroke = parse_key_string("Cmd-/", Platform::Mac).unwrap();
        assert_eq!(stroke.key, KeyCode::Char('/'));

        let stroke = parse_key_string("Ctrl--", Platform::Mac).unwrap();
        assert_eq!(stroke.key, KeyCode::Char('-'));
        assert!(stroke.mods.ctrl());
    }

    #[test]
    fn test_parse_named_and_function_keys() {
        let stroke = parse_key_string("Ctrl-Alt-Right", Platform::Other).unwrap();
        assert_eq!(stroke.key, KeyCode::Right);
        assert!(stroke.mods.ctrl() && stroke.mods.alt());

        assert_eq!(parse_key_string("F5", Platform::Other).unwrap().key, KeyCode::F(5));
        assert_eq!(parse_key_string("Enter", Platform::Other).unwrap().key, KeyCode::Enter);
    }

    #[test]
    fn test_parse_invalid_keys() {
        assert!(matches!(
            parse_key_string("Hyper-D", Platform::Other),
            Err(KeymapError::InvalidKey(_))
        ));
        assert!(parse_key_string("Cmd-Banana", Platform::Other).is_err());
        assert!(parse_key_string("Cmd-", Platform::Other).is_err());
        assert!(parse_key_string("F99", Platform::Other).is_err());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
bindings:
  - key: Cmd-E
    action: expand_abbreviation
  - key: Cmd-M
    action: emmet.matching_pair
"#;

        let bindings = parse_keymap_yaml(yaml, Platform::Other).unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].action, "expand_abbreviation");
        assert_eq!(bindings[1].action, "matching_pair");
        assert!(bindings[1].keystroke.mods.ctrl());
    }

    #[test]
    fn test_parse_yaml_with_platform() {
        let yaml = r#"
bindings:
  - key: Cmd-E
    action: expand_abbreviation
  - key: Meta-Left
    action: prev_edit_point
    platform: macos
"#;

        assert_eq!(parse_keymap_yaml(yaml, Platform::Mac).unwrap().len(), 2);
        assert_eq!(parse_keymap_yaml(yaml, Platform::Other).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_yaml_rejects_bad_action() {
        let yaml = "bindings:\n  - key: Cmd-E\n    action: Expand Abbreviation\n";
        assert!(matches!(
            parse_keymap_yaml(yaml, Platform::Other),
            Err(KeymapError::InvalidAction(_))
        ));
    }

    #[test]
    fn test_parse_yaml_syntax_error() {
        assert!(matches!(
            parse_keymap_yaml("bindings: [", Platform::Other),
            Err(KeymapError::ParseError(_))
        ));
    }
}
