//! Default keybindings
//!
//! The defaults ship embedded from keymap.yaml at the project root. A
//! hardcoded table is kept as a fallback should the embedded file ever fail
//! to parse.

use std::path::Path;

use super::binding::Keybinding;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::types::{KeyCode, Keystroke, Modifiers, Platform};

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// The embedded default keymap, for display or as a template
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps: defaults + user overrides
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default keymap (compiled into binary)
/// 2. User config at ~/.config/editbridge/keymap.yaml
///
/// User bindings with `action: unbound` remove matching default bindings.
pub fn load_default_keymap(platform: Platform) -> Vec<Keybinding> {
    let bindings = embedded_bindings(platform);

    match crate::config_paths::keymap_file() {
        Some(user_path) if user_path.exists() => load_user_keymap(bindings, &user_path, platform),
        _ => bindings,
    }
}

/// Merge the keymap file at `path` over the embedded defaults
pub fn load_keymap_with_overrides(path: &Path, platform: Platform) -> Vec<Keybinding> {
    load_user_keymap(embedded_bindings(platform), path, platform)
}

fn embedded_bindings(platform: Platform) -> Vec<Keybinding> {
    match parse_keymap_yaml(DEFAULT_KEYMAP_YAML, platform) {
        Ok(b) => {
            tracing::info!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings(platform)
        }
    }
}

fn load_user_keymap(base: Vec<Keybinding>, path: &Path, platform: Platform) -> Vec<Keybinding> {
    match load_keymap_file(path, platform) {
        Ok(user_bindings) => {
            tracing::info!(
                "Merging user keymap from {} ({} bindings)",
                path.display(),
                user_bindings.len()
            );
            merge_bindings(base, user_bindings)
        }
        Err(e) => {
            tracing::warn!("Failed to load user keymap from {}: {}", path.display(), e);
            base
        }
    }
}

/// Merge user bindings into base bindings
///
/// - If user binding action is `unbound` → removes base bindings for that keystroke
/// - If user binding has the same keystroke → replaces base
/// - Otherwise → user binding is added
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.is_unbound() {
            result.retain(|b| b.keystroke != user_binding.keystroke);
            continue;
        }

        match result
            .iter()
            .position(|b| b.keystroke == user_binding.keystroke)
        {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded defaults, mirroring keymap.yaml
pub fn default_bindings(platform: Platform) -> Vec<Keybinding> {
    let cmd = Modifiers::cmd_for(platform);
    let cmd_shift = cmd | Modifiers::SHIFT;
    let ctrl = Modifiers::CTRL;
    let ctrl_alt = Modifiers::CTRL | Modifiers::ALT;
    let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;
    let none = Modifiers::NONE;

    vec![
        // Abbreviations
        bind(KeyCode::Char('e'), cmd, "expand_abbreviation"),
        bind(KeyCode::Tab, none, "expand_abbreviation_with_tab"),
        bind(KeyCode::Char('a'), cmd_shift, "wrap_with_abbreviation"),
        bind(KeyCode::Enter, none, "insert_formatted_line_break_only"),
        // Tag navigation and structure
        bind(KeyCode::Char('d'), cmd, "balance_outward"),
        bind(KeyCode::Char('d'), cmd_shift, "balance_inward"),
        bind(KeyCode::Char('m'), cmd, "matching_pair"),
        bind(KeyCode::Char('j'), cmd, "split_join_tag"),
        bind(KeyCode::Char('k'), cmd, "remove_tag"),
        // Edit points and items
        bind(KeyCode::Right, ctrl_alt, "next_edit_point"),
        bind(KeyCode::Left, ctrl_alt, "prev_edit_point"),
        bind(KeyCode::Char('.'), cmd_shift, "select_next_item"),
        bind(KeyCode::Char(','), cmd_shift, "select_previous_item"),
        // Lines and comments
        bind(KeyCode::Char('l'), cmd, "select_line"),
        bind(KeyCode::Char('m'), cmd_shift, "merge_lines"),
        bind(KeyCode::Char('/'), cmd, "toggle_comment"),
        // Numbers and CSS
        bind(KeyCode::Char('y'), cmd_shift, "evaluate_math_expression"),
        bind(KeyCode::Up, ctrl, "increment_number_by_1"),
        bind(KeyCode::Down, ctrl, "decrement_number_by_1"),
        bind(KeyCode::Up, ctrl_alt, "increment_number_by_01"),
        bind(KeyCode::Down, ctrl_alt, "decrement_number_by_01"),
        bind(KeyCode::Up, ctrl_shift, "increment_number_by_10"),
        bind(KeyCode::Down, ctrl_shift, "decrement_number_by_10"),
        bind(KeyCode::Char('b'), cmd, "reflect_css_value"),
    ]
}

fn bind(key: KeyCode, mods: Modifiers, action: &str) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), action)
}
