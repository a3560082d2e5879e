//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use super::binding::Keybinding;
use super::config::parse_key_string;
use super::types::{Keystroke, Platform};

/// Keystroke -> action table. One action per keystroke; later bindings win.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    /// All registered bindings, in insertion order
    bindings: Vec<Keybinding>,
    /// Fast lookup (index into bindings)
    single_lookup: HashMap<Keystroke, usize>,
}

impl Keymap {
    /// Create an empty keymap
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keymap with the given bindings
    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        keymap.install(bindings);
        keymap
    }

    /// Add every binding, replacing whatever held the same keystrokes
    pub fn install(&mut self, bindings: impl IntoIterator<Item = Keybinding>) {
        for binding in bindings {
            self.add_binding(binding);
        }
    }

    /// Bind a keystroke to an action, replacing an existing binding for it
    pub fn add_binding(&mut self, binding: Keybinding) {
        if let Some(&idx) = self.single_lookup.get(&binding.keystroke) {
            tracing::debug!(
                "Rebinding {} from {} to {}",
                binding.keystroke,
                self.bindings[idx].action,
                binding.action
            );
            self.bindings[idx] = binding;
            return;
        }

        self.single_lookup
            .insert(binding.keystroke, self.bindings.len());
        self.bindings.push(binding);
    }

    /// Remove by key string (`Shift-Cmd-D`) or, failing that, by action name.
    ///
    /// Returns the number of bindings removed.
    pub fn remove_binding(&mut self, name: &str, platform: Platform) -> usize {
        let before = self.bindings.len();

        match parse_key_string(name, platform) {
            Ok(keystroke) if self.single_lookup.contains_key(&keystroke) => {
                self.bindings.retain(|b| b.keystroke != keystroke);
            }
            _ => self.bindings.retain(|b| b.action != name),
        }

        self.reindex();
        before - self.bindings.len()
    }

    /// Remove every binding
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.single_lookup.clear();
    }

    pub fn lookup(&self, keystroke: &Keystroke) -> Option<&Keybinding> {
        self.single_lookup
            .get(keystroke)
            .map(|&idx| &self.bindings[idx])
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// First binding for an action
    pub fn binding_for(&self, action: &str) -> Option<&Keybinding> {
        self.bindings.iter().find(|b| b.action == action)
    }

    /// Key string of an action's binding, for menus
    pub fn display_for(&self, action: &str) -> Option<String> {
        self.binding_for(action).map(|b| b.keystroke.to_string())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn reindex(&mut self) {
        self.single_lookup = self
            .bindings
            .iter()
            .enumerate()
            .map(|(idx, b)| (b.keystroke, idx))
            .collect();
    }
}
