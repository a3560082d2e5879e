//! Host integration: command registration and input routing.
//!
//! A [`Bridge`] owns the dispatcher and the keymap. `setup` registers one
//! host command per known action (`emmet.<action>`); keystrokes and command
//! invocations are then routed to the dispatcher.

use std::collections::BTreeMap;

use crate::config::BridgeConfig;
use crate::dispatch::{ActionMode, Dispatcher, Outcome};
use crate::engine::Engine;
use crate::host::Host;
use crate::keymap::{action_for_command, command_id, load_default_keymap, Keymap, Keystroke, Platform};

/// A host command created by [`Bridge::setup`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredCommand {
    /// `emmet.<action>`
    pub id: String,
    pub action: String,
    pub mode: ActionMode,
}

/// The set of commands registered with the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationHandle {
    commands: Vec<RegisteredCommand>,
}

impl RegistrationHandle {
    pub fn commands(&self) -> &[RegisteredCommand] {
        &self.commands
    }

    pub fn get(&self, id: &str) -> Option<&RegisteredCommand> {
        self.commands.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Connects a host to an engine.
pub struct Bridge {
    dispatcher: Dispatcher,
    keymap: Keymap,
    registration: Option<RegistrationHandle>,
}

impl Bridge {
    pub fn new(dispatcher: Dispatcher, keymap: Keymap) -> Self {
        Self {
            dispatcher,
            keymap,
            registration: None,
        }
    }

    /// Bridge configured from the user's config and keymap files
    pub fn from_user_config(engine: Box<dyn Engine>, platform: Platform) -> Self {
        let config = BridgeConfig::load();
        Self::new(
            Dispatcher::from_config(engine, &config),
            Keymap::with_bindings(load_default_keymap(platform)),
        )
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Mutable keymap for runtime add/remove; commands for new actions
    /// need a fresh `setup` on a new bridge.
    pub fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    pub fn is_set_up(&self) -> bool {
        self.registration.is_some()
    }

    /// Register a command for every bound action and every engine action.
    ///
    /// Calling this again returns the existing registration unchanged.
    pub fn setup(&mut self) -> &RegistrationHandle {
        if self.registration.is_some() {
            tracing::debug!("Bridge already set up, keeping existing registration");
        }

        let dispatcher = &self.dispatcher;
        let keymap = &self.keymap;
        self.registration.get_or_insert_with(|| {
            let mut actions: BTreeMap<String, ActionMode> = BTreeMap::new();
            let bound = keymap.bindings().iter().map(|b| b.action.clone());
            let known = dispatcher.engine().actions().into_iter().map(|a| a.name);
            for action in bound.chain(known) {
                let mode = dispatcher.mode(&action);
                actions.entry(action).or_insert(mode);
            }

            let commands: Vec<RegisteredCommand> = actions
                .into_iter()
                .map(|(action, mode)| RegisteredCommand {
                    id: command_id(&action),
                    action,
                    mode,
                })
                .collect();

            tracing::info!("Registered {} host commands", commands.len());
            RegistrationHandle { commands }
        })
    }

    /// Route a key event. Unbound keys are deferred to the host.
    pub fn handle_keystroke(&self, host: &mut dyn Host, keystroke: Keystroke) -> Outcome {
        match self.keymap.lookup(&keystroke) {
            Some(binding) => self.run_command(host, &binding.command_id()),
            None => Outcome::Deferred,
        }
    }

    /// Run a registered `emmet.<action>` command
    pub fn run_command(&self, host: &mut dyn Host, command: &str) -> Outcome {
        let Some(registration) = &self.registration else {
            tracing::warn!("Command {} invoked before setup", command);
            return Outcome::Deferred;
        };

        let Some(registered) = registration.get(command) else {
            tracing::debug!("Command {} is not registered", command);
            return Outcome::Deferred;
        };

        let Some(action) = action_for_command(&registered.id) else {
            return Outcome::Deferred;
        };
        self.dispatcher.dispatch(action, host).outcome
    }
}
