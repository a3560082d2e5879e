//! Command-line interface for inspecting the bridge
//!
//! Supports:
//! - Printing the resolved keymap for a platform
//! - Printing the action mode table
//! - Running tab-stop extraction and re-indentation on ad-hoc input

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::adapter::{indent, tabstops, IndentStyle};
use crate::config::BridgeConfig;
use crate::dispatch::ActionTable;
use crate::keymap::{load_default_keymap, load_keymap_with_overrides, Keymap, Platform};

/// Editor adapter and action dispatcher tooling
#[derive(Parser, Debug)]
#[command(name = "editbridge", version, about = "Editor adapter and action dispatcher tooling")]
pub struct CliArgs {
    /// Config file to use instead of ~/.config/editbridge/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Print the resolved keymap
    Keymap {
        /// Platform flavor for the Cmd modifier
        #[arg(long, value_enum)]
        platform: Option<PlatformArg>,

        /// Keymap overrides to merge instead of the user keymap
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Print every bound action with its dispatch mode
    Actions,

    /// Extract tab stops from TEXT and print the result
    Tabstops {
        text: String,
    },

    /// Re-indent stdin for the given style
    Indent {
        /// Indent with tabs (default)
        #[arg(long, conflicts_with = "spaces")]
        tabs: bool,

        /// Indent with N spaces
        #[arg(long, value_name = "N")]
        spaces: Option<usize>,

        /// Padding added to every line but the first
        #[arg(long, default_value = "")]
        prefix: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PlatformArg {
    Mac,
    Other,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Mac => Platform::Mac,
            PlatformArg::Other => Platform::Other,
        }
    }
}

impl CliArgs {
    fn bridge_config(&self) -> BridgeConfig {
        match &self.config {
            Some(path) => BridgeConfig::load_from(path),
            None => BridgeConfig::load(),
        }
    }

    /// Run the subcommand, reading `input` for commands that take stdin
    pub fn run(&self, input: &str, out: &mut impl Write) -> anyhow::Result<()> {
        match &self.command {
            CliCommand::Keymap { platform, file } => {
                let platform = platform.map(Platform::from).unwrap_or_else(Platform::current);
                let bindings = match file {
                    Some(path) => load_keymap_with_overrides(path, platform),
                    None => load_default_keymap(platform),
                };
                for binding in Keymap::with_bindings(bindings).bindings() {
                    writeln!(out, "{:<20} {}", binding.keystroke.to_string(), binding.command_id())?;
                }
            }
            CliCommand::Actions => {
                let config = self.bridge_config();
                let table = ActionTable::with_single(&config.single_selection_actions);
                let keymap = Keymap::with_bindings(load_default_keymap(Platform::current()));

                let actions: BTreeSet<&str> = keymap
                    .bindings()
                    .iter()
                    .map(|b| b.action.as_str())
                    .chain(config.single_selection_actions.iter().map(String::as_str))
                    .collect();
                for action in actions {
                    writeln!(out, "{:<36} {}", action, table.mode(action))?;
                }
            }
            CliCommand::Tabstops { text } => {
                let data = tabstops::extract(text, &tabstops::literal_escape);
                writeln!(out, "{}", data.text)?;
                for stop in &data.tabstops {
                    writeln!(out, "${} {}..{}", stop.group, stop.start, stop.end)?;
                }
            }
            CliCommand::Indent {
                tabs,
                spaces,
                prefix,
            } => {
                let style = match (*tabs, *spaces) {
                    (false, Some(n)) => IndentStyle::Spaces(n),
                    _ => IndentStyle::Tabs,
                };
                let text = input.strip_suffix('\n').unwrap_or(input);
                let normalized = indent::normalize(text, style);
                writeln!(out, "{}", indent::pad(&normalized, prefix))?;
            }
        }
        Ok(())
    }

    /// Whether the subcommand reads stdin
    pub fn reads_stdin(&self) -> bool {
        matches!(self.command, CliCommand::Indent { .. })
    }
}
