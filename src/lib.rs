//! editbridge - editor adapter and multi-selection action dispatcher
//!
//! This crate connects a host text-editing surface to an external
//! abbreviation/snippet engine. The host is described by the [`Host`] trait,
//! the engine by [`Engine`]; the [`Dispatcher`] runs engine actions once per
//! selection inside one undoable batch, and the [`Bridge`] wires host keys
//! and commands to it.

pub mod adapter;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod dispatch;
pub mod editable;
pub mod engine;
pub mod error;
pub mod host;
pub mod keymap;
pub mod tracing;

// Re-export commonly used types
pub use adapter::{EditingContext, IndentStyle, SelectionRange};
pub use bridge::{Bridge, RegistrationHandle};
pub use config::BridgeConfig;
pub use dispatch::{DispatchReport, Dispatcher, IterationResult, Outcome};
pub use engine::{ActionInfo, Engine};
pub use error::AdapterError;
pub use host::{Host, MemoryHost};
