//! Host-side text primitives.
//!
//! These are the pieces a host editing surface is made of, as far as the
//! adapter is concerned:
//!
//! - [`TextBuffer`] / [`TextBufferMut`]: offset-addressable document storage
//! - [`RopeBuffer`]: the `ropey::Rope` backed implementation
//! - [`Position`]: line/column coordinates
//! - [`Selection`]: anchor/head selection in host orientation
//! - [`EditHistory`]: undo/redo grouped into batch transactions

mod buffer;
mod history;
mod position;
mod selection;

pub use buffer::{RopeBuffer, TextBuffer, TextBufferMut};
pub use history::{EditHistory, EditOperation, Transaction};
pub use position::Position;
pub use selection::Selection;
