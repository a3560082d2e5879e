//! Editor adapter: everything between the host and the engine.
//!
//! - [`codec`]: line/column <-> offset conversion
//! - [`selection`]: normalized selection ranges and single-entry updates
//! - [`EditingContext`]: the object the engine runs against
//! - [`syntax`]: mode table and the detection collaborator
//! - [`tabstops`]: placeholder extraction for caret placement
//! - [`indent`]: re-indentation of engine output

pub mod codec;
mod context;
pub mod indent;
pub mod selection;
pub mod syntax;
pub mod tabstops;

pub use context::EditingContext;
pub use indent::IndentStyle;
pub use selection::SelectionRange;
pub use syntax::{DefaultDetector, Detector, SyntaxTable};
pub use tabstops::{extract, literal_escape, EscapeFn, TabStop, TabStopData};
