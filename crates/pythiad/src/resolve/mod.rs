//! Coordinate parsing and translation.
//!
//! Two coordinate systems reach the server: absolute positions
//! (`path:#N[,#N2]`, see [`QueryPos`]) that the oracle understands directly,
//! and human selections (`L1.C1-L2.C2`, see [`SelectionRange`]) that must be
//! translated against the current content of a file. File content is read
//! fresh for every request, so nothing here is cached.

mod errors;
mod line_index;
mod position;
mod selection;

pub use errors::ResolveError;
pub use line_index::{LineColumn, LineIndex};
pub use position::QueryPos;
pub use selection::SelectionRange;
