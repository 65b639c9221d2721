//! Error types for the emitter.
//!
//! Malformed input (links without `href`, images without `src`, tags the
//! emitter has no renderer for) is never an error; those render leniently.
//! The variants below signal a broken traversal invariant instead.

use crate::tree::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    /// A `tr` node was rendered while no table was being built.
    #[error("table row {0} rendered outside of a table")]
    RowOutsideTable(NodeId),

    /// A `th` / `td` node was rendered while no table row was open.
    #[error("table cell {0} rendered outside of a table row")]
    CellOutsideRow(NodeId),

    /// A node id that does not belong to the tree being rendered.
    #[error("node {0} is not part of the document tree")]
    UnknownNode(NodeId),
}

/// Result type alias for emitter operations.
pub type Result<T> = std::result::Result<T, EmitError>;
