//! Error types for the one fallible boundary in the crate: reading a mesh file.
//!
//! Everything else — point location, pathfinding, agent control — signals
//! failure with `bool`/`Option`/empty `Vec` per the core's "no exceptions"
//! design; a malformed file on disk is the one condition that genuinely
//! warrants a typed error instead of a sentinel.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshIoError {
    #[error("i/o error reading navmesh file: {0}")]
    Io(#[from] std::io::Error),

    #[error("navmesh file malformed: edge_count ({edge_count}) does not match tri_count ({tri_count})")]
    EdgeCountMismatch { tri_count: u64, edge_count: u64 },
}
