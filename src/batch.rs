//! Parallel convenience over [`NavMesh::pathfind`].
//!
//! A `NavMesh` is immutable after construction and every query borrows it
//! read-only, so many agents can search it concurrently without locking —
//! this just hands that fact to `rayon`.

use rayon::prelude::*;

use crate::geometry::Vector2f;
use crate::mesh::{NavMesh, Path};

/// Runs [`NavMesh::pathfind`] for every `(begin, end)` pair in `queries` across
/// a `rayon` thread pool, preserving input order in the result.
pub fn pathfind_many(mesh: &NavMesh, queries: &[(Vector2f, Vector2f)]) -> Vec<Path> {
    queries
        .par_iter()
        .map(|&(begin, end)| mesh.pathfind(begin, end))
        .collect()
}
