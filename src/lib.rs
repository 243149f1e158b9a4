//! A 2D navigation-mesh runtime: triangle geometry, point location, the
//! A*-plus-funnel pathfinder, and agent kinematics for consuming the
//! resulting path.
//!
//! Mesh *generation* (marching squares, flood fill, Delaunay triangulation,
//! Douglas-Peucker simplification) is out of scope — this crate consumes a
//! mesh someone else built, whether authored by hand or read from the binary
//! format in [`io`].

pub mod agent;
pub mod batch;
pub mod error;
pub mod funnel;
pub mod geometry;
pub mod io;
pub mod mesh;
