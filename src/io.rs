//! Binary mesh file format: little-endian, tightly packed.
//!
//! ```text
//! u64 tri_count
//! tri_count × { u64 A, u64 B, u64 C }
//! u64 vert_count
//! vert_count × { f32 x, f32 y }          // divided by scale on write, multiplied on read
//! u64 edge_count                         // == tri_count
//! edge_count × (3 × Edge record)         // fixed 3 slots per triangle
//!   Edge = { u64 index, f32 cx, f32 cy, u64 a, u64 b }
//!   Unused slots: index = u64::MAX (all-ones sentinel)
//! ```
//!
//! The reader omits sentinel slots from the in-memory adjacency list,
//! yielding variable-length lists of 0-3 entries per triangle. Mesh
//! *generation* lives outside this crate; only the wire format round-trips
//! here.

use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::MeshIoError;
use crate::geometry::Vector2f;
use crate::mesh::{Edge, NavMesh, Triangle};

const SENTINEL: u64 = u64::MAX;

pub fn write_file(mesh: &NavMesh, path: impl AsRef<Path>, scale: f32) -> Result<(), MeshIoError> {
    let file = std::fs::File::create(path)?;
    let mut w = BufWriter::new(file);

    write_u64(&mut w, mesh.triangles.len() as u64)?;
    for tri in &mesh.triangles {
        write_u64(&mut w, tri.a as u64)?;
        write_u64(&mut w, tri.b as u64)?;
        write_u64(&mut w, tri.c as u64)?;
    }

    write_u64(&mut w, mesh.vertices.len() as u64)?;
    for v in &mesh.vertices {
        write_f32(&mut w, v.x / scale)?;
        write_f32(&mut w, v.y / scale)?;
    }

    write_u64(&mut w, mesh.edges.len() as u64)?;
    for slots in &mesh.edges {
        for i in 0..3 {
            match slots.get(i) {
                Some(e) => {
                    write_u64(&mut w, e.index as u64)?;
                    write_f32(&mut w, e.center.x)?;
                    write_f32(&mut w, e.center.y)?;
                    write_u64(&mut w, e.a as u64)?;
                    write_u64(&mut w, e.b as u64)?;
                }
                None => {
                    write_u64(&mut w, SENTINEL)?;
                    write_f32(&mut w, 0.0)?;
                    write_f32(&mut w, 0.0)?;
                    write_u64(&mut w, 0)?;
                    write_u64(&mut w, 0)?;
                }
            }
        }
    }

    w.flush()?;
    Ok(())
}

pub fn read_file(path: impl AsRef<Path>, scale: f32) -> Result<NavMesh, MeshIoError> {
    let file = std::fs::File::open(path)?;
    let mut r = BufReader::new(file);

    let tri_count = read_u64(&mut r)?;
    let mut triangles = Vec::with_capacity(tri_count as usize);
    for _ in 0..tri_count {
        let a = read_u64(&mut r)? as usize;
        let b = read_u64(&mut r)? as usize;
        let c = read_u64(&mut r)? as usize;
        triangles.push(Triangle::new(a, b, c));
    }

    let vert_count = read_u64(&mut r)?;
    let mut vertices = Vec::with_capacity(vert_count as usize);
    for _ in 0..vert_count {
        let x = read_f32(&mut r)? * scale;
        let y = read_f32(&mut r)? * scale;
        vertices.push(Vector2f::new(x, y));
    }

    let edge_count = read_u64(&mut r)?;
    if edge_count != tri_count {
        return Err(MeshIoError::EdgeCountMismatch {
            tri_count,
            edge_count,
        });
    }
    let mut edges = Vec::with_capacity(edge_count as usize);
    for _ in 0..edge_count {
        let mut slots = Vec::with_capacity(3);
        for _ in 0..3 {
            let index = read_u64(&mut r)?;
            let cx = read_f32(&mut r)?;
            let cy = read_f32(&mut r)?;
            let a = read_u64(&mut r)?;
            let b = read_u64(&mut r)?;
            if index != SENTINEL {
                slots.push(Edge {
                    index: index as usize,
                    center: Vector2f::new(cx, cy),
                    a: a as usize,
                    b: b as usize,
                });
            }
        }
        edges.push(slots);
    }

    Ok(NavMesh::new(vertices, triangles, edges))
}

fn write_u64(w: &mut impl Write, v: u64) -> std::io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

fn write_f32(w: &mut impl Write, v: f32) -> std::io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

fn read_u64(r: &mut impl Read) -> std::io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_f32(r: &mut impl Read) -> std::io::Result<f32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(f32::from_le_bytes(buf))
}
