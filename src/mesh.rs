//! The navigation mesh: triangle topology, point location, and the A* corridor
//! search that feeds the funnel algorithm in [`crate::funnel`].

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::funnel::{funnel, CrossInfo};
use crate::geometry::{sign, Vector2f};

/// Three vertex indices into a companion [`NavMesh::vertices`] array.
///
/// Winding order is not required to be consistent between triangles; every
/// predicate here is sign-agnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Triangle {
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    /// `true` iff `p` lies inside (or on the boundary of) this triangle.
    ///
    /// A point exactly on a shared edge counts as inside both neighbouring
    /// triangles — the caller of point location (see [`NavMesh::get_triangle`])
    /// breaks that tie by taking the first match. If `with_corners` is `false`,
    /// a point exactly equal to one of the three vertices is rejected.
    pub fn contains(&self, vertices: &[Vector2f], p: Vector2f, with_corners: bool) -> bool {
        let a = vertices[self.a];
        let b = vertices[self.b];
        let c = vertices[self.c];

        if !with_corners && (p == a || p == b || p == c) {
            return false;
        }

        let d1 = sign(p, a, b);
        let d2 = sign(p, b, c);
        let d3 = sign(p, c, a);

        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }

    /// Same test against the triangle dilated about its centroid by `(1 + error)`.
    ///
    /// Used as a fallback point-location pass so numerical drift at portals —
    /// an agent sitting exactly on a shared edge, or just outside every
    /// triangle due to float error — still resolves to some triangle.
    pub fn contains_with_error(&self, vertices: &[Vector2f], p: Vector2f, error: f32) -> bool {
        let center = self.centroid(vertices);
        let a = center + (vertices[self.a] - center) * (1.0 + error);
        let b = center + (vertices[self.b] - center) * (1.0 + error);
        let c = center + (vertices[self.c] - center) * (1.0 + error);

        let d1 = sign(p, a, b);
        let d2 = sign(p, b, c);
        let d3 = sign(p, c, a);

        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }

    /// Intersection of two medians.
    pub fn centroid(&self, vertices: &[Vector2f]) -> Vector2f {
        let a = vertices[self.a];
        let b = vertices[self.b];
        let c = vertices[self.c];

        let m1 = a + (b - a) / 2.0;
        let m2 = b + (c - b) / 2.0;
        let v1 = c - m1;
        let v2 = a - m2;

        let den = v1.x * -v2.y - v1.y * -v2.x;
        let k = m2.x - m1.x;
        let l = m2.y - m1.y;
        let l1 = (v2.x * l - v2.y * k) / den;

        m1 + v1 * l1
    }

    /// Intersection of two perpendicular bisectors.
    pub fn circumcenter(&self, vertices: &[Vector2f]) -> Vector2f {
        let a = vertices[self.a];
        let b = vertices[self.b];
        let c = vertices[self.c];

        let m1 = a + (b - a) / 2.0;
        let m2 = b + (c - b) / 2.0;
        let v1 = (b - a).perp_ccw();
        let v2 = (c - b).perp_ccw();

        let den = v1.x * -v2.y - v1.y * -v2.x;
        let k = m2.x - m1.x;
        let l = m2.y - m1.y;
        let l1 = (v2.x * l - v2.y * k) / den;

        m1 + v1 * l1
    }
}

/// A portal: the shared edge between a triangle and one of its neighbours.
///
/// `center` is the edge midpoint, used as the A* node position for every
/// triangle except the start. `a` and `b` are the edge's two vertex indices,
/// stored so that `a` is to the left and `b` to the right of travel when
/// crossing from the owning triangle into `index` — the orientation the
/// funnel algorithm depends on. This ordering is an input invariant,
/// established by whatever built the mesh's adjacency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub index: usize,
    pub center: Vector2f,
    pub a: usize,
    pub b: usize,
}

/// An ordered sequence of waypoints: first is the source, last the
/// destination, and any interior points are corners where the path bends.
pub type Path = Vec<Vector2f>;

/// A* search-frontier record: the triangle reached, how it was reached, and
/// its cost-to-date. `pos` is `begin` for the start node and otherwise the
/// portal center through which the triangle was first reached (spec §4.3).
#[derive(Clone, Copy)]
struct Node {
    id: usize,
    parent: usize,
    pos: Vector2f,
    g: f32,
    f: f32,
}

/// Min-heap wrapper: `BinaryHeap` is a max-heap, so ordering on `f_cost` is
/// inverted to pop the lowest-`f` node first.
struct HeapEntry(Node);

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.0.f == other.0.f
    }
}
impl Eq for HeapEntry {}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.f.partial_cmp(&self.0.f).unwrap_or(Ordering::Equal)
    }
}

/// A triangulated 2D region with precomputed inter-triangle adjacency.
///
/// Immutable after construction. Point location and pathfinding borrow `&self`
/// only, so a single `NavMesh` may be queried by many agents without
/// synchronization (see [`crate::batch`] for a parallel convenience over this
/// fact).
#[derive(Clone, Debug, Default)]
pub struct NavMesh {
    pub vertices: Vec<Vector2f>,
    pub triangles: Vec<Triangle>,
    pub edges: Vec<Vec<Edge>>,
}

impl NavMesh {
    /// Low-level constructor: vertices, triangles, and their per-triangle
    /// portal lists must already be mutually consistent (see crate docs for
    /// the exact invariants assumed).
    pub fn new(vertices: Vec<Vector2f>, triangles: Vec<Triangle>, edges: Vec<Vec<Edge>>) -> Self {
        Self {
            vertices,
            triangles,
            edges,
        }
    }

    /// Returns the index of the first triangle containing `p`, widening the
    /// search with [`Triangle::contains_with_error`] if a plain scan finds
    /// nothing and `error > 0`.
    pub fn get_triangle(&self, p: Vector2f, error: f32) -> Option<usize> {
        if let Some(i) = self
            .triangles
            .iter()
            .position(|tri| tri.contains(&self.vertices, p, true))
        {
            return Some(i);
        }
        if error == 0.0 {
            return None;
        }
        self.triangles
            .iter()
            .position(|tri| tri.contains_with_error(&self.vertices, p, error))
    }

    /// Index `i` such that `self.edges[t][i].index == neighbor`, or `None`.
    fn get_neighbor_index(&self, t: usize, neighbor: usize) -> Option<usize> {
        self.edges[t].iter().position(|e| e.index == neighbor)
    }

    /// A* over the triangle adjacency graph from `begin` to `end`, followed by
    /// the funnel algorithm. Returns an empty path if either point is off the
    /// mesh or no route exists; returns `[begin, end]` directly if they share
    /// a triangle.
    pub fn pathfind(&self, begin: Vector2f, end: Vector2f) -> Path {
        let Some(begin_idx) = self.get_triangle(begin, 0.05) else {
            return Vec::new();
        };
        let Some(end_idx) = self.get_triangle(end, 0.0) else {
            return Vec::new();
        };
        if begin_idx == end_idx {
            return vec![begin, end];
        }

        let h = |a: Vector2f, b: Vector2f| (a.x - b.x).abs().max((a.y - b.y).abs());

        let mut queue = BinaryHeap::new();
        let mut lut: HashMap<usize, Node> = HashMap::new();

        let start = Node {
            id: begin_idx,
            parent: begin_idx,
            pos: begin,
            g: 0.0,
            f: h(begin, end),
        };
        lut.insert(begin_idx, start);
        queue.push(HeapEntry(start));

        while let Some(HeapEntry(current)) = queue.pop() {
            if current.id == end_idx {
                return self.reconstruct(&lut, end_idx, begin, end);
            }

            // Stale queue entry: a better path to this id was already found.
            if let Some(best) = lut.get(&current.id) {
                if current.g > best.g {
                    continue;
                }
            }

            for edge in &self.edges[current.id] {
                let dist = (current.pos - edge.center).length();
                let tentative_g = current.g + dist;

                let known_g = lut.get(&edge.index).map(|n| n.g).unwrap_or(f32::INFINITY);
                if tentative_g < known_g {
                    let next = Node {
                        id: edge.index,
                        parent: current.id,
                        pos: edge.center,
                        g: tentative_g,
                        f: tentative_g + h(edge.center, end),
                    };
                    lut.insert(edge.index, next);
                    queue.push(HeapEntry(next));
                }
            }
        }

        Vec::new()
    }

    fn reconstruct(
        &self,
        lut: &HashMap<usize, Node>,
        end_idx: usize,
        begin: Vector2f,
        end: Vector2f,
    ) -> Path {
        let mut corridor = vec![CrossInfo {
            next_index: end_idx,
            neighbor_index: None,
        }];

        let mut cur = end_idx;
        while lut[&cur].parent != cur {
            let parent = lut[&cur].parent;
            let neighbor_index = self.get_neighbor_index(parent, cur);
            cur = parent;
            corridor.insert(
                0,
                CrossInfo {
                    next_index: cur,
                    neighbor_index,
                },
            );
        }

        funnel(self, &corridor, begin, end)
    }
}
