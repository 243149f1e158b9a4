//! The funnel (string-pulling) algorithm: turns a corridor of adjacent
//! triangles into the taut polyline that hugs inner corners.

use crate::geometry::Vector2f;
use crate::mesh::NavMesh;

/// One hop of the A*-derived corridor: arrive at triangle `next_index`, having
/// crossed into it through the portal at `neighbor_index` within the
/// *previous* triangle's edge list. The terminal hop carries `neighbor_index
/// = None` ("arrive at the final triangle; no further portal").
#[derive(Clone, Copy, Debug)]
pub struct CrossInfo {
    pub next_index: usize,
    pub neighbor_index: Option<usize>,
}

/// A funnel-list entry: a portal endpoint plus the index it occupies in its
/// own list (`list_l` or `list_r`), so a crossover can resume the scan right
/// after the vertex that caused it.
#[derive(Clone, Copy)]
struct FunnelVertex {
    list_index: usize,
    pos: Vector2f,
}

/// `true` iff `v` rotated clockwise, dotted with `u`, is negative — i.e. the
/// rotation from `v` to `u` is counter-clockwise ("`u` is to the left of `v`").
fn pos_angle(u: Vector2f, v: Vector2f) -> bool {
    v.perp_cw().dot(u) < 0.0
}

/// Runs the funnel over `corridor`, the sequence of triangles A* crossed
/// between `begin` and `end`.
///
/// Degenerate case: a corridor of length 2 referencing the same triangle
/// twice (the trivial same-triangle path) returns `[begin, end]` directly.
pub fn funnel(mesh: &NavMesh, corridor: &[CrossInfo], begin: Vector2f, end: Vector2f) -> Vec<Vector2f> {
    if corridor.len() == 2 && corridor[0].next_index == corridor[1].next_index {
        return vec![begin, end];
    }

    let mut list_l: Vec<FunnelVertex> = Vec::new();
    let mut list_r: Vec<FunnelVertex> = Vec::new();
    for hop in corridor {
        if let Some(neighbor_index) = hop.neighbor_index {
            let edge = &mesh.edges[hop.next_index][neighbor_index];
            list_l.push(FunnelVertex {
                list_index: list_l.len(),
                pos: mesh.vertices[edge.a],
            });
            list_r.push(FunnelVertex {
                list_index: list_r.len(),
                pos: mesh.vertices[edge.b],
            });
        }
    }
    list_l.push(FunnelVertex {
        list_index: list_l.len(),
        pos: end,
    });
    list_r.push(FunnelVertex {
        list_index: list_r.len(),
        pos: end,
    });

    let mut result = vec![begin];
    let mut root = begin;
    let mut arm_l = list_l[0];
    let mut arm_r = list_r[0];
    let mut idx_l = 0usize;
    let mut idx_r = 0usize;

    loop {
        idx_l += 1;
        if idx_l == list_l.len() {
            result.push(end);
            return result;
        }
        let pos_new = list_l[idx_l].pos;
        let pos_old = arm_l.pos;
        if !pos_angle(pos_old - root, pos_new - root) {
            let pos_right = arm_r.pos;
            if pos_angle(pos_new - root, pos_right - root) {
                root = pos_right;
                result.push(root);
                idx_r = arm_r.list_index + 1;
                arm_r = list_r[idx_r];
                idx_l = idx_r;
                arm_l = list_l[idx_l];
            } else {
                arm_l = list_l[idx_l];
            }
        }

        idx_r += 1;
        if idx_r == list_r.len() {
            result.push(end);
            return result;
        }
        let pos_new = list_r[idx_r].pos;
        let pos_old = arm_r.pos;
        if !pos_angle(pos_new - root, pos_old - root) {
            let pos_left = arm_l.pos;
            if pos_angle(pos_left - root, pos_new - root) {
                root = pos_left;
                result.push(root);
                idx_l = arm_l.list_index + 1;
                arm_l = list_l[idx_l];
                idx_r = idx_l;
                arm_r = list_r[idx_r];
            } else {
                arm_r = list_r[idx_r];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Edge, NavMesh, Triangle};

    fn unit_square_mesh() -> NavMesh {
        let vertices = vec![
            Vector2f::new(0.0, 0.0),
            Vector2f::new(1.0, 0.0),
            Vector2f::new(1.0, 1.0),
            Vector2f::new(0.0, 1.0),
        ];
        let triangles = vec![Triangle::new(0, 1, 2), Triangle::new(0, 2, 3)];
        let edges = vec![
            vec![Edge {
                index: 1,
                center: Vector2f::new(0.5, 0.5),
                a: 2,
                b: 0,
            }],
            vec![Edge {
                index: 0,
                center: Vector2f::new(0.5, 0.5),
                a: 0,
                b: 2,
            }],
        ];
        NavMesh::new(vertices, triangles, edges)
    }

    #[test]
    fn degenerate_same_triangle_corridor_returns_endpoints() {
        let mesh = unit_square_mesh();
        let begin = Vector2f::new(0.1, 0.1);
        let end = Vector2f::new(0.2, 0.3);
        let corridor = [
            CrossInfo {
                next_index: 0,
                neighbor_index: None,
            },
            CrossInfo {
                next_index: 0,
                neighbor_index: None,
            },
        ];
        assert_eq!(funnel(&mesh, &corridor, begin, end), vec![begin, end]);
    }

    #[test]
    fn single_portal_convex_region_needs_no_bend() {
        let mesh = unit_square_mesh();
        let begin = Vector2f::new(0.1, 0.9);
        let end = Vector2f::new(0.9, 0.1);
        let corridor = [
            CrossInfo {
                next_index: 1,
                neighbor_index: Some(0),
            },
            CrossInfo {
                next_index: 0,
                neighbor_index: None,
            },
        ];
        let path = funnel(&mesh, &corridor, begin, end);
        assert_eq!(path, vec![begin, end]);
    }

    #[test]
    fn pos_angle_detects_left_turn() {
        let u = Vector2f::new(1.0, 0.0);
        let v = Vector2f::new(0.0, 1.0);
        assert!(!pos_angle(u, v));
        assert!(pos_angle(v, u));
    }

    /// An L-shaped region fanned into four triangles from its outer corner
    /// `(0,0)`, with a reflex vertex at `(1,1)`. Crossing all three portals
    /// shares `(0,0)` on one side the whole way, so the funnel's left arm
    /// rides it out to the end while the right arm tightens onto `(1,2)`,
    /// then `(1,1)`, forcing a crossover restart before the right arm can
    /// reach `(2,1)`. This is the spec's own "around a corner" scenario.
    fn l_shaped_mesh() -> NavMesh {
        let vertices = vec![
            Vector2f::new(0.0, 0.0), // 0
            Vector2f::new(2.0, 0.0), // 1
            Vector2f::new(2.0, 1.0), // 2
            Vector2f::new(1.0, 1.0), // 3 - reflex vertex
            Vector2f::new(1.0, 2.0), // 4
            Vector2f::new(0.0, 2.0), // 5
        ];
        let triangles = vec![
            Triangle::new(0, 1, 2),
            Triangle::new(0, 2, 3),
            Triangle::new(0, 3, 4),
            Triangle::new(0, 4, 5),
        ];
        let edges = vec![
            // T0: borders T1 via (0,2)
            vec![Edge {
                index: 1,
                center: Vector2f::new(1.0, 0.5),
                a: 0,
                b: 2,
            }],
            // T1: borders T0 via (0,2), T2 via (0,3)
            vec![
                Edge {
                    index: 0,
                    center: Vector2f::new(1.0, 0.5),
                    a: 0,
                    b: 2,
                },
                Edge {
                    index: 2,
                    center: Vector2f::new(0.5, 0.5),
                    a: 0,
                    b: 3,
                },
            ],
            // T2: borders T1 via (0,3), T3 via (0,4)
            vec![
                Edge {
                    index: 1,
                    center: Vector2f::new(0.5, 0.5),
                    a: 0,
                    b: 3,
                },
                Edge {
                    index: 3,
                    center: Vector2f::new(0.5, 1.0),
                    a: 0,
                    b: 4,
                },
            ],
            // T3: borders T2 via (0,4)
            vec![Edge {
                index: 2,
                center: Vector2f::new(0.5, 1.0),
                a: 0,
                b: 4,
            }],
        ];
        NavMesh::new(vertices, triangles, edges)
    }

    #[test]
    fn funnel_pulls_tight_around_reflex_corner() {
        let mesh = l_shaped_mesh();
        let begin = Vector2f::new(0.5, 2.0);
        let end = Vector2f::new(2.0, 0.5);

        // Corridor T3 -> T2 -> T1 -> T0, crossing the three portals that all
        // share (0,0) on their `a` side and (1,2)/(1,1)/(2,1) on their `b` side.
        let corridor = [
            CrossInfo {
                next_index: 3,
                neighbor_index: Some(0),
            },
            CrossInfo {
                next_index: 2,
                neighbor_index: Some(0),
            },
            CrossInfo {
                next_index: 1,
                neighbor_index: Some(0),
            },
            CrossInfo {
                next_index: 0,
                neighbor_index: None,
            },
        ];

        let path = funnel(&mesh, &corridor, begin, end);
        assert_eq!(path, vec![begin, Vector2f::new(1.0, 1.0), end]);

        // The bend is a mesh vertex referenced by the crossed T2->T1 portal's
        // `b` endpoint (spec §8 property 4: funnel containment).
        let crossed_edge = &mesh.edges[2][0];
        assert_eq!(path[1], mesh.vertices[crossed_edge.b]);
    }
}
