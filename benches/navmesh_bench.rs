use criterion::{black_box, criterion_group, criterion_main, Criterion};
use navmesh::geometry::Vector2f;
use navmesh::mesh::{Edge, NavMesh, Triangle};

/// Builds a corridor of `n` unit squares laid end to end along the x axis,
/// each square split into two triangles, with full inter-triangle adjacency.
/// Pathfinding from one end to the other crosses every square, exercising
/// both the A* search and the funnel over a long, narrow corridor.
fn strip_mesh(n: usize) -> NavMesh {
    let mut vertices = Vec::with_capacity(2 * (n + 1));
    for j in 0..=n {
        vertices.push(Vector2f::new(j as f32, 0.0));
        vertices.push(Vector2f::new(j as f32, 1.0));
    }

    let mut triangles = Vec::with_capacity(2 * n);
    for i in 0..n {
        let bl = 2 * i;
        let br = 2 * (i + 1);
        let tl = 2 * i + 1;
        let tr = 2 * (i + 1) + 1;
        triangles.push(Triangle::new(bl, br, tr)); // lower, index 2i
        triangles.push(Triangle::new(bl, tr, tl)); // upper, index 2i+1
    }

    let mut edges = vec![Vec::new(); 2 * n];
    for i in 0..n {
        let lower = 2 * i;
        let upper = 2 * i + 1;
        let bl = 2 * i;
        let tr = 2 * (i + 1) + 1;

        edges[lower].push(Edge {
            index: upper,
            center: (vertices[bl] + vertices[tr]) * 0.5,
            a: bl,
            b: tr,
        });
        edges[upper].push(Edge {
            index: lower,
            center: (vertices[bl] + vertices[tr]) * 0.5,
            a: tr,
            b: bl,
        });

        if i + 1 < n {
            let br = 2 * (i + 1);
            let next_upper = 2 * (i + 1) + 1;
            edges[lower].push(Edge {
                index: next_upper,
                center: (vertices[br] + vertices[tr]) * 0.5,
                a: br,
                b: tr,
            });
            edges[next_upper].push(Edge {
                index: lower,
                center: (vertices[br] + vertices[tr]) * 0.5,
                a: tr,
                b: br,
            });
        }
    }

    NavMesh::new(vertices, triangles, edges)
}

fn bench_corridor_short(c: &mut Criterion) {
    let mesh = strip_mesh(16);
    let begin = Vector2f::new(0.5, 0.5);
    let end = Vector2f::new(15.5, 0.5);

    c.bench_function("pathfind_corridor_16", |b| {
        b.iter(|| mesh.pathfind(black_box(begin), black_box(end)))
    });
}

fn bench_corridor_long(c: &mut Criterion) {
    let mesh = strip_mesh(512);
    let begin = Vector2f::new(0.5, 0.5);
    let end = Vector2f::new(511.5, 0.5);

    c.bench_function("pathfind_corridor_512", |b| {
        b.iter(|| mesh.pathfind(black_box(begin), black_box(end)))
    });
}

criterion_group!(benches, bench_corridor_short, bench_corridor_long);
criterion_main!(benches);
