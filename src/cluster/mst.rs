//! Mutual-reachability graph and its minimum spanning tree

use std::cmp::Ordering;

use super::distance::haversine_distance;
use super::point::Coord;
use super::union_find::UnionFind;

/// Edge between two point indices, `a < b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    /// Mutual reachability distance in meters
    pub weight: f64,
}

#[inline]
pub fn mutual_reachability(distance: f64, core_a: f64, core_b: f64) -> f64 {
    distance.max(core_a).max(core_b)
}

/// Builds the complete mutual-reachability graph as a flat edge list
///
/// Quadratic in the number of points, callers gate large inputs.
pub fn mutual_reachability_edges(coords: &[Coord], core: &[f64]) -> Vec<Edge> {
    let n = coords.len();
    let mut edges = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for a in 0..n {
        for b in (a + 1)..n {
            let d = haversine_distance(&coords[a], &coords[b]);
            edges.push(Edge {
                a,
                b,
                weight: mutual_reachability(d, core[a], core[b]),
            });
        }
    }
    edges
}

/// Computes a minimum spanning forest with Kruskal's algorithm
///
/// Edges of equal weight are taken in order of their endpoint identifiers
/// (`ids[i]` names point `i`), then indices, so the result only depends on
/// the input.
pub fn minimum_spanning_tree(mut edges: Vec<Edge>, ids: &[&str]) -> Vec<Edge> {
    let n = ids.len();
    edges.sort_by(|x, y| {
        x.weight
            .total_cmp(&y.weight)
            .then_with(|| cmp_endpoints(x, y, ids))
    });

    let mut uf = UnionFind::new(n);
    let mut tree = Vec::with_capacity(n.saturating_sub(1));
    for edge in edges {
        if uf.union(edge.a, edge.b) {
            tree.push(edge);
            if tree.len() + 1 == n {
                break;
            }
        }
    }
    tree
}

fn cmp_endpoints(x: &Edge, y: &Edge, ids: &[&str]) -> Ordering {
    let key = |e: &Edge| {
        let (ia, ib) = (ids[e.a], ids[e.b]);
        if ia <= ib { (ia, ib) } else { (ib, ia) }
    };
    key(x).cmp(&key(y)).then((x.a, x.b).cmp(&(y.a, y.b)))
}
