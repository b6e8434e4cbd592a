//! Cuts the spanning tree at the linking threshold and separates clusters from noise

use bitvec::prelude::*;

use super::mst::Edge;
use super::union_find::UnionFind;

/// Connected components of the spanning tree after dropping edges heavier than `threshold`
///
/// Components are ordered by their first member, members are ascending.
pub fn extract_components(n: usize, mst: &[Edge], threshold: f64) -> Vec<Vec<usize>> {
    let mut uf = UnionFind::new(n);
    for edge in mst.iter().filter(|e| e.weight <= threshold) {
        uf.union(edge.a, edge.b);
    }
    uf.components()
}

/// Splits components into clusters (at least `min_cluster_size` members) and noise indices
///
/// Every index in `0..n` ends up in exactly one of the two outputs.
pub fn classify(
    components: Vec<Vec<usize>>,
    min_cluster_size: usize,
    n: usize,
) -> (Vec<Vec<usize>>, Vec<usize>) {
    let mut members = bitvec![0; n];
    let mut clusters = Vec::new();

    for component in components {
        if component.len() < min_cluster_size {
            continue;
        }
        for &i in &component {
            debug_assert!(!members[i], "point {i} assigned to two clusters");
            members.set(i, true);
        }
        clusters.push(component);
    }

    let noise: Vec<usize> = members.iter_zeros().collect();
    debug_assert_eq!(
        clusters.iter().map(Vec::len).sum::<usize>() + noise.len(),
        n,
        "clusters and noise must partition the input"
    );

    (clusters, noise)
}
