#[cfg(test)]
mod tests {
    use crate::cluster::Coord;
    use crate::cluster::distance::{METERS_PER_DEGREE, haversine_distance};
    use crate::cluster::extract::{classify, extract_components};
    use crate::cluster::mst::{
        Edge, minimum_spanning_tree, mutual_reachability, mutual_reachability_edges,
    };

    fn edge(a: usize, b: usize, weight: f64) -> Edge {
        Edge { a, b, weight }
    }

    #[test]
    fn test_mutual_reachability() {
        assert_eq!(mutual_reachability(10.0, 3.0, 4.0), 10.0);
        assert_eq!(mutual_reachability(1.0, 3.0, 4.0), 4.0);
        assert_eq!(mutual_reachability(1.0, f64::INFINITY, 4.0), f64::INFINITY);
    }

    #[test]
    fn test_mutual_reachability_edges() {
        let step = 10.0 / METERS_PER_DEGREE;
        let coords: Vec<Coord> = (0..4).map(|i| Coord::new(45.0 + i as f64 * step, 7.0)).collect();
        let core = vec![5.0, 50.0, 5.0, 5.0];

        let edges = mutual_reachability_edges(&coords, &core);
        assert_eq!(edges.len(), 6);
        for e in &edges {
            assert!(e.a < e.b);
            let d = haversine_distance(&coords[e.a], &coords[e.b]);
            assert_eq!(e.weight, d.max(core[e.a]).max(core[e.b]));
        }
        // the sparse point drags every edge touching it up to its core distance
        assert!(edges.iter().filter(|e| e.a == 1 || e.b == 1).all(|e| e.weight >= 50.0));
    }

    #[test]
    fn test_minimum_spanning_tree() {
        let edges = vec![
            edge(0, 1, 4.0),
            edge(0, 2, 1.0),
            edge(1, 2, 2.0),
            edge(1, 3, 5.0),
            edge(2, 3, 8.0),
            edge(3, 4, 3.0),
            edge(2, 4, 9.0),
        ];
        let ids = ["a", "b", "c", "d", "e"];

        let tree = minimum_spanning_tree(edges, &ids);
        assert_eq!(tree.len(), 4);
        assert_eq!(
            tree,
            vec![edge(0, 2, 1.0), edge(1, 2, 2.0), edge(3, 4, 3.0), edge(1, 3, 5.0)]
        );
        assert_eq!(tree.iter().map(|e| e.weight).sum::<f64>(), 11.0);
    }

    #[test]
    fn test_minimum_spanning_tree_ties_follow_identifiers() {
        // a triangle of equal weights, one edge has to go
        let ids = ["z", "y", "x"];
        let edges = vec![edge(0, 1, 1.0), edge(0, 2, 1.0), edge(1, 2, 1.0)];
        let reversed: Vec<Edge> = edges.iter().rev().copied().collect();

        let tree = minimum_spanning_tree(edges, &ids);
        // (x, y) sorts first, then (x, z)
        assert_eq!(tree, vec![edge(1, 2, 1.0), edge(0, 2, 1.0)]);
        assert_eq!(minimum_spanning_tree(reversed, &ids), tree);
    }

    #[test]
    fn test_minimum_spanning_tree_keeps_infinite_edges() {
        let ids = ["a", "b", "c"];
        let edges = vec![
            edge(0, 1, 3.0),
            edge(0, 2, f64::INFINITY),
            edge(1, 2, f64::INFINITY),
        ];
        let tree = minimum_spanning_tree(edges, &ids);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[1].weight, f64::INFINITY);
    }

    #[test]
    fn test_minimum_spanning_tree_degenerate() {
        assert!(minimum_spanning_tree(Vec::new(), &[]).is_empty());
        assert!(minimum_spanning_tree(Vec::new(), &["only"]).is_empty());
    }

    #[test]
    fn test_extract_components() {
        let mst = vec![
            edge(0, 1, 1.0),
            edge(1, 2, 2.0),
            edge(2, 3, 10.0),
            edge(3, 4, 1.5),
        ];
        assert_eq!(
            extract_components(6, &mst, 2.0),
            vec![vec![0, 1, 2], vec![3, 4], vec![5]]
        );
        assert_eq!(
            extract_components(6, &mst, 10.0),
            vec![vec![0, 1, 2, 3, 4], vec![5]]
        );
        assert_eq!(extract_components(3, &mst[..2], 0.5).len(), 3);
    }

    #[test]
    fn test_classify() {
        let components = vec![vec![0, 1, 2], vec![3, 4], vec![5]];

        let (clusters, noise) = classify(components.clone(), 2, 6);
        assert_eq!(clusters, vec![vec![0, 1, 2], vec![3, 4]]);
        assert_eq!(noise, vec![5]);

        let (clusters, noise) = classify(components.clone(), 3, 6);
        assert_eq!(clusters, vec![vec![0, 1, 2]]);
        assert_eq!(noise, vec![3, 4, 5]);

        let (clusters, noise) = classify(components, 1, 6);
        assert_eq!(clusters.len(), 3);
        assert!(noise.is_empty());
    }
}
