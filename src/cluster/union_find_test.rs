#[cfg(test)]
mod tests {
    use crate::cluster::union_find::UnionFind;

    #[test]
    fn test_union_and_find() {
        let mut uf = UnionFind::new(6);
        assert_eq!(uf.len(), 6);
        assert!(!uf.is_empty());

        assert!(uf.union(0, 1));
        assert!(uf.union(2, 3));
        assert!(uf.union(1, 3));
        assert!(!uf.union(0, 2));

        assert_eq!(uf.find(0), uf.find(3));
        assert_ne!(uf.find(0), uf.find(4));
        assert_ne!(uf.find(4), uf.find(5));
    }

    #[test]
    fn test_components_are_ordered() {
        let mut uf = UnionFind::new(7);
        uf.union(5, 1);
        uf.union(6, 3);
        uf.union(3, 1);
        uf.union(4, 2);

        assert_eq!(
            uf.components(),
            vec![vec![0], vec![1, 3, 5, 6], vec![2, 4]]
        );
    }

    #[test]
    fn test_empty() {
        let mut uf = UnionFind::new(0);
        assert!(uf.is_empty());
        assert!(uf.components().is_empty());
    }

    #[test]
    fn test_long_chain() {
        let n = 10_000;
        let mut uf = UnionFind::new(n);
        for i in 1..n {
            uf.union(i - 1, i);
        }
        let root = uf.find(0);
        assert!((0..n).all(|i| uf.find(i) == root));
        assert_eq!(uf.components().len(), 1);
    }
}
