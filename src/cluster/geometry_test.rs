#[cfg(test)]
mod tests {
    use crate::cluster::distance::{METERS_PER_DEGREE, haversine_distance};
    use crate::cluster::geometry::{
        base_radius, build_cluster, centroid, finalize_clusters, resolve_overlaps,
    };
    use crate::cluster::{BoundingBox, Cluster, Coord, Point};

    fn cluster_at(c: usize, lat: f64, lon: f64, radius: f64) -> Cluster {
        Cluster {
            c,
            ids: vec![format!("p{c}")],
            centroid: Coord::new(lat, lon),
            count: 1,
            thumbnail: None,
            radius,
        }
    }

    #[test]
    fn test_centroid_of_pair_is_midpoint() {
        let a = Coord::new(59.955982, 30.244759);
        let b = Coord::new(59.955975, 30.24472);
        let c = centroid(&[a, b]).unwrap();
        assert!((c.lat() - (a.lat() + b.lat()) / 2.0).abs() < 1e-9);
        assert!((c.lon() - (a.lon() + b.lon()) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_stays_in_bounds() {
        let coords = vec![
            Coord::new(59.955982, 30.244759),
            Coord::new(59.955975, 30.24472),
            Coord::new(59.96698, 30.244358),
            Coord::new(59.95698, 30.244358),
        ];
        let bounds = BoundingBox::of(&coords).unwrap();
        let c = centroid(&coords).unwrap();
        assert!(bounds.contains(&c));
        // the lone northern point pulls less than the southern crowd
        assert!(c.lat() < bounds.center().lat());
    }

    #[test]
    fn test_centroid_of_large_group_is_box_center() {
        let coords: Vec<Coord> = (0..8)
            .map(|i| Coord::new(10.0 + (i * i) as f64 * 0.0001, 20.0 + i as f64 * 0.0002))
            .collect();
        let bounds = BoundingBox::of(&coords).unwrap();
        assert_eq!(centroid(&coords).unwrap(), bounds.center());
    }

    #[test]
    fn test_centroid_degenerate() {
        assert!(centroid(&[]).is_none());
        let single = Coord::new(1.0, 2.0);
        assert_eq!(centroid(&[single]).unwrap(), single);
        assert_eq!(centroid(&[single, single, single]).unwrap(), single);
    }

    #[test]
    fn test_base_radius() {
        let t = 200.0;
        assert_eq!(base_radius(1, t), 20.0);
        assert!((base_radius(100, t) - 160.0).abs() < 1e-9);
        assert!((base_radius(5000, t) - 160.0).abs() < 1e-9);
        // ln(10) / ln(100) = 0.5
        assert!((base_radius(10, t) - 90.0).abs() < 1e-9);

        let mut last = 0.0;
        for count in 1..200 {
            let r = base_radius(count, t);
            assert!(r >= last && r > 0.0);
            assert!((20.0..=160.0).contains(&r));
            last = r;
        }
    }

    #[test]
    fn test_build_cluster() {
        let points = vec![
            Point::new("a", 1.0, 1.0),
            Point::new("b", 1.0001, 1.0).with_thumbnail("b.jpg"),
            Point::new("c", 1.0002, 1.0).with_thumbnail("c.jpg"),
        ];

        let cluster = build_cluster(4, &points, &[1, 2], 12.0).unwrap();
        assert_eq!(cluster.c, 4);
        assert_eq!(cluster.ids, vec!["b".to_string(), "c".to_string()]);
        assert_eq!(cluster.count, 2);
        assert_eq!(cluster.thumbnail.as_deref(), Some("b.jpg"));
        assert_eq!(cluster.radius, 12.0);

        let cluster = build_cluster(0, &points, &[0, 1], 12.0).unwrap();
        assert_eq!(cluster.thumbnail, None);

        assert!(build_cluster(0, &points, &[], 12.0).is_none());
    }

    #[test]
    fn test_resolve_overlaps() {
        let step = 100.0 / METERS_PER_DEGREE;
        let mut clusters = vec![
            cluster_at(0, 0.0, 0.0, 80.0),
            cluster_at(1, step, 0.0, 30.0),
            cluster_at(2, 10.0, 0.0, 80.0),
        ];
        resolve_overlaps(&mut clusters);

        // 80 + 30 > 100: the larger one is cut to 50, the smaller already fits
        assert!((clusters[0].radius - 50.0).abs() < 1e-6);
        assert_eq!(clusters[1].radius, 30.0);
        assert_eq!(clusters[2].radius, 80.0);
    }

    #[test]
    fn test_resolve_overlaps_coincident() {
        let mut clusters = vec![cluster_at(0, 5.0, 5.0, 40.0), cluster_at(1, 5.0, 5.0, 40.0)];
        resolve_overlaps(&mut clusters);
        assert_eq!(clusters[0].radius, 0.0);
        assert_eq!(clusters[1].radius, 0.0);
    }

    #[test]
    fn test_finalize_clusters_never_overlap() {
        let points: Vec<Point> = (0..12)
            .map(|i| {
                let (row, col) = ((i / 3) as f64, (i % 3) as f64);
                Point::new(format!("p{i}"), 48.0 + row * 0.0003, 2.0 + col * 0.0003)
            })
            .collect();
        let groups = vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8], vec![9, 10, 11]];

        let clusters = finalize_clusters(&points, &groups, 150.0);
        assert_eq!(clusters.len(), 4);
        for (i, a) in clusters.iter().enumerate() {
            assert_eq!(a.c, i);
            assert!(a.radius >= 0.0 && a.radius <= 0.8 * 150.0);
            for b in &clusters[i + 1..] {
                let d = haversine_distance(&a.centroid, &b.centroid);
                assert!(a.radius + b.radius <= d + 1e-9);
            }
        }
    }
}
