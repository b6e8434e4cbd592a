//! The median-split construction is heavily based on
//! <https://godoc.org/code.google.com/p/eaburns/kdtree>
//!
//! Original code is under New BSD License.
//! Author: Ethan Burns <burns.ethan@gmail.com>

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::distance::{METERS_PER_DEGREE, fast_approximate_distance, meters_per_degree_lon};
use super::point::{Coord, LAT};

/// KD-Tree implementation for nearest neighbour queries
///
/// Coordinates are separated from nodes. Nodes hold only indices into the coordinate slice.
/// The split axis alternates latitude, longitude, latitude, ... by depth.
pub struct KDTree<'a> {
    /// All coordinates in the tree
    pub coords: &'a [Coord],
    /// Root node of the tree
    pub root: Option<Box<KDTreeNode>>,
}

/// A node in the K-D tree
pub struct KDTreeNode {
    /// Index of the coordinate associated with this node
    pub point_id: usize,
    /// Indices of coordinates equal to this node's coordinate
    pub equal_ids: Vec<usize>,

    split: usize,
    left: Option<Box<KDTreeNode>>,
    right: Option<Box<KDTreeNode>>,
}

/// Neighbor is a single k-nearest-neighbour result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index into the tree's coordinates
    pub id: usize,
    /// Approximate distance from the query target in meters
    pub distance: f64,
}

/// Heap entry ordered by (distance, id) so equal distances resolve the same way every time
struct Candidate(Neighbor);

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .distance
            .total_cmp(&other.0.distance)
            .then(self.0.id.cmp(&other.0.id))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl KDTree<'_> {
    /// Finds the `k` nearest neighbours of the coordinate at index `target`
    ///
    /// The target itself is never part of the result, coincident coordinates are.
    /// Results are ordered by ascending approximate distance.
    pub fn k_nearest(&self, target: usize, k: usize) -> Vec<Neighbor> {
        if k == 0 || target >= self.coords.len() {
            return Vec::new();
        }

        let mut best = BinaryHeap::with_capacity(k + 1);
        self.k_nearest_recursive(self.root.as_deref(), target, k, &mut best);

        best.into_sorted_vec().into_iter().map(|c| c.0).collect()
    }

    fn k_nearest_recursive(
        &self,
        t: Option<&KDTreeNode>,
        target: usize,
        k: usize,
        best: &mut BinaryHeap<Candidate>,
    ) {
        let t = match t {
            None => return,
            Some(t) => t,
        };

        let pt = &self.coords[target];
        let node_pt = &self.coords[t.point_id];
        let diff = pt.0[t.split] - node_pt.0[t.split];

        let (this_side, other_side) = if diff < 0.0 {
            (t.left.as_deref(), t.right.as_deref())
        } else {
            (t.right.as_deref(), t.left.as_deref())
        };

        self.k_nearest_recursive(this_side, target, k, best);

        let distance = fast_approximate_distance(pt, node_pt);
        for id in std::iter::once(t.point_id).chain(t.equal_ids.iter().copied()) {
            if id != target {
                offer(best, k, Neighbor { id, distance });
            }
        }

        // Distance across the split plane, measured with the target's scale
        let gap = if t.split == LAT {
            diff.abs() * METERS_PER_DEGREE
        } else {
            diff.abs() * meters_per_degree_lon(pt.lat())
        };
        let worst = best.peek().map_or(f64::INFINITY, |c| c.0.distance);
        if best.len() < k || gap <= worst {
            self.k_nearest_recursive(other_side, target, k, best);
        }
    }

    /// Returns the height of the K-D tree
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.height())
    }
}

/// Keeps at most `k` best candidates, the worst one on top of the heap
fn offer(best: &mut BinaryHeap<Candidate>, k: usize, n: Neighbor) {
    let candidate = Candidate(n);
    if best.len() < k {
        best.push(candidate);
    } else if best.peek().is_some_and(|worst| candidate < *worst) {
        best.pop();
        best.push(candidate);
    }
}

impl KDTreeNode {
    fn height(&self) -> usize {
        let ht = self.left.as_ref().map_or(0, |l| l.height());
        let rht = self.right.as_ref().map_or(0, |r| r.height());
        ht.max(rht) + 1
    }
}

/// Creates a new K-D tree built from the given coordinates
pub fn new_kd_tree(coords: &[Coord]) -> KDTree<'_> {
    let mut result = KDTree { coords, root: None };

    if !coords.is_empty() {
        result.root = build_tree(0, &pre_sort(coords));
    }

    result
}

/// Builds a tree node by finding the median point and recursively building left and right subtrees
fn build_tree(depth: usize, nodes: &PreSorted) -> Option<Box<KDTreeNode>> {
    let split = depth % 2;
    match nodes.cur[split].len() {
        0 => None,
        1 => Some(Box::new(KDTreeNode {
            point_id: nodes.cur[split][0],
            equal_ids: Vec::new(),
            split,
            left: None,
            right: None,
        })),
        _ => {
            let (med, equal, left, right) = nodes.split_med(split);
            Some(Box::new(KDTreeNode {
                point_id: med,
                equal_ids: equal,
                split,
                left: build_tree(depth + 1, &left),
                right: build_tree(depth + 1, &right),
            }))
        }
    }
}

/// Holds node indices pre-sorted on each dimension
struct PreSorted<'a> {
    coords: &'a [Coord],
    /// Currently sorted set of point IDs by dimension
    cur: [Vec<usize>; 2],
}

/// Pre-sorts nodes on each dimension
///
/// Ties fall back to the other dimension, then to the index, so identical
/// coordinates end up next to each other in a stable order.
fn pre_sort(coords: &[Coord]) -> PreSorted<'_> {
    let mut p = PreSorted {
        coords,
        cur: [Vec::new(), Vec::new()],
    };
    for i in 0..2 {
        p.cur[i] = (0..coords.len()).collect();
        p.cur[i].sort_by(|&a, &b| {
            coords[a].0[i]
                .total_cmp(&coords[b].0[i])
                .then(coords[a].0[1 - i].total_cmp(&coords[b].0[1 - i]))
                .then(a.cmp(&b))
        });
    }
    p
}

impl<'a> PreSorted<'a> {
    /// Returns the median node on the split dimension and two PreSorted structs
    /// that contain the nodes (still sorted on each dimension) that are less than
    /// and greater than or equal to the median node value on the given splitting dimension.
    fn split_med(&self, dim: usize) -> (usize, Vec<usize>, PreSorted<'a>, PreSorted<'a>) {
        let cur = &self.cur[dim];
        let mut m = cur.len() / 2;
        while m > 0 && self.coords[cur[m - 1]].0[dim] == self.coords[cur[m]].0[dim] {
            m -= 1;
        }
        let mut mh = m;
        while mh < cur.len() - 1 && self.coords[cur[mh + 1]] == self.coords[cur[m]] {
            mh += 1;
        }
        let med = cur[m];
        let equal = cur[m + 1..=mh].to_vec();
        let pivot = self.coords[med].0[dim];

        let mut left = PreSorted {
            coords: self.coords,
            cur: [Vec::new(), Vec::new()],
        };
        left.cur[dim] = cur[..m].to_vec();

        let mut right = PreSorted {
            coords: self.coords,
            cur: [Vec::new(), Vec::new()],
        };
        right.cur[dim] = cur[mh + 1..].to_vec();

        let other = 1 - dim;
        left.cur[other] = Vec::with_capacity(self.cur[other].len());
        right.cur[other] = Vec::with_capacity(self.cur[other].len());

        for &n in &self.cur[other] {
            if n == med || equal.contains(&n) {
                continue;
            }
            if self.coords[n].0[dim] < pivot {
                left.cur[other].push(n);
            } else {
                right.cur[other].push(n);
            }
        }

        (med, equal, left, right)
    }
}
