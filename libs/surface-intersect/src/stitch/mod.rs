//! # Segment Stitching
//!
//! Joins unordered intersection segments into polylines.
//!
//! ## Algorithm
//!
//! 1. Sort all endpoints lexicographically and weld those within
//!    `tolerance` into nodes (hash grid + union-find)
//! 2. Turn segments into undirected node edges, dropping self-loops and
//!    duplicates
//! 3. Split the edge graph into connected groups; groups with fewer than two
//!    edges are discarded
//! 4. Walk each group into polylines, preferring the straightest
//!    continuation at branch nodes
//!
//! Every choice is made on node indices, which follow the sorted endpoint
//! order, so the output does not depend on segment order or orientation.

mod disjoint_set;

pub use disjoint_set::DisjointSet;

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::intersect::IntersectionSegment;

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// An ordered chain of points along an intersection curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// Index of the connected group this polyline was walked from.
    pub group: usize,
    /// Points in walk order. Closed loops do not repeat the first point.
    pub points: Vec<DVec3>,
    /// True when the last point connects back to the first.
    pub closed: bool,
}

impl Polyline {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the polyline has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of edges, counting the closing edge of a loop.
    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// Total length, counting the closing edge of a loop.
    pub fn length(&self) -> f64 {
        let open: f64 = self.points.windows(2).map(|w| w[0].distance(w[1])).sum();
        match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) => open + last.distance(*first),
            _ => open,
        }
    }
}

/// Polylines produced by [`stitch_segments`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StitchResult {
    /// Polylines ordered by group, then by walk order within the group.
    pub polylines: Vec<Polyline>,
    /// Number of groups that produced polylines.
    pub group_count: usize,
    /// Number of groups dropped for having fewer than two edges.
    pub discarded_groups: usize,
}

// =============================================================================
// ENDPOINT WELDING
// =============================================================================

/// Smallest weld cell relative to the largest coordinate magnitude.
const CELL_RESOLUTION: f64 = 4.0 * f64::EPSILON;

/// Lexicographic order on points.
fn cmp_points(a: DVec3, b: DVec3) -> Ordering {
    a.x.total_cmp(&b.x)
        .then(a.y.total_cmp(&b.y))
        .then(a.z.total_cmp(&b.z))
}

/// Grid cell of a point, or `None` for non-finite coordinates.
fn cell_key(p: DVec3, inv: f64) -> Option<(i64, i64, i64)> {
    fn quantize(value: f64, inv: f64) -> Option<i64> {
        if !value.is_finite() {
            return None;
        }
        let q = (value * inv).floor();
        Some(q.clamp(i64::MIN as f64, i64::MAX as f64) as i64)
    }
    Some((quantize(p.x, inv)?, quantize(p.y, inv)?, quantize(p.z, inv)?))
}

/// Welds sorted points within `tolerance` of each other.
///
/// Returns the node of every point and the representative of every node.
/// Welding is transitive, and each node is represented by its smallest point.
fn weld_points(sorted: &[DVec3], tolerance: f64) -> (Vec<usize>, Vec<DVec3>) {
    let radius = if tolerance.is_finite() && tolerance > 0.0 {
        tolerance
    } else {
        0.0
    };
    // Cells never get finer than the coordinates can resolve, so keys stay
    // far inside the i64 range
    let scale = sorted
        .iter()
        .filter(|p| p.is_finite())
        .map(|p| p.abs().max_element())
        .fold(0.0, f64::max);
    let cell = radius.max(scale * CELL_RESOLUTION);
    let inv = if cell > 0.0 { 1.0 / cell } else { 1.0 };

    let mut sets = DisjointSet::new(sorted.len());
    let mut buckets: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::new();

    for (i, &p) in sorted.iter().enumerate() {
        // Non-finite points stay on their own
        let Some(key) = cell_key(p, inv) else {
            continue;
        };
        for dx in -1i64..=1 {
            for dy in -1i64..=1 {
                for dz in -1i64..=1 {
                    let lookup = (
                        key.0.saturating_add(dx),
                        key.1.saturating_add(dy),
                        key.2.saturating_add(dz),
                    );
                    if let Some(candidates) = buckets.get(&lookup) {
                        for &j in candidates {
                            if sorted[j].distance(p) <= radius {
                                sets.union(i, j);
                            }
                        }
                    }
                }
            }
        }
        buckets.entry(key).or_default().push(i);
    }

    // Roots are the smallest members, so they are visited before their sets
    let mut node_of = vec![0usize; sorted.len()];
    let mut representatives = Vec::new();
    for i in 0..sorted.len() {
        let root = sets.find(i);
        if root == i {
            node_of[i] = representatives.len();
            representatives.push(sorted[i]);
        } else {
            node_of[i] = node_of[root];
        }
    }
    (node_of, representatives)
}

// =============================================================================
// WALKING
// =============================================================================

/// Edges of one connected group, with adjacency sorted by neighbor.
struct Group {
    edges: Vec<(usize, usize)>,
    adjacency: BTreeMap<usize, Vec<(usize, usize)>>,
}

impl Group {
    fn new(edges: Vec<(usize, usize)>) -> Self {
        let mut adjacency: BTreeMap<usize, Vec<(usize, usize)>> = BTreeMap::new();
        for (e, &(a, b)) in edges.iter().enumerate() {
            adjacency.entry(a).or_default().push((b, e));
            adjacency.entry(b).or_default().push((a, e));
        }
        for neighbors in adjacency.values_mut() {
            neighbors.sort_unstable();
        }
        Self { edges, adjacency }
    }

    fn remaining_degree(&self, node: usize, used: &[bool]) -> usize {
        self.adjacency
            .get(&node)
            .map_or(0, |n| n.iter().filter(|(_, e)| !used[*e]).count())
    }

    /// Dangling ends first, then odd nodes, then anything with edges left.
    fn pick_start(&self, used: &[bool]) -> Option<usize> {
        let open: Vec<(usize, usize)> = self
            .adjacency
            .keys()
            .map(|&node| (node, self.remaining_degree(node, used)))
            .filter(|&(_, degree)| degree > 0)
            .collect();
        open.iter()
            .find(|(_, degree)| *degree == 1)
            .or_else(|| open.iter().find(|(_, degree)| degree % 2 == 1))
            .or_else(|| open.first())
            .map(|&(node, _)| node)
    }

    /// Next unused edge out of `current`: the smallest turning angle, ties
    /// broken by node index.
    fn next_edge(
        &self,
        current: usize,
        previous: Option<usize>,
        used: &[bool],
        points: &[DVec3],
    ) -> Option<(usize, usize)> {
        let candidates = self
            .adjacency
            .get(&current)?
            .iter()
            .copied()
            .filter(|(_, e)| !used[*e]);

        let Some(previous) = previous else {
            return candidates.min();
        };
        let incoming = points[current] - points[previous];
        candidates
            .map(|(node, e)| {
                let angle = incoming.angle_between(points[node] - points[current]);
                let angle = if angle.is_nan() { std::f64::consts::PI } else { angle };
                (angle, node, e)
            })
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, node, e)| (node, e))
    }

    /// Walks every edge exactly once, returning node paths and closure flags.
    fn walk(&self, points: &[DVec3]) -> Vec<(Vec<usize>, bool)> {
        let mut used = vec![false; self.edges.len()];
        let mut paths = Vec::new();

        while let Some(start) = self.pick_start(&used) {
            let mut path = vec![start];
            let mut previous = None;
            let mut current = start;
            while let Some((next, e)) = self.next_edge(current, previous, &used, points) {
                used[e] = true;
                path.push(next);
                previous = Some(current);
                current = next;
            }

            let closed = path.len() > 3 && path.first() == path.last();
            if closed {
                path.pop();
            }
            paths.push((path, closed));
        }
        paths
    }
}

// =============================================================================
// STITCHING
// =============================================================================

/// Stitches segments into polylines.
///
/// Endpoints closer than `tolerance` are treated as the same point. The
/// result depends only on the set of segments, not on their order or the
/// orientation of each one.
///
/// # Example
///
/// ```rust
/// use surface_intersect::intersect::IntersectionSegment;
/// use surface_intersect::stitch::stitch_segments;
/// use glam::DVec3;
///
/// let seg = |a: DVec3, b: DVec3| IntersectionSegment {
///     start: a,
///     end: b,
///     triangle_a: 0,
///     triangle_b: 0,
/// };
/// let result = stitch_segments(
///     &[seg(DVec3::X, DVec3::ZERO), seg(DVec3::X, DVec3::new(2.0, 0.0, 0.0))],
///     1e-6,
/// );
/// assert_eq!(result.polylines.len(), 1);
/// assert_eq!(result.polylines[0].points.len(), 3);
/// ```
pub fn stitch_segments(segments: &[IntersectionSegment], tolerance: f64) -> StitchResult {
    if segments.is_empty() {
        return StitchResult::default();
    }

    // Endpoint slot 2i is segment i's start, 2i + 1 its end
    let mut endpoints: Vec<(DVec3, usize)> = segments
        .iter()
        .enumerate()
        .flat_map(|(i, s)| [(s.start, 2 * i), (s.end, 2 * i + 1)])
        .collect();
    endpoints.sort_by(|a, b| cmp_points(a.0, b.0));

    let sorted: Vec<DVec3> = endpoints.iter().map(|(p, _)| *p).collect();
    let (node_of, points) = weld_points(&sorted, tolerance);

    let mut node_of_slot = vec![0usize; endpoints.len()];
    for (position, &(_, slot)) in endpoints.iter().enumerate() {
        node_of_slot[slot] = node_of[position];
    }

    let mut edges = BTreeSet::new();
    let mut self_loops = 0usize;
    for i in 0..segments.len() {
        let (a, b) = (node_of_slot[2 * i], node_of_slot[2 * i + 1]);
        if a == b {
            self_loops += 1;
            continue;
        }
        edges.insert((a.min(b), a.max(b)));
    }

    // Connected groups, keyed by their smallest node
    let mut components = DisjointSet::new(points.len());
    for &(a, b) in &edges {
        components.union(a, b);
    }
    // Nodes left without edges by collapsed segments form no group
    let mut groups: BTreeMap<usize, Vec<(usize, usize)>> = BTreeMap::new();
    for &(a, b) in &edges {
        groups.entry(components.find(a)).or_default().push((a, b));
    }

    let mut result = StitchResult::default();
    for edges in groups.into_values() {
        if edges.len() < 2 {
            result.discarded_groups += 1;
            continue;
        }
        let group = result.group_count;
        result.group_count += 1;

        let paths = Group::new(edges).walk(&points);
        log::trace!("group {}: {} polyline(s)", group, paths.len());
        result
            .polylines
            .extend(paths.into_iter().map(|(path, closed)| Polyline {
                group,
                points: path.into_iter().map(|n| points[n]).collect(),
                closed,
            }));
    }

    log::debug!(
        "stitched {} segments ({} nodes, {} edges, {} collapsed) into {} polylines over {} groups, {} discarded",
        segments.len(),
        points.len(),
        edges.len(),
        self_loops,
        result.polylines.len(),
        result.group_count,
        result.discarded_groups
    );
    result
}
