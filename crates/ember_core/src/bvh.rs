//! Bounding volume hierarchy over a triangle set.
//!
//! The tree is stored as an arena of nodes indexed by `u32` handles rather
//! than as boxed child pointers: internal nodes hold child indices, leaves
//! hold indices into the externally owned triangle slice, and dropping the
//! arena frees the whole tree without a recursive destructor cascade.
//!
//! The builder performs an exhaustive split search: every triangle centroid
//! on every axis is tried as a candidate split plane and scored with a
//! surface-area cost. The search is O(n²) per level; tree shapes are fully
//! determined by the input order.

use ember_math::{Aabb, Ray, Vec3};

use crate::Triangle;

/// Maximum triangles per leaf before the builder attempts a split.
const LEAF_MAX_TRIS: usize = 2;

/// Maximum recursion depth; below this everything becomes a leaf.
const MAX_DEPTH: u32 = 20;

/// Payload of a BVH node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Leaf holding indices into the triangle slice the tree was built from.
    Leaf(Vec<u32>),
    /// Internal node with two child handles into the arena.
    Internal { left: u32, right: u32 },
}

/// A single node: bounds enclosing everything beneath it, plus its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct BvhNode {
    pub bounds: Aabb,
    pub kind: NodeKind,
}

/// Arena-allocated bounding volume hierarchy.
///
/// The tree never owns triangles; queries take the same slice the tree was
/// built from. Traversal is a pure function of `(tree, ray)` and safe to
/// issue concurrently from multiple threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    root: Option<u32>,
}

impl Bvh {
    /// Build a tree over a triangle slice.
    ///
    /// Never fails: an empty slice produces a tree whose every query
    /// misses, and any non-empty input produces a valid tree (worst case a
    /// single leaf holding everything).
    pub fn build(triangles: &[Triangle]) -> Self {
        if triangles.is_empty() {
            return Self {
                nodes: Vec::new(),
                root: None,
            };
        }

        let mut nodes = Vec::new();
        let tri_ids: Vec<u32> = (0..triangles.len() as u32).collect();
        let root = build_node(&mut nodes, triangles, tri_ids, 0);

        Self {
            nodes,
            root: Some(root),
        }
    }

    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Root handle, or `None` for a tree built from no triangles.
    pub fn root(&self) -> Option<u32> {
        self.root
    }

    /// All nodes in the arena.
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// Nearest-hit query against the tree.
    ///
    /// `triangles` must be the slice the tree was built from. Returns the
    /// smallest hit distance, or `None` if nothing is hit (including on an
    /// empty tree).
    pub fn intersect(&self, triangles: &[Triangle], ray: &Ray) -> Option<f32> {
        let root = self.root?;
        let inv_dir = ray.inv_direction();
        self.intersect_node(root, triangles, ray, inv_dir)
    }

    fn intersect_node(
        &self,
        id: u32,
        triangles: &[Triangle],
        ray: &Ray,
        inv_dir: Vec3,
    ) -> Option<f32> {
        let node = &self.nodes[id as usize];

        // Box miss prunes the whole subtree; this is the only pruning.
        node.bounds.intersect(ray.origin, inv_dir)?;

        match &node.kind {
            NodeKind::Leaf(tri_ids) => tri_ids
                .iter()
                .filter_map(|&i| triangles[i as usize].intersect(ray))
                .fold(None, |best, t| Some(best.map_or(t, |b: f32| b.min(t)))),

            // Both children are visited unconditionally; no front-to-back
            // ordering or early termination.
            NodeKind::Internal { left, right } => {
                let hit_left = self.intersect_node(*left, triangles, ray, inv_dir);
                let hit_right = self.intersect_node(*right, triangles, ray, inv_dir);

                match (hit_left, hit_right) {
                    (Some(l), Some(r)) => Some(l.min(r)),
                    (Some(l), None) => Some(l),
                    (None, r) => r,
                }
            }
        }
    }
}

/// Union of the bounds of a set of triangles.
fn bounds_of(triangles: &[Triangle], tri_ids: &[u32]) -> Aabb {
    let mut bounds = Aabb::EMPTY;
    for &i in tri_ids {
        bounds.expand_box(&triangles[i as usize].bounds());
    }
    bounds
}

/// Recursively build the subtree for `tri_ids`, returning its arena handle.
fn build_node(
    nodes: &mut Vec<BvhNode>,
    triangles: &[Triangle],
    tri_ids: Vec<u32>,
    depth: u32,
) -> u32 {
    let bounds = bounds_of(triangles, &tri_ids);

    if tri_ids.len() <= LEAF_MAX_TRIS || depth > MAX_DEPTH {
        return push_node(nodes, bounds, NodeKind::Leaf(tri_ids));
    }

    // Exhaustive split search: every centroid on every axis is a candidate.
    // Ties keep the first minimum in axis-major, index-minor order.
    let mut best_cost = f32::MAX;
    let mut best_split: Option<(usize, f32)> = None;

    for axis in 0..3 {
        for &i in &tri_ids {
            let split = triangles[i as usize].centroid()[axis];

            let mut left_bounds = Aabb::EMPTY;
            let mut right_bounds = Aabb::EMPTY;
            let mut left_count = 0usize;
            let mut right_count = 0usize;

            for &j in &tri_ids {
                let tri = &triangles[j as usize];
                if tri.centroid()[axis] < split {
                    left_bounds.expand_box(&tri.bounds());
                    left_count += 1;
                } else {
                    right_bounds.expand_box(&tri.bounds());
                    right_count += 1;
                }
            }

            if left_count == 0 || right_count == 0 {
                continue;
            }

            let cost = left_bounds.surface_area() * left_count as f32
                + right_bounds.surface_area() * right_count as f32;

            if cost < best_cost {
                best_cost = cost;
                best_split = Some((axis, split));
            }
        }
    }

    // No valid candidate (e.g. every centroid identical): leaf fallback.
    let Some((axis, split)) = best_split else {
        return push_node(nodes, bounds, NodeKind::Leaf(tri_ids));
    };

    let (left_ids, right_ids): (Vec<u32>, Vec<u32>) = tri_ids
        .iter()
        .partition(|&&i| triangles[i as usize].centroid()[axis] < split);

    // Cannot happen for a winning candidate, but keep the builder total.
    if left_ids.is_empty() || right_ids.is_empty() {
        return push_node(nodes, bounds, NodeKind::Leaf(tri_ids));
    }

    let left = build_node(nodes, triangles, left_ids, depth + 1);
    let right = build_node(nodes, triangles, right_ids, depth + 1);

    push_node(nodes, bounds, NodeKind::Internal { left, right })
}

fn push_node(nodes: &mut Vec<BvhNode>, bounds: Aabb, kind: NodeKind) -> u32 {
    let id = nodes.len() as u32;
    nodes.push(BvhNode { bounds, kind });
    id
}
